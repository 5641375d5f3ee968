use super::ApiClient;
use crate::error::Result;
use crate::filters::ListOptions;
use crate::models::{DockerHost, DockerHostData};
use crate::transport::{ApiRequest, Transport};

impl<T: Transport> ApiClient<T> {
    pub fn list_hosts(&self, options: &ListOptions) -> Result<Vec<DockerHost>> {
        self.list(self.ns_path("/hosts/")?, options)
    }

    pub fn create_host(&self, data: &DockerHostData) -> Result<DockerHost> {
        let request = ApiRequest::post(self.ns_path("/hosts/")?).json_body(Self::body(data)?);
        self.fetch(request)
    }

    pub fn update_host(&self, id: &str, data: &DockerHostData) -> Result<DockerHost> {
        let path = self.ns_path(&format!("/hosts/{}/", id))?;
        self.fetch(ApiRequest::put(path).json_body(Self::body(data)?))
    }

    pub fn delete_host(&self, id: &str) -> Result<()> {
        self.execute(ApiRequest::delete(self.ns_path(&format!("/hosts/{}/", id))?))
    }
}
