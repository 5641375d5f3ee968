use super::ApiClient;
use crate::error::Result;
use crate::filters::ListOptions;
use crate::models::{FileData, ProjectFile};
use crate::transport::{ApiRequest, Transport};

impl<T: Transport> ApiClient<T> {
    pub fn list_files(&self, options: &ListOptions) -> Result<Vec<ProjectFile>> {
        self.list(self.project_path("/project_files/")?, options)
    }

    /// Uploads base64 content as a JSON body.
    pub fn create_file(&self, data: &FileData) -> Result<ProjectFile> {
        let request =
            ApiRequest::post(self.project_path("/project_files/")?).json_body(Self::body(data)?);
        self.fetch(request)
    }

    pub fn delete_file(&self, id: &str) -> Result<()> {
        self.execute(ApiRequest::delete(
            self.project_path(&format!("/project_files/{}/", id))?,
        ))
    }
}
