use super::ApiClient;
use crate::error::Result;
use crate::models::{Trigger, TriggerData};
use crate::transport::{ApiRequest, Transport};

impl<T: Transport> ApiClient<T> {
    pub fn create_trigger(&self, data: &TriggerData) -> Result<Trigger> {
        let request = ApiRequest::post(self.ns_path("/triggers/")?).json_body(Self::body(data)?);
        self.fetch(request)
    }
}
