use super::ApiClient;
use crate::error::Result;
use crate::models::{User, UserData};
use crate::transport::{ApiRequest, Transport};

/// Users are global; none of these paths carry a namespace.
impl<T: Transport> ApiClient<T> {
    pub fn create_user(&self, data: &UserData) -> Result<User> {
        self.fetch(ApiRequest::post("/users/").json_body(Self::body(data)?))
    }

    pub fn update_user(&self, id: &str, data: &UserData) -> Result<User> {
        self.fetch(ApiRequest::put(format!("/users/{}/", id)).json_body(Self::body(data)?))
    }

    pub fn delete_user(&self, id: &str) -> Result<()> {
        self.execute(ApiRequest::delete(format!("/users/{}/", id)))
    }
}
