use super::ApiClient;
use crate::error::Result;
use crate::filters::ListOptions;
use crate::models::{Server, ServerData};
use crate::transport::{ApiRequest, Transport};
use std::fmt;

/// Lifecycle actions posted to `servers/{id}/{action}/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerAction {
    Start,
    Stop,
    Terminate,
}

impl ServerAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerAction::Start => "start",
            ServerAction::Stop => "stop",
            ServerAction::Terminate => "terminate",
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            ServerAction::Start => "started",
            ServerAction::Stop => "stopped",
            ServerAction::Terminate => "terminated",
        }
    }
}

impl fmt::Display for ServerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn list_servers(&self, options: &ListOptions) -> Result<Vec<Server>> {
        self.list(self.project_path("/servers/")?, options)
    }

    pub fn create_server(&self, data: &ServerData) -> Result<Server> {
        let request =
            ApiRequest::post(self.project_path("/servers/")?).json_body(Self::body(data)?);
        self.fetch(request)
    }

    pub fn update_server(&self, id: &str, data: &ServerData) -> Result<Server> {
        let path = self.project_path(&format!("/servers/{}/", id))?;
        self.fetch(ApiRequest::patch(path).json_body(Self::body(data)?))
    }

    pub fn server_action(&self, id: &str, action: ServerAction) -> Result<()> {
        let path = self.project_path(&format!("/servers/{}/{}/", id, action))?;
        self.execute(ApiRequest::post(path))
    }
}
