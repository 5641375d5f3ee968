use super::{ApiRequest, ApiResponse, Transport};
use crate::error::{Result, TbsError};
use std::time::Duration;

pub const AUTH_HEADER: &str = "AUTHORIZATION";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking HTTP transport rooted at the configured API URL.
pub struct HttpTransport {
    agent: ureq::Agent,
    root: String,
    token: Option<String>,
}

impl HttpTransport {
    pub fn new(root: impl Into<String>, token: Option<String>) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
        Self {
            agent,
            root: root.into(),
            token: token.filter(|t| !t.is_empty()),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.root.trim_end_matches('/'), path)
    }

    /// Value of the `AUTHORIZATION` header, if a token is configured.
    pub fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let url = self.url(&request.path);
        tracing::debug!(method = %request.method, %url, query = ?request.query, "sending request");

        let mut req = self
            .agent
            .request(request.method.as_str(), &url)
            .set("Accept", "application/json");
        if let Some(header) = self.auth_header() {
            req = req.set(AUTH_HEADER, &header);
        }
        for (key, value) in &request.query {
            req = req.query(key, value);
        }

        let result = match &request.body {
            Some(body) => req.send_json(body),
            None => req.call(),
        };

        match result {
            Ok(resp) => {
                let status = resp.status();
                let body = resp.into_string()?;
                tracing::debug!(status, bytes = body.len(), "response received");
                Ok(ApiResponse { status, body })
            }
            Err(ureq::Error::Status(code, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                tracing::debug!(status = code, "request rejected");
                Err(TbsError::Transport(format!("HTTP {}: {}", code, body.trim())))
            }
            Err(e) => Err(TbsError::Transport(e.to_string())),
        }
    }
}
