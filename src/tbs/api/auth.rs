use super::ApiClient;
use crate::error::{Result, TbsError};
use crate::models::{JwtData, JwtToken};
use crate::transport::{ApiRequest, Transport};

impl<T: Transport> ApiClient<T> {
    /// Exchanges credentials for a JWT.
    pub fn obtain_token(&self, username: &str, password: &str) -> Result<String> {
        let body = Self::body(&JwtData {
            username: username.to_string(),
            password: password.to_string(),
        })?;
        let token: JwtToken = self.fetch(ApiRequest::post("/auth/jwt-token-auth/").json_body(body))?;
        if token.token.is_empty() {
            return Err(TbsError::Transport("Login response did not contain a token".into()));
        }
        Ok(token.token)
    }
}
