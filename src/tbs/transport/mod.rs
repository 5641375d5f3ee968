//! # Transport Layer
//!
//! The [`Transport`] trait is the only seam between the client and the
//! network. One call sends one request and returns one response; there is no
//! retry, no streaming and no concurrency.
//!
//! ## Implementations
//!
//! - [`http::HttpTransport`]: production transport over a blocking `ureq`
//!   agent. Owns the API root and attaches the `AUTHORIZATION` header to
//!   every request.
//! - [`memory::MemoryTransport`]: canned responses for tests. Records every
//!   request so tests can count list calls and inspect query parameters.
//!
//! Non-2xx statuses are reported as [`TbsError::Transport`] by the transport
//! itself, so callers only ever see successful bodies.
//!
//! [`TbsError::Transport`]: crate::error::TbsError::Transport

use crate::error::Result;
use serde::de::DeserializeOwned;
use std::fmt;

pub mod http;
pub mod memory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request relative to the API root.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn json_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Returns the first value of a query parameter.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// Decodes the body, treating an empty body as JSON `null`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        let text = if self.body.trim().is_empty() {
            "null"
        } else {
            self.body.as_str()
        };
        Ok(serde_json::from_str(text)?)
    }
}

/// Sends API requests.
pub trait Transport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        (**self).send(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_request_with_query() {
        let req = ApiRequest::get("/ns/projects/")
            .query("name", "demo")
            .query("limit", "10");
        assert_eq!(req.method, Method::Get);
        assert_eq!(req.query_value("name"), Some("demo"));
        assert_eq!(req.query_value("offset"), None);
    }

    #[test]
    fn empty_body_decodes_as_null() {
        let resp = ApiResponse {
            status: 204,
            body: String::new(),
        };
        let value: Option<serde_json::Value> = resp.json().unwrap();
        assert!(value.is_none());
    }
}
