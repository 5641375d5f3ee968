use super::{ApiRequest, ApiResponse, Method, Transport};
use crate::error::{Result, TbsError};
use std::cell::RefCell;

/// In-memory transport for testing.
/// Serves canned responses and records every request it receives.
#[derive(Default)]
pub struct MemoryTransport {
    routes: Vec<Route>,
    requests: RefCell<Vec<ApiRequest>>,
}

struct Route {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    reply: std::result::Result<String, String>,
}

impl Route {
    fn matches(&self, request: &ApiRequest) -> bool {
        self.method == request.method
            && self.path == request.path
            && self
                .query
                .iter()
                .all(|(k, v)| request.query_value(k) == Some(v.as_str()))
    }
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replies with `body` to any request for `method` + `path`.
    pub fn on(self, method: Method, path: &str, body: serde_json::Value) -> Self {
        self.on_query(method, path, &[], body)
    }

    /// Replies with `body` only when every `query` pair is present.
    /// Routes are tried in registration order.
    pub fn on_query(
        mut self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: serde_json::Value,
    ) -> Self {
        self.routes.push(Route {
            method,
            path: path.to_string(),
            query: owned_pairs(query),
            reply: Ok(body.to_string()),
        });
        self
    }

    /// Fails requests for `method` + `path` with a transport error.
    pub fn fail(mut self, method: Method, path: &str, message: &str) -> Self {
        self.routes.push(Route {
            method,
            path: path.to_string(),
            query: Vec::new(),
            reply: Err(message.to_string()),
        });
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    /// Number of recorded requests for `method` + `path`.
    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn last(&self) -> Option<ApiRequest> {
        self.requests.borrow().last().cloned()
    }
}

impl Transport for MemoryTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        self.requests.borrow_mut().push(request.clone());
        let route = self
            .routes
            .iter()
            .find(|route| route.matches(request))
            .ok_or_else(|| {
                TbsError::Transport(format!(
                    "HTTP 404: no route for {} {}",
                    request.method, request.path
                ))
            })?;
        match &route.reply {
            Ok(body) => Ok(ApiResponse::ok(body.clone())),
            Err(message) => Err(TbsError::Transport(message.clone())),
        }
    }
}

fn owned_pairs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serves_registered_route_and_records() {
        let transport = MemoryTransport::new().on(Method::Get, "/a/", json!([1, 2]));
        let resp = transport.send(&ApiRequest::get("/a/")).unwrap();
        assert_eq!(resp.body, "[1,2]");
        assert_eq!(transport.count(Method::Get, "/a/"), 1);
    }

    #[test]
    fn query_routes_are_selective() {
        let transport = MemoryTransport::new()
            .on_query(Method::Get, "/a/", &[("name", "x")], json!(["x"]))
            .on(Method::Get, "/a/", json!([]));

        let hit = transport
            .send(&ApiRequest::get("/a/").query("name", "x"))
            .unwrap();
        let miss = transport
            .send(&ApiRequest::get("/a/").query("name", "y"))
            .unwrap();
        assert_eq!(hit.body, "[\"x\"]");
        assert_eq!(miss.body, "[]");
    }

    #[test]
    fn unknown_route_is_transport_error() {
        let transport = MemoryTransport::new();
        let err = transport.send(&ApiRequest::delete("/nope/")).unwrap_err();
        assert!(matches!(err, TbsError::Transport(_)));
        assert_eq!(transport.requests().len(), 1);
    }
}
