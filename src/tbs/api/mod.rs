//! # API Client
//!
//! [`ApiClient`] is the typed wrapper around the 3Blades REST API. It knows
//! the URL layout, the request and response shapes, and how to turn a
//! human-readable name into the identifier a path needs. It does **not**
//! print, prompt or read configuration files.
//!
//! ## Client Context
//!
//! Almost every path is scoped by a namespace, and most are further scoped by
//! a project ID. The [`ClientContext`] carries both for the lifetime of one
//! command:
//!
//! - `namespace`: required for every namespaced path. A blank namespace is a
//!   [`TbsError::Validation`] at the moment a path is built.
//! - `project`: the configured project *name*.
//! - the project *ID*: resolved lazily from the name, at most once, or seeded
//!   directly from configuration.
//!
//! ## Generic Over Transport
//!
//! `ApiClient<T: Transport>` is generic over how requests leave the process:
//! - Production: `ApiClient<HttpTransport>`
//! - Testing: `ApiClient<MemoryTransport>`
//!
//! ## Layout
//!
//! - `resolve`: name → ID lookups (the resolver)
//! - `auth`, `projects`, `servers`, `files`, `hosts`, `users`, `triggers`,
//!   `billing`: one typed method per endpoint

use crate::error::{Result, TbsError};
use crate::filters::ListOptions;
use crate::transport::{ApiRequest, Transport};
use once_cell::unsync::OnceCell;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod auth;
pub mod billing;
pub mod files;
pub mod hosts;
pub mod projects;
pub mod resolve;
pub mod servers;
pub mod triggers;
pub mod users;

/// Per-invocation scope for API paths.
#[derive(Debug, Default)]
pub struct ClientContext {
    pub namespace: String,
    pub project: Option<String>,
    pub server: Option<String>,
    pub server_id: Option<String>,
    project_id: OnceCell<String>,
}

impl ClientContext {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Default::default()
        }
    }

    pub fn with_project(mut self, name: Option<String>) -> Self {
        self.project = name.filter(|n| !n.trim().is_empty());
        self
    }

    /// Seeds the project ID so it is never looked up. Blank IDs are ignored.
    pub fn with_project_id(self, id: Option<String>) -> Self {
        if let Some(id) = id.filter(|id| !id.trim().is_empty()) {
            let _ = self.project_id.set(id);
        }
        self
    }

    pub fn with_server(mut self, name: Option<String>) -> Self {
        self.server = name.filter(|n| !n.trim().is_empty());
        self
    }

    pub fn with_server_id(mut self, id: Option<String>) -> Self {
        self.server_id = id.filter(|id| !id.trim().is_empty());
        self
    }

    /// The project ID if it has already been seeded or resolved.
    pub fn cached_project_id(&self) -> Option<&str> {
        self.project_id.get().map(String::as_str)
    }

    pub(crate) fn project_id_cell(&self) -> &OnceCell<String> {
        &self.project_id
    }
}

/// How the user picked an entity: by ID or by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Id(String),
    Name(String),
}

impl Selector {
    /// Builds a selector from a `--uuid` / `--name` flag pair. The ID wins
    /// when both are given.
    pub fn from_flags(uuid: Option<String>, name: Option<String>, kind: &str) -> Result<Self> {
        let uuid = uuid.filter(|s| !s.trim().is_empty());
        let name = name.filter(|s| !s.trim().is_empty());
        match (uuid, name) {
            (Some(id), _) => Ok(Selector::Id(id)),
            (None, Some(name)) => Ok(Selector::Name(name)),
            (None, None) => Err(TbsError::validation(format!(
                "You must specify either --uuid or --name for the {}",
                kind
            ))),
        }
    }
}

pub struct ApiClient<T: Transport> {
    transport: T,
    context: ClientContext,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, context: ClientContext) -> Self {
        Self { transport, context }
    }

    pub fn context(&self) -> &ClientContext {
        &self.context
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `/{namespace}{suffix}`
    pub(crate) fn ns_path(&self, suffix: &str) -> Result<String> {
        let ns = self.context.namespace.trim();
        if ns.is_empty() {
            return Err(TbsError::validation(
                "No namespace configured. Pass --namespace or set THREEBLADES_NAMESPACE",
            ));
        }
        Ok(format!("/{}{}", ns, suffix))
    }

    /// `/{namespace}/projects/{project_id}{suffix}`, resolving the project ID
    /// from the context.
    pub(crate) fn project_path(&self, suffix: &str) -> Result<String> {
        let project_id = self.project_id()?;
        self.ns_path(&format!("/projects/{}{}", project_id, suffix))
    }

    /// Sends a request and decodes the response body.
    pub(crate) fn fetch<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R> {
        self.transport.send(&request)?.json()
    }

    /// Sends a request whose response body is not needed.
    pub(crate) fn execute(&self, request: ApiRequest) -> Result<()> {
        self.transport.send(&request)?;
        Ok(())
    }

    pub(crate) fn list<R: DeserializeOwned>(
        &self,
        path: String,
        options: &ListOptions,
    ) -> Result<Vec<R>> {
        let items: Option<Vec<R>> = self.fetch(options.apply(ApiRequest::get(path)))?;
        Ok(items.unwrap_or_default())
    }

    pub(crate) fn body<B: Serialize>(body: &B) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(body)?)
    }
}
