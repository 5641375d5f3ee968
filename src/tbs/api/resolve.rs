//! Name → ID resolution.
//!
//! Every lookup is a list call filtered by exact name on the server side.
//! The first element wins; duplicate names are not disambiguated.

use super::ApiClient;
use crate::error::{Result, TbsError};
use crate::filters::ListOptions;
use crate::models::{DockerHost, Project, ProjectFile, Server, ServerTrigger, User};
use crate::transport::{ApiRequest, Transport};
use serde::de::DeserializeOwned;

impl<T: Transport> ApiClient<T> {
    fn first_match<R: DeserializeOwned>(
        &self,
        path: String,
        field: &str,
        value: &str,
        kind: &'static str,
    ) -> Result<R> {
        tracing::debug!(kind, field, value, "resolving by name");
        let mut options = ListOptions::default();
        options.filters.set(field, value);
        let items: Vec<R> = self.list(path, &options)?;
        items
            .into_iter()
            .next()
            .ok_or_else(|| TbsError::not_found(kind, value))
    }

    /// The project ID for the configured project, resolved at most once.
    pub fn project_id(&self) -> Result<String> {
        let cell = self.context.project_id_cell();
        if let Some(id) = cell.get() {
            return Ok(id.clone());
        }
        let name = self.context.project.clone().ok_or_else(|| {
            TbsError::validation(
                "No project configured. Pass --project or set THREEBLADES_PROJECT",
            )
        })?;
        let id = self.lookup_project_id(&name)?;
        tracing::debug!(project = %name, id = %id, "project id memoized");
        Ok(cell.get_or_init(|| id).clone())
    }

    /// Resolves a project name. The configured project goes through the memo;
    /// any other name is looked up fresh and not cached.
    pub fn project_id_by_name(&self, name: &str) -> Result<String> {
        if self.context.project.as_deref() == Some(name) {
            return self.project_id();
        }
        self.lookup_project_id(name)
    }

    fn lookup_project_id(&self, name: &str) -> Result<String> {
        let project: Project = self.first_match(self.ns_path("/projects/")?, "name", name, "project")?;
        Ok(project.id)
    }

    pub fn server_by_name(&self, name: &str) -> Result<Server> {
        self.first_match(self.project_path("/servers/")?, "name", name, "server")
    }

    pub fn server_by_id(&self, id: &str) -> Result<Server> {
        self.fetch(ApiRequest::get(self.project_path(&format!("/servers/{}/", id))?))
    }

    /// The server ID from the context: an explicit ID, else the configured
    /// server name resolved.
    pub fn context_server_id(&self) -> Result<String> {
        if let Some(id) = &self.context.server_id {
            return Ok(id.clone());
        }
        match &self.context.server {
            Some(name) => Ok(self.server_by_name(name)?.id),
            None => Err(TbsError::validation(
                "No server configured. Pass --server or --server-id",
            )),
        }
    }

    pub fn host_id_by_name(&self, name: &str) -> Result<String> {
        let host: DockerHost = self.first_match(self.ns_path("/hosts/")?, "name", name, "host")?;
        Ok(host.id)
    }

    pub fn user_by_username(&self, username: &str) -> Result<User> {
        self.first_match("/users/".to_string(), "username", username, "user")
    }

    pub fn user_by_email(&self, email: &str) -> Result<User> {
        self.first_match("/users/".to_string(), "email", email, "user")
    }

    pub fn user_by_id(&self, id: &str) -> Result<User> {
        self.fetch(ApiRequest::get(format!("/users/{}/", id)))
    }

    pub fn file_by_name(&self, name: &str) -> Result<ProjectFile> {
        self.first_match(self.project_path("/project_files/")?, "name", name, "file")
    }

    pub fn server_trigger_by_name(
        &self,
        project_id: &str,
        server_id: &str,
        name: &str,
    ) -> Result<ServerTrigger> {
        let path = self.ns_path(&format!(
            "/projects/{}/servers/{}/triggers/",
            project_id, server_id
        ))?;
        self.first_match(path, "name", name, "trigger")
    }

    pub fn server_trigger_by_id(
        &self,
        project_id: &str,
        server_id: &str,
        id: &str,
    ) -> Result<ServerTrigger> {
        let path = self.ns_path(&format!(
            "/projects/{}/servers/{}/triggers/{}/",
            project_id, server_id, id
        ))?;
        self.fetch(ApiRequest::get(path))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{project_path, seeded, NS, PID};
    use super::super::{ApiClient, ClientContext};
    use crate::error::TbsError;
    use crate::transport::memory::MemoryTransport;
    use crate::transport::Method;
    use serde_json::json;

    fn unresolved(transport: MemoryTransport) -> ApiClient<MemoryTransport> {
        ApiClient::new(
            transport,
            ClientContext::new(NS).with_project(Some("demo".into())),
        )
    }

    #[test]
    fn project_id_takes_first_match() {
        let transport = MemoryTransport::new().on_query(
            Method::Get,
            "/acme/projects/",
            &[("name", "demo")],
            json!([{"id": "p1", "name": "demo"}, {"id": "p2", "name": "demo"}]),
        );
        let client = unresolved(transport);
        assert_eq!(client.project_id().unwrap(), "p1");
    }

    #[test]
    fn project_id_is_memoized() {
        let transport = MemoryTransport::new().on(
            Method::Get,
            "/acme/projects/",
            json!([{"id": "p1", "name": "demo"}]),
        );
        let client = unresolved(transport);
        client.project_id().unwrap();
        client.project_id_by_name("demo").unwrap();
        client.project_id().unwrap();
        assert_eq!(client.transport().count(Method::Get, "/acme/projects/"), 1);
        assert_eq!(client.context().cached_project_id(), Some("p1"));
    }

    #[test]
    fn seeded_project_id_skips_lookup() {
        let client = seeded(MemoryTransport::new());
        assert_eq!(client.project_id().unwrap(), PID);
        assert!(client.transport().requests().is_empty());
    }

    #[test]
    fn other_project_names_bypass_memo() {
        let transport = MemoryTransport::new()
            .on_query(
                Method::Get,
                "/acme/projects/",
                &[("name", "other")],
                json!([{"id": "p9", "name": "other"}]),
            );
        let client = seeded(transport);
        assert_eq!(client.project_id_by_name("other").unwrap(), "p9");
        assert_eq!(client.context().cached_project_id(), Some(PID));
    }

    #[test]
    fn missing_project_is_not_found() {
        let transport = MemoryTransport::new().on(Method::Get, "/acme/projects/", json!([]));
        let err = unresolved(transport).project_id().unwrap_err();
        assert!(matches!(err, TbsError::NotFound { kind: "project", .. }));
        assert_eq!(err.to_string(), "There is no project with name: 'demo'");
    }

    #[test]
    fn blank_project_name_is_validation_error() {
        let client = ApiClient::new(MemoryTransport::new(), ClientContext::new(NS));
        assert!(matches!(
            client.project_id(),
            Err(TbsError::Validation(_))
        ));
        assert!(client.transport().requests().is_empty());
    }

    #[test]
    fn transport_errors_propagate() {
        let transport =
            MemoryTransport::new().fail(Method::Get, "/acme/projects/", "HTTP 500: boom");
        let err = unresolved(transport).project_id().unwrap_err();
        assert_eq!(err.to_string(), "HTTP 500: boom");
    }

    #[test]
    fn server_by_name_uses_project_scope() {
        let transport = MemoryTransport::new().on_query(
            Method::Get,
            &project_path("/servers/"),
            &[("name", "web")],
            json!([{"id": "s1", "name": "web"}]),
        );
        let client = seeded(transport);
        assert_eq!(client.server_by_name("web").unwrap().id, "s1");
    }

    #[test]
    fn host_and_user_lookups_filter_by_field() {
        let transport = MemoryTransport::new()
            .on_query(
                Method::Get,
                "/acme/hosts/",
                &[("name", "gpu")],
                json!([{"id": "h1", "name": "gpu"}]),
            )
            .on_query(
                Method::Get,
                "/users/",
                &[("email", "a@b.io")],
                json!([{"id": "u2", "username": "ann"}]),
            )
            .on_query(
                Method::Get,
                "/users/",
                &[("username", "bob")],
                json!([{"id": "u1", "username": "bob"}]),
            );
        let client = seeded(transport);
        assert_eq!(client.host_id_by_name("gpu").unwrap(), "h1");
        assert_eq!(client.user_by_email("a@b.io").unwrap().id, "u2");
        assert_eq!(client.user_by_username("bob").unwrap().id, "u1");
    }

    #[test]
    fn missing_file_names_the_kind() {
        let transport =
            MemoryTransport::new().on(Method::Get, &project_path("/project_files/"), json!([]));
        let err = seeded(transport).file_by_name("a.csv").unwrap_err();
        assert_eq!(err.to_string(), "There is no file with name: 'a.csv'");
    }

    #[test]
    fn server_trigger_lookup() {
        let path = format!("/acme/projects/{}/servers/s1/triggers/", PID);
        let transport = MemoryTransport::new().on_query(
            Method::Get,
            &path,
            &[("name", "nightly")],
            json!([{"id": "t1", "name": "nightly"}]),
        );
        let client = seeded(transport);
        let trigger = client.server_trigger_by_name(PID, "s1", "nightly").unwrap();
        assert_eq!(trigger.id, "t1");
    }

    #[test]
    fn context_server_id_prefers_explicit_id() {
        let ctx = ClientContext::new(NS)
            .with_project_id(Some(PID.into()))
            .with_server(Some("web".into()))
            .with_server_id(Some("s7".into()));
        let client = ApiClient::new(MemoryTransport::new(), ctx);
        assert_eq!(client.context_server_id().unwrap(), "s7");
    }
}
