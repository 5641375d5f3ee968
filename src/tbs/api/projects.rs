use super::ApiClient;
use crate::error::Result;
use crate::filters::ListOptions;
use crate::models::{Collaborator, CollaboratorData, Project, ProjectData};
use crate::transport::{ApiRequest, Transport};

impl<T: Transport> ApiClient<T> {
    pub fn list_projects(&self, options: &ListOptions) -> Result<Vec<Project>> {
        self.list(self.ns_path("/projects/")?, options)
    }

    pub fn create_project(&self, data: &ProjectData) -> Result<Project> {
        let request = ApiRequest::post(self.ns_path("/projects/")?).json_body(Self::body(data)?);
        self.fetch(request)
    }

    pub fn update_project(&self, id: &str, data: &ProjectData) -> Result<Project> {
        let path = self.ns_path(&format!("/projects/{}/", id))?;
        self.fetch(ApiRequest::put(path).json_body(Self::body(data)?))
    }

    pub fn delete_project(&self, id: &str) -> Result<()> {
        self.execute(ApiRequest::delete(self.ns_path(&format!("/projects/{}/", id))?))
    }

    pub fn add_collaborator(&self, project_id: &str, member: &str) -> Result<Collaborator> {
        let path = self.ns_path(&format!("/projects/{}/collaborators/", project_id))?;
        let body = Self::body(&CollaboratorData {
            owner: false,
            member: member.to_string(),
        })?;
        self.fetch(ApiRequest::post(path).json_body(body))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{seeded, PID};
    use crate::models::ProjectData;
    use crate::transport::memory::MemoryTransport;
    use crate::transport::Method;
    use serde_json::json;

    #[test]
    fn create_posts_project_data() {
        let transport = MemoryTransport::new().on(
            Method::Post,
            "/acme/projects/",
            json!({"id": "p2", "name": "new"}),
        );
        let client = seeded(transport);
        let data = ProjectData {
            name: Some("new".into()),
            description: None,
            private: true,
        };
        let project = client.create_project(&data).unwrap();
        assert_eq!(project.id, "p2");
        assert_eq!(
            client.transport().last().unwrap().body,
            Some(json!({"name": "new", "private": true}))
        );
    }

    #[test]
    fn collaborator_is_added_as_member() {
        let path = format!("/acme/projects/{}/collaborators/", PID);
        let transport = MemoryTransport::new().on(Method::Post, &path, json!({"id": "c1"}));
        let client = seeded(transport);
        client.add_collaborator(PID, "ann@example.com").unwrap();
        assert_eq!(
            client.transport().last().unwrap().body,
            Some(json!({"owner": false, "member": "ann@example.com"}))
        );
    }
}
