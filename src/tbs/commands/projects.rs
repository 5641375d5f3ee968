use super::{non_empty, CmdMessage, CmdResult};
use crate::api::{ApiClient, Selector};
use crate::error::{Result, TbsError};
use crate::filters::ListOptions;
use crate::models::ProjectData;
use crate::transport::Transport;

#[derive(Debug, Clone, Default)]
pub struct ProjectArgs {
    pub name: Option<String>,
    pub description: Option<String>,
    pub private: bool,
    pub members: Vec<String>,
}

impl ProjectArgs {
    fn data(&self) -> ProjectData {
        ProjectData {
            name: non_empty(self.name.clone()),
            description: non_empty(self.description.clone()),
            private: self.private,
        }
    }
}

pub fn list<T: Transport>(api: &ApiClient<T>, options: &ListOptions) -> Result<CmdResult> {
    CmdResult::payload(&api.list_projects(options)?)
}

pub fn create<T: Transport>(api: &ApiClient<T>, args: &ProjectArgs) -> Result<CmdResult> {
    if non_empty(args.name.clone()).is_none() {
        return Err(TbsError::validation(
            "You need to provide name for your project",
        ));
    }
    let project = api.create_project(&args.data())?;
    let mut result = CmdResult::new();
    add_members(api, &project.id, &args.members, &mut result);
    result.add_message(CmdMessage::success("Project successfully created"));
    result.with_payload(&project)
}

/// Updates the project picked by `uuid`, or by `args.name` when no ID is given.
pub fn update<T: Transport>(
    api: &ApiClient<T>,
    uuid: Option<String>,
    args: &ProjectArgs,
) -> Result<CmdResult> {
    let selector = Selector::from_flags(uuid, args.name.clone(), "project")?;
    let id = project_id(api, &selector)?;
    let mut result = CmdResult::new();
    add_members(api, &id, &args.members, &mut result);
    let project = api.update_project(&id, &args.data())?;
    result.add_message(CmdMessage::success("Project updated."));
    result.with_payload(&project)
}

pub fn delete<T: Transport>(api: &ApiClient<T>, selector: &Selector) -> Result<CmdResult> {
    let id = project_id(api, selector)?;
    api.delete_project(&id)?;
    Ok(CmdResult::new().with_message(CmdMessage::success("Project deleted")))
}

/// Adds a collaborator to `project`, or to the configured project.
pub fn add_user<T: Transport>(
    api: &ApiClient<T>,
    project: Option<&str>,
    email: &str,
) -> Result<CmdResult> {
    let id = match project.filter(|p| !p.trim().is_empty()) {
        Some(name) => api.project_id_by_name(name)?,
        None => api.project_id()?,
    };
    let mut result = CmdResult::new();
    add_members(api, &id, &[email.to_string()], &mut result);
    Ok(result)
}

fn project_id<T: Transport>(api: &ApiClient<T>, selector: &Selector) -> Result<String> {
    match selector {
        Selector::Id(id) => Ok(id.clone()),
        Selector::Name(name) => api.project_id_by_name(name),
    }
}

/// Best effort: one failing member does not stop the rest.
fn add_members<T: Transport>(
    api: &ApiClient<T>,
    project_id: &str,
    members: &[String],
    result: &mut CmdResult,
) {
    for member in members.iter().filter(|m| !m.trim().is_empty()) {
        match api.add_collaborator(project_id, member) {
            Ok(_) => result.add_message(CmdMessage::success(format!("Member added: {}", member))),
            Err(e) => {
                tracing::warn!(member = %member, error = %e, "failed to add member");
                result.add_message(CmdMessage::error(format!(
                    "Error adding member {}: {}",
                    member, e
                )));
            }
        }
    }
}
