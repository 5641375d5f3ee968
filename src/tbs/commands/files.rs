use super::{CmdMessage, CmdResult};
use crate::api::ApiClient;
use crate::error::{Result, TbsError};
use crate::filters::ListOptions;
use crate::models::FileData;
use crate::transport::Transport;
use uuid::Uuid;

pub fn list<T: Transport>(api: &ApiClient<T>, options: &ListOptions) -> Result<CmdResult> {
    CmdResult::payload(&api.list_files(options)?)
}

/// Creates a file from base64 `content` in the configured project.
pub fn create<T: Transport>(api: &ApiClient<T>, name: &str, content: &str) -> Result<CmdResult> {
    if name.trim().is_empty() || content.trim().is_empty() {
        return Err(TbsError::validation(
            "You must provide both --name and --content",
        ));
    }
    let data = FileData {
        project: api.project_id()?,
        author: None,
        name: name.to_string(),
        base64_data: content.to_string(),
    };
    let file = api.create_file(&data)?;
    CmdResult::new()
        .with_message(CmdMessage::success(format!("File {} created", file.name)))
        .with_payload(&file)
}

/// Deletes each target, given as a file ID or a file name.
///
/// A target that cannot be resolved or deleted is reported and skipped.
pub fn delete<T: Transport, S: AsRef<str>>(api: &ApiClient<T>, targets: &[S]) -> Result<CmdResult> {
    if targets.is_empty() {
        return Err(TbsError::validation(
            "You must provide at least one name or id",
        ));
    }
    api.project_id()?;

    let mut result = CmdResult::new();
    for target in targets.iter().map(AsRef::as_ref) {
        match delete_one(api, target) {
            Ok(id) => result.add_message(CmdMessage::success(format!("File {} deleted", id))),
            Err(e) => {
                tracing::warn!(file = target, error = %e, "file not deleted");
                result.add_message(CmdMessage::error(format!(
                    "Could not delete {}: {}",
                    target, e
                )));
            }
        }
    }
    Ok(result)
}

fn delete_one<T: Transport>(api: &ApiClient<T>, target: &str) -> Result<String> {
    let id = if is_uuid(target) {
        target.to_string()
    } else {
        api.file_by_name(target)?.id
    };
    api.delete_file(&id)?;
    Ok(id)
}

pub fn is_uuid(value: &str) -> bool {
    Uuid::parse_str(value).is_ok()
}
