use super::{CmdMessage, CmdResult};
use crate::api::ApiClient;
use crate::config;
use crate::error::{Result, TbsError};
use crate::transport::Transport;
use std::path::Path;

/// Exchanges credentials for a token and stores it at `token_path`.
pub fn login<T: Transport>(
    api: &ApiClient<T>,
    username: &str,
    password: &str,
    token_path: &Path,
) -> Result<CmdResult> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(TbsError::validation(
            "You must provide --username and --password",
        ));
    }
    let token = api.obtain_token(username.trim(), password)?;
    config::save_token(token_path, &token)?;
    Ok(CmdResult::new().with_message(CmdMessage::success("Login successful")))
}

/// Shell snippet exporting the namespace and project, followed by a hint
/// on how to eval it.
pub fn env_script(namespace: Option<&str>, project: Option<&str>) -> String {
    let namespace = namespace.filter(|n| !n.is_empty());
    let project = project.filter(|p| !p.is_empty());

    let mut out = String::new();
    let mut command = String::from("tbs env");
    if let Some(ns) = namespace {
        out.push_str(&format!("export THREEBLADES_NAMESPACE={}\n", ns));
        command.push_str(&format!(" --namespace={}", ns));
    }
    if let Some(project) = project {
        out.push_str(&format!("export THREEBLADES_PROJECT={}\n", project));
        command.push_str(&format!(" --project={}", project));
    }
    out.push_str(&format!(
        "\n# Run this command to configure your shell:\n# eval $({})",
        command
    ));
    out
}
