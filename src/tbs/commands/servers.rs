use super::{non_empty, CmdMessage, CmdResult};
use crate::api::servers::ServerAction;
use crate::api::{ApiClient, Selector};
use crate::error::{Result, TbsError};
use crate::filters::ListOptions;
use crate::models::{Server, ServerConfig, ServerData};
use crate::transport::Transport;

#[derive(Debug, Clone, Default)]
pub struct ServerArgs {
    pub name: Option<String>,
    pub image: Option<String>,
    pub resources: Option<String>,
    pub startup_script: Option<String>,
    pub config: ServerConfig,
}

impl ServerArgs {
    fn data(&self) -> ServerData {
        ServerData {
            name: non_empty(self.name.clone()),
            image_name: non_empty(self.image.clone()),
            environment_resources: non_empty(self.resources.clone()),
            startup_script: non_empty(self.startup_script.clone()),
            config: (!self.config.is_empty()).then(|| self.config.clone()),
            connected: Vec::new(),
        }
    }
}

fn find<T: Transport>(api: &ApiClient<T>, selector: &Selector) -> Result<Server> {
    match selector {
        Selector::Id(id) => api.server_by_id(id),
        Selector::Name(name) => api.server_by_name(name),
    }
}

fn server_id<T: Transport>(api: &ApiClient<T>, selector: &Selector) -> Result<String> {
    match selector {
        Selector::Id(id) => Ok(id.clone()),
        Selector::Name(name) => Ok(api.server_by_name(name)?.id),
    }
}

pub fn list<T: Transport>(api: &ApiClient<T>, options: &ListOptions) -> Result<CmdResult> {
    CmdResult::payload(&api.list_servers(options)?)
}

pub fn create<T: Transport>(api: &ApiClient<T>, args: &ServerArgs) -> Result<CmdResult> {
    if non_empty(args.name.clone()).is_none() {
        return Err(TbsError::validation("You need to provide a server name"));
    }
    CmdResult::payload(&api.create_server(&args.data())?)
}

pub fn describe<T: Transport>(api: &ApiClient<T>, selector: &Selector) -> Result<CmdResult> {
    CmdResult::payload(&find(api, selector)?)
}

/// Partial update. The server is picked by `uuid`, else by `args.name`.
pub fn update<T: Transport>(
    api: &ApiClient<T>,
    uuid: Option<String>,
    args: &ServerArgs,
) -> Result<CmdResult> {
    let selector = Selector::from_flags(uuid, args.name.clone(), "server")?;
    let id = server_id(api, &selector)?;
    CmdResult::payload(&api.update_server(&id, &args.data())?)
}

pub fn run_action<T: Transport>(
    api: &ApiClient<T>,
    selector: &Selector,
    action: ServerAction,
) -> Result<CmdResult> {
    let id = server_id(api, selector)?;
    api.server_action(&id, action)?;
    tracing::info!(server = %id, %action, "server action sent");
    Ok(CmdResult::new().with_message(CmdMessage::success(format!(
        "Server {}",
        action.past_tense()
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{project_path, seeded};
    use crate::transport::memory::MemoryTransport;
    use crate::transport::Method;
    use serde_json::json;

    #[test]
    fn start_by_name_resolves_then_posts() {
        let transport = MemoryTransport::new()
            .on_query(
                Method::Get,
                &project_path("/servers/"),
                &[("name", "web")],
                json!([{"id": "s1", "name": "web"}]),
            )
            .on(Method::Post, &project_path("/servers/s1/start/"), json!(null));
        let client = seeded(transport);
        let result = run_action(&client, &Selector::Name("web".into()), ServerAction::Start).unwrap();
        assert_eq!(result.messages[0].content, "Server started");
        assert!(result.payload.is_none());
    }

    #[test]
    fn unknown_server_name_is_not_found() {
        let transport =
            MemoryTransport::new().on(Method::Get, &project_path("/servers/"), json!([]));
        let client = seeded(transport);
        let err = describe(&client, &Selector::Name("ghost".into())).unwrap_err();
        assert_eq!(err.to_string(), "There is no server with name: 'ghost'");
    }

    #[test]
    fn create_sends_config_only_when_given() {
        let transport = MemoryTransport::new().on(
            Method::Post,
            &project_path("/servers/"),
            json!({"id": "s2", "name": "api"}),
        );
        let client = seeded(transport);
        let args = ServerArgs {
            name: Some("api".into()),
            image: Some("3blades/server".into()),
            config: ServerConfig {
                kind: "restful".into(),
                function: "main".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        create(&client, &args).unwrap();
        assert_eq!(
            client.transport().last().unwrap().body,
            Some(json!({
                "name": "api",
                "image_name": "3blades/server",
                "config": {"function": "main", "type": "restful"},
                "connected": []
            }))
        );
    }

    #[test]
    fn update_without_selector_is_rejected() {
        let client = seeded(MemoryTransport::new());
        let err = update(&client, None, &ServerArgs::default()).unwrap_err();
        assert!(matches!(err, TbsError::Validation(_)));
    }
}
