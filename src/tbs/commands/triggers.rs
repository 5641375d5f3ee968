use super::{non_empty, CmdResult};
use crate::api::{ApiClient, Selector};
use crate::error::Result;
use crate::models::{SlackWebhookConfig, TriggerAction, TriggerData, Webhook, SLACK_BOT_NAME};
use crate::transport::Transport;
use serde_json::Value;

/// One side (cause or effect) of a trigger.
#[derive(Debug, Clone, Default)]
pub struct ActionArgs {
    pub action: Option<String>,
    pub method: Option<String>,
    pub model: Option<String>,
    pub object: Option<String>,
    pub payload: Option<Value>,
}

impl ActionArgs {
    /// `None` unless both the action name and method are set.
    fn to_action(&self) -> Option<TriggerAction> {
        let action_name = non_empty(self.action.clone())?;
        let method = non_empty(self.method.clone())?;
        Some(TriggerAction {
            action_name,
            method,
            model: self.model.clone().unwrap_or_default(),
            object_id: self.object.clone().unwrap_or_default(),
            payload: self.payload.clone(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct TriggerArgs {
    pub cause: ActionArgs,
    pub effect: ActionArgs,
    pub webhook_url: Option<String>,
    pub webhook_config: Option<Value>,
    pub schedule: Option<String>,
}

impl TriggerArgs {
    fn data(&self) -> TriggerData {
        TriggerData {
            cause: self.cause.to_action(),
            effect: self.effect.to_action(),
            webhook: non_empty(self.webhook_url.clone()).map(|url| Webhook {
                url,
                config: self.webhook_config.clone(),
            }),
            schedule: non_empty(self.schedule.clone()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SlackArgs {
    pub webhook: String,
    pub text: String,
    pub channel: String,
    pub cause: ActionArgs,
}

pub fn create<T: Transport>(api: &ApiClient<T>, args: &TriggerArgs) -> Result<CmdResult> {
    CmdResult::payload(&api.create_trigger(&args.data())?)
}

/// Creates a trigger that posts `text` to a Slack channel when the cause fires.
pub fn slack<T: Transport>(api: &ApiClient<T>, args: &SlackArgs) -> Result<CmdResult> {
    let config = SlackWebhookConfig {
        text: args.text.clone(),
        username: SLACK_BOT_NAME.to_string(),
        icon_url: String::new(),
        channel: args.channel.clone(),
    };
    let data = TriggerData {
        cause: args.cause.to_action(),
        webhook: Some(Webhook {
            url: args.webhook.clone(),
            config: Some(serde_json::to_value(&config)?),
        }),
        ..Default::default()
    };
    CmdResult::payload(&api.create_trigger(&data)?)
}

/// Shows a service trigger of a server in the configured project. Without a
/// server selector the server comes from the client context.
pub fn describe<T: Transport>(
    api: &ApiClient<T>,
    server: Option<&Selector>,
    trigger: &Selector,
) -> Result<CmdResult> {
    let project_id = api.project_id()?;
    let server_id = match server {
        Some(Selector::Id(id)) => id.clone(),
        Some(Selector::Name(name)) => api.server_by_name(name)?.id,
        None => api.context_server_id()?,
    };
    let found = match trigger {
        Selector::Id(id) => api.server_trigger_by_id(&project_id, &server_id, id)?,
        Selector::Name(name) => api.server_trigger_by_name(&project_id, &server_id, name)?,
    };
    CmdResult::payload(&found)
}

/// Parses a JSON flag value.
pub fn parse_json_value(raw: &str) -> std::result::Result<Value, String> {
    serde_json::from_str(raw).map_err(|e| format!("invalid JSON: {}", e))
}
