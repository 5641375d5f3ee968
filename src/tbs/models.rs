//! Request and response shapes for the 3Blades API.
//!
//! Response types default every missing field so a partial payload still
//! decodes; fields the backend may send as `null` are `Option`s. Request
//! bodies skip unset fields, which is what makes `PATCH`-style updates send
//! only what the user passed on the command line.

use serde::{Deserialize, Serialize};
use serde_json::Value;

fn is_false(b: &bool) -> bool {
    !*b
}

// --- Auth ---

#[derive(Debug, Clone, Serialize)]
pub struct JwtData {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JwtToken {
    pub token: String,
}

// --- Projects ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub private: bool,
    pub last_updated: Option<String>,
    pub owner: Option<String>,
    pub collaborators: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub private: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollaboratorData {
    pub owner: bool,
    pub member: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Collaborator {
    pub id: String,
    pub owner: bool,
    pub joined: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
}

// --- Servers ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub script: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub function: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub command: String,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub kind: String,
}

impl ServerConfig {
    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
            && self.function.is_empty()
            && self.command.is_empty()
            && self.kind.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    pub id: String,
    pub name: String,
    pub project: Option<String>,
    pub created_by: Option<String>,
    pub image_name: Option<String>,
    pub environment_resources: Option<String>,
    pub startup_script: Option<String>,
    pub config: Option<ServerConfig>,
    pub status: Option<String>,
    pub connected: Vec<String>,
    pub host: Option<String>,
    pub endpoint: Option<String>,
    pub logs_url: Option<String>,
    pub status_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ServerData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_resources: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub startup_script: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<ServerConfig>,
    pub connected: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerTrigger {
    pub id: String,
    pub name: String,
    pub operation: Option<String>,
    pub webhook: Option<Webhook>,
}

// --- Files ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectFile {
    pub id: String,
    pub name: String,
    pub path: Option<String>,
    pub author: Option<String>,
    pub project: Option<String>,
    pub file: Option<String>,
    pub public: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileData {
    pub project: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub name: String,
    pub base64_data: String,
}

// --- Hosts ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockerHost {
    pub id: String,
    pub name: String,
    pub ip: Option<String>,
    pub port: Option<i64>,
    pub owner: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DockerHostData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
}

// --- Users ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile: Option<UserProfile>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UserData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub profile: UserProfile,
}

// --- Triggers ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerAction {
    pub action_name: String,
    pub method: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub model: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub object_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Webhook {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<TriggerAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<TriggerAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook: Option<Webhook>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Trigger {
    pub id: String,
    pub cause: Option<TriggerAction>,
    pub effect: Option<TriggerAction>,
    pub webhook: Option<Webhook>,
    pub schedule: Option<String>,
}

/// Webhook config for posting to a Slack channel.
#[derive(Debug, Clone, Serialize)]
pub struct SlackWebhookConfig {
    pub text: String,
    pub username: String,
    pub icon_url: String,
    pub channel: String,
}

pub const SLACK_BOT_NAME: &str = "3blades-bot";

// --- Billing ---

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Plan {
    pub id: String,
    pub stripe_id: Option<String>,
    pub name: String,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub interval: Option<String>,
    pub interval_count: Option<i64>,
    pub statement_descriptor: Option<String>,
    pub trial_period_days: Option<i64>,
    pub created: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PlanData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement_descriptor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_period_days: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Subscription {
    pub id: String,
    pub plan: Option<String>,
    pub status: Option<String>,
    pub created: Option<String>,
    pub current_period_start: Option<String>,
    pub current_period_end: Option<String>,
    pub trial_start: Option<String>,
    pub trial_end: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub cancel_at_period_end: bool,
    pub canceled_at: Option<String>,
    pub ended_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionData {
    pub plan: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Invoice {
    pub id: String,
    pub subscription: Option<String>,
    pub amount_due: Option<i64>,
    pub currency: Option<String>,
    pub paid: bool,
    pub closed: bool,
    pub attempted: bool,
    pub invoice_date: Option<String>,
    pub period_start: Option<String>,
    pub period_end: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Card {
    pub id: String,
    pub name: Option<String>,
    pub brand: Option<String>,
    pub last4: Option<String>,
    pub exp_month: Option<i64>,
    pub exp_year: Option<i64>,
    pub funding: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn partial_project_decodes() {
        let project: Project = serde_json::from_value(json!({"id": "p1", "name": "demo"})).unwrap();
        assert_eq!(project.id, "p1");
        assert!(project.collaborators.is_empty());
        assert!(!project.private);
    }

    #[test]
    fn null_server_config_decodes() {
        let server: Server =
            serde_json::from_value(json!({"id": "s1", "name": "web", "config": null})).unwrap();
        assert!(server.config.is_none());
    }

    #[test]
    fn server_config_uses_type_key_and_skips_empty() {
        let config = ServerConfig {
            kind: "restful".into(),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&config).unwrap(), json!({"type": "restful"}));
    }

    #[test]
    fn partial_update_body_omits_unset_fields() {
        let body = ServerData {
            image_name: Some("jupyter".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"image_name": "jupyter", "connected": []})
        );
    }
}
