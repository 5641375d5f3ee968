use super::{non_empty, CmdMessage, CmdResult};
use crate::api::ApiClient;
use crate::error::{Result, TbsError};
use crate::filters::ListOptions;
use crate::models::{PlanData, SubscriptionData};
use crate::transport::Transport;

fn required_id(uuid: Option<String>, kind: &str) -> Result<String> {
    non_empty(uuid).ok_or_else(|| TbsError::validation(format!("You must specify the {} --uuid", kind)))
}

#[derive(Debug, Clone, Default)]
pub struct PlanArgs {
    pub name: Option<String>,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub interval: Option<String>,
    pub interval_count: Option<i64>,
    pub statement_descriptor: Option<String>,
    pub trial_period_days: Option<i64>,
}

impl PlanArgs {
    fn data(&self) -> PlanData {
        PlanData {
            name: non_empty(self.name.clone()),
            amount: self.amount,
            currency: non_empty(self.currency.clone()),
            interval: non_empty(self.interval.clone()),
            interval_count: self.interval_count.filter(|c| *c > 0),
            statement_descriptor: non_empty(self.statement_descriptor.clone()),
            trial_period_days: self.trial_period_days.filter(|d| *d > 0),
        }
    }
}

// --- plans ---

pub fn list_plans<T: Transport>(api: &ApiClient<T>, options: &ListOptions) -> Result<CmdResult> {
    CmdResult::payload(&api.list_plans(options)?)
}

pub fn create_plan<T: Transport>(api: &ApiClient<T>, args: &PlanArgs) -> Result<CmdResult> {
    let data = args.data();
    if data.name.is_none() || data.amount.is_none() {
        return Err(TbsError::validation("You must provide plan --name and --amount"));
    }
    CmdResult::new()
        .with_message(CmdMessage::success("Plan created"))
        .with_payload(&api.create_plan(&data)?)
}

pub fn update_plan<T: Transport>(
    api: &ApiClient<T>,
    uuid: Option<String>,
    args: &PlanArgs,
) -> Result<CmdResult> {
    let id = required_id(uuid, "plan")?;
    CmdResult::payload(&api.update_plan(&id, &args.data())?)
}

pub fn describe_plan<T: Transport>(api: &ApiClient<T>, uuid: Option<String>) -> Result<CmdResult> {
    CmdResult::payload(&api.plan(&required_id(uuid, "plan")?)?)
}

pub fn delete_plan<T: Transport>(api: &ApiClient<T>, uuid: Option<String>) -> Result<CmdResult> {
    api.delete_plan(&required_id(uuid, "plan")?)?;
    Ok(CmdResult::new().with_message(CmdMessage::success("Plan deleted")))
}

// --- subscriptions ---

pub fn list_subscriptions<T: Transport>(
    api: &ApiClient<T>,
    options: &ListOptions,
) -> Result<CmdResult> {
    CmdResult::payload(&api.list_subscriptions(options)?)
}

pub fn create_subscription<T: Transport>(
    api: &ApiClient<T>,
    plan: Option<String>,
) -> Result<CmdResult> {
    let plan = required_id(plan, "subscription plan")?;
    CmdResult::payload(&api.create_subscription(&SubscriptionData { plan })?)
}

pub fn describe_subscription<T: Transport>(
    api: &ApiClient<T>,
    uuid: Option<String>,
) -> Result<CmdResult> {
    CmdResult::payload(&api.subscription(&required_id(uuid, "subscription")?)?)
}

pub fn cancel_subscription<T: Transport>(
    api: &ApiClient<T>,
    uuid: Option<String>,
) -> Result<CmdResult> {
    api.cancel_subscription(&required_id(uuid, "subscription")?)?;
    Ok(CmdResult::new().with_message(CmdMessage::success("Subscription canceled")))
}

// --- invoices ---

pub fn list_invoices<T: Transport>(api: &ApiClient<T>, options: &ListOptions) -> Result<CmdResult> {
    CmdResult::payload(&api.list_invoices(options)?)
}

pub fn describe_invoice<T: Transport>(
    api: &ApiClient<T>,
    uuid: Option<String>,
) -> Result<CmdResult> {
    CmdResult::payload(&api.invoice(&required_id(uuid, "invoice")?)?)
}

// --- cards ---

pub fn list_cards<T: Transport>(api: &ApiClient<T>, options: &ListOptions) -> Result<CmdResult> {
    CmdResult::payload(&api.list_cards(options)?)
}

pub fn describe_card<T: Transport>(api: &ApiClient<T>, uuid: Option<String>) -> Result<CmdResult> {
    CmdResult::payload(&api.card(&required_id(uuid, "card")?)?)
}

pub fn delete_card<T: Transport>(api: &ApiClient<T>, uuid: Option<String>) -> Result<CmdResult> {
    api.delete_card(&required_id(uuid, "card")?)?;
    Ok(CmdResult::new().with_message(CmdMessage::success("Card deleted")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ClientContext;
    use crate::transport::memory::MemoryTransport;
    use crate::transport::Method;
    use serde_json::json;

    fn client(transport: MemoryTransport) -> ApiClient<MemoryTransport> {
        ApiClient::new(transport, ClientContext::new("acme"))
    }

    #[test]
    fn describe_needs_uuid() {
        let api = client(MemoryTransport::new());
        assert!(matches!(
            describe_invoice(&api, None),
            Err(TbsError::Validation(_))
        ));
    }

    #[test]
    fn plan_create_omits_zero_counts() {
        let transport = MemoryTransport::new().on(
            Method::Post,
            "/acme/billing/plans/",
            json!({"id": "pl1", "name": "pro"}),
        );
        let api = client(transport);
        let args = PlanArgs {
            name: Some("pro".into()),
            amount: Some(2000),
            currency: Some("usd".into()),
            interval: Some("month".into()),
            interval_count: Some(0),
            ..Default::default()
        };
        let result = create_plan(&api, &args).unwrap();
        assert_eq!(result.payload.unwrap()["id"], "pl1");
        assert_eq!(
            api.transport().last().unwrap().body,
            Some(json!({"name": "pro", "amount": 2000, "currency": "usd", "interval": "month"}))
        );
    }

    #[test]
    fn card_delete_reports_success() {
        let transport =
            MemoryTransport::new().on(Method::Delete, "/acme/billing/cards/c1/", json!(null));
        let api = client(transport);
        let result = delete_card(&api, Some("c1".into())).unwrap();
        assert_eq!(result.messages[0].content, "Card deleted");
    }
}
