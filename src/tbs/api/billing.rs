use super::ApiClient;
use crate::error::Result;
use crate::filters::ListOptions;
use crate::models::{Card, Invoice, Plan, PlanData, Subscription, SubscriptionData};
use crate::transport::{ApiRequest, Transport};

impl<T: Transport> ApiClient<T> {
    fn billing_path(&self, suffix: &str) -> Result<String> {
        self.ns_path(&format!("/billing/{}", suffix))
    }

    pub fn list_plans(&self, options: &ListOptions) -> Result<Vec<Plan>> {
        self.list(self.billing_path("plans/")?, options)
    }

    pub fn plan(&self, id: &str) -> Result<Plan> {
        self.fetch(ApiRequest::get(self.billing_path(&format!("plans/{}/", id))?))
    }

    pub fn create_plan(&self, data: &PlanData) -> Result<Plan> {
        self.fetch(ApiRequest::post(self.billing_path("plans/")?).json_body(Self::body(data)?))
    }

    pub fn update_plan(&self, id: &str, data: &PlanData) -> Result<Plan> {
        let path = self.billing_path(&format!("plans/{}/", id))?;
        self.fetch(ApiRequest::put(path).json_body(Self::body(data)?))
    }

    pub fn delete_plan(&self, id: &str) -> Result<()> {
        self.execute(ApiRequest::delete(self.billing_path(&format!("plans/{}/", id))?))
    }

    pub fn list_subscriptions(&self, options: &ListOptions) -> Result<Vec<Subscription>> {
        self.list(self.billing_path("subscriptions/")?, options)
    }

    pub fn subscription(&self, id: &str) -> Result<Subscription> {
        self.fetch(ApiRequest::get(
            self.billing_path(&format!("subscriptions/{}/", id))?,
        ))
    }

    pub fn create_subscription(&self, data: &SubscriptionData) -> Result<Subscription> {
        let request =
            ApiRequest::post(self.billing_path("subscriptions/")?).json_body(Self::body(data)?);
        self.fetch(request)
    }

    pub fn cancel_subscription(&self, id: &str) -> Result<()> {
        self.execute(ApiRequest::delete(
            self.billing_path(&format!("subscriptions/{}/", id))?,
        ))
    }

    pub fn list_invoices(&self, options: &ListOptions) -> Result<Vec<Invoice>> {
        self.list(self.billing_path("invoices/")?, options)
    }

    pub fn invoice(&self, id: &str) -> Result<Invoice> {
        self.fetch(ApiRequest::get(self.billing_path(&format!("invoices/{}/", id))?))
    }

    pub fn list_cards(&self, options: &ListOptions) -> Result<Vec<Card>> {
        self.list(self.billing_path("cards/")?, options)
    }

    pub fn card(&self, id: &str) -> Result<Card> {
        self.fetch(ApiRequest::get(self.billing_path(&format!("cards/{}/", id))?))
    }

    pub fn delete_card(&self, id: &str) -> Result<()> {
        self.execute(ApiRequest::delete(self.billing_path(&format!("cards/{}/", id))?))
    }
}
