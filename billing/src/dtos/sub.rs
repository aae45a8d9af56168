use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::models::sub::{NewSubscription, TrialEnd};

/// Options applied to a single `subscribe` call.
///
/// Trial settings are staged here instead of on the driver, so they reach
/// exactly the subscription they were built for.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubscriptionArgs {
    pub trial_period_days: Option<u32>,
    pub trial_end: Option<TrialEnd>,
    pub quantity: Option<u64>,
    pub metadata: HashMap<String, String>,
    /// Overrides the configured description of a customer created on the fly.
    pub customer_description: Option<String>,
}

impl SubscriptionArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trial(mut self, days: u32) -> Self {
        self.trial_period_days = Some(days);
        self
    }

    pub fn skip_trial(mut self) -> Self {
        self.trial_end = Some(TrialEnd::Now);
        self
    }

    pub fn trial_until(mut self, end: DateTime<Utc>) -> Self {
        self.trial_end = Some(TrialEnd::At(end.timestamp()));
        self
    }

    pub fn quantity(mut self, quantity: u64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn describe_customer(mut self, description: impl Into<String>) -> Self {
        self.customer_description = Some(description.into());
        self
    }

    /// Builds the provider request for `plan` on `customer`.
    pub(crate) fn into_request(self, customer: &str, plan: &str) -> NewSubscription {
        NewSubscription {
            customer: customer.to_string(),
            plan: plan.to_string(),
            trial_period_days: self.trial_period_days,
            trial_end: self.trial_end,
            quantity: self.quantity,
            metadata: self.metadata,
        }
    }
}
