use std::collections::HashMap;

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_TRIALING: &str = "trialing";
pub const STATUS_CANCELED: &str = "canceled";

/// Subscription as last reported by Stripe.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSubscription {
    pub id: String,
    pub customer_id: String,
    pub plan_id: String,
    pub status: String,
    pub current_period_end: i64,
    pub cancel_at_period_end: bool,
    pub trial_end: Option<i64>,
}

impl UserSubscription {
    pub fn is_trialing(&self) -> bool {
        self.status == STATUS_TRIALING
    }

    /// Active and trialing subscriptions both grant access to the plan.
    pub fn is_subscribed(&self) -> bool {
        self.status == STATUS_ACTIVE || self.status == STATUS_TRIALING
    }

    pub fn is_canceled(&self) -> bool {
        self.status == STATUS_CANCELED
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub description: String,
    /// Card token obtained with Stripe.js.
    pub token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialEnd {
    /// End any trial immediately and bill right away.
    Now,
    /// Unix timestamp the trial runs until.
    At(i64),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewSubscription {
    pub customer: String,
    pub plan: String,
    pub trial_period_days: Option<u32>,
    pub trial_end: Option<TrialEnd>,
    pub quantity: Option<u64>,
    pub metadata: HashMap<String, String>,
}
