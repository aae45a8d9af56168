use chrono::{DateTime, Utc};
use common::{
    env_config::Config,
    error::{AppError, Res, Resource},
};

use super::{provider::BillingProvider, stripe::StripeProvider};
use crate::{
    dtos::sub::SubscriptionArgs,
    models::sub::{NewCustomer, UserSubscription},
};

/// Subscription billing on top of a [`BillingProvider`].
///
/// The driver keeps no billing state of its own: every query is a live
/// round trip, and trial settings travel with the `subscribe` call they
/// belong to.
pub struct BillingDriver<P> {
    provider: P,
    customer_description: String,
}

impl BillingDriver<StripeProvider> {
    /// Creates a Stripe backed driver from the loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            StripeProvider::new(&config.stripe_secret_key),
            &config.customer_description,
        )
    }
}

impl<P: BillingProvider> BillingDriver<P> {
    pub fn new(provider: P, customer_description: &str) -> Self {
        Self {
            provider,
            customer_description: customer_description.to_string(),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Starts a subscription with a trial of `days` days.
    pub fn trial(&self, days: u32) -> PendingSubscription<'_, P> {
        self.with_args(SubscriptionArgs::new().trial(days))
    }

    /// Starts a subscription that bills immediately, skipping any plan trial.
    pub fn skip_trial(&self) -> PendingSubscription<'_, P> {
        self.with_args(SubscriptionArgs::new().skip_trial())
    }

    /// Starts a subscription whose trial runs until `end`.
    pub fn trial_until(&self, end: DateTime<Utc>) -> PendingSubscription<'_, P> {
        self.with_args(SubscriptionArgs::new().trial_until(end))
    }

    pub fn with_args(&self, args: SubscriptionArgs) -> PendingSubscription<'_, P> {
        PendingSubscription { driver: self, args }
    }

    /// Subscribes to `plan` without any trial settings.
    ///
    /// See [`BillingDriver::subscribe_with`].
    pub async fn subscribe(&self, plan: &str, token: &str, customer: Option<&str>) -> Res<String> {
        self.subscribe_with(plan, token, customer, SubscriptionArgs::default())
            .await
    }

    /// Subscribes a customer to `plan` and returns the new subscription ID.
    ///
    /// Without `customer` (or with a blank one), a new customer paying with
    /// `token` is created first.
    ///
    /// # Errors
    ///
    /// - [`AppError::PlanNotFound`] when Stripe does not know the plan
    /// - [`AppError::CustomerNotFound`] when Stripe does not know the customer
    /// - any other provider error, classified
    pub async fn subscribe_with(
        &self,
        plan: &str,
        token: &str,
        customer: Option<&str>,
        args: SubscriptionArgs,
    ) -> Res<String> {
        let customer = match customer.filter(|customer| !customer.trim().is_empty()) {
            Some(customer) => customer.to_string(),
            None => {
                let description = args
                    .customer_description
                    .clone()
                    .unwrap_or_else(|| self.customer_description.clone());
                self.create_customer(&description, token).await?
            }
        };

        let request = args.into_request(&customer, plan);
        match self.provider.create_subscription(&request).await {
            Ok(subscription) => {
                log::info!(
                    "Subscribed customer {} to plan {}: {}",
                    customer,
                    plan,
                    subscription.id
                );
                Ok(subscription.id)
            }
            Err(AppError::NotFound {
                resource: Resource::Plan,
                ..
            }) => {
                log::warn!("Plan {} was not found in Stripe", plan);
                Err(AppError::PlanNotFound(plan.to_string()))
            }
            Err(AppError::NotFound {
                resource: Resource::Customer,
                ..
            }) => {
                log::warn!("Customer {} was not found in Stripe", customer);
                Err(AppError::CustomerNotFound(customer))
            }
            Err(e) => {
                log::error!("Failed to subscribe customer {} to plan {}: {}", customer, plan, e);
                Err(e)
            }
        }
    }

    /// Creates a customer paying with `token` and returns its ID.
    pub async fn create_customer(&self, description: &str, token: &str) -> Res<String> {
        let customer = NewCustomer {
            description: description.to_string(),
            token: token.to_string(),
        };
        let id = self.provider.create_customer(&customer).await?;
        log::info!("Created customer {}", id);
        Ok(id)
    }

    /// Retrieves the current state of a subscription.
    pub async fn subscription(&self, subscription_id: &str) -> Res<UserSubscription> {
        self.provider.retrieve_subscription(subscription_id).await
    }

    /// Retrieves a subscription, treating a missing one as `None`.
    async fn find(&self, subscription_id: &str) -> Res<Option<UserSubscription>> {
        match self.provider.retrieve_subscription(subscription_id).await {
            Ok(subscription) => Ok(Some(subscription)),
            Err(e) if e.is_not_found() => {
                log::debug!("Subscription {} not found: {}", subscription_id, e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Whether the subscription is in its trial period.
    ///
    /// A missing reference is a caller error; an unknown subscription is not on trial.
    pub async fn on_trial(&self, subscription_id: Option<&str>) -> Res<bool> {
        let subscription_id = subscription_id.ok_or_else(|| {
            AppError::BadRequest("A subscription ID is required to check a trial".to_string())
        })?;

        Ok(self
            .find(subscription_id)
            .await?
            .is_some_and(|sub| sub.is_trialing()))
    }

    /// Whether the subscription is active or trialing.
    pub async fn is_subscribed(&self, subscription_id: &str) -> Res<bool> {
        Ok(self
            .find(subscription_id)
            .await?
            .is_some_and(|sub| sub.is_subscribed()))
    }

    /// Like [`BillingDriver::is_subscribed`], additionally requiring the
    /// subscription to be on `plan`.
    pub async fn is_subscribed_to(&self, subscription_id: &str, plan: &str) -> Res<bool> {
        Ok(self
            .find(subscription_id)
            .await?
            .is_some_and(|sub| sub.is_subscribed() && sub.plan_id == plan))
    }

    /// Whether the subscription is set to cancel at the end of its period.
    pub async fn is_canceled(&self, subscription_id: &str) -> Res<bool> {
        Ok(self
            .find(subscription_id)
            .await?
            .is_some_and(|sub| sub.cancel_at_period_end))
    }

    /// Cancels a subscription at the end of the period, or right away when `immediate`.
    ///
    /// Returns whether Stripe reports the cancellation as in effect.
    pub async fn cancel(&self, subscription_id: &str, immediate: bool) -> Res<bool> {
        let subscription = self.provider.retrieve_subscription(subscription_id).await?;

        let at_period_end = !immediate;
        let canceled = self
            .provider
            .cancel_subscription(&subscription.id, at_period_end)
            .await?;

        let done = if at_period_end {
            canceled.cancel_at_period_end
        } else {
            canceled.is_canceled()
        };

        if done {
            log::info!(
                "Canceled subscription {} (at period end: {})",
                subscription_id,
                at_period_end
            );
        } else {
            log::warn!("Stripe did not cancel subscription {}", subscription_id);
        }

        Ok(done)
    }
}

/// Subscription settings staged for exactly one `subscribe` call.
///
/// Built by [`BillingDriver::trial`], [`BillingDriver::skip_trial`] and friends;
/// `subscribe` consumes it.
#[must_use = "staged settings only apply when `subscribe` is called"]
pub struct PendingSubscription<'a, P> {
    driver: &'a BillingDriver<P>,
    args: SubscriptionArgs,
}

impl<P: BillingProvider> PendingSubscription<'_, P> {
    pub fn trial(mut self, days: u32) -> Self {
        self.args = self.args.trial(days);
        self
    }

    pub fn skip_trial(mut self) -> Self {
        self.args = self.args.skip_trial();
        self
    }

    pub fn trial_until(mut self, end: DateTime<Utc>) -> Self {
        self.args = self.args.trial_until(end);
        self
    }

    pub fn quantity(mut self, quantity: u64) -> Self {
        self.args = self.args.quantity(quantity);
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.args = self.args.metadata(key, value);
        self
    }

    pub fn describe_customer(mut self, description: impl Into<String>) -> Self {
        self.args = self.args.describe_customer(description);
        self
    }

    pub async fn subscribe(self, plan: &str, token: &str, customer: Option<&str>) -> Res<String> {
        self.driver
            .subscribe_with(plan, token, customer, self.args)
            .await
    }
}
