use common::{
    error::{AppError, Res, Resource},
    stripe::{create_client, create_customer},
};
use stripe::{
    CancelSubscription, Client, CreateSubscription, CreateSubscriptionItems, CustomerId,
    Subscription, SubscriptionId, UpdateSubscription,
};

use super::provider::BillingProvider;
use crate::models::sub::{NewCustomer, NewSubscription, UserSubscription};

/// [`BillingProvider`] backed by the Stripe API.
#[derive(Clone)]
pub struct StripeProvider {
    client: Client,
}

impl StripeProvider {
    pub fn new(secret_key: &str) -> Self {
        Self {
            client: create_client(secret_key),
        }
    }
}

// ids with the wrong prefix can never exist on Stripe's side
fn parse_customer_id(customer_id: &str) -> Res<CustomerId> {
    customer_id
        .parse::<CustomerId>()
        .map_err(|e| AppError::NotFound {
            resource: Resource::Customer,
            message: format!("Invalid customer ID: {}. {}", customer_id, e),
        })
}

fn parse_subscription_id(subscription_id: &str) -> Res<SubscriptionId> {
    subscription_id
        .parse::<SubscriptionId>()
        .map_err(|e| AppError::NotFound {
            resource: Resource::Subscription,
            message: format!("Invalid subscription ID: {}. {}", subscription_id, e),
        })
}

impl BillingProvider for StripeProvider {
    async fn create_customer(&self, customer: &NewCustomer) -> Res<String> {
        let created = create_customer(&self.client, &customer.description, &customer.token).await?;
        Ok(created.id.to_string())
    }

    async fn create_subscription(&self, subscription: &NewSubscription) -> Res<UserSubscription> {
        let customer_id = parse_customer_id(&subscription.customer)?;

        let mut params = CreateSubscription::new(customer_id);
        params.items = Some(vec![CreateSubscriptionItems {
            price: Some(subscription.plan.clone()),
            quantity: subscription.quantity,
            ..Default::default()
        }]);
        params.trial_period_days = subscription.trial_period_days;
        params.trial_end = subscription.trial_end.map(Into::into);
        if !subscription.metadata.is_empty() {
            params.metadata = Some(subscription.metadata.clone());
        }

        let created = Subscription::create(&self.client, params)
            .await
            .map_err(AppError::from)?;

        Ok(UserSubscription::from(&created))
    }

    async fn retrieve_subscription(&self, subscription_id: &str) -> Res<UserSubscription> {
        let sub_id = parse_subscription_id(subscription_id)?;

        let subscription = Subscription::retrieve(&self.client, &sub_id, &[])
            .await
            .map_err(AppError::from)?;

        Ok(UserSubscription::from(&subscription))
    }

    async fn cancel_subscription(
        &self,
        subscription_id: &str,
        at_period_end: bool,
    ) -> Res<UserSubscription> {
        let sub_id = parse_subscription_id(subscription_id)?;

        // Stripe schedules period-end cancellation through an update, not a delete
        let subscription = if at_period_end {
            Subscription::update(
                &self.client,
                &sub_id,
                UpdateSubscription {
                    cancel_at_period_end: Some(true),
                    ..Default::default()
                },
            )
            .await
        } else {
            Subscription::cancel(&self.client, &sub_id, CancelSubscription::default()).await
        }
        .map_err(AppError::from)?;

        Ok(UserSubscription::from(&subscription))
    }
}
