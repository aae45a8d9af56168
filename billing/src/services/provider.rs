use std::future::Future;

use common::error::Res;

use crate::models::sub::{NewCustomer, NewSubscription, UserSubscription};

/// The calls the billing driver makes against a payment provider.
///
/// Implementations translate provider failures into [`common::error::AppError`];
/// a missing plan, customer or subscription must surface as
/// `AppError::NotFound` with the matching resource.
pub trait BillingProvider: Send + Sync {
    /// Creates a customer and returns its identifier.
    fn create_customer(&self, customer: &NewCustomer) -> impl Future<Output = Res<String>> + Send;

    fn create_subscription(
        &self,
        subscription: &NewSubscription,
    ) -> impl Future<Output = Res<UserSubscription>> + Send;

    fn retrieve_subscription(
        &self,
        subscription_id: &str,
    ) -> impl Future<Output = Res<UserSubscription>> + Send;

    /// Cancels a subscription, either at the end of the billing period or right away.
    fn cancel_subscription(
        &self,
        subscription_id: &str,
        at_period_end: bool,
    ) -> impl Future<Output = Res<UserSubscription>> + Send;
}
