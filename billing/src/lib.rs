#![recursion_limit = "256"]

pub mod services {
    pub mod provider;
    pub mod stripe;
    pub mod sub;
}

pub mod dtos {
    pub mod sub;
}

pub mod models {
    pub mod sub;
}

mod misc {
    pub(crate) mod sub;
}

pub use dtos::sub::SubscriptionArgs;
pub use models::sub::{NewCustomer, NewSubscription, TrialEnd, UserSubscription};
pub use services::{
    provider::BillingProvider,
    stripe::StripeProvider,
    sub::{BillingDriver, PendingSubscription},
};

use common::{env_config::Config, error::Res};

/// Loads the configuration from the environment and builds a Stripe backed driver.
///
/// # Errors
///
/// Fails with `AppError::Config` when no Stripe secret key is configured.
pub fn from_env() -> Res<BillingDriver<StripeProvider>> {
    let config = Config::from_env()?;
    Ok(BillingDriver::from_config(&config))
}
