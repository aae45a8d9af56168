use std::{env, sync::Arc};

use crate::error::{AppError, Res};

const DEFAULT_CUSTOMER_DESCRIPTION: &str = "Subscription customer";

#[derive(Clone, Debug)]
/// Configuration for the billing adapter.
///
/// Holds the Stripe credentials the driver authenticates with,
/// the description given to customers created during `subscribe`,
/// and logging preferences.
pub struct Config {
    /// Stripe secret key
    pub stripe_secret_key: String,
    /// Description attached to customers created by `subscribe`.
    pub customer_description: String,
    /// A boolean indicating whether console logging is enabled.
    pub console_logging_enabled: bool,
    /// Minimum level written by the logger.
    pub log_level: String,
    /// Optional file the logger also writes to.
    pub log_file: Option<String>,
}

impl Config {
    /// Creates a new `Config` instance from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first when present.
    ///
    /// # Environment Variables
    ///
    /// Required:
    /// - `STRIPE_SECRET_KEY`: Secret key used to authenticate against Stripe
    ///
    /// Optional (with defaults):
    /// - `BILLING_CUSTOMER_DESCRIPTION`: default "Subscription customer"
    /// - `ENABLE_CONSOLE_LOGGING`: default true
    /// - `LOG_LEVEL`: default "info"
    /// - `LOG_FILE`: unset by default
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] when the Stripe secret key is missing.
    pub fn from_env() -> Res<Arc<Self>> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok()).map(Arc::new)
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Res<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let stripe_secret_key = lookup("STRIPE_SECRET_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AppError::Config("Billing configuration not found: STRIPE_SECRET_KEY".to_string())
            })?;

        Ok(Config {
            stripe_secret_key,
            customer_description: lookup("BILLING_CUSTOMER_DESCRIPTION")
                .unwrap_or_else(|| DEFAULT_CUSTOMER_DESCRIPTION.to_string()),
            console_logging_enabled: lookup("ENABLE_CONSOLE_LOGGING")
                .unwrap_or_else(|| "true".to_string())
                .to_lowercase()
                == "true",
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_file: lookup("LOG_FILE").filter(|path| !path.is_empty()),
        })
    }
}
