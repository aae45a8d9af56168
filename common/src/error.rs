use std::fmt;

use stripe::{ErrorCode, ErrorType, RequestError, StripeError};
use thiserror::Error;

pub type Res<T> = std::result::Result<T, AppError>;

/// Stripe resource named by a "No such ..." error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Plan,
    Customer,
    Subscription,
    Other,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Plan => write!(f, "plan"),
            Resource::Customer => write!(f, "customer"),
            Resource::Subscription => write!(f, "subscription"),
            Resource::Other => write!(f, "resource"),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    // === CONVERSION ERRORS ===
    #[error("Stripe error: {0}")]
    Stripe(StripeError),

    // === BILLING ERRORS ===
    #[error("The {0} plan was not found in Stripe")]
    PlanNotFound(String),

    #[error("The {0} customer was not found in Stripe")]
    CustomerNotFound(String),

    #[error("Stripe {resource} not found: {message}")]
    NotFound { resource: Resource, message: String },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Stripe unavailable: {0}")]
    ProviderUnavailable(String),

    // === APPLICATION ERRORS ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// Whether the provider reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AppError::NotFound { .. } | AppError::PlanNotFound(_) | AppError::CustomerNotFound(_)
        )
    }
}

/// Maps the message of a Stripe invalid request error to the missing resource.
///
/// Stripe phrases these as `No such plan: 'gold'`. Newer API versions report
/// plans as prices, so both spellings resolve to [`Resource::Plan`].
pub fn missing_resource(message: &str) -> Option<Resource> {
    if message.contains("No such plan") || message.contains("No such price") {
        Some(Resource::Plan)
    } else if message.contains("No such customer") {
        Some(Resource::Customer)
    } else if message.contains("No such subscription") {
        Some(Resource::Subscription)
    } else if message.contains("No such") {
        Some(Resource::Other)
    } else {
        None
    }
}

fn classify_request(error: RequestError) -> AppError {
    let message = error.message.clone().unwrap_or_else(|| error.to_string());

    let resource = missing_resource(&message);
    if matches!(error.code, Some(ErrorCode::ResourceMissing)) || resource.is_some() {
        return AppError::NotFound {
            resource: resource.unwrap_or(Resource::Other),
            message,
        };
    }

    match error.error_type {
        ErrorType::InvalidRequest => AppError::BadRequest(message),
        ErrorType::Api | ErrorType::Connection | ErrorType::RateLimit => {
            AppError::ProviderUnavailable(message)
        }
        _ => AppError::Stripe(StripeError::Stripe(error)),
    }
}

impl From<StripeError> for AppError {
    fn from(error: StripeError) -> Self {
        match error {
            StripeError::Stripe(request) => classify_request(request),
            StripeError::Timeout => {
                AppError::ProviderUnavailable("timeout communicating with Stripe".to_string())
            }
            StripeError::ClientError(message) => AppError::ProviderUnavailable(message),
            other => {
                log::error!("Stripe error: {}", other);
                AppError::Stripe(other)
            }
        }
    }
}
