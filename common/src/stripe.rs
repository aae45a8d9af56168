use stripe::{Client, CreateCustomer, Customer, PaymentSourceParams, TokenId};

use crate::error::{AppError, Res};

pub fn create_client(secret_key: &str) -> Client {
    Client::new(secret_key)
}

/// Creates a customer paying with the given card token (obtained with Stripe.js).
pub async fn create_customer(client: &Client, description: &str, token: &str) -> Res<Customer> {
    let token = token
        .parse::<TokenId>()
        .map_err(|e| AppError::BadRequest(format!("Invalid payment token: {}. {}", token, e)))?;

    let params = CreateCustomer {
        description: Some(description),
        source: Some(PaymentSourceParams::Token(token)),
        ..Default::default()
    };

    Customer::create(client, params)
        .await
        .map_err(AppError::from)
}
