use stripe::{Scheduled, Subscription};

use crate::models::sub::{TrialEnd, UserSubscription};

/// Enables the use of into() on a Stripe subscription.
impl From<&Subscription> for UserSubscription {
    fn from(sub: &Subscription) -> Self {
        UserSubscription {
            id: sub.id.to_string(),
            customer_id: sub.customer.id().to_string(),
            plan_id: sub
                .items
                .data
                .first()
                .and_then(|item| item.price.as_ref())
                .map(|price| price.id.to_string())
                .unwrap_or_default(),
            status: sub.status.to_string(),
            current_period_end: sub.current_period_end,
            cancel_at_period_end: sub.cancel_at_period_end,
            trial_end: sub.trial_end,
        }
    }
}

impl From<TrialEnd> for Scheduled {
    fn from(end: TrialEnd) -> Self {
        match end {
            TrialEnd::Now => Scheduled::now(),
            TrialEnd::At(timestamp) => Scheduled::at(timestamp),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn subscription_fixture() -> serde_json::Value {
        json!({
            "id": "sub_1OQxYz2eZvKYlo2C",
            "object": "subscription",
            "application": null,
            "application_fee_percent": null,
            "automatic_tax": { "enabled": false },
            "billing_cycle_anchor": 1_700_000_000,
            "billing_thresholds": null,
            "cancel_at": 1_702_592_000,
            "cancel_at_period_end": true,
            "canceled_at": null,
            "cancellation_details": null,
            "collection_method": "charge_automatically",
            "created": 1_700_000_000,
            "currency": "usd",
            "current_period_end": 1_702_592_000,
            "current_period_start": 1_700_000_000,
            "customer": "cus_P9xYz2eZvKYlo2",
            "days_until_due": null,
            "default_payment_method": null,
            "default_source": null,
            "default_tax_rates": [],
            "description": null,
            "discount": null,
            "ended_at": null,
            "items": {
                "object": "list",
                "data": [{
                    "id": "si_P9xYz2eZvKYlo2",
                    "object": "subscription_item",
                    "billing_thresholds": null,
                    "created": 1_700_000_000,
                    "metadata": {},
                    "price": {
                        "id": "price_pro_monthly",
                        "object": "price",
                        "active": true,
                        "billing_scheme": "per_unit",
                        "created": 1_690_000_000,
                        "currency": "usd",
                        "livemode": false,
                        "lookup_key": null,
                        "metadata": {},
                        "nickname": null,
                        "product": "prod_P9xYz2eZvKYlo2",
                        "recurring": {
                            "aggregate_usage": null,
                            "interval": "month",
                            "interval_count": 1,
                            "trial_period_days": null,
                            "usage_type": "licensed"
                        },
                        "tax_behavior": "unspecified",
                        "tiers_mode": null,
                        "transform_quantity": null,
                        "type": "recurring",
                        "unit_amount": 2000,
                        "unit_amount_decimal": "2000"
                    },
                    "quantity": 1,
                    "subscription": "sub_1OQxYz2eZvKYlo2C",
                    "tax_rates": []
                }],
                "has_more": false,
                "total_count": 1,
                "url": "/v1/subscription_items?subscription=sub_1OQxYz2eZvKYlo2C"
            },
            "latest_invoice": null,
            "livemode": false,
            "metadata": {},
            "next_pending_invoice_item_invoice": null,
            "on_behalf_of": null,
            "pause_collection": null,
            "payment_settings": null,
            "pending_invoice_item_interval": null,
            "pending_setup_intent": null,
            "pending_update": null,
            "schedule": null,
            "start_date": 1_700_000_000,
            "status": "trialing",
            "test_clock": null,
            "transfer_data": null,
            "trial_end": 1_701_209_600,
            "trial_settings": null,
            "trial_start": 1_700_000_000
        })
    }

    #[test]
    fn stripe_subscription_into_user_subscription() {
        let stripe_sub: Subscription = serde_json::from_value(subscription_fixture()).unwrap();

        let sub = UserSubscription::from(&stripe_sub);

        assert_eq!(sub.id, "sub_1OQxYz2eZvKYlo2C");
        assert_eq!(sub.customer_id, "cus_P9xYz2eZvKYlo2");
        assert_eq!(sub.plan_id, "price_pro_monthly");
        assert_eq!(sub.status, "trialing");
        assert!(sub.is_trialing());
        assert!(sub.cancel_at_period_end);
        assert_eq!(sub.current_period_end, 1_702_592_000);
        assert_eq!(sub.trial_end, Some(1_701_209_600));
    }

    #[test]
    fn subscription_without_items_has_no_plan() {
        let mut fixture = subscription_fixture();
        fixture["items"]["data"] = json!([]);
        fixture["items"]["total_count"] = json!(0);
        fixture["status"] = json!("active");
        fixture["trial_end"] = json!(null);

        let sub = UserSubscription::from(&serde_json::from_value::<Subscription>(fixture).unwrap());

        assert_eq!(sub.plan_id, "");
        assert!(sub.is_subscribed());
        assert_eq!(sub.trial_end, None);
    }

    #[test]
    fn trial_end_is_sent_as_now_or_timestamp() {
        assert_eq!(
            serde_json::to_value(Scheduled::from(TrialEnd::Now)).unwrap(),
            json!("now")
        );
        assert_eq!(
            serde_json::to_value(Scheduled::from(TrialEnd::At(1_701_209_600))).unwrap(),
            json!(1_701_209_600)
        );
    }
}
