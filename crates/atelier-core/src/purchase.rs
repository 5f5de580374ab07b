//! Purchase Types
//!
//! Purchase records owned by the backend, plus the transient purchase
//! intent the client carries across a payment-provider redirect.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::course::Tier;

/// Payment state of a purchase record
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

/// A purchase record, owned by the backend
///
/// The client never mutates this directly; it triggers backend-side
/// confirmation and re-reads the record afterward.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CoursePurchase {
    /// Purchased course
    pub course_id: String,

    /// Purchasing user
    pub user_id: String,

    /// Tier the purchase unlocked
    pub tier: Tier,

    /// Payment state
    pub payment_status: PaymentStatus,

    /// Purchase timestamp
    pub purchased_at: DateTime<Utc>,
}

impl CoursePurchase {
    /// Whether payment completed and the course is unlocked
    pub fn is_completed(&self) -> bool {
        matches!(self.payment_status, PaymentStatus::Completed)
    }
}

/// A checkout line item
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub product_name: String,
    pub product_description: String,
    pub price_in_cents: i64,
    pub currency: String,
    pub quantity: u32,
}

/// Payment provider for a pending purchase
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentProvider {
    Stripe,
    Paypal,
}

impl PaymentProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentProvider::Stripe => "stripe",
            PaymentProvider::Paypal => "paypal",
        }
    }
}

/// Client-persisted intent to buy a specific course
///
/// Written before navigating away to the payment provider and read back
/// when the browser returns, reconnecting the provider's return redirect
/// to the course the user was buying. At most one exists per browser
/// session; a new checkout overwrites any prior one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPurchase {
    /// Course the user intends to buy
    pub course_id: String,

    /// Provider handling the payment
    pub provider: PaymentProvider,

    /// Provider session reference (client-generated for PayPal,
    /// provider-issued for Stripe and returned via the success URL)
    pub provider_session_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_purchase() {
        let purchase = CoursePurchase {
            course_id: "c1".into(),
            user_id: "u1".into(),
            tier: Tier::Paid,
            payment_status: PaymentStatus::Completed,
            purchased_at: Utc::now(),
        };
        assert!(purchase.is_completed());
    }

    #[test]
    fn test_pending_purchase_not_completed() {
        let purchase = CoursePurchase {
            course_id: "c1".into(),
            user_id: "u1".into(),
            tier: Tier::Paid,
            payment_status: PaymentStatus::Pending,
            purchased_at: Utc::now(),
        };
        assert!(!purchase.is_completed());
    }
}
