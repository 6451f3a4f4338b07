//! Subscription — a user's recurring commitment to a service.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{LattError, ValidationError};
use crate::id::{ServiceId, SubscriptionId, UserId};

/// How often a subscription renews. Stored verbatim; nothing in this core
/// computes recurrence from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        };
        f.write_str(text)
    }
}

impl FromStr for BillingCycle {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "yearly" => Ok(Self::Yearly),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// Lifecycle tag on a subscription. New rows start [`Active`](Self::Active);
/// nothing in this core flips the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Cancelled,
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Active => "active",
            Self::Cancelled => "cancelled",
        };
        f.write_str(text)
    }
}

impl FromStr for SubscriptionStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// Parse error for the closed vocabularies above.
#[derive(Debug, thiserror::Error)]
#[error("unknown variant {0:?}")]
pub struct UnknownVariant(pub String);

/// A user's recurring commitment to a [`Service`](crate::service::Service).
///
/// `price` uses exact decimal arithmetic so totals never drift across many
/// small amounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub user_id: UserId,
    pub service_id: ServiceId,
    pub plan_name: Option<String>,
    pub price: Decimal,
    pub billing_cycle: BillingCycle,
    pub renewal_date: NaiveDate,
    pub status: SubscriptionStatus,
}

impl Subscription {
    /// Create a builder for constructing a [`Subscription`].
    #[must_use]
    pub fn builder() -> SubscriptionBuilder {
        SubscriptionBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`LattError::Validation`] when `price` is negative.
    pub fn validate(&self) -> Result<(), LattError> {
        if self.price.is_sign_negative() && !self.price.is_zero() {
            return Err(ValidationError::NegativePrice.into());
        }
        Ok(())
    }
}

/// A dashboard row: one subscription joined to its service for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionLine {
    pub id: SubscriptionId,
    pub service_name: String,
    pub logo_url: String,
    pub plan_name: Option<String>,
    pub price: Decimal,
    pub billing_cycle: BillingCycle,
    pub renewal_date: NaiveDate,
    pub status: SubscriptionStatus,
}

/// Step-by-step builder for [`Subscription`].
#[derive(Debug, Default)]
pub struct SubscriptionBuilder {
    id: Option<SubscriptionId>,
    user_id: Option<UserId>,
    service_id: Option<ServiceId>,
    plan_name: Option<String>,
    price: Option<Decimal>,
    billing_cycle: Option<BillingCycle>,
    renewal_date: Option<NaiveDate>,
    status: Option<SubscriptionStatus>,
}

impl SubscriptionBuilder {
    #[must_use]
    pub fn id(mut self, id: SubscriptionId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn user_id(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    #[must_use]
    pub fn service_id(mut self, service_id: ServiceId) -> Self {
        self.service_id = Some(service_id);
        self
    }

    #[must_use]
    pub fn plan_name(mut self, plan_name: impl Into<String>) -> Self {
        self.plan_name = Some(plan_name.into());
        self
    }

    /// Set the plan name only when one is provided.
    #[must_use]
    pub fn maybe_plan_name(mut self, plan_name: Option<impl Into<String>>) -> Self {
        self.plan_name = plan_name.map(Into::into);
        self
    }

    #[must_use]
    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    #[must_use]
    pub fn billing_cycle(mut self, billing_cycle: BillingCycle) -> Self {
        self.billing_cycle = Some(billing_cycle);
        self
    }

    #[must_use]
    pub fn renewal_date(mut self, renewal_date: NaiveDate) -> Self {
        self.renewal_date = Some(renewal_date);
        self
    }

    #[must_use]
    pub fn status(mut self, status: SubscriptionStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Consume the builder, validate, and return a [`Subscription`].
    ///
    /// `status` defaults to [`SubscriptionStatus::Active`]; `price` defaults
    /// to zero; `billing_cycle` defaults to monthly.
    ///
    /// # Errors
    ///
    /// Returns [`LattError::Validation`] if `price` is negative.
    pub fn build(self) -> Result<Subscription, LattError> {
        let subscription = Subscription {
            id: self.id.unwrap_or_default(),
            user_id: self.user_id.unwrap_or_default(),
            service_id: self.service_id.unwrap_or_default(),
            plan_name: self.plan_name,
            price: self.price.unwrap_or_default(),
            billing_cycle: self.billing_cycle.unwrap_or(BillingCycle::Monthly),
            renewal_date: self.renewal_date.unwrap_or_default(),
            status: self.status.unwrap_or(SubscriptionStatus::Active),
        };
        subscription.validate()?;
        Ok(subscription)
    }
}
