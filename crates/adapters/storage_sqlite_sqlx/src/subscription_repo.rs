//! `SQLite` implementation of [`SubscriptionRepository`].

use std::future::Future;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use latt_app::ports::SubscriptionRepository;
use latt_domain::error::LattError;
use latt_domain::id::{ServiceId, SubscriptionId, UserId};
use latt_domain::subscription::{
    BillingCycle, Subscription, SubscriptionLine, SubscriptionStatus,
};

use crate::error::{StorageError, classify_write_error};

fn decode<T, E>(result: Result<T, E>) -> Result<T, sqlx::Error>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

/// Wrapper for converting database rows into domain [`Subscription`].
struct Wrapper(Subscription);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Subscription> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let user_id: String = row.try_get("user_id")?;
        let service_id: String = row.try_get("service_id")?;
        let plan_name: Option<String> = row.try_get("plan_name")?;
        let price: String = row.try_get("price")?;
        let billing_cycle: String = row.try_get("billing_cycle")?;
        let renewal_date: String = row.try_get("renewal_date")?;
        let status: String = row.try_get("status")?;

        Ok(Self(Subscription {
            id: decode(SubscriptionId::from_str(&id))?,
            user_id: decode(UserId::from_str(&user_id))?,
            service_id: decode(ServiceId::from_str(&service_id))?,
            plan_name,
            price: decode(Decimal::from_str(&price))?,
            billing_cycle: decode(BillingCycle::from_str(&billing_cycle))?,
            renewal_date: decode(NaiveDate::from_str(&renewal_date))?,
            status: decode(SubscriptionStatus::from_str(&status))?,
        }))
    }
}

/// Wrapper for converting joined rows into [`SubscriptionLine`].
struct LineWrapper(SubscriptionLine);

impl<'r> FromRow<'r, SqliteRow> for LineWrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let service_name: String = row.try_get("service_name")?;
        let logo_url: String = row.try_get("logo_url")?;
        let plan_name: Option<String> = row.try_get("plan_name")?;
        let price: String = row.try_get("price")?;
        let billing_cycle: String = row.try_get("billing_cycle")?;
        let renewal_date: String = row.try_get("renewal_date")?;
        let status: String = row.try_get("status")?;

        Ok(Self(SubscriptionLine {
            id: decode(SubscriptionId::from_str(&id))?,
            service_name,
            logo_url,
            plan_name,
            price: decode(Decimal::from_str(&price))?,
            billing_cycle: decode(BillingCycle::from_str(&billing_cycle))?,
            renewal_date: decode(NaiveDate::from_str(&renewal_date))?,
            status: decode(SubscriptionStatus::from_str(&status))?,
        }))
    }
}

const INSERT: &str = "INSERT INTO subscriptions \
    (id, user_id, service_id, plan_name, price, billing_cycle, renewal_date, status) \
    VALUES (?, ?, ?, ?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM subscriptions WHERE id = ?";
const SELECT_LINES_FOR_USER: &str = "SELECT \
        subscriptions.id, \
        services.name AS service_name, \
        services.logo_url, \
        subscriptions.plan_name, \
        subscriptions.price, \
        subscriptions.billing_cycle, \
        subscriptions.renewal_date, \
        subscriptions.status \
    FROM subscriptions \
    JOIN services ON subscriptions.service_id = services.id \
    WHERE subscriptions.user_id = ? \
    ORDER BY subscriptions.renewal_date ASC";
const DELETE_BY_ID: &str = "DELETE FROM subscriptions WHERE id = ?";

/// `SQLite`-backed subscription repository.
pub struct SqliteSubscriptionRepository {
    pool: SqlitePool,
}

impl SqliteSubscriptionRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl SubscriptionRepository for SqliteSubscriptionRepository {
    fn create(
        &self,
        subscription: Subscription,
    ) -> impl Future<Output = Result<Subscription, LattError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(subscription.id.to_string())
                .bind(subscription.user_id.to_string())
                .bind(subscription.service_id.to_string())
                .bind(subscription.plan_name.as_deref())
                .bind(subscription.price.to_string())
                .bind(subscription.billing_cycle.to_string())
                .bind(subscription.renewal_date.to_string())
                .bind(subscription.status.to_string())
                .execute(&pool)
                .await
                .map_err(|err| {
                    classify_write_error(
                        err,
                        "Subscription",
                        &subscription.id.to_string(),
                        "subscriptions",
                    )
                })?;

            Ok(subscription)
        }
    }

    fn get_by_id(
        &self,
        id: SubscriptionId,
    ) -> impl Future<Output = Result<Option<Subscription>, LattError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn list_for_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<SubscriptionLine>, LattError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<LineWrapper> = sqlx::query_as(SELECT_LINES_FOR_USER)
                .bind(user_id.to_string())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn delete(&self, id: SubscriptionId) -> impl Future<Output = Result<bool, LattError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(result.rows_affected() > 0)
        }
    }
}
