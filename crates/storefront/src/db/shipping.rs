//! Database operations for shipping methods and zones.
//!
//! Queries use runtime `sqlx::query_as` since the `storefront` schema is
//! owned externally and no compile-time query cache is available.
//!
//! The caller composes a method fetch with [`zones_by_method_ids`] and
//! [`group_zones_by_method`] instead of relying on an eager-load: one query
//! for the methods, one for their zones, then an explicit grouping step.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use openstall_core::{ShippingMethodId, ShippingZoneId, StallId};

use super::RepositoryError;
use crate::models::shipping::{ShippingMethod, ShippingZone};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for shipping method queries.
#[derive(Debug, sqlx::FromRow)]
struct ShippingMethodRow {
    id: String,
    stall_id: String,
    name: String,
    cost: Decimal,
    is_default: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ShippingMethodRow> for ShippingMethod {
    fn from(row: ShippingMethodRow) -> Self {
        Self {
            id: ShippingMethodId::from(row.id),
            stall_id: StallId::from(row.stall_id),
            name: row.name,
            cost: row.cost,
            is_default: row.is_default,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Internal row type for shipping zone queries.
#[derive(Debug, sqlx::FromRow)]
struct ShippingZoneRow {
    id: String,
    shipping_method_id: String,
    stall_id: String,
    region_code: Option<String>,
    country_code: Option<String>,
}

impl From<ShippingZoneRow> for ShippingZone {
    fn from(row: ShippingZoneRow) -> Self {
        Self {
            id: ShippingZoneId::from(row.id),
            shipping_method_id: ShippingMethodId::from(row.shipping_method_id),
            stall_id: StallId::from(row.stall_id),
            region_code: row.region_code,
            country_code: row.country_code,
        }
    }
}

// =============================================================================
// Queries
// =============================================================================

/// Fetch all shipping methods with the given ID.
///
/// Logically at most one row matches, but the store contract is a list
/// fetch, so zero or more rows are returned as-is.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn methods_by_id(
    pool: &PgPool,
    method_id: &ShippingMethodId,
) -> Result<Vec<ShippingMethod>, RepositoryError> {
    let rows = sqlx::query_as::<_, ShippingMethodRow>(
        r"
        SELECT id, stall_id, name, cost, is_default, created_at, updated_at
        FROM storefront.shipping_method
        WHERE id = $1
        ORDER BY created_at, id
        ",
    )
    .bind(method_id.as_str())
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(ShippingMethod::from).collect())
}

/// Fetch all shipping methods owned by a stall.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn methods_by_stall_id(
    pool: &PgPool,
    stall_id: &StallId,
) -> Result<Vec<ShippingMethod>, RepositoryError> {
    let rows = sqlx::query_as::<_, ShippingMethodRow>(
        r"
        SELECT id, stall_id, name, cost, is_default, created_at, updated_at
        FROM storefront.shipping_method
        WHERE stall_id = $1
        ORDER BY created_at, id
        ",
    )
    .bind(stall_id.as_str())
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(ShippingMethod::from).collect())
}

/// Fetch the zones belonging to any of the given shipping methods.
///
/// Returns an empty list without touching the database when `method_ids`
/// is empty.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn zones_by_method_ids(
    pool: &PgPool,
    method_ids: &[ShippingMethodId],
) -> Result<Vec<ShippingZone>, RepositoryError> {
    if method_ids.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<String> = method_ids.iter().map(|id| id.as_str().to_owned()).collect();

    let rows = sqlx::query_as::<_, ShippingZoneRow>(
        r"
        SELECT id, shipping_method_id, stall_id, region_code, country_code
        FROM storefront.shipping_zone
        WHERE shipping_method_id = ANY($1)
        ORDER BY id
        ",
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(ShippingZone::from).collect())
}

/// Fetch all shipping zones owned directly by a stall, independent of
/// which method they belong to.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn zones_by_stall_id(
    pool: &PgPool,
    stall_id: &StallId,
) -> Result<Vec<ShippingZone>, RepositoryError> {
    let rows = sqlx::query_as::<_, ShippingZoneRow>(
        r"
        SELECT id, shipping_method_id, stall_id, region_code, country_code
        FROM storefront.shipping_zone
        WHERE stall_id = $1
        ORDER BY id
        ",
    )
    .bind(stall_id.as_str())
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(ShippingZone::from).collect())
}

/// Group zones by their owning method ID, preserving fetch order within
/// each group.
#[must_use]
pub fn group_zones_by_method(
    zones: Vec<ShippingZone>,
) -> HashMap<ShippingMethodId, Vec<ShippingZone>> {
    let mut grouped: HashMap<ShippingMethodId, Vec<ShippingZone>> = HashMap::new();
    for zone in zones {
        grouped
            .entry(zone.shipping_method_id.clone())
            .or_default()
            .push(zone);
    }
    grouped
}
