//! Shipping domain types.
//!
//! These types represent domain objects separate from database row types.
//! `RichShippingInfo` and `StallShippingZones` are the client-facing
//! projections; the rest mirror what the store persists.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use openstall_core::{ShippingMethodId, ShippingZoneId, StallId};

/// A shipping method offered by a stall (domain type).
#[derive(Debug, Clone)]
pub struct ShippingMethod {
    /// Unique method ID.
    pub id: ShippingMethodId,
    /// Stall that owns this method.
    pub stall_id: StallId,
    /// Display name (e.g., "Standard", "Express").
    pub name: String,
    /// Shipping cost in the stall's currency.
    pub cost: Decimal,
    /// Whether this is the stall's default method.
    pub is_default: bool,
    /// When the method was created.
    pub created_at: DateTime<Utc>,
    /// When the method was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A shipping zone row (domain type).
///
/// A `None` region or country code is a wildcard marker: the zone applies
/// to all regions or countries for that dimension.
#[derive(Debug, Clone)]
pub struct ShippingZone {
    /// Unique zone ID.
    pub id: ShippingZoneId,
    /// Shipping method this zone belongs to.
    pub shipping_method_id: ShippingMethodId,
    /// Stall that owns this zone.
    pub stall_id: StallId,
    /// Region code (e.g., "EU", "APAC"), or `None` for all regions.
    pub region_code: Option<String>,
    /// ISO country code (e.g., "FR"), or `None` for all countries.
    pub country_code: Option<String>,
}

/// Client-facing projection of a shipping method plus its zone coverage.
///
/// `regions`/`countries` being `None` means the method applies to all
/// regions/countries; `Some` lists the specific codes (possibly empty).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RichShippingInfo {
    /// Method ID.
    pub id: ShippingMethodId,
    /// Method display name.
    pub name: String,
    /// Shipping cost, serialized as a decimal string.
    #[serde(with = "rust_decimal::serde::str")]
    pub cost: Decimal,
    /// Whether this is the stall's default method.
    pub is_default: bool,
    /// Covered region codes, or `None` for all regions.
    pub regions: Option<Vec<String>>,
    /// Covered country codes, or `None` for all countries.
    pub countries: Option<Vec<String>>,
}

/// Flat aggregate of every zone code a stall ships to, across all of its
/// methods. Never null-like: wildcard markers are simply dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StallShippingZones {
    /// All non-wildcard region codes, duplicates and order preserved.
    pub regions: Vec<String>,
    /// All non-wildcard country codes, duplicates and order preserved.
    pub countries: Vec<String>,
}
