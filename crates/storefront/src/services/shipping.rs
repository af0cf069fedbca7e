//! Shipping lookup service.
//!
//! Translates raw shipping method and zone rows into [`RichShippingInfo`]
//! projections for three access patterns: by method ID, by stall, and the
//! flat per-stall zone aggregate. Stateless; every operation is an
//! independent read.
//!
//! The two `RichShippingInfo` lookups differ deliberately in how they treat
//! wildcard zones (zones with a NULL region or country code):
//!
//! - [`ShippingLookupService::get_method_by_id`] ignores wildcards: they
//!   contribute nothing, and `regions`/`countries` are always `Some`.
//! - [`ShippingLookupService::get_by_stall_id`] applies wildcard-wins: any
//!   wildcard zone forces `None` ("applies everywhere") for that dimension.
//!
//! The upstream consumer depends on both behaviors, so they are kept as
//! separate projection functions rather than unified.

use sqlx::PgPool;
use tracing::debug;

use openstall_core::{Coverage, ShippingMethodId, StallId};

use crate::db::{self, RepositoryError};
use crate::models::shipping::{
    RichShippingInfo, ShippingMethod, ShippingZone, StallShippingZones,
};

/// Read-only lookup service for shipping methods and zones.
pub struct ShippingLookupService<'a> {
    pool: &'a PgPool,
}

impl<'a> ShippingLookupService<'a> {
    /// Create a new shipping lookup service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the shipping methods matching a method ID, with zone coverage.
    ///
    /// Wildcard zones are ignored here: `regions`/`countries` list only the
    /// specific codes and are never `None`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails. Empty result
    /// sets are not errors.
    pub async fn get_method_by_id(
        &self,
        method_id: &ShippingMethodId,
    ) -> Result<Vec<RichShippingInfo>, RepositoryError> {
        let methods = db::shipping::methods_by_id(self.pool, method_id).await?;
        let infos = self.project_with(methods, project_method_specific).await?;

        debug!(method_id = %method_id, count = infos.len(), "looked up shipping method");
        Ok(infos)
    }

    /// Get all shipping methods owned by a stall, with zone coverage.
    ///
    /// Applies wildcard-wins semantics per dimension: if any zone of a
    /// method has a NULL region code, `regions` is `None`; likewise for
    /// `countries`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_by_stall_id(
        &self,
        stall_id: &StallId,
    ) -> Result<Vec<RichShippingInfo>, RepositoryError> {
        let methods = db::shipping::methods_by_stall_id(self.pool, stall_id).await?;
        let infos = self.project_with(methods, project_method_wildcard).await?;

        debug!(stall_id = %stall_id, count = infos.len(), "looked up stall shipping");
        Ok(infos)
    }

    /// Get the flat aggregate of every zone code a stall ships to.
    ///
    /// No wildcard semantics: NULL codes are dropped, and both lists are
    /// empty (not `None`) when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_zones_by_stall_id(
        &self,
        stall_id: &StallId,
    ) -> Result<StallShippingZones, RepositoryError> {
        let zones = db::shipping::zones_by_stall_id(self.pool, stall_id).await?;

        debug!(stall_id = %stall_id, count = zones.len(), "looked up stall zones");
        Ok(flatten_stall_zones(&zones))
    }

    /// Fetch the zones for `methods` and project each method with the
    /// given projection.
    async fn project_with(
        &self,
        methods: Vec<ShippingMethod>,
        project: fn(ShippingMethod, &[ShippingZone]) -> RichShippingInfo,
    ) -> Result<Vec<RichShippingInfo>, RepositoryError> {
        let method_ids: Vec<ShippingMethodId> = methods.iter().map(|m| m.id.clone()).collect();
        let zones = db::shipping::zones_by_method_ids(self.pool, &method_ids).await?;
        let mut zones_by_method = db::shipping::group_zones_by_method(zones);

        Ok(methods
            .into_iter()
            .map(|method| {
                let zones = zones_by_method.remove(&method.id).unwrap_or_default();
                project(method, &zones)
            })
            .collect())
    }
}

// =============================================================================
// Projections
// =============================================================================

/// Project a method ignoring wildcard markers: only specific codes are
/// listed, and both dimensions are always `Some`.
fn project_method_specific(method: ShippingMethod, zones: &[ShippingZone]) -> RichShippingInfo {
    RichShippingInfo {
        id: method.id,
        name: method.name,
        cost: method.cost,
        is_default: method.is_default,
        regions: Some(Coverage::specific(
            zones.iter().map(|z| z.region_code.as_deref()),
        )),
        countries: Some(Coverage::specific(
            zones.iter().map(|z| z.country_code.as_deref()),
        )),
    }
}

/// Project a method with wildcard-wins semantics per dimension.
fn project_method_wildcard(method: ShippingMethod, zones: &[ShippingZone]) -> RichShippingInfo {
    let regions = Coverage::collect(zones.iter().map(|z| z.region_code.as_deref()));
    let countries = Coverage::collect(zones.iter().map(|z| z.country_code.as_deref()));

    RichShippingInfo {
        id: method.id,
        name: method.name,
        cost: method.cost,
        is_default: method.is_default,
        regions: regions.into_codes(),
        countries: countries.into_codes(),
    }
}

/// Flatten a stall's zones into the aggregate code lists, dropping NULL
/// markers and preserving order and duplicates.
fn flatten_stall_zones(zones: &[ShippingZone]) -> StallShippingZones {
    StallShippingZones {
        regions: Coverage::specific(zones.iter().map(|z| z.region_code.as_deref())),
        countries: Coverage::specific(zones.iter().map(|z| z.country_code.as_deref())),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    use openstall_core::ShippingZoneId;

    use super::*;

    fn method(id: &str, name: &str, cost: &str, is_default: bool) -> ShippingMethod {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single().expect("valid ts");
        ShippingMethod {
            id: ShippingMethodId::from(id),
            stall_id: StallId::from("stall-1"),
            name: name.to_owned(),
            cost: cost.parse::<Decimal>().expect("valid decimal"),
            is_default,
            created_at: created,
            updated_at: created,
        }
    }

    fn zone(id: &str, method_id: &str, region: Option<&str>, country: Option<&str>) -> ShippingZone {
        ShippingZone {
            id: ShippingZoneId::from(id),
            shipping_method_id: ShippingMethodId::from(method_id),
            stall_id: StallId::from("stall-1"),
            region_code: region.map(str::to_owned),
            country_code: country.map(str::to_owned),
        }
    }

    #[test]
    fn test_by_id_projection_ignores_wildcards() {
        let zones = vec![
            zone("z1", "m1", Some("EU"), None),
            zone("z2", "m1", None, Some("US")),
        ];

        let info = project_method_specific(method("m1", "Standard", "10.00", true), &zones);

        assert_eq!(info.regions, Some(vec!["EU".to_owned()]));
        assert_eq!(info.countries, Some(vec!["US".to_owned()]));
    }

    #[test]
    fn test_by_stall_projection_nulls_on_wildcard() {
        // Same zone set as the by-id test: the two lookups must disagree.
        let zones = vec![
            zone("z1", "m1", Some("EU"), None),
            zone("z2", "m1", None, Some("US")),
        ];

        let info = project_method_wildcard(method("m1", "Standard", "10.00", true), &zones);

        assert_eq!(info.regions, None);
        assert_eq!(info.countries, None);
    }

    #[test]
    fn test_by_stall_projection_without_wildcards() {
        let zones = vec![
            zone("z1", "m1", Some("EU"), Some("FR")),
            zone("z2", "m1", Some("APAC"), Some("JP")),
        ];

        let info = project_method_wildcard(method("m1", "Standard", "10.00", false), &zones);

        assert_eq!(info.regions, Some(vec!["EU".to_owned(), "APAC".to_owned()]));
        assert_eq!(info.countries, Some(vec!["FR".to_owned(), "JP".to_owned()]));
    }

    #[test]
    fn test_projection_with_no_zones_yields_empty_lists() {
        let info = project_method_specific(method("m1", "Standard", "10.00", false), &[]);
        assert_eq!(info.regions, Some(Vec::new()));
        assert_eq!(info.countries, Some(Vec::new()));

        let info = project_method_wildcard(method("m1", "Standard", "10.00", false), &[]);
        assert_eq!(info.regions, Some(Vec::new()));
        assert_eq!(info.countries, Some(Vec::new()));
    }

    #[test]
    fn test_cost_and_default_flag_pass_through() {
        let info = project_method_wildcard(method("m1", "Express", "42.50", true), &[]);

        assert_eq!(info.id, ShippingMethodId::from("m1"));
        assert_eq!(info.name, "Express");
        assert_eq!(info.cost, "42.50".parse::<Decimal>().expect("valid decimal"));
        assert!(info.is_default);
    }

    #[test]
    fn test_flatten_stall_zones_drops_nulls() {
        let zones = vec![
            zone("z1", "m1", Some("EU"), None),
            zone("z2", "m2", None, Some("US")),
        ];

        let aggregate = flatten_stall_zones(&zones);

        assert_eq!(aggregate.regions, vec!["EU".to_owned()]);
        assert_eq!(aggregate.countries, vec!["US".to_owned()]);
    }

    #[test]
    fn test_flatten_stall_zones_preserves_duplicates_and_order() {
        let zones = vec![
            zone("z1", "m1", Some("EU"), Some("FR")),
            zone("z2", "m2", Some("EU"), Some("DE")),
            zone("z3", "m2", Some("APAC"), Some("FR")),
        ];

        let aggregate = flatten_stall_zones(&zones);

        assert_eq!(
            aggregate.regions,
            vec!["EU".to_owned(), "EU".to_owned(), "APAC".to_owned()]
        );
        assert_eq!(
            aggregate.countries,
            vec!["FR".to_owned(), "DE".to_owned(), "FR".to_owned()]
        );
    }

    #[test]
    fn test_flatten_stall_zones_empty() {
        assert_eq!(flatten_stall_zones(&[]), StallShippingZones::default());
    }

    #[test]
    fn test_projection_is_pure() {
        let zones = vec![zone("z1", "m1", Some("EU"), Some("FR"))];
        let first = project_method_wildcard(method("m1", "Standard", "10.00", true), &zones);
        let second = project_method_wildcard(method("m1", "Standard", "10.00", true), &zones);
        assert_eq!(first, second);
    }

    #[test]
    fn test_rich_shipping_info_serializes_camel_case_with_string_cost() {
        let info = project_method_wildcard(
            method("m1", "Standard", "10.00", true),
            &[zone("z1", "m1", Some("EU"), None)],
        );

        let json = serde_json::to_value(&info).expect("serialize");
        assert_eq!(json["id"], "m1");
        assert_eq!(json["cost"], "10.00");
        assert_eq!(json["isDefault"], true);
        // Wildcard country renders as JSON null.
        assert!(json["countries"].is_null());
        assert_eq!(json["regions"][0], "EU");
    }
}
