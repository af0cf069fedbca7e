//! Storefront services.

pub mod shipping;
