//! Openstall Storefront data-access library.
//!
//! This crate provides the storefront's read-side database access as a
//! library, allowing it to be tested and reused by higher-level handlers.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod models;
pub mod services;
