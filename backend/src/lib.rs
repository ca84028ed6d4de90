//! # Halloween Route Backend
//!
//! Directory service for houses taking part in trick-or-treating.
//!
//! Visitors browse participating houses, narrow them by scare level, candy
//! stock, accessibility and dietary options, see which ones are open right
//! now, and assemble a route. A map quota gatekeeper decides whether the
//! live map may be shown before the provider's monthly budget runs out.
//!
//! ## Architecture
//!
//! - [`models`]: house records, filter criteria and route plans
//! - [`services`]: opening hours, filtering, route planning, map quota
//! - [`db`]: repository trait and the in-memory house directory
//! - [`config`]: TOML and environment configuration
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod config;
pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
