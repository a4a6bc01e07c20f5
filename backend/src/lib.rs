//! # Flight Delays Explorer
//!
//! Interactive exploration backend over a static dataset of flight records.
//!
//! A user narrows the dataset with cascading filters (origin state → origin
//! city), a month range and a minimum departure delay. Every change recomputes
//! a single filtered view, from which a table and a delay chart (per-airline
//! scatter points and box-plot summaries) are derived.
//!
//! ## Architecture
//!
//! - [`dataset`]: CSV loading and the read-only dataset store
//! - [`models`]: flight records and the filter selection
//! - [`services`]: option resolution, filtering, projection and the reactive controller
//! - [`config`]: TOML/environment configuration
//! - [`http`]: Axum-based REST API and snapshot stream
//!
//! ## Data flow
//!
//! ```text
//! input event ─► ReactiveController ─► {city options, filtered view}
//!                                            │
//!                                            ▼
//!                                  projection (table + chart)
//!                                            │
//!                                            ▼
//!                                   publish to subscribers
//! ```

pub mod config;
pub mod dataset;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
