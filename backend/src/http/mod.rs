//! HTTP server module.
//!
//! Exposes the filter controls and the derived view as a REST API, plus a
//! Server-Sent Events stream of published snapshots.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Request parsing, JSON responses, SSE                   │
//! │  - CORS, compression, error mapping                       │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │ FilterEvent            ▲ ViewSnapshot
//! ┌───────────────────▼────────────────────────┴─────────────┐
//! │  ReactiveController (behind a mutex, single writer)       │
//! │  - options → prune → filter → project → publish          │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │ read-only
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Dataset (process-wide, immutable)                        │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
