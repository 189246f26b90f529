//! Shared types and engines for the wine discovery platform
//!
//! This crate contains the domain models and the three pure engines
//! (match scoring, quiz classification and menu reconciliation) shared
//! between the backend and the browser (via WASM). Nothing here performs
//! I/O; callers supply the data and persist the results.

pub mod defaults;
pub mod matching;
pub mod models;
pub mod quiz;
pub mod reconcile;
pub mod validation;

pub use matching::*;
pub use models::*;
pub use quiz::*;
pub use reconcile::*;
pub use validation::*;
