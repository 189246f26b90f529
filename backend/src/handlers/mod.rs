//! HTTP handlers for the wine discovery server

pub mod health;
pub mod menu;
pub mod pairings;
pub mod quiz;

pub use health::*;
pub use menu::*;
pub use pairings::*;
pub use quiz::*;
