//! Domain models for the wine discovery platform

mod diff;
mod lenient;
mod preference;
mod profile;
mod wine;

pub use diff::*;
pub use preference::*;
pub use profile::*;
pub use wine::*;
