//! Command implementations.

pub mod doctor;
pub mod list;
pub mod locate;
#[cfg(feature = "server")]
pub mod serve;
pub mod transition;
pub mod version;
