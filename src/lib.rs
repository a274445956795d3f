//! Lighting design and energy audit calculations for building rooms.

pub mod analysis;
pub mod calc;
pub mod catalog;
pub mod config;
pub mod error;
pub mod io;
pub mod room;
pub mod tables;
pub mod usage;

#[cfg(feature = "api")]
pub mod api;
