//! Hatchbot teleop library.
//!
//! Exposes the control core, drivers and adapters for the host binary and
//! for integration testing.  Device access is confined to
//! [`adapters`] and [`drivers`]; everything under [`app`] and [`control`]
//! is pure logic.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod drivers;
pub mod error;
pub mod input;
pub mod pins;
pub mod profile;
pub mod safety;
pub mod scheduler;
pub mod vision;
