//! Application core: pure control logic, zero I/O.
//!
//! Bindings, toggles, limit gating and mode handling for teleop.  All
//! interaction with devices happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without a robot.

pub mod commands;
pub mod context;
pub mod events;
pub mod ports;
pub mod service;
