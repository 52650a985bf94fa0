//! Device drivers behind the hardware adapter.

pub mod limit_switch;
pub mod motor;
pub mod pneumatics;
