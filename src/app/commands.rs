//! Inbound commands to the application service.
//!
//! These represent requests from outside the control loop (field
//! management, a dashboard, the host binary) that the
//! [`TeleopService`](super::service::TeleopService) interprets.

use crate::profile::ControlProfile;

/// Commands that external adapters can send into the control core.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Start driving actuators from controller input.
    Enable,

    /// Stop every actuator and ignore controller input.
    Disable,

    /// Swap in a different control mapping.  Only honoured while disabled.
    LoadProfile(Box<ControlProfile>),
}
