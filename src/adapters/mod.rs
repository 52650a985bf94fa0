//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                    |
//! |----------------|--------------------|--------------------------------|
//! | `config_store` | ConfigPort         | JSON file                      |
//! | `gamepad`      | ControllerPort     | JSON-lines input script        |
//! | `hardware`     | SensorPort         | Limit switches (embedded-hal)  |
//! |                | ActuatorPort       | PWM motor groups, pneumatics   |
//! | `log_sink`     | EventSink          | `log` output                   |
//! | `video`        | FrameSource        | Test-pattern camera            |
//! |                | FrameSink          | Frame-counting stream          |

pub mod config_store;
pub mod gamepad;
pub mod hardware;
pub mod log_sink;
pub mod video;
