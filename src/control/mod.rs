//! Pure control primitives: dead zone, edge toggle, drivetrain mapping.
//!
//! Nothing in here touches hardware or keeps more state than a couple of
//! booleans; the [`TeleopService`](crate::app::service::TeleopService)
//! strings them together each tick.

pub mod deadzone;
pub mod drive;
pub mod toggle;
