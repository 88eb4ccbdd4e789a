//! Run outcome notifications.

pub mod model;
pub mod sink;

pub use model::RunOutcome;
pub use sink::NotificationSink;
