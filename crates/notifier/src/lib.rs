//! Run notifications for the dollar ledger job.
//!
//! Formats each [`RunOutcome`](dollar_sheets_core::notifications::RunOutcome)
//! as a Discord message and delivers it through the notification service.

pub mod error;
pub mod format;
pub mod sink;
pub mod types;

pub use error::{NotifierError, Result};
pub use format::build_message;
pub use sink::{DiscordNotifier, LogNotifier};
pub use types::{DiscordMessage, Embed, EmbedField};
