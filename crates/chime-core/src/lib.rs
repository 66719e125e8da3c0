//! Browser-independent logic for the Chime task page.
//!
//! Everything here is plain data in, plain data out. The wasm
//! frontend in `chime_web` owns the DOM and feeds these types.

pub mod action_bar;
pub mod config;
pub mod edit;
pub mod error;
pub mod list_mode;
pub mod notify;
pub mod queue;
pub mod task;
pub mod time_phrase;
pub mod toggle;

pub use config::ClientConfig;
pub use error::ChimeError;
pub use notify::{
  Delivery,
  DeliverySource,
  NotificationKey,
  NotificationSession,
  Notifier
};
pub use queue::{
  SessionCommand,
  SessionConsumer,
  SessionHandle,
  session_channel
};
pub use task::{
  DueNotification,
  ListCategory,
  Task,
  ToggleResponse
};
