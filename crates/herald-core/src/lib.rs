//! Pure transformation core for the Overseerr to Signal bridge.
//!
//! Turns a loosely-shaped Overseerr webhook payload into the emoji-annotated
//! text relayed through the Signal REST bridge. Everything here is
//! synchronous and infallible: absent or malformed payload fields degrade to
//! sentinel defaults instead of erroring, and formatting is a pure function
//! of the extracted fields.

pub mod format;
pub mod payload;

pub use format::{
    annotate_message, compose_message, render_notification, split_title_year, EventCategory,
};
pub use payload::{extract_field, NotificationFields, PENDING_STATUS, UNKNOWN_FIELD};
