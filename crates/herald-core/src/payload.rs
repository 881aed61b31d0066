//! Defensive field extraction for the Overseerr webhook payload.
//!
//! Overseerr does not guarantee the shape of its webhook body across
//! notification types, so extraction walks an untyped `serde_json::Value`
//! and swallows every traversal failure instead of deserializing into a
//! rigid struct.

use serde_json::Value;

/// Sentinel substituted for a payload field that is missing, null, or falsy.
pub const UNKNOWN_FIELD: &str = "unknown";

/// Status rendered when Overseerr omits `media.status`.
pub const PENDING_STATUS: &str = "PENDING";

/// Flat view of the payload fields the formatter consumes. Every field is
/// already defaulted, so downstream formatting never deals with absence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationFields {
    pub notification_type: String,
    pub event: String,
    pub subject: String,
    pub message: String,
    pub image: String,
    pub media_type: String,
    pub status: String,
    pub requested_by: String,
}

impl NotificationFields {
    /// Extract the known Overseerr fields in one pass. `media.status` falls
    /// back to [`PENDING_STATUS`]; everything else to [`UNKNOWN_FIELD`].
    pub fn from_payload(payload: &Value) -> Self {
        Self {
            notification_type: extract_field(payload, "notification_type", UNKNOWN_FIELD),
            event: extract_field(payload, "event", UNKNOWN_FIELD),
            subject: extract_field(payload, "subject", UNKNOWN_FIELD),
            message: extract_field(payload, "message", UNKNOWN_FIELD),
            image: extract_field(payload, "image", UNKNOWN_FIELD),
            media_type: extract_field(payload, "media.media_type", UNKNOWN_FIELD),
            status: extract_field(payload, "media.status", PENDING_STATUS),
            requested_by: extract_field(payload, "request.requestedBy_username", UNKNOWN_FIELD),
        }
    }

    /// The image URL, when the payload carried one worth fetching.
    pub fn image_url(&self) -> Option<&str> {
        if self.image.starts_with("http") {
            Some(&self.image)
        } else {
            None
        }
    }
}

/// Walk a dot-separated `path` through `value` and render the leaf as a
/// string. Any traversal failure (missing key, null or non-object
/// intermediate) and any falsy leaf (empty string, zero, `false`, non-scalar)
/// yields `default`.
///
/// The falsy fallback mirrors the upstream middleware this replaces: a
/// present-but-empty status is indistinguishable from an absent one. Kept
/// for wire compatibility; see DESIGN.md before changing it.
pub fn extract_field(value: &Value, path: &str, default: &str) -> String {
    let mut current = value;
    for segment in path.split('.') {
        match current.get(segment) {
            Some(next) if !next.is_null() => current = next,
            _ => return default.to_string(),
        }
    }
    match current {
        Value::String(text) if !text.is_empty() => text.clone(),
        Value::Number(number) if number.as_f64() != Some(0.0) => number.to_string(),
        Value::Bool(true) => "true".to_string(),
        _ => default.to_string(),
    }
}
