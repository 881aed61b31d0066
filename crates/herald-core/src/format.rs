//! Message composition and emoji annotation for relayed notifications.

use std::sync::LazyLock;

use regex::Regex;

use crate::payload::NotificationFields;

const REQUESTER_PREFIX: &str = "Requested By:";
const STATUS_PREFIX: &str = "Request Status:";
const REQUESTER_ICON: &str = "👤";
const STATUS_ICON: &str = "📋";

/// A 4-digit year in parentheses, anywhere in the subject.
static YEAR_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\d{4}\)").expect("year pattern compiles"));

/// Notification category derived from the free-text event description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventCategory {
    RequestPending,
    Approved,
    Available,
    Declined,
    Failed,
    Issue,
    Media,
}

/// Ordered first-match classification table. "Automatically Approved" shares
/// the Approved branch; "Request Pending" must stay ahead of the broader
/// keywords since an event string can contain several of them.
const CLASSIFICATION_TABLE: &[(&str, EventCategory)] = &[
    ("Request Pending", EventCategory::RequestPending),
    ("Automatically Approved", EventCategory::Approved),
    ("Approved", EventCategory::Approved),
    ("Available", EventCategory::Available),
    ("Declined", EventCategory::Declined),
    ("Failed", EventCategory::Failed),
    ("Issue", EventCategory::Issue),
];

impl EventCategory {
    /// Classify an event description by scanning the table in order; events
    /// matching no rule fall back to the generic media category.
    pub fn classify(event: &str) -> Self {
        CLASSIFICATION_TABLE
            .iter()
            .find(|(needle, _)| event.contains(needle))
            .map(|(_, category)| *category)
            .unwrap_or(EventCategory::Media)
    }

    pub fn icon(self) -> &'static str {
        match self {
            EventCategory::RequestPending => "⏳",
            EventCategory::Approved => "✅",
            EventCategory::Available => "🎉",
            EventCategory::Declined => "❌",
            EventCategory::Failed => "⚠️",
            EventCategory::Issue => "🔴",
            EventCategory::Media => "🎬",
        }
    }
}

/// Split an Overseerr subject into title and parenthesized year suffix.
/// `"Dune (2021)"` yields `("Dune", "(2021)")`; a subject without a year
/// comes back whole, with an empty suffix.
pub fn split_title_year(subject: &str) -> (&str, &str) {
    let title = match subject.find(" (") {
        Some(index) => &subject[..index],
        None => subject,
    };
    let year = YEAR_SUFFIX
        .find(subject)
        .map(|found| found.as_str())
        .unwrap_or("");
    (title, year)
}

/// Compose the relayed text in the upstream layout: title line, blank line,
/// original body, blank line, requester and status lines. The title line
/// keeps the original interpolation, trailing space included when the
/// subject has no year.
pub fn compose_message(fields: &NotificationFields) -> String {
    let (title, year) = split_title_year(&fields.subject);
    format!(
        "{} - {} {}\n\n{}\n\nRequested By: {}\nRequest Status: {}",
        fields.event, title, year, fields.message, fields.requested_by, fields.status
    )
}

/// Prefix the classified icon onto the first line and the fixed icons onto
/// the requester/status lines. Every other line passes through untouched;
/// lines are never reordered or removed.
pub fn annotate_message(message: &str, event: &str) -> String {
    let icon = EventCategory::classify(event).icon();
    let annotated: Vec<String> = message
        .split('\n')
        .enumerate()
        .map(|(index, line)| {
            if index == 0 {
                format!("{icon} {line}")
            } else if line.starts_with(REQUESTER_PREFIX) {
                format!("{REQUESTER_ICON} {line}")
            } else if line.starts_with(STATUS_PREFIX) {
                format!("{STATUS_ICON} {line}")
            } else {
                line.to_string()
            }
        })
        .collect();
    annotated.join("\n")
}

/// Full formatting pipeline: compose the text, then annotate it.
pub fn render_notification(fields: &NotificationFields) -> String {
    annotate_message(&compose_message(fields), &fields.event)
}
