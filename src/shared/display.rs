//! Centralized enum-to-display table.
//!
//! Every renderer (admin table, complaint tiles, detail modal, notification
//! list) resolves labels, icons and CSS classes through these tables so the
//! pages cannot drift apart. Lookups are keyed by the wire value and fall
//! back to a fixed row when the value is not recognised.

use serde::Serialize;

/// Label, icon and style class for one enum value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayConfig {
    pub label: &'static str,
    pub icon: &'static str,
    pub class: &'static str,
}

/// One row of a display table.
#[derive(Debug, Clone, Copy)]
pub struct DisplayEntry {
    pub key: &'static str,
    pub config: DisplayConfig,
    pub progress: u8,
}

const fn entry(
    key: &'static str,
    label: &'static str,
    icon: &'static str,
    class: &'static str,
    progress: u8,
) -> DisplayEntry {
    DisplayEntry {
        key,
        config: DisplayConfig { label, icon, class },
        progress,
    }
}

pub const STATUS_TABLE: &[DisplayEntry] = &[
    entry("pending", "Pending", "clock", "pending", 25),
    entry("in_progress", "In Progress", "gear", "progress", 60),
    entry("resolved", "Resolved", "check-circle", "resolved", 100),
    entry("rejected", "Rejected", "x-circle", "rejected", 0),
];

/// Unknown statuses display as pending but report no progress.
pub const STATUS_FALLBACK: DisplayEntry = entry("pending", "Pending", "clock", "pending", 0);

pub const PRIORITY_TABLE: &[DisplayEntry] = &[
    entry("low", "Low", "chevron-down", "low", 0),
    entry("medium", "Medium", "dash", "medium", 0),
    entry("high", "High", "chevron-up", "high", 0),
    entry("urgent", "Urgent", "exclamation-triangle", "urgent", 0),
];

pub const PRIORITY_FALLBACK: DisplayEntry = entry("medium", "Medium", "dash", "medium", 0);

pub const NOTIFICATION_TYPE_TABLE: &[DisplayEntry] = &[
    entry("reminder", "Reminder", "bi-alarm", "reminder", 0),
    entry("status_update", "Status Update", "bi-arrow-repeat", "status-update", 0),
    entry("new_assignment", "New Assignment", "bi-person-check", "new-assignment", 0),
];

pub const NOTIFICATION_TYPE_FALLBACK: DisplayEntry =
    entry("other", "Notification", "bi-bell", "other", 0);

/// Find the row for `key`, or the fallback row.
pub fn lookup(table: &'static [DisplayEntry], key: &str, fallback: DisplayEntry) -> DisplayEntry {
    table
        .iter()
        .find(|e| e.key == key)
        .copied()
        .unwrap_or(fallback)
}
