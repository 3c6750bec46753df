//! View template engine.
//!
//! HTML fragments for the list, modal and notification views live in
//! `templates/views/` and are compiled into the binary. All templates are
//! HTML auto-escaped regardless of name, since record fields come straight
//! from citizen input.

use std::sync::OnceLock;

use minijinja::{AutoEscape, Environment};
use serde::Serialize;

use crate::core::error::{AppError, Result};

static VIEW_ENV: OnceLock<Environment<'static>> = OnceLock::new();

pub const ISSUES_TABLE: &str = "issues_table.html";
pub const COMPLAINT_TILES: &str = "complaint_tiles.html";
pub const PAGINATION: &str = "pagination.html";
pub const RECENT_ACTIVITY: &str = "recent_activity.html";
pub const DETAIL_MODAL: &str = "detail_modal.html";
pub const NOTIFICATIONS: &str = "notifications.html";

const VIEWS: &[(&str, &str)] = &[
    (
        ISSUES_TABLE,
        include_str!("../../templates/views/issues_table.html.jinja"),
    ),
    (
        COMPLAINT_TILES,
        include_str!("../../templates/views/complaint_tiles.html.jinja"),
    ),
    (
        PAGINATION,
        include_str!("../../templates/views/pagination.html.jinja"),
    ),
    (
        RECENT_ACTIVITY,
        include_str!("../../templates/views/recent_activity.html.jinja"),
    ),
    (
        DETAIL_MODAL,
        include_str!("../../templates/views/detail_modal.html.jinja"),
    ),
    (
        NOTIFICATIONS,
        include_str!("../../templates/views/notifications.html.jinja"),
    ),
];

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::Html);

    for &(name, source) in VIEWS {
        if let Err(e) = env.add_template(name, source) {
            tracing::warn!("Failed to load view template {}: {}", name, e);
        } else {
            tracing::debug!("Loaded view template: {}", name);
        }
    }

    env
}

fn get_environment() -> &'static Environment<'static> {
    VIEW_ENV.get_or_init(init_environment)
}

/// Render a named view with a serializable context.
pub fn render_view<S: Serialize>(name: &str, ctx: S) -> Result<String> {
    let template = get_environment()
        .get_template(name)
        .map_err(|_| AppError::Template(format!("View '{}' not found", name)))?;

    Ok(template.render(ctx)?)
}
