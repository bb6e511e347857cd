//! Prop derivation: turning a matched route into view inputs.

use serde::Serialize;

use super::location::{Params, Query};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 5;

/// Inputs handed to a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewProps {
    None,
    Pagination { page: u32, limit: u32 },
    Entity { id: String },
    /// Every path param, forwarded as-is
    Params(Params),
}

/// Route state visible to a prop-derivation function.
#[derive(Debug, Clone, Copy)]
pub struct RouteMatch<'a> {
    pub params: &'a Params,
    pub query: &'a Query,
}

pub type PropsFn = fn(&RouteMatch<'_>) -> ViewProps;

/// Parse the leading integer of the first value, falling back to `default`.
///
/// Leading whitespace and a `+` sign are accepted and trailing garbage is
/// ignored (`"3abc"` is 3). Empty, non-numeric, negative or overflowing input
/// yields `default`.
pub fn parse_int_or(values: &[String], default: u32) -> u32 {
    let Some(first) = values.first() else {
        return default;
    };
    let trimmed = first.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    unsigned[..digits_end].parse().unwrap_or(default)
}

/// `page`/`limit` from the query string, for list views.
pub fn pagination(route: &RouteMatch<'_>) -> ViewProps {
    ViewProps::Pagination {
        page: parse_int_or(route.query.get_all("page"), DEFAULT_PAGE),
        limit: parse_int_or(route.query.get_all("limit"), DEFAULT_LIMIT),
    }
}

/// The `:id` path param, unchanged, for detail layouts.
pub fn entity_id(route: &RouteMatch<'_>) -> ViewProps {
    ViewProps::Entity {
        id: route.params.get("id").cloned().unwrap_or_default(),
    }
}

pub fn forward_params(route: &RouteMatch<'_>) -> ViewProps {
    ViewProps::Params(route.params.clone())
}
