//! Shared URL/form parsing utilities for route handlers.

use log::warn;

use crate::game::clock::GameClock;

/// Parse URL-encoded form body into key-value pairs.
/// Handles `key=value&key2=value2` format (from HTMX POST bodies).
///
/// Values are decoded as UTF-8 with `+` read as a space. Malformed escapes
/// pass through literally.
pub fn parse_form_body(body: &str) -> Vec<(String, String)> {
    if body.is_empty() {
        return Vec::new();
    }
    serde_urlencoded::from_str(body).unwrap_or_else(|e| {
        warn!("unreadable form body: {e}");
        Vec::new()
    })
}

/// Parse a query string into key-value pairs.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    let q = query.strip_prefix('?').unwrap_or(query);
    parse_form_body(q)
}

/// Helper to get a value by key from a list of key-value pairs.
pub fn get_param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Every value for a repeated key, in request order.
pub fn get_all<'a>(params: &'a [(String, String)], key: &str) -> Vec<&'a str> {
    params
        .iter()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .collect()
}

/// Form-style boolean: `true`, `1`, `on`, `yes`.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Some(true),
        "false" | "0" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// Request clock: `now` (epoch ms) and `offset` (minutes east of UTC)
/// when the page supplies them, the system clock otherwise.
pub fn clock_from_params(params: &[(String, String)]) -> GameClock {
    let now = get_param(params, "now").and_then(|s| s.trim().parse::<i64>().ok());
    let offset = get_param(params, "offset")
        .and_then(|s| s.trim().parse::<i32>().ok())
        .unwrap_or(0);
    now.and_then(|ms| GameClock::from_epoch_millis(ms, offset))
        .unwrap_or_else(GameClock::system)
}
