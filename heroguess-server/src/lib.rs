//! Hero-guessing game, served from an in-browser WASM worker.
//!
//! Exports `handle_request(method, path, query, body)` for the Service
//! Worker bridge to call. Routing uses `matchit`; every response is an
//! HTML fragment for HTMX to swap in, except the two JSON endpoints the
//! page script reads directly (`/api/roster/sources`, `/api/state`).
//!
//! The guessing engine itself (`text`, `roster`, `game::hints`,
//! `game::secret`, `game::session`) has no browser dependency and is
//! usable on its own.

use wasm_bindgen::prelude::*;

pub mod catalog;
pub mod error;
pub mod game;
pub mod logging;
pub mod roster;
pub mod routes;
pub mod text;

pub use error::GameError;

/// Module start hook: console logging and, when enabled, readable panics.
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init();
}

/// Process an HTTP-like request and return a response body.
///
/// Called from JavaScript (Web Worker) via wasm-bindgen.
///
/// # Arguments
/// * `method` - HTTP method ("GET" or "POST")
/// * `path`   - URL path (e.g., "/api/guess")
/// * `query`  - Query string (e.g., "?q=dark")
/// * `body`   - URL-encoded form body. Empty string for GET requests.
#[wasm_bindgen]
pub fn handle_request(method: &str, path: &str, query: &str, body: &str) -> String {
    let mut router = matchit::Router::new();

    router.insert("/api/boot", "boot").ok();
    router.insert("/api/roster/sources", "sources").ok();
    router.insert("/api/heroes", "heroes").ok();
    router.insert("/api/suggest", "suggest").ok();
    router.insert("/api/guess", "guess").ok();
    router.insert("/api/surrender", "surrender").ok();
    router.insert("/api/restart", "restart").ok();
    router.insert("/api/settings", "settings").ok();
    router.insert("/api/state", "state").ok();
    router.insert("/api/countdown", "countdown").ok();

    match router.at(path) {
        Ok(matched) => match (*matched.value, method) {
            ("sources", "GET") => routes::boot::handle_sources_get(query),
            ("heroes", "GET") => routes::boot::handle_heroes_get(query),
            ("suggest", "GET") => routes::play::handle_suggest_get(query),
            ("state", "GET") => routes::play::handle_state_get(query),
            ("countdown", "GET") => routes::play::handle_countdown_get(query),

            ("boot", "POST") => routes::boot::handle_boot_post(body),
            ("guess", "POST") => routes::play::handle_guess_post(body),
            ("surrender", "POST") => routes::play::handle_surrender_post(body),
            ("restart", "POST") => routes::play::handle_restart_post(body),
            ("settings", "POST") => routes::play::handle_settings_post(body),

            _ => method_not_allowed(),
        },
        Err(_) => not_found(),
    }
}

fn not_found() -> String {
    r#"<span class="text-hg-red">404: route not found</span>"#.to_string()
}

fn method_not_allowed() -> String {
    r#"<span class="text-hg-red">405: method not allowed</span>"#.to_string()
}
