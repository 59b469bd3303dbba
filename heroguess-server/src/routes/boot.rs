//! `/api/boot`, `/api/roster/sources` and `/api/heroes`.
//!
//! Boot is the one asynchronous step of the game, split across the bridge:
//! the page asks for the candidate catalog paths, fetches each in order,
//! and posts the results here together with a snapshot of its
//! `localStorage` keys.

use log::warn;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::catalog::{candidate_paths, load_roster};
use crate::error::GameError;
use crate::game::board;
use crate::game::controller::Game;
use crate::game::state::{replace_app, reset_app, with_app, with_app_mut};
use crate::game::storage::{
    DAILY_PROGRESS_KEY, KeyValueStore, MemoryStore, OVERRIDES_KEY, SETTINGS_KEY,
};
use crate::routes::play::{error_html, render_game};
use crate::routes::util::{clock_from_params, get_param, parse_form_body, parse_query};

const SNAPSHOT_KEYS: [&str; 3] = [SETTINGS_KEY, DAILY_PROGRESS_KEY, OVERRIDES_KEY];

// ── GET /api/roster/sources ────────────────────────────────────────

/// Handle GET /api/roster/sources?origin={url}&t={ms}
/// Returns a JSON array of catalog URLs to fetch, in order.
pub fn handle_sources_get(query: &str) -> String {
    let params = parse_query(query);
    let origin = get_param(&params, "origin").unwrap_or("");
    let timestamp = get_param(&params, "t")
        .and_then(|t| t.parse::<i64>().ok())
        .unwrap_or_else(|| clock_from_params(&params).now.timestamp_millis());
    serde_json::Value::from(candidate_paths(origin, timestamp)).to_string()
}

// ── POST /api/boot ─────────────────────────────────────────────────

/// Handle POST /api/boot
/// Body params:
///   - catalog={body}         → a fetched catalog, in fetch order
///   - catalog_error={reason} → a failed fetch, in fetch order
///   - dotaguesser_settings / dotaguesser_daily_progress / dotadle_heroes
///                            → current `localStorage` values, when set
///   - now / offset           → request clock
///
/// Returns the first board, or the blocking load error.
pub fn handle_boot_post(body: &str) -> String {
    let params = parse_form_body(body);
    let clock = clock_from_params(&params);

    let sources: Vec<Result<String, String>> = params
        .iter()
        .filter_map(|(key, value)| match key.as_str() {
            "catalog" => Some(Ok(value.clone())),
            "catalog_error" => Some(Err(value.clone())),
            _ => None,
        })
        .collect();

    let mut store = MemoryStore::seeded(
        SNAPSHOT_KEYS
            .iter()
            .filter_map(|key| get_param(&params, key).map(|value| (*key, value))),
    );

    let overrides = store.get(OVERRIDES_KEY).ok().flatten();
    let roster = match load_roster(sources, overrides.as_deref()) {
        Ok(roster) => roster,
        Err(e) => {
            reset_app();
            return error_html(&e);
        }
    };
    if overrides.is_some() {
        if let Err(e) = store.remove(OVERRIDES_KEY) {
            warn!("hero overrides not cleared: {e}");
        }
    }

    let mut game = Game::new(roster, store, StdRng::from_entropy());
    let started = game.start(&clock).map(|_| ());
    replace_app(game);

    with_app_mut(|game| {
        let Some(game) = game else {
            return error_html(&GameError::NotReady);
        };
        match started {
            Ok(()) => render_game(game, &clock),
            Err(e) => {
                let mut html = error_html(&e);
                html.push_str(&board::storage_script(&game.store_mut().drain_journal()));
                html
            }
        }
    })
}

// ── GET /api/heroes ────────────────────────────────────────────────

/// Every loaded hero, sorted by name.
pub fn handle_heroes_get(_query: &str) -> String {
    with_app(|game| match game {
        Some(g) => board::render_hero_list(g.roster()),
        None => error_html(&GameError::NotReady),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: &str = "now=1748952000000&offset=0";

    fn catalog() -> String {
        r#"[{"name":"Axe","gender":"Male","attr":"STR"},{"name":"Lina","gender":"Female","attr":"INT"},{"name":"Io","attr":"UNI"}]"#
            .replace('%', "%25")
            .replace('&', "%26")
            .replace('+', "%2B")
    }

    #[test]
    fn sources_are_json_in_fetch_order() {
        let json = handle_sources_get("?origin=https%3A%2F%2Fexample.org&t=42");
        let paths: Vec<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(
            paths,
            vec![
                "./heroes.json?t=42",
                "/heroes.json?t=42",
                "https://example.org/heroes.json?t=42",
            ]
        );
    }

    #[test]
    fn boot_falls_back_past_failed_sources() {
        let body = format!(
            "catalog_error=404&catalog=%3Chtml%3E&catalog={}&{NOW}",
            catalog()
        );
        let html = handle_boot_post(&body);
        assert!(html.contains(r#"id="game-board""#));
        assert!(html.contains("Daily game. One hero for today: try to guess it!"));
        assert!(html.contains("startCountdown"));

        let list = handle_heroes_get("");
        assert!(list.contains(r#"data-count="3""#));
        reset_app();
    }

    #[test]
    fn boot_without_catalog_blocks_game() {
        let html = handle_boot_post(&format!("catalog_error=offline&{NOW}"));
        assert!(html.contains("Failed to load hero list."));
        assert!(handle_heroes_get("").contains("still loading"));
    }

    #[test]
    fn boot_merges_and_clears_overrides() {
        let overrides = r#"[{"name":"Lina","attr":"AGI"},{"name":"Pudge"}]"#
            .replace('&', "%26");
        let body = format!(
            "catalog={}&dotadle_heroes={overrides}&dotaguesser_settings=%7B%22mode%22%3A%22classic%22%7D&{NOW}",
            catalog()
        );
        let html = handle_boot_post(&body);
        assert!(html.contains(r#"localStorage.removeItem("dotadle_heroes");"#));
        assert!(html.contains("Game started."));
        assert!(!html.contains("startCountdown"));

        let list = handle_heroes_get("");
        assert!(list.contains("Pudge"));
        assert!(list.contains(r#"data-count="4""#));
        reset_app();
    }

    #[test]
    fn boot_replays_completed_daily() {
        let body = format!(
            "catalog={}&dotaguesser_daily_progress=%7B%22date%22%3A%222025-06-03%22%2C%22status%22%3A%22win%22%7D&{NOW}",
            catalog()
        );
        let html = handle_boot_post(&body);
        assert!(html.contains("already completed"));
        assert!(html.contains("disabled"));
        reset_app();
    }

    #[test]
    fn empty_catalog_boots_without_session() {
        let html = handle_boot_post(&format!("catalog=%5B%5D&{NOW}"));
        assert!(html.contains("Hero list is empty."));
        assert!(crate::game::state::is_ready());
        reset_app();
    }
}
