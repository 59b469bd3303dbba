//! `/api/*` game routes: guessing, surrender, restart, settings and the
//! read-only views (suggestions, state, countdown).
//!
//! Every mutating route answers with the re-rendered board followed by
//! any timer or storage scripts the change produced.

use crate::error::GameError;
use crate::game::board;
use crate::game::clock::{GameClock, countdown_text};
use crate::game::state::{AppGame, with_app, with_app_mut};
use crate::game::storage::Mode;
use crate::routes::util::{clock_from_params, get_param, parse_flag, parse_form_body, parse_query};

/// Board, timer and storage scripts for the game as it stands.
pub(crate) fn render_game(game: &mut AppGame, clock: &GameClock) -> String {
    let mut html = match game.session() {
        Some(session) => {
            let countdown = (session.mode() == Mode::Daily).then(|| countdown_text(clock));
            board::render_board(session, countdown.as_deref())
        }
        None => error_html(&GameError::NotReady),
    };
    if let Some(command) = game.sync_timer() {
        html.push_str(&board::timer_script(command));
    }
    html.push_str(&board::storage_script(&game.store_mut().drain_journal()));
    html
}

/// Player-facing text for errors that reach the route layer.
pub(crate) fn error_html(error: &GameError) -> String {
    let text = match error {
        GameError::RosterUnavailable => "Failed to load hero list.".to_string(),
        GameError::EmptyRoster => "Hero list is empty.".to_string(),
        GameError::NotReady => "Hero list is still loading.".to_string(),
        other => other.to_string(),
    };
    board::render_error(&text)
}

// ── GET /api/suggest ───────────────────────────────────────────────

/// Handle GET /api/suggest?q={prefix}
/// The guess input posts its own name, so `guess` is accepted as well.
pub fn handle_suggest_get(query: &str) -> String {
    let params = parse_query(query);
    let prefix = get_param(&params, "q")
        .or_else(|| get_param(&params, "guess"))
        .unwrap_or("");
    with_app(|game| {
        game.map(|g| board::render_suggestions(&g.suggest(prefix)))
            .unwrap_or_default()
    })
}

// ── POST /api/guess ────────────────────────────────────────────────

/// Handle POST /api/guess
/// Body: guess={name}[&now={ms}&offset={minutes}]
pub fn handle_guess_post(body: &str) -> String {
    let params = parse_form_body(body);
    let clock = clock_from_params(&params);
    let guess = get_param(&params, "guess").unwrap_or("");
    with_app_mut(|game| {
        let Some(game) = game else {
            return error_html(&GameError::NotReady);
        };
        match game.submit_guess(guess, &clock) {
            // The session already carries the message for these.
            Ok(_) | Err(GameError::EmptyGuess) | Err(GameError::GuessNotFound { .. }) => {
                render_game(game, &clock)
            }
            Err(e) => error_html(&e),
        }
    })
}

// ── POST /api/surrender ────────────────────────────────────────────

pub fn handle_surrender_post(body: &str) -> String {
    let params = parse_form_body(body);
    let clock = clock_from_params(&params);
    with_app_mut(|game| {
        let Some(game) = game else {
            return error_html(&GameError::NotReady);
        };
        match game.surrender(&clock) {
            Ok(_) => render_game(game, &clock),
            Err(e) => error_html(&e),
        }
    })
}

// ── POST /api/restart ──────────────────────────────────────────────

pub fn handle_restart_post(body: &str) -> String {
    let params = parse_form_body(body);
    let clock = clock_from_params(&params);
    with_app_mut(|game| {
        let Some(game) = game else {
            return error_html(&GameError::NotReady);
        };
        match game.start(&clock) {
            Ok(_) => render_game(game, &clock),
            Err(e) => error_html(&e),
        }
    })
}

// ── POST /api/settings ─────────────────────────────────────────────

/// Handle POST /api/settings
/// Body params (either or both):
///   - mode=classic|daily
///   - hard=true|false
///
/// Unchanged values leave the running game alone.
pub fn handle_settings_post(body: &str) -> String {
    let params = parse_form_body(body);
    let clock = clock_from_params(&params);
    let mode = get_param(&params, "mode").and_then(Mode::parse);
    let hard = get_param(&params, "hard").and_then(parse_flag);
    with_app_mut(|game| {
        let Some(game) = game else {
            return error_html(&GameError::NotReady);
        };
        if let Some(mode) = mode {
            if let Err(e) = game.set_mode(mode, &clock) {
                return error_html(&e);
            }
        }
        if let Some(hard) = hard {
            if let Err(e) = game.set_hard_mode(hard, &clock) {
                return error_html(&e);
            }
        }
        render_game(game, &clock)
    })
}

// ── GET /api/state ─────────────────────────────────────────────────

/// JSON snapshot for the page script. The secret is not included.
pub fn handle_state_get(_query: &str) -> String {
    with_app(|game| {
        let snapshot = match game {
            Some(g) => serde_json::json!({
                "ready": true,
                "heroes": g.roster().len(),
                "settings": g.settings(),
                "session": g.session(),
            }),
            None => serde_json::json!({ "ready": false }),
        };
        snapshot.to_string()
    })
}

// ── GET /api/countdown ─────────────────────────────────────────────

/// Countdown line in daily mode; empty otherwise.
pub fn handle_countdown_get(query: &str) -> String {
    let params = parse_query(query);
    let clock = clock_from_params(&params);
    with_app(|game| match game {
        Some(g) if g.settings().mode == Mode::Daily => {
            board::render_countdown(&countdown_text(&clock))
        }
        _ => String::new(),
    })
}
