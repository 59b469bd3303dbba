//! Global app state container.
//!
//! Uses `thread_local!` + `RefCell` for mutable access in single-threaded
//! WASM. The worker keeps the module alive, so the game survives across
//! `handle_request` calls until the page is closed.

use std::cell::RefCell;

use crate::game::controller::Game;
use crate::game::storage::MemoryStore;

pub type AppGame = Game<MemoryStore>;

thread_local! {
    /// `None` until `/api/boot` has loaded a roster.
    static APP: RefCell<Option<AppGame>> = const { RefCell::new(None) };
}

/// Execute a closure with read access to the game, if booted.
pub fn with_app<F, R>(f: F) -> R
where
    F: FnOnce(Option<&AppGame>) -> R,
{
    APP.with(|app| f(app.borrow().as_ref()))
}

/// Execute a closure with mutable access to the game, if booted.
pub fn with_app_mut<F, R>(f: F) -> R
where
    F: FnOnce(Option<&mut AppGame>) -> R,
{
    APP.with(|app| f(app.borrow_mut().as_mut()))
}

/// Install a freshly booted game, dropping the previous one.
pub fn replace_app(game: AppGame) {
    APP.with(|app| {
        *app.borrow_mut() = Some(game);
    });
}

/// Back to the unbooted state.
pub fn reset_app() {
    APP.with(|app| {
        *app.borrow_mut() = None;
    });
}

pub fn is_ready() -> bool {
    with_app(|game| game.is_some())
}
