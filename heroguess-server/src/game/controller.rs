//! The single owner of game state.
//!
//! `Game` holds the loaded roster, the player's settings, the current
//! session, the storage backend and the RNG. Every transition goes through
//! here so persistence side effects happen in exactly one place.

use log::{info, warn};
use rand::rngs::StdRng;

use crate::error::GameError;
use crate::game::clock::{CountdownTimer, GameClock, TimerCommand};
use crate::game::secret::{pick_daily, pick_random};
use crate::game::session::{Outcome, Session};
use crate::game::storage::{DailyProgress, KeyValueStore, Mode, Settings};
use crate::roster::{Hero, Roster, SUGGESTION_LIMIT};

pub struct Game<S: KeyValueStore> {
    roster: Roster,
    settings: Settings,
    session: Option<Session>,
    store: S,
    rng: StdRng,
    timer: CountdownTimer,
}

impl<S: KeyValueStore> Game<S> {
    /// Settings are read from `store` once, here.
    pub fn new(roster: Roster, store: S, rng: StdRng) -> Self {
        let settings = Settings::load(&store);
        Self {
            roster,
            settings,
            session: None,
            store,
            rng,
            timer: CountdownTimer::default(),
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Start a fresh session with the current settings, discarding any
    /// session in progress.
    pub fn start(&mut self, clock: &GameClock) -> Result<&Session, GameError> {
        let Settings { mode, hard_mode } = self.settings;
        let session = match mode {
            Mode::Daily => {
                let secret = pick_daily(self.roster.heroes(), clock.now)?.clone();
                match DailyProgress::load_for(&self.store, clock.local_date()) {
                    Some(progress) => {
                        info!("daily already {:?} on {}", progress.status, progress.date);
                        Session::completed_today(secret, hard_mode)
                    }
                    None => Session::new(secret, mode, hard_mode),
                }
            }
            Mode::Classic => {
                let secret = pick_random(self.roster.heroes(), &mut self.rng)?.clone();
                Session::new(secret, mode, hard_mode)
            }
        };
        info!("session started: mode={mode:?} hard={hard_mode}");
        Ok(&*self.session.insert(session))
    }

    pub fn submit_guess(&mut self, raw: &str, clock: &GameClock) -> Result<Outcome, GameError> {
        let session = self.session.as_mut().ok_or(GameError::NotReady)?;
        let before = session.outcome();
        let after = session.submit_guess(&self.roster, raw)?;
        self.finish(before, after, clock);
        Ok(after)
    }

    pub fn surrender(&mut self, clock: &GameClock) -> Result<Outcome, GameError> {
        let session = self.session.as_mut().ok_or(GameError::NotReady)?;
        let before = session.outcome();
        let after = session.surrender();
        self.finish(before, after, clock);
        Ok(after)
    }

    /// Switch mode. A change restarts the game; the same mode is a no-op.
    /// Returns whether anything changed.
    pub fn set_mode(&mut self, mode: Mode, clock: &GameClock) -> Result<bool, GameError> {
        if self.settings.mode == mode {
            return Ok(false);
        }
        self.settings.mode = mode;
        self.save_settings();
        self.start(clock)?;
        Ok(true)
    }

    /// Toggle hard mode. A change restarts the game.
    pub fn set_hard_mode(&mut self, hard_mode: bool, clock: &GameClock) -> Result<bool, GameError> {
        if self.settings.hard_mode == hard_mode {
            return Ok(false);
        }
        self.settings.hard_mode = hard_mode;
        self.save_settings();
        self.start(clock)?;
        Ok(true)
    }

    pub fn suggest(&self, prefix: &str) -> Vec<&Hero> {
        self.roster.suggest(prefix, SUGGESTION_LIMIT)
    }

    /// Bring the page's countdown interval in line with the current mode.
    pub fn sync_timer(&mut self) -> Option<TimerCommand> {
        self.timer.sync(self.settings.mode)
    }

    pub fn timer_running(&self) -> bool {
        self.timer.is_running()
    }

    fn save_settings(&mut self) {
        if let Err(e) = self.settings.save(&mut self.store) {
            warn!("settings not saved: {e}");
        }
    }

    /// Persist the daily result on the transition into a terminal state.
    fn finish(&mut self, before: Outcome, after: Outcome, clock: &GameClock) {
        if before.is_terminal() || !after.is_terminal() {
            return;
        }
        let Some(session) = self.session.as_ref() else {
            return;
        };
        info!("session over: {after:?} after {} attempts", session.attempts());
        if session.mode() != Mode::Daily {
            return;
        }
        let Some(status) = after.daily_status() else {
            return;
        };
        let today = clock.local_date();
        if DailyProgress::load_for(&self.store, today).is_some() {
            return;
        }
        let progress = DailyProgress {
            date: today,
            status,
        };
        if let Err(e) = progress.save(&mut self.store) {
            warn!("daily progress not saved: {e}");
        }
    }
}
