//! One game from start to a terminal outcome.
//!
//! A session is created with its secret and never changes it. Guesses are
//! appended to an ordered log; the board shows that log newest-first.
//! Once the outcome is terminal every further action is a no-op.

use serde::Serialize;

use crate::error::GameError;
use crate::game::hints::{HintResult, evaluate, is_win};
use crate::game::storage::{DailyStatus, Mode};
use crate::roster::{Hero, Roster};

/// Guess cap in hard mode.
pub const HARD_MAX_ATTEMPTS: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    InProgress,
    Won,
    Lost,
    Surrendered,
    /// Daily game already finished today; entered only at start.
    AlreadyCompletedToday,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Status to persist for a daily game ending in this outcome.
    pub fn daily_status(self) -> Option<DailyStatus> {
        match self {
            Outcome::Won => Some(DailyStatus::Won),
            Outcome::Lost => Some(DailyStatus::Lost),
            Outcome::Surrendered => Some(DailyStatus::Surrendered),
            Outcome::InProgress | Outcome::AlreadyCompletedToday => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuessRecord {
    pub hero: Hero,
    pub hint: HintResult,
}

impl GuessRecord {
    fn new(hero: &Hero, secret: &Hero) -> Self {
        Self {
            hero: hero.clone(),
            hint: evaluate(hero, secret),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    mode: Mode,
    hard_mode: bool,
    #[serde(skip)]
    secret: Hero,
    attempts: u32,
    outcome: Outcome,
    guesses: Vec<GuessRecord>,
    message: String,
}

impl Session {
    pub fn new(secret: Hero, mode: Mode, hard_mode: bool) -> Self {
        Self {
            mode,
            hard_mode,
            secret,
            attempts: 0,
            outcome: Outcome::InProgress,
            guesses: Vec::new(),
            message: start_message(mode, hard_mode),
        }
    }

    /// A daily session whose result is already on record for today: the
    /// secret is shown as a single self-matching row and input is closed.
    pub fn completed_today(secret: Hero, hard_mode: bool) -> Self {
        let row = GuessRecord::new(&secret, &secret);
        Self {
            mode: Mode::Daily,
            hard_mode,
            secret,
            attempts: 0,
            outcome: Outcome::AlreadyCompletedToday,
            guesses: vec![row],
            message:
                "Today's daily hero is already completed. Come back tomorrow for a new one."
                    .to_string(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn hard_mode(&self) -> bool {
        self.hard_mode
    }

    pub fn secret(&self) -> &Hero {
        &self.secret
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Guess log, newest first.
    pub fn rows(&self) -> impl Iterator<Item = &GuessRecord> {
        self.guesses.iter().rev()
    }

    /// Resolve raw input against the roster and submit the hero it names.
    ///
    /// Blank or unknown input is reported without consuming an attempt.
    /// Returns the outcome after the guess.
    pub fn submit_guess(&mut self, roster: &Roster, raw: &str) -> Result<Outcome, GameError> {
        if self.is_over() {
            return Ok(self.outcome);
        }
        let query = raw.trim();
        if query.is_empty() {
            self.message = "Type a hero name.".to_string();
            return Err(GameError::EmptyGuess);
        }
        let Some(hero) = roster.resolve_exact(query) else {
            self.message = "Hero not found. Check spelling (use English hero names).".to_string();
            return Err(GameError::GuessNotFound {
                query: query.to_string(),
            });
        };
        Ok(self.submit(hero))
    }

    /// Record a guess of an already-resolved hero.
    pub fn submit(&mut self, hero: &Hero) -> Outcome {
        if self.is_over() {
            return self.outcome;
        }
        self.guesses.push(GuessRecord::new(hero, &self.secret));
        self.attempts += 1;

        if is_win(hero, &self.secret) {
            self.outcome = Outcome::Won;
            self.message = format!("🎉 Correct! The hero is {}.", self.secret.name);
        } else if self.hard_mode && self.attempts >= HARD_MAX_ATTEMPTS {
            self.outcome = Outcome::Lost;
            self.message = format!(
                "No attempts left ({}/{HARD_MAX_ATTEMPTS}). The hero was: {}.",
                self.attempts, self.secret.name
            );
        } else {
            let mut message = format!("No, this is not {}. Check the hints in the row.", hero.name);
            if self.hard_mode {
                message.push_str(&format!(" Attempts: {}/{HARD_MAX_ATTEMPTS}.", self.attempts));
            }
            self.message = message;
        }
        self.outcome
    }

    /// Give up: reveal the secret as a self-matching row. No-op once over.
    pub fn surrender(&mut self) -> Outcome {
        if self.is_over() {
            return self.outcome;
        }
        self.guesses.push(GuessRecord::new(&self.secret, &self.secret));
        self.outcome = Outcome::Surrendered;
        self.message = format!("😢 You gave up. The hero was: {}.", self.secret.name);
        self.outcome
    }
}

fn start_message(mode: Mode, hard_mode: bool) -> String {
    let mut message = match mode {
        Mode::Daily => "Daily game. One hero for today: try to guess it!".to_string(),
        Mode::Classic => "Game started. Type hero name and press \"Guess\".".to_string(),
    };
    if hard_mode {
        message.push_str(&format!(" Hard mode: you have {HARD_MAX_ATTEMPTS} attempts."));
    }
    message
}

/// One-line description of the active settings.
pub fn mode_help(mode: Mode, hard_mode: bool) -> String {
    let mut text = match mode {
        Mode::Daily => "Daily mode: one fixed hero per day.".to_string(),
        Mode::Classic => "Classic mode: random hero every game.".to_string(),
    };
    if hard_mode {
        text.push_str(" Hard mode: limited number of attempts.");
    }
    text
}
