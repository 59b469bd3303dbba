//! Wall-clock snapshot and the daily countdown.
//!
//! The daily secret follows the UTC date, while progress records and the
//! "next daily hero" countdown follow the player's local calendar. A
//! [`GameClock`] carries both so one request sees one consistent instant.

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, TimeZone, Utc};

use crate::game::storage::Mode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameClock {
    pub now: DateTime<Utc>,
    /// Local offset east of UTC.
    pub offset: FixedOffset,
}

impl GameClock {
    /// The current instant in the host's local time zone.
    pub fn system() -> Self {
        Self {
            now: Utc::now(),
            offset: *Local::now().offset(),
        }
    }

    pub fn new(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self { now, offset }
    }

    /// Build from epoch milliseconds and a local offset in minutes east of
    /// UTC (the negation of JS `getTimezoneOffset()`).
    pub fn from_epoch_millis(epoch_ms: i64, offset_minutes: i32) -> Option<Self> {
        let now = DateTime::<Utc>::from_timestamp_millis(epoch_ms)?;
        let offset = FixedOffset::east_opt(offset_minutes.checked_mul(60)?)?;
        Some(Self { now, offset })
    }

    pub fn local_now(&self) -> DateTime<FixedOffset> {
        self.now.with_timezone(&self.offset)
    }

    /// Local calendar day; keys the daily progress record.
    pub fn local_date(&self) -> NaiveDate {
        self.local_now().date_naive()
    }

    /// Time left until the next local midnight, never negative.
    pub fn until_local_midnight(&self) -> Duration {
        let local = self.local_now();
        let next = local
            .date_naive()
            .succ_opt()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .and_then(|midnight| self.offset.from_local_datetime(&midnight).single());
        match next {
            Some(next) => (next - local).max(Duration::zero()),
            None => Duration::zero(),
        }
    }
}

/// `HH:MM:SS`, truncating sub-second remainder.
pub fn format_remaining(remaining: Duration) -> String {
    let total = remaining.num_seconds().max(0);
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

/// Countdown line shown under the board in daily mode.
pub fn countdown_text(clock: &GameClock) -> String {
    format!(
        "Next daily hero in {}.",
        format_remaining(clock.until_local_midnight())
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    Start,
    Stop,
}

/// Tracks the one-second countdown interval on the page.
///
/// Commands are emitted only on edges, so the page never holds two
/// intervals and never stops one that is not running.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountdownTimer {
    running: bool,
}

impl CountdownTimer {
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Reconcile with the active mode.
    pub fn sync(&mut self, mode: Mode) -> Option<TimerCommand> {
        match (mode, self.running) {
            (Mode::Daily, false) => {
                self.running = true;
                Some(TimerCommand::Start)
            }
            (Mode::Classic, true) => {
                self.running = false;
                Some(TimerCommand::Stop)
            }
            _ => None,
        }
    }
}
