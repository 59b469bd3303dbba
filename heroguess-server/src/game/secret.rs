//! Secret hero selection.
//!
//! Daily mode maps the UTC calendar day onto the roster: day N after
//! 2024-01-01 picks index `N mod len`. Nothing but the date and the roster
//! order feeds in, so every player sees the same hero on the same day.

use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;

use crate::error::GameError;
use crate::roster::Hero;

/// Day zero of the daily rotation.
pub fn daily_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default()
}

/// Roster index for a UTC calendar date. Dates before the epoch wrap too.
pub fn daily_index(len: usize, date: NaiveDate) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let days = date.signed_duration_since(daily_epoch()).num_days();
    Some(days.rem_euclid(len as i64) as usize)
}

/// The hero of the UTC day containing `at`.
pub fn pick_daily(heroes: &[Hero], at: DateTime<Utc>) -> Result<&Hero, GameError> {
    daily_index(heroes.len(), at.date_naive())
        .and_then(|i| heroes.get(i))
        .ok_or(GameError::EmptyRoster)
}

/// A uniformly random hero.
pub fn pick_random<'a, R: Rng + ?Sized>(
    heroes: &'a [Hero],
    rng: &mut R,
) -> Result<&'a Hero, GameError> {
    if heroes.is_empty() {
        return Err(GameError::EmptyRoster);
    }
    Ok(&heroes[rng.gen_range(0..heroes.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn heroes(n: usize) -> Vec<Hero> {
        (0..n).map(|i| Hero::named(&format!("Hero {i}"))).collect()
    }

    #[test]
    fn epoch_day_is_index_zero() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(daily_index(5, d), Some(0));
        let d = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        assert_eq!(daily_index(5, d), Some(2));
    }

    #[test]
    fn dates_before_epoch_stay_in_range() {
        let d = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert_eq!(daily_index(5, d), Some(4));
    }

    #[test]
    fn same_utc_day_same_hero() {
        let roster = heroes(7);
        let morning = Utc.with_ymd_and_hms(2025, 3, 14, 0, 0, 1).unwrap();
        let night = Utc.with_ymd_and_hms(2025, 3, 14, 23, 59, 59).unwrap();
        assert_eq!(
            pick_daily(&roster, morning).unwrap(),
            pick_daily(&roster, night).unwrap()
        );
        let next = Utc.with_ymd_and_hms(2025, 3, 15, 0, 0, 0).unwrap();
        assert_ne!(
            pick_daily(&roster, morning).unwrap(),
            pick_daily(&roster, next).unwrap()
        );
    }

    #[test]
    fn empty_roster_fails() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(pick_daily(&[], now), Err(GameError::EmptyRoster));
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick_random(&[], &mut rng), Err(GameError::EmptyRoster));
    }

    #[test]
    fn random_pick_covers_roster() {
        let roster = heroes(3);
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let hero = pick_random(&roster, &mut rng).unwrap();
            let i = roster.iter().position(|h| h == hero).unwrap();
            seen[i] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
