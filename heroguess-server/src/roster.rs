//! Hero roster and name resolution.
//!
//! A [`Roster`] is the already-ingested catalog (see `catalog`) in its
//! load order. Order matters: the daily secret indexes into it.
//!
//! Two lookups are offered:
//! - [`Roster::resolve_exact`] turns submitted input into at most one hero,
//!   matching the normalized name or its letters-only key.
//! - [`Roster::suggest`] ranks heroes for autocomplete on partial input.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::text::{initials, normalize, normalize_letters, slug};

/// Number of suggestions the autocomplete shows.
pub const SUGGESTION_LIMIT: usize = 8;

/// Complexity bucket, derived from free text at ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Complexity {
    Easy,
    Medium,
    Hard,
    /// Non-empty text that matched no bucket, kept verbatim.
    Other(String),
    #[default]
    Unknown,
}

impl Complexity {
    /// Bucket raw complexity text. English and Russian keywords are recognized.
    pub fn from_raw(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim) else {
            return Complexity::Unknown;
        };
        if raw.is_empty() || raw == "-" || raw == "—" {
            return Complexity::Unknown;
        }
        let s = raw.to_lowercase();
        if s.contains("легк") || s.contains("easy") {
            Complexity::Easy
        } else if s.contains("сред") || s.contains("medium") || s.contains("normal") {
            Complexity::Medium
        } else if s.contains("слож") || s.contains("hard") {
            Complexity::Hard
        } else {
            Complexity::Other(raw.to_string())
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Complexity::Unknown)
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Complexity::Easy => f.write_str("Easy"),
            Complexity::Medium => f.write_str("Medium"),
            Complexity::Hard => f.write_str("Hard"),
            Complexity::Other(raw) => f.write_str(raw),
            Complexity::Unknown => f.write_str("-"),
        }
    }
}

/// One playable hero. Immutable once a roster is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub name: String,
    pub gender: Option<String>,
    pub types: Vec<String>,
    pub roles: Vec<String>,
    /// Primary attribute code: STR, AGI, INT or UNI.
    pub attr: Option<String>,
    /// Melee or Ranged.
    pub attack: Option<String>,
    pub complexity: Complexity,
    pub year: Option<String>,
    pub internal: Option<String>,
}

impl Hero {
    /// A hero with only a name; every attribute empty.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            gender: None,
            types: Vec::new(),
            roles: Vec::new(),
            attr: None,
            attack: None,
            complexity: Complexity::Unknown,
            year: None,
            internal: None,
        }
    }

    /// Icon asset key: the explicit `internal` key, or a slug of the name.
    pub fn asset_key(&self) -> String {
        match self.internal.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => slug(&self.name),
        }
    }
}

/// Precomputed comparison keys for one hero name.
#[derive(Debug, Clone)]
struct NameKeys {
    normalized: String,
    letters: String,
    initials: String,
}

impl NameKeys {
    fn of(name: &str) -> Self {
        Self {
            normalized: normalize(name),
            letters: normalize_letters(name),
            initials: initials(name),
        }
    }
}

/// Suggestion tiers, weakest first so the derived `Ord` ranks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MatchTier {
    Initials,
    Contains,
    WordStart,
    Prefix,
    Exact,
}

struct Ranked<'a> {
    tier: MatchTier,
    /// Name length for `Prefix`, first occurrence for `WordStart`/`Contains`.
    secondary: usize,
    key: &'a str,
    hero: &'a Hero,
}

impl Ranked<'_> {
    fn cmp_rank(&self, other: &Self) -> Ordering {
        other
            .tier
            .cmp(&self.tier)
            .then(self.secondary.cmp(&other.secondary))
            .then_with(|| self.key.cmp(other.key))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Roster {
    heroes: Vec<Hero>,
    keys: Vec<NameKeys>,
}

impl Roster {
    pub fn new(heroes: Vec<Hero>) -> Self {
        let keys = heroes.iter().map(|h| NameKeys::of(&h.name)).collect();
        Self { heroes, keys }
    }

    pub fn heroes(&self) -> &[Hero] {
        &self.heroes
    }

    pub fn len(&self) -> usize {
        self.heroes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }

    /// Identity lookup by display name, no normalization.
    pub fn by_name(&self, name: &str) -> Option<&Hero> {
        self.heroes.iter().find(|h| h.name == name)
    }

    /// Resolve submitted text to a hero.
    ///
    /// The whole roster is searched for a normalized-name match first; only
    /// then are letters-only keys compared. Within a pass the first hero in
    /// roster order wins.
    pub fn resolve_exact(&self, query: &str) -> Option<&Hero> {
        let normalized = normalize(query);
        if normalized.is_empty() {
            return None;
        }
        let by_name = self.find_by_key(|k| k.normalized == normalized);
        if by_name.is_some() {
            return by_name;
        }
        let compact = normalize_letters(query);
        if compact.is_empty() {
            return None;
        }
        self.find_by_key(|k| k.letters == compact)
    }

    fn find_by_key(&self, pred: impl Fn(&NameKeys) -> bool) -> Option<&Hero> {
        self.heroes
            .iter()
            .zip(&self.keys)
            .find(|&(_, k)| pred(k))
            .map(|(h, _)| h)
    }

    /// Autocomplete candidates for partial input, best first, at most `limit`.
    pub fn suggest(&self, prefix: &str, limit: usize) -> Vec<&Hero> {
        let query = normalize(prefix);
        if query.is_empty() {
            return Vec::new();
        }
        let mut ranked: Vec<Ranked<'_>> = self
            .heroes
            .iter()
            .zip(&self.keys)
            .filter_map(|(hero, keys)| {
                let (tier, secondary) = match_tier(keys, &query)?;
                Some(Ranked {
                    tier,
                    secondary,
                    key: &keys.normalized,
                    hero,
                })
            })
            .collect();
        ranked.sort_by(|a, b| a.cmp_rank(b));
        ranked.into_iter().take(limit).map(|r| r.hero).collect()
    }

    /// Heroes sorted by normalized name, for the full list view.
    pub fn sorted(&self) -> Vec<&Hero> {
        let mut all: Vec<(&str, &Hero)> = self
            .keys
            .iter()
            .map(|k| k.normalized.as_str())
            .zip(&self.heroes)
            .collect();
        all.sort_by(|a, b| a.0.cmp(b.0));
        all.into_iter().map(|(_, h)| h).collect()
    }
}

fn match_tier(keys: &NameKeys, query: &str) -> Option<(MatchTier, usize)> {
    let name = keys.normalized.as_str();
    if name == query {
        return Some((MatchTier::Exact, 0));
    }
    if name.starts_with(query) {
        return Some((MatchTier::Prefix, name.chars().count()));
    }
    let first = name.find(query).map(|pos| name[..pos].chars().count());
    let word_start = name.contains(&format!(" {query}")) || name.contains(&format!("-{query}"));
    match first {
        Some(pos) if word_start => Some((MatchTier::WordStart, pos)),
        Some(pos) => Some((MatchTier::Contains, pos)),
        None if keys.initials.starts_with(query) => Some((MatchTier::Initials, 0)),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(names: &[&str]) -> Roster {
        Roster::new(names.iter().map(|n| Hero::named(n)).collect())
    }

    fn names(heroes: Vec<&Hero>) -> Vec<&str> {
        heroes.into_iter().map(|h| h.name.as_str()).collect()
    }

    fn sample() -> Roster {
        roster(&[
            "Anti-Mage",
            "Axe",
            "Magnus",
            "Mars",
            "Monkey King",
            "Queen of Pain",
            "Nature's Prophet",
            "Shadow Shaman",
            "Tiny",
        ])
    }

    #[test]
    fn resolves_literal_names() {
        let r = sample();
        for hero in r.heroes() {
            assert_eq!(r.resolve_exact(&hero.name), Some(hero));
        }
    }

    #[test]
    fn resolves_case_accent_and_separator_variants() {
        let r = sample();
        for q in ["antimage", "ANTI MAGE", "anti\u{2013}mage", "Ánti-Mâge", "  anti   mage "] {
            assert_eq!(r.resolve_exact(q).map(|h| h.name.as_str()), Some("Anti-Mage"), "{q}");
        }
        assert_eq!(
            r.resolve_exact("natures prophet").map(|h| h.name.as_str()),
            Some("Nature's Prophet")
        );
    }

    #[test]
    fn initials_do_not_resolve() {
        let r = sample();
        assert!(r.resolve_exact("qop").is_none());
        assert!(r.resolve_exact("").is_none());
        assert!(r.resolve_exact(" - ").is_none());
    }

    #[test]
    fn name_match_beats_earlier_letter_key() {
        let r = roster(&["Io", "I-O"]);
        assert_eq!(r.resolve_exact("I-O").map(|h| h.name.as_str()), Some("I-O"));
        assert_eq!(r.resolve_exact("io").map(|h| h.name.as_str()), Some("Io"));
        assert_eq!(r.resolve_exact("i o").map(|h| h.name.as_str()), Some("Io"));
    }

    #[test]
    fn suggest_orders_by_tier_then_secondary_key() {
        let r = sample();
        assert_eq!(
            names(r.suggest("ma", SUGGESTION_LIMIT)),
            vec!["Mars", "Magnus", "Anti-Mage", "Shadow Shaman"]
        );
    }

    #[test]
    fn suggest_prefers_earlier_occurrence_over_lexical_order() {
        let r = roster(&["Xxxxab", "Zab"]);
        assert_eq!(names(r.suggest("ab", 8)), vec!["Zab", "Xxxxab"]);
        let r = roster(&["Aaaa Bolt", "Zz Bo"]);
        assert_eq!(names(r.suggest("bo", 8)), vec!["Zz Bo", "Aaaa Bolt"]);
    }

    #[test]
    fn suggest_exact_beats_prefix() {
        let r = roster(&["Axelot", "Axe"]);
        assert_eq!(names(r.suggest("axe", 8)), vec!["Axe", "Axelot"]);
    }

    #[test]
    fn suggest_uses_initials_last() {
        let r = sample();
        assert_eq!(names(r.suggest("qo", 8)), vec!["Queen of Pain"]);
        assert_eq!(names(r.suggest("mk", 8)), vec!["Monkey King"]);
    }

    #[test]
    fn suggest_prefers_short_prefixes_and_breaks_ties_lexically() {
        let r = roster(&["Dark Willow", "Dark Seer", "Dark Ancient"]);
        assert_eq!(
            names(r.suggest("dark", 8)),
            vec!["Dark Seer", "Dark Willow", "Dark Ancient"]
        );
        let r = roster(&["Zed Arc", "Bob Arc"]);
        assert_eq!(names(r.suggest("arc", 8)), vec!["Bob Arc", "Zed Arc"]);
    }

    #[test]
    fn suggest_empty_and_limit() {
        let r = sample();
        assert!(r.suggest("  ", 8).is_empty());
        assert_eq!(r.suggest("a", 2).len(), 2);
    }

    #[test]
    fn complexity_buckets() {
        assert_eq!(Complexity::from_raw(Some("Легкий")), Complexity::Easy);
        assert_eq!(Complexity::from_raw(Some("easy")), Complexity::Easy);
        assert_eq!(Complexity::from_raw(Some("Средний")), Complexity::Medium);
        assert_eq!(Complexity::from_raw(Some("normal")), Complexity::Medium);
        assert_eq!(Complexity::from_raw(Some("Сложный")), Complexity::Hard);
        assert_eq!(Complexity::from_raw(Some("—")), Complexity::Unknown);
        assert_eq!(Complexity::from_raw(None), Complexity::Unknown);
        assert_eq!(
            Complexity::from_raw(Some(" Tricky ")),
            Complexity::Other("Tricky".to_string())
        );
        assert_eq!(Complexity::Hard.to_string(), "Hard");
        assert_eq!(Complexity::Unknown.to_string(), "-");
    }

    #[test]
    fn asset_key_defaults_to_slug() {
        let mut h = Hero::named("Anti-Mage");
        assert_eq!(h.asset_key(), "anti_mage");
        h.internal = Some("antimage".to_string());
        assert_eq!(h.asset_key(), "antimage");
    }

    #[test]
    fn sorted_lists_by_normalized_name() {
        let r = roster(&["tiny", "Axe", "Bane"]);
        assert_eq!(names(r.sorted()), vec!["Axe", "Bane", "tiny"]);
    }
}
