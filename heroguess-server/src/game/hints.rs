//! Guess evaluation: attribute-by-attribute comparison against the secret.
//!
//! Each dimension produces one or more [`Pill`]s (label + matched flag) that
//! the board renders as a row. Comparison rules per dimension:
//!
//! | Dimension  | Rule                                                        |
//! |------------|-------------------------------------------------------------|
//! | gender     | synonyms folded to male/female, equal and both recognized   |
//! | types      | one pill per guessed tag, matched if the secret has it      |
//! | roles      | same as types                                               |
//! | attr       | equal codes, labelled via `ATTR_LABELS`                     |
//! | attack     | equal codes, labelled via `ATTACK_LABELS`                   |
//! | complexity | equal buckets, neither unknown                              |
//! | year       | equal values; otherwise an arrow towards the secret's year  |

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::roster::Hero;

const PLACEHOLDER: &str = "-";

const ATTR_LABELS: [(&str, &str); 4] = [
    ("STR", "Strength"),
    ("AGI", "Agility"),
    ("INT", "Intelligence"),
    ("UNI", "Universal"),
];

const ATTACK_LABELS: [(&str, &str); 2] = [("Melee", "Melee"), ("Ranged", "Ranged")];

/// One labelled cell fragment of a guess row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pill {
    pub label: String,
    pub matched: bool,
}

impl Pill {
    fn new(label: impl Into<String>, matched: bool) -> Self {
        Self {
            label: label.into(),
            matched,
        }
    }
}

/// Where the guessed year sits relative to the secret's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Guess is earlier; the secret came out later.
    Below,
    /// Guess is later; the secret came out earlier.
    Above,
}

impl Direction {
    pub fn arrow(self) -> &'static str {
        match self {
            Direction::Below => "↑",
            Direction::Above => "↓",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearHint {
    pub value: String,
    pub matched: bool,
    pub direction: Option<Direction>,
}

impl YearHint {
    /// Display label with the direction arrow appended when there is one.
    pub fn label(&self) -> String {
        match self.direction {
            Some(d) => format!("{} {}", self.value, d.arrow()),
            None => self.value.clone(),
        }
    }
}

/// Column of a guess row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Gender,
    Types,
    Roles,
    Attr,
    Attack,
    Complexity,
    Year,
}

impl Dimension {
    pub const ALL: [Dimension; 7] = [
        Dimension::Gender,
        Dimension::Types,
        Dimension::Roles,
        Dimension::Attr,
        Dimension::Attack,
        Dimension::Complexity,
        Dimension::Year,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Dimension::Gender => "Gender",
            Dimension::Types => "Race",
            Dimension::Roles => "Roles",
            Dimension::Attr => "Attribute",
            Dimension::Attack => "Attack type",
            Dimension::Complexity => "Complexity",
            Dimension::Year => "Release",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Full comparison of one guess against the secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintResult {
    pub hero: String,
    pub gender: Pill,
    pub types: Vec<Pill>,
    pub roles: Vec<Pill>,
    pub attr: Pill,
    pub attack: Pill,
    pub complexity: Pill,
    pub year: YearHint,
    /// Distinct letters shared by the two names. Informational only.
    pub shared_letters: usize,
    /// The guess is the secret.
    pub correct: bool,
}

impl HintResult {
    /// Pills for one column, in display order.
    pub fn pills(&self, dimension: Dimension) -> Vec<Pill> {
        match dimension {
            Dimension::Gender => vec![self.gender.clone()],
            Dimension::Types => self.types.clone(),
            Dimension::Roles => self.roles.clone(),
            Dimension::Attr => vec![self.attr.clone()],
            Dimension::Attack => vec![self.attack.clone()],
            Dimension::Complexity => vec![self.complexity.clone()],
            Dimension::Year => vec![Pill::new(self.year.label(), self.year.matched)],
        }
    }

    /// Every pill in every column is matched.
    pub fn is_full_match(&self) -> bool {
        Dimension::ALL
            .iter()
            .all(|d| self.pills(*d).iter().all(|p| p.matched))
    }
}

/// Compare `guess` against `secret`.
pub fn evaluate(guess: &Hero, secret: &Hero) -> HintResult {
    HintResult {
        hero: guess.name.clone(),
        gender: gender_pill(guess.gender.as_deref(), secret.gender.as_deref()),
        types: tag_pills(&guess.types, &secret.types),
        roles: tag_pills(&guess.roles, &secret.roles),
        attr: coded_pill(&ATTR_LABELS, guess.attr.as_deref(), secret.attr.as_deref()),
        attack: coded_pill(&ATTACK_LABELS, guess.attack.as_deref(), secret.attack.as_deref()),
        complexity: Pill::new(
            guess.complexity.to_string(),
            guess.complexity.is_known() && guess.complexity == secret.complexity,
        ),
        year: year_hint(guess.year.as_deref(), secret.year.as_deref()),
        shared_letters: shared_letters(&guess.name, &secret.name),
        correct: is_win(guess, secret),
    }
}

/// Identity check on the display name. No normalization.
pub fn is_win(guess: &Hero, secret: &Hero) -> bool {
    guess.name == secret.name
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Fold English and Russian spellings. Anything else is `None`.
    pub fn canonical(raw: Option<&str>) -> Option<Gender> {
        let s = raw?.trim().to_lowercase();
        match s.as_str() {
            "male" | "m" | "мужской" | "мужчина" => Some(Gender::Male),
            "female" | "f" | "женский" | "женщина" => Some(Gender::Female),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

fn gender_pill(guess: Option<&str>, secret: Option<&str>) -> Pill {
    let canonical = Gender::canonical(guess);
    let label = match (canonical, guess.map(str::trim)) {
        (Some(g), _) => g.label().to_string(),
        (None, Some(raw)) if !raw.is_empty() => raw.to_string(),
        _ => PLACEHOLDER.to_string(),
    };
    let matched = canonical.is_some() && canonical == Gender::canonical(secret);
    Pill::new(label, matched)
}

fn tag_pills(guess: &[String], secret: &[String]) -> Vec<Pill> {
    if guess.is_empty() {
        return vec![Pill::new(PLACEHOLDER, false)];
    }
    guess
        .iter()
        .map(|tag| Pill::new(tag.as_str(), secret.contains(tag)))
        .collect()
}

fn coded_pill(labels: &[(&str, &str)], guess: Option<&str>, secret: Option<&str>) -> Pill {
    let label = match guess {
        Some(code) => labels
            .iter()
            .find(|(k, _)| *k == code)
            .map_or(code, |(_, v)| *v)
            .to_string(),
        None => PLACEHOLDER.to_string(),
    };
    let matched = matches!((guess, secret), (Some(g), Some(s)) if g == s);
    Pill::new(label, matched)
}

fn year_hint(guess: Option<&str>, secret: Option<&str>) -> YearHint {
    let value = guess.unwrap_or(PLACEHOLDER).to_string();
    let (Some(g), Some(s)) = (present(guess), present(secret)) else {
        return YearHint {
            value,
            matched: false,
            direction: None,
        };
    };
    match (g.parse::<f64>(), s.parse::<f64>()) {
        (Ok(gy), Ok(sy)) => {
            let direction = if gy < sy {
                Some(Direction::Below)
            } else if gy > sy {
                Some(Direction::Above)
            } else {
                None
            };
            YearHint {
                value,
                matched: gy == sy,
                direction,
            }
        }
        _ => YearHint {
            value,
            matched: g == s,
            direction: None,
        },
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty() && *v != PLACEHOLDER)
}

/// Count of distinct ASCII letters (case-insensitive) common to both names.
pub fn shared_letters(a: &str, b: &str) -> usize {
    let letters = |s: &str| -> BTreeSet<char> {
        s.chars()
            .filter(char::is_ascii_alphabetic)
            .map(|c| c.to_ascii_lowercase())
            .collect()
    };
    letters(a).intersection(&letters(b)).count()
}
