//! Hero catalog ingestion.
//!
//! The catalog arrives as JSON text fetched by the JS bridge. Records are
//! read as loose JSON objects so that legacy field names (`videos`,
//! `positions`, `atribut`, `сложность`, `год`, ...) and sloppy values
//! (numbers for years, a bare string for a list) still produce a hero.
//!
//! Locally edited overrides, keyed by normalized name, are merged over
//! the base records before conversion.

use std::collections::HashMap;

use log::{info, warn};
use serde_json::{Map, Value};

use crate::error::GameError;
use crate::roster::{Complexity, Hero, Roster};
use crate::text::normalize;

pub const CATALOG_FILE: &str = "heroes.json";

/// Placeholder identity for records without a usable name.
pub const UNKNOWN_NAME: &str = "Unknown";

pub type Record = Map<String, Value>;

/// Candidate catalog locations, tried in order by the bridge.
pub fn candidate_paths(origin: &str, timestamp: i64) -> Vec<String> {
    let origin = origin.trim_end_matches('/');
    let mut paths = vec![
        format!("./{CATALOG_FILE}?t={timestamp}"),
        format!("/{CATALOG_FILE}?t={timestamp}"),
    ];
    if !origin.is_empty() {
        paths.push(format!("{origin}/{CATALOG_FILE}?t={timestamp}"));
    }
    paths
}

/// Build a roster from ordered fetch results.
///
/// Each item is either the body of a successful fetch or the reason it
/// failed. The first body that parses as a JSON array is used; the rest
/// are ignored. `overrides` is the raw override JSON, if any.
pub fn load_roster<I>(sources: I, overrides: Option<&str>) -> Result<Roster, GameError>
where
    I: IntoIterator<Item = Result<String, String>>,
{
    for (index, source) in sources.into_iter().enumerate() {
        let body = match source {
            Ok(body) => body,
            Err(reason) => {
                warn!("catalog source {index} unavailable: {reason}");
                continue;
            }
        };
        match parse_catalog(&body) {
            Ok(base) => {
                let records = merge_overrides(base, parse_overrides(overrides));
                let heroes: Vec<Hero> = records.iter().map(hero_from_record).collect();
                info!("loaded {} heroes from catalog source {index}", heroes.len());
                return Ok(Roster::new(heroes));
            }
            Err(e) => warn!("catalog source {index} rejected: {e}"),
        }
    }
    Err(GameError::RosterUnavailable)
}

/// Parse a catalog body into records, dropping entries that are not objects.
pub fn parse_catalog(body: &str) -> Result<Vec<Record>, GameError> {
    let values: Vec<Value> = serde_json::from_str(body)?;
    Ok(values
        .into_iter()
        .enumerate()
        .filter_map(|(i, v)| match v {
            Value::Object(record) => Some(record),
            other => {
                warn!("skipping catalog entry {i}: expected an object, got {other}");
                None
            }
        })
        .collect())
}

/// Override JSON that is missing, unparseable or not an array is ignored.
fn parse_overrides(raw: Option<&str>) -> Vec<Value> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Vec::new();
    };
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            warn!("ignoring hero overrides: not an array");
            Vec::new()
        }
        Err(e) => {
            warn!("ignoring hero overrides: {e}");
            Vec::new()
        }
    }
}

/// Merge overrides into the base records, collapsing duplicate names.
///
/// Base records sharing a normalized name collapse into the first slot.
/// An override field replaces the base field unless it is null, an empty
/// array, or a string that is blank or a dash placeholder.
pub fn merge_overrides(base: Vec<Record>, overrides: Vec<Value>) -> Vec<Record> {
    let mut order: Vec<Record> = Vec::with_capacity(base.len());
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in base {
        let key = identity_key(&record);
        match index.get(&key) {
            Some(&slot) => order[slot].extend(record),
            None => {
                index.insert(key, order.len());
                order.push(record);
            }
        }
    }

    for (i, item) in overrides.into_iter().enumerate() {
        if let Err(e) = apply_override(&mut order, &mut index, i, item) {
            warn!("{e}; skipped");
        }
    }
    order
}

/// Normalized identity of a base record. Nameless records share the
/// placeholder's key so they collapse with a real `Unknown` entry.
fn identity_key(record: &Record) -> String {
    normalize(text(record, &["name"]).as_deref().unwrap_or(UNKNOWN_NAME))
}

fn apply_override(
    order: &mut Vec<Record>,
    index: &mut HashMap<String, usize>,
    position: usize,
    item: Value,
) -> Result<(), GameError> {
    let Value::Object(fields) = item else {
        return Err(GameError::MalformedOverride { index: position });
    };
    let name = fields.get("name").and_then(Value::as_str).unwrap_or("");
    let key = normalize(name);
    if key.is_empty() {
        return Err(GameError::MalformedOverride { index: position });
    }
    let slot = match index.get(&key) {
        Some(&slot) => slot,
        None => {
            let mut fresh = Record::new();
            fresh.insert("name".to_string(), Value::String(name.to_string()));
            index.insert(key, order.len());
            order.push(fresh);
            order.len() - 1
        }
    };
    let target = &mut order[slot];
    for (field, value) in fields {
        if field != "name" && overrides_base(&value) {
            target.insert(field, value);
        }
    }
    Ok(())
}

fn overrides_base(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Array(items) => !items.is_empty(),
        Value::String(s) => !is_placeholder(s),
        _ => true,
    }
}

fn is_placeholder(s: &str) -> bool {
    matches!(s.trim(), "" | "-" | "—")
}

/// First field among `keys` holding a non-null, non-empty value.
fn first_present<'a>(record: &'a Record, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| record.get(*k))
        .find(|v| match v {
            Value::Null | Value::Bool(false) => false,
            Value::String(s) => !s.is_empty(),
            _ => true,
        })
}

fn text(record: &Record, keys: &[&str]) -> Option<String> {
    let value = first_present(record, keys)?;
    let s = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!is_placeholder(&s)).then_some(s)
}

fn list(record: &Record, keys: &[&str]) -> Vec<String> {
    match first_present(record, keys) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) if !is_placeholder(s) => vec![s.trim().to_string()],
        _ => Vec::new(),
    }
}

/// Convert one merged record into a hero, repairing what is missing.
pub fn hero_from_record(record: &Record) -> Hero {
    let name = text(record, &["name"]).unwrap_or_else(|| UNKNOWN_NAME.to_string());
    Hero {
        name,
        gender: text(record, &["gender"]),
        types: list(record, &["types", "videos"]),
        roles: list(record, &["roles", "positions"]),
        attr: text(record, &["attr", "atribut", "attribute"]),
        attack: text(record, &["attack"]),
        complexity: Complexity::from_raw(text(record, &["complexity", "сложность"]).as_deref()),
        year: text(record, &["year", "год"]),
        internal: text(record, &["internal"]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = r#"[
        {"name": "Anti-Mage", "gender": "Мужской", "types": ["Human"], "roles": ["Carry", "Escape"],
         "attr": "AGI", "attack": "Melee", "complexity": "Легкий", "year": "2010"},
        {"name": "Crystal Maiden", "gender": "female", "videos": ["Human"], "positions": "Support",
         "atribut": "INT", "attack": "Ranged", "сложность": "Легкий", "год": 2010},
        {"gender": "male"},
        42
    ]"#;

    fn ok(body: &str) -> Result<String, String> {
        Ok(body.to_string())
    }

    #[test]
    fn reads_legacy_field_names() {
        let roster = load_roster([ok(BASE)], None).unwrap();
        let cm = roster.by_name("Crystal Maiden").unwrap();
        assert_eq!(cm.types, vec!["Human"]);
        assert_eq!(cm.roles, vec!["Support"]);
        assert_eq!(cm.attr.as_deref(), Some("INT"));
        assert_eq!(cm.complexity, Complexity::Easy);
        assert_eq!(cm.year.as_deref(), Some("2010"));
    }

    #[test]
    fn repairs_nameless_and_skips_non_objects() {
        let roster = load_roster([ok(BASE)], None).unwrap();
        assert_eq!(roster.len(), 3);
        assert_eq!(roster.heroes()[2].name, UNKNOWN_NAME);
        assert_eq!(roster.heroes()[2].gender.as_deref(), Some("male"));
    }

    #[test]
    fn falls_back_through_sources() {
        let roster = load_roster(
            [Err("HTTP 404".to_string()), ok("<html>not json</html>"), ok(BASE)],
            None,
        )
        .unwrap();
        assert_eq!(roster.heroes()[0].name, "Anti-Mage");
    }

    #[test]
    fn all_sources_failing_is_unavailable() {
        let err = load_roster([Err("offline".to_string()), ok("{}")], None).unwrap_err();
        assert_eq!(err, GameError::RosterUnavailable);
        let err = load_roster(Vec::<Result<String, String>>::new(), None).unwrap_err();
        assert_eq!(err, GameError::RosterUnavailable);
    }

    #[test]
    fn empty_catalog_loads_as_empty_roster() {
        let roster = load_roster([ok("[]")], None).unwrap();
        assert!(roster.is_empty());
    }

    #[test]
    fn overrides_merge_per_field() {
        let overrides = r#"[
            {"name": "ANTI-MAGE", "roles": [], "year": "-", "attack": "Ranged", "types": ["Elf"]},
            {"name": "Pudge", "attr": "STR"},
            {"roles": ["Nameless"]},
            "garbage"
        ]"#;
        let roster = load_roster([ok(BASE)], Some(overrides)).unwrap();
        let am = roster.by_name("Anti-Mage").unwrap();
        assert_eq!(am.roles, vec!["Carry", "Escape"]);
        assert_eq!(am.year.as_deref(), Some("2010"));
        assert_eq!(am.attack.as_deref(), Some("Ranged"));
        assert_eq!(am.types, vec!["Elf"]);

        let pudge = roster.by_name("Pudge").unwrap();
        assert_eq!(pudge.attr.as_deref(), Some("STR"));
        assert_eq!(roster.len(), 4);
    }

    #[test]
    fn nameless_records_share_the_placeholder_identity() {
        let body = r#"[
            {"gender": "male"},
            {"name": "Axe"},
            {"name": "Unknown", "gender": "female"},
            {"name": " - ", "attr": "INT"}
        ]"#;
        let roster = load_roster([ok(body)], None).unwrap();
        assert_eq!(roster.len(), 2);
        let unknown = &roster.heroes()[0];
        assert_eq!(unknown.name, UNKNOWN_NAME);
        assert_eq!(unknown.gender.as_deref(), Some("female"));
        assert_eq!(unknown.attr.as_deref(), Some("INT"));
        assert_eq!(roster.resolve_exact("unknown"), Some(unknown));
    }

    #[test]
    fn invalid_overrides_are_ignored() {
        let roster = load_roster([ok(BASE)], Some("{not json")).unwrap();
        assert_eq!(roster.len(), 3);
    }

    #[test]
    fn duplicate_names_collapse_into_first_slot() {
        let body = r#"[
            {"name": "Axe", "year": "2009"},
            {"name": "Bane"},
            {"name": "AXE", "attack": "Melee"}
        ]"#;
        let roster = load_roster([ok(body)], None).unwrap();
        assert_eq!(roster.len(), 2);
        let axe = &roster.heroes()[0];
        assert_eq!(axe.name, "AXE");
        assert_eq!(axe.year.as_deref(), Some("2009"));
        assert_eq!(axe.attack.as_deref(), Some("Melee"));
    }

    #[test]
    fn placeholder_values_become_none() {
        let body = r#"[{"name": "Io", "gender": "—", "year": "-", "complexity": ""}]"#;
        let roster = load_roster([ok(body)], None).unwrap();
        let io = &roster.heroes()[0];
        assert_eq!(io.gender, None);
        assert_eq!(io.year, None);
        assert_eq!(io.complexity, Complexity::Unknown);
    }

    #[test]
    fn candidate_paths_in_fetch_order() {
        let paths = candidate_paths("https://example.org/", 7);
        assert_eq!(
            paths,
            vec![
                "./heroes.json?t=7",
                "/heroes.json?t=7",
                "https://example.org/heroes.json?t=7",
            ]
        );
        assert_eq!(candidate_paths("", 1).len(), 2);
    }
}
