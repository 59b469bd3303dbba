//! HTML fragments for the game page.
//!
//! Everything here is pure string building over session data. The page
//! swaps these fragments in with HTMX; small inline scripts carry the
//! side effects only the main thread can perform (storage, timers).

use crate::game::clock::TimerCommand;
use crate::game::hints::{Dimension, Pill};
use crate::game::session::{GuessRecord, Outcome, Session, mode_help};
use crate::game::storage::StorageWrite;
use crate::roster::{Hero, Roster};

const CDN_ICON_BASE: &str = "https://cdn.cloudflare.steamstatic.com/apps/dota2/images/heroes";
const UNKNOWN_ICON: &str = "assets/icons/unknown.svg";

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Icon locations to try in order. The last entry always exists.
pub fn icon_sources(hero: &Hero) -> Vec<String> {
    let key = hero.asset_key();
    vec![
        format!("assets/icons/{key}.png"),
        format!("assets/icons/{key}.svg"),
        format!("{CDN_ICON_BASE}/{key}_icon.png"),
        UNKNOWN_ICON.to_string(),
    ]
}

/// `<img>` that walks its fallback list on each load error.
fn render_icon(hero: &Hero) -> String {
    let sources = icon_sources(hero);
    let (first, rest) = sources
        .split_first()
        .map_or((UNKNOWN_ICON, &[][..]), |(f, r)| (f.as_str(), r));
    format!(
        r#"<img class="hero-icon" src="{}" alt="{}" data-fallbacks="{}" onerror="var l=this.dataset.fallbacks.split('|');var n=l.shift();this.dataset.fallbacks=l.join('|');if(n){{this.src=n}}else{{this.onerror=null}}">"#,
        escape_html(first),
        escape_html(&hero.name),
        escape_html(&rest.join("|")),
    )
}

fn render_pill(pill: &Pill) -> String {
    let class = if pill.matched { "pill match" } else { "pill" };
    format!(r#"<span class="{class}">{}</span>"#, escape_html(&pill.label))
}

/// One guess row: hero cell followed by one cell per dimension.
pub fn render_row(record: &GuessRecord) -> String {
    let mut html = String::with_capacity(1024);
    let row_class = if record.hint.correct { "guess-row correct" } else { "guess-row" };
    html.push_str(&format!(r#"<tr class="{row_class}">"#));
    html.push_str(&format!(
        r#"<td class="hero-cell">{}<span class="hero-name">{}</span></td>"#,
        render_icon(&record.hero),
        escape_html(&record.hero.name)
    ));
    for dimension in Dimension::ALL {
        html.push_str(&format!(r#"<td data-label="{dimension}">"#));
        for pill in record.hint.pills(dimension) {
            html.push_str(&render_pill(&pill));
        }
        html.push_str("</td>");
    }
    html.push_str("</tr>");
    html
}

fn render_table(session: &Session) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str(r#"<table class="guess-table"><thead><tr><th>Hero</th>"#);
    for dimension in Dimension::ALL {
        html.push_str(&format!("<th>{dimension}</th>"));
    }
    html.push_str("</tr></thead><tbody>");
    for record in session.rows() {
        html.push_str(&render_row(record));
    }
    html.push_str("</tbody></table>");
    html
}

/// Status line under the input.
pub fn render_message(text: &str, outcome: Outcome) -> String {
    let tone = match outcome {
        Outcome::Won => "msg-win",
        Outcome::Lost | Outcome::Surrendered => "msg-lose",
        Outcome::AlreadyCompletedToday => "msg-done",
        Outcome::InProgress => "msg-info",
    };
    format!(
        r#"<div id="message" class="message {tone}">{}</div>"#,
        escape_html(text)
    )
}

/// The whole game panel for the current session.
///
/// `countdown` is shown only in daily mode. Input controls are disabled
/// once the session is over.
pub fn render_board(session: &Session, countdown: Option<&str>) -> String {
    let mut html = String::with_capacity(8192);
    html.push_str(r#"<div id="game-board">"#);
    html.push_str(&format!(
        r#"<p id="mode-help" class="mode-help">{}</p>"#,
        escape_html(&mode_help(session.mode(), session.hard_mode()))
    ));

    let disabled = if session.is_over() { " disabled" } else { "" };
    html.push_str(&format!(
        r##"<form id="guess-form" hx-post="/api/guess" hx-target="#game-board" hx-swap="outerHTML"><input type="text" id="guess-input" name="guess" autocomplete="off" placeholder="Hero name" hx-get="/api/suggest" hx-trigger="input changed delay:150ms" hx-target="#suggestions"{disabled}><button type="submit"{disabled}>Guess</button><button type="button" hx-post="/api/surrender" hx-target="#game-board" hx-swap="outerHTML"{disabled}>Give up</button></form>"##
    ));
    html.push_str(r#"<div id="suggestions"></div>"#);

    html.push_str(&render_message(session.message(), session.outcome()));
    if session.is_over() {
        html.push_str(r##"<button type="button" hx-post="/api/restart" hx-target="#game-board" hx-swap="outerHTML">New game</button>"##);
    }

    html.push_str(&render_table(session));
    if let Some(text) = countdown {
        html.push_str(&render_countdown(text));
    }
    html.push_str("</div>");
    html
}

pub fn render_countdown(text: &str) -> String {
    format!(
        r#"<p id="countdown" class="countdown">{}</p>"#,
        escape_html(text)
    )
}

/// Suggestion buttons; each submits the hero's exact name.
pub fn render_suggestions(heroes: &[&Hero]) -> String {
    if heroes.is_empty() {
        return String::new();
    }
    let mut html = String::with_capacity(heroes.len() * 256);
    html.push_str(r#"<ul class="suggestions">"#);
    for hero in heroes {
        let vals = serde_json::json!({ "guess": hero.name }).to_string();
        html.push_str(&format!(
            r##"<li><button type="button" hx-post="/api/guess" hx-vals='{}' hx-target="#game-board" hx-swap="outerHTML">{}<span>{}</span></button></li>"##,
            vals.replace('\'', "&#39;"),
            render_icon(hero),
            escape_html(&hero.name)
        ));
    }
    html.push_str("</ul>");
    html
}

/// Every hero, sorted by name.
pub fn render_hero_list(roster: &Roster) -> String {
    let heroes = roster.sorted();
    let mut html = String::with_capacity(heroes.len() * 200);
    html.push_str(&format!(
        r#"<ul class="hero-list" data-count="{}">"#,
        heroes.len()
    ));
    for hero in heroes {
        html.push_str(&format!(
            "<li>{}<span>{}</span></li>",
            render_icon(hero),
            escape_html(&hero.name)
        ));
    }
    html.push_str("</ul>");
    html
}

/// Red inline error, the same shape every route uses.
pub fn render_error(text: &str) -> String {
    format!(r#"<span class="text-hg-red">{}</span>"#, escape_html(text))
}

/// Main-thread hook for the one-second countdown interval.
pub fn timer_script(command: TimerCommand) -> String {
    let call = match command {
        TimerCommand::Start => "heroGuess.startCountdown()",
        TimerCommand::Stop => "heroGuess.stopCountdown()",
    };
    format!("<script>{call}</script>")
}

/// Replays journaled writes against `localStorage`. Empty when there is
/// nothing to write.
pub fn storage_script(writes: &[StorageWrite]) -> String {
    if writes.is_empty() {
        return String::new();
    }
    let mut js = String::from("<script>");
    for write in writes {
        match write {
            StorageWrite::Set { key, value } => js.push_str(&format!(
                "localStorage.setItem({},{});",
                js_string(key),
                js_string(value)
            )),
            StorageWrite::Remove { key } => {
                js.push_str(&format!("localStorage.removeItem({});", js_string(key)))
            }
        }
    }
    js.push_str("</script>");
    js
}

/// A JS string literal that is also safe inside a `<script>` element.
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string())
        .to_string()
        .replace("</", "<\\/")
}
