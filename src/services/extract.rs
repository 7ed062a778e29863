// src/services/extract.rs

//! Field extractors.
//!
//! Stateless helpers that turn the raw markup of one table cell into a
//! normalized field value. A miss is never an error: the field is absent.

use std::sync::LazyLock;

use chrono::Month;
use regex::{Captures, Regex};

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern"));

static ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(amp|lt|gt|quot|#39|nbsp);").expect("entity pattern"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

// An `X` in the day position shows up in a few older entries ("4/X/2003").
// Digits may not run into the date on either side.
static NUMERIC_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:^|[^0-9])(?P<month>[0-9]{1,2})/{1,2}(?P<day>[0-9X]{1,2})/{1,2}(?P<year>[0-9]{2,4})(?:[^0-9]|$)",
    )
    .expect("numeric date pattern")
});

static WRITTEN_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"filed (?P<month>Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|June?|July?|Aug(?:ust)?|Sep(?:tember)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)\.? ?(?P<day>[0-9]{1,2}),? *(?P<year>[0-9]{2,4})",
    )
    .expect("written date pattern")
});

/// What the first cell of a row holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierCell {
    /// Only decimal digits after stripping markup
    Identifier(String),
    /// Some text, but not a docket number
    NotIdentifier(String),
    /// Nothing but markup or whitespace
    Empty,
}

impl IdentifierCell {
    /// The docket number, if the cell held one.
    pub fn into_identifier(self) -> Option<String> {
        match self {
            Self::Identifier(id) => Some(id),
            Self::NotIdentifier(_) | Self::Empty => None,
        }
    }
}

/// Remove tags and decode the entities produced when serializing cell text.
pub fn strip_markup(markup: &str) -> String {
    let text = TAG.replace_all(markup, "");
    ENTITY
        .replace_all(&text, |caps: &Captures| match &caps[1] {
            "amp" => "&",
            "lt" => "<",
            "gt" => ">",
            "quot" => "\"",
            "#39" => "'",
            _ => " ",
        })
        .into_owned()
}

/// Classify a cell as a docket number or not.
pub fn extract_docket_id(markup: &str) -> IdentifierCell {
    let text = strip_markup(markup);
    let text = text.trim();

    if text.is_empty() {
        IdentifierCell::Empty
    } else if text.chars().all(|c| c.is_ascii_digit()) {
        IdentifierCell::Identifier(text.to_string())
    } else {
        IdentifierCell::NotIdentifier(text.to_string())
    }
}

/// Filer name: markup stripped and trimmed.
pub fn extract_filer(markup: &str) -> Option<String> {
    non_empty(strip_markup(markup).trim())
}

/// Description: markup stripped, trimmed, internal whitespace collapsed.
pub fn extract_description(markup: &str) -> Option<String> {
    let text = strip_markup(markup);
    non_empty(&WHITESPACE.replace_all(text.trim(), " "))
}

/// Filing date found in an already-extracted description.
///
/// Numeric dates win over written ones. Written dates are only recognized
/// after the word `filed` and are reformatted to `month/day/year`.
pub fn extract_filing_date(description: &str) -> Option<String> {
    if let Some(caps) = NUMERIC_DATE.captures(description) {
        return Some(format!(
            "{}/{}/{}",
            &caps["month"], &caps["day"], &caps["year"]
        ));
    }

    let caps = WRITTEN_DATE.captures(description)?;
    let month = caps["month"].parse::<Month>().ok()?;
    Some(format!(
        "{}/{}/{}",
        month.number_from_month(),
        &caps["day"],
        &caps["year"]
    ))
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
