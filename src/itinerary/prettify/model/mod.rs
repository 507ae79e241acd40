use std::collections::HashMap;
use std::fmt;
use std::ops::Range;

use serde::Deserialize;

use crate::itinerary::prettify::error::DateTimeError;

/// ANSI reset sequence closing every highlighted segment.
pub const RESET: &str = "\u{1b}[0m";
/// ANSI bold sequence used for the hour phrase of an offset note.
pub const BOLD: &str = "\u{1b}[1m";
/// Glyph prefixing every offset note.
pub const CLOCK: &str = "\u{1f552}";

/// Display colours offered by the interactive prompt, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Red,
    Green,
    Yellow,
    Blue,
    Purple,
}

impl Highlight {
    /// All colours in the order they are numbered on the menu.
    pub const ALL: [Highlight; 5] = [
        Highlight::Red,
        Highlight::Green,
        Highlight::Yellow,
        Highlight::Blue,
        Highlight::Purple,
    ];

    /// Looks up a colour by its 1-based menu number.
    pub fn from_menu_number(number: usize) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|idx| Self::ALL.get(idx))
            .copied()
    }

    /// ANSI escape sequence selecting this colour.
    pub fn ansi(self) -> &'static str {
        match self {
            Highlight::Red => "\u{1b}[31m",
            Highlight::Green => "\u{1b}[32m",
            Highlight::Yellow => "\u{1b}[33m",
            Highlight::Blue => "\u{1b}[34m",
            Highlight::Purple => "\u{1b}[35m",
        }
    }
}

impl fmt::Display for Highlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Highlight::Red => write!(f, "Red"),
            Highlight::Green => write!(f, "Green"),
            Highlight::Yellow => write!(f, "Yellow"),
            Highlight::Blue => write!(f, "Blue"),
            Highlight::Purple => write!(f, "Purple"),
        }
    }
}

/// Rendering settings shared by every substitution of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStyle {
    pub highlight: Highlight,
}

impl RenderStyle {
    pub fn new(highlight: Highlight) -> Self {
        Self { highlight }
    }

    /// Wraps `text` in the active colour followed by a reset.
    pub fn paint(&self, text: &str) -> String {
        format!("{}{text}{RESET}", self.highlight.ansi())
    }
}

/// The columns of a lookup row that the prettifier uses.
///
/// Rows are deserialised by header name, so column order and any extra
/// columns in the table do not matter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LookupRow {
    pub icao_code: String,
    pub iata_code: String,
    pub name: String,
    pub municipality: String,
}

/// Header names a lookup table must provide.
pub const REQUIRED_COLUMNS: [&str; 4] = ["icao_code", "iata_code", "name", "municipality"];

/// Code → display name tables built once from the lookup file.
///
/// Keys carry their marker punctuation: `#JFK` and `##KJFK` for airport
/// names, `*#JFK` and `*##KJFK` for city names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeMapping {
    airports: HashMap<String, String>,
    cities: HashMap<String, String>,
}

impl CodeMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the four keys derived from a single lookup row.
    pub fn insert_row(&mut self, row: &LookupRow) {
        self.airports
            .insert(format!("#{}", row.iata_code), row.name.clone());
        self.airports
            .insert(format!("##{}", row.icao_code), row.name.clone());
        self.cities
            .insert(format!("*#{}", row.iata_code), row.municipality.clone());
        self.cities
            .insert(format!("*##{}", row.icao_code), row.municipality.clone());
    }

    /// Airport name for a `#XXX` or `##XXXX` token.
    pub fn airport(&self, token: &str) -> Option<&str> {
        self.airports.get(token).map(String::as_str)
    }

    /// City name for a `*#XXX` or `*##XXXX` token.
    pub fn city(&self, token: &str) -> Option<&str> {
        self.cities.get(token).map(String::as_str)
    }

    pub fn airport_count(&self) -> usize {
        self.airports.len()
    }

    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty() && self.cities.is_empty()
    }
}

impl FromIterator<LookupRow> for CodeMapping {
    fn from_iter<I: IntoIterator<Item = LookupRow>>(rows: I) -> Self {
        let mut mapping = CodeMapping::new();
        for row in rows {
            mapping.insert_row(&row);
        }
        mapping
    }
}

/// Kinds of marker recognised in itinerary text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `*#XXX` or `*##XXXX`.
    City,
    /// `#XXX`.
    Iata,
    /// `##XXXX`.
    Icao,
    /// `D(...)`.
    Date,
    /// `T12(...)`.
    Time12,
    /// `T24(...)`.
    Time24,
}

/// A recognised marker within one line of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Full marker text as it appears in the line.
    pub raw: &'a str,
    /// Code or bracketed payload carried by the marker.
    pub payload: &'a str,
    /// Byte span of `raw` within the line.
    pub span: Range<usize>,
}

/// A date/time marker that could not be reformatted and was kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line number in the normalised document.
    pub line: usize,
    pub marker: String,
    pub error: DateTimeError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error parsing date/time on line {}: {} ({})",
            self.line, self.marker, self.error
        )
    }
}

/// Summary of a completed prettify run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrettifyReport {
    pub lines_written: usize,
    pub codes_resolved: usize,
    pub markers_formatted: usize,
    pub diagnostics: Vec<Diagnostic>,
}
