//! Date and time markers: `D(...)`, `T12(...)` and `T24(...)`.

use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

use crate::itinerary::prettify::error::DateTimeError;
use crate::itinerary::prettify::model::{BOLD, CLOCK, RESET, RenderStyle, Token, TokenKind};

const DATE_LAYOUT: &str = "%Y-%m-%d";
const TIME_LAYOUT: &str = "%H:%M";
/// Offset shown when a time is given in Zulu shorthand.
pub const ZULU_OFFSET: &str = "+00:00";

fn marker_regex() -> &'static Regex {
    static MARKER_RE: OnceLock<Regex> = OnceLock::new();
    MARKER_RE.get_or_init(|| Regex::new(r"(D|T12|T24)\(([^)]+)\)").unwrap())
}

fn date_shape_regex() -> &'static Regex {
    static DATE_SHAPE_RE: OnceLock<Regex> = OnceLock::new();
    DATE_SHAPE_RE.get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap())
}

fn time_shape_regex() -> &'static Regex {
    static TIME_SHAPE_RE: OnceLock<Regex> = OnceLock::new();
    TIME_SHAPE_RE.get_or_init(|| Regex::new(r"^[0-9]{2}:[0-9]{2}$").unwrap())
}

/// Finds every date/time marker in `line`, left to right.
pub fn find_markers(line: &str) -> Vec<Token<'_>> {
    marker_regex()
        .captures_iter(line)
        .filter_map(|captures| {
            let whole = captures.get(0)?;
            let kind = match captures.get(1)?.as_str() {
                "D" => TokenKind::Date,
                "T12" => TokenKind::Time12,
                "T24" => TokenKind::Time24,
                _ => return None,
            };
            Some(Token {
                kind,
                raw: whole.as_str(),
                payload: captures.get(2)?.as_str(),
                span: whole.range(),
            })
        })
        .collect()
}

/// Renders the date portion of `payload` as `05 Mar 2024`.
///
/// The date must be exactly `YYYY-MM-DD`; chrono alone would also take
/// short years and single-digit fields.
pub fn format_date(payload: &str) -> Result<String, DateTimeError> {
    let date_part = payload.split('T').next().unwrap_or_default();
    let invalid = || DateTimeError::InvalidDate(date_part.to_string());
    if !date_shape_regex().is_match(date_part) {
        return Err(invalid());
    }
    let date = NaiveDate::parse_from_str(date_part, DATE_LAYOUT).map_err(|_| invalid())?;
    Ok(date.format("%d %b %Y").to_string())
}

/// Clock style requested by a time marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    TwelveHour,
    TwentyFourHour,
}

impl Clock {
    fn layout(self) -> &'static str {
        match self {
            Clock::TwelveHour => "%I:%M%p",
            Clock::TwentyFourHour => TIME_LAYOUT,
        }
    }
}

/// A timezone offset as written in a time marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offset {
    text: String,
    behind: bool,
    hours: u32,
    minutes: u32,
}

impl Offset {
    /// The `Z` shorthand.
    pub fn zulu() -> Self {
        Self {
            text: ZULU_OFFSET.to_string(),
            behind: false,
            hours: 0,
            minutes: 0,
        }
    }

    /// Parses a signed `HH:MM` offset.
    pub fn parse(text: &str) -> Result<Self, DateTimeError> {
        let invalid = || DateTimeError::InvalidOffset(text.to_string());

        let behind = match text.as_bytes().first() {
            Some(b'+') => false,
            Some(b'-') => true,
            _ => return Err(invalid()),
        };
        let (hours, minutes) = text[1..].split_once(':').ok_or_else(invalid)?;
        let hours = two_digits(hours).filter(|h| *h <= 23).ok_or_else(invalid)?;
        let minutes = two_digits(minutes).filter(|m| *m <= 59).ok_or_else(invalid)?;

        Ok(Self {
            text: text.to_string(),
            behind,
            hours,
            minutes,
        })
    }

    /// Offset text as it is rendered between parentheses.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0
    }

    /// Explanation of a non-zero offset, or `None` for a zero offset.
    ///
    /// Only the hour component is described.
    pub fn note(&self, style: &RenderStyle) -> Option<String> {
        if self.is_zero() {
            return None;
        }
        let plural = if self.hours == 1 { "" } else { "s" };
        let direction = if self.behind { "behind" } else { "ahead" };
        Some(format!(
            "{color} {CLOCK} Note: {offset} means \
             {BOLD}{hours} hour{plural} {direction}{RESET} standard time{RESET}",
            color = style.highlight.ansi(),
            offset = self.text,
            hours = self.hours,
        ))
    }
}

fn two_digits(text: &str) -> Option<u32> {
    if text.len() == 2 && text.bytes().all(|byte| byte.is_ascii_digit()) {
        text.parse().ok()
    } else {
        None
    }
}

/// Renders the time portion of `payload` in the requested clock style,
/// followed by its offset and, for a non-zero offset, an explanatory note.
pub fn format_time(
    payload: &str,
    clock: Clock,
    style: &RenderStyle,
) -> Result<String, DateTimeError> {
    let time_part = payload
        .split('T')
        .nth(1)
        .ok_or_else(|| DateTimeError::MissingTime(payload.to_string()))?;

    let (time, offset) = match time_part.strip_suffix('Z') {
        Some(time) => (time, Offset::zulu()),
        None => {
            let split = time_part
                .find(['+', '-'])
                .ok_or_else(|| DateTimeError::InvalidOffset(time_part.to_string()))?;
            let (time, offset) = time_part.split_at(split);
            (time, Offset::parse(offset)?)
        }
    };

    let invalid = || DateTimeError::InvalidTime(time.to_string());
    if !time_shape_regex().is_match(time) {
        return Err(invalid());
    }
    let parsed = NaiveTime::parse_from_str(time, TIME_LAYOUT).map_err(|_| invalid())?;

    let mut rendered = format!("{} ({})", parsed.format(clock.layout()), offset.as_str());
    if let Some(note) = offset.note(style) {
        rendered.push(' ');
        rendered.push_str(&note);
    }
    Ok(rendered)
}

/// Formats a single date or time marker.
///
/// Code markers are not date/time markers and come back unchanged.
pub fn format_marker(token: &Token<'_>, style: &RenderStyle) -> Result<String, DateTimeError> {
    match token.kind {
        TokenKind::Date => format_date(token.payload),
        TokenKind::Time12 => format_time(token.payload, Clock::TwelveHour, style),
        TokenKind::Time24 => format_time(token.payload, Clock::TwentyFourHour, style),
        TokenKind::City | TokenKind::Iata | TokenKind::Icao => Ok(token.raw.to_string()),
    }
}

/// Outcome of the date/time pass over one line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateTimePass {
    pub text: String,
    pub formatted: usize,
    /// Markers left verbatim, with the reason they could not be formatted.
    pub failures: Vec<(String, DateTimeError)>,
}

/// Replaces every date/time marker in `line`.
///
/// A marker that fails to parse is kept exactly as written.
pub fn substitute_datetimes(line: &str, style: &RenderStyle) -> DateTimePass {
    let mut pass = DateTimePass {
        text: String::with_capacity(line.len()),
        ..DateTimePass::default()
    };
    let mut cursor = 0;

    for token in find_markers(line) {
        pass.text.push_str(&line[cursor..token.span.start]);
        match format_marker(&token, style) {
            Ok(formatted) => {
                pass.text.push_str(&formatted);
                pass.formatted += 1;
            }
            Err(error) => {
                pass.text.push_str(token.raw);
                pass.failures.push((token.raw.to_string(), error));
            }
        }
        cursor = token.span.end;
    }
    pass.text.push_str(&line[cursor..]);

    pass
}
