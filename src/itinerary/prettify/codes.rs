//! Airport and city code markers.
//!
//! Three marker shapes are recognised, always in the order given by
//! [`CodeMatcher::ORDERED`]: city markers (`*#XXX`, `*##XXXX`) first, then
//! plain IATA (`#XXX`) and ICAO (`##XXXX`) markers. A city marker contains a
//! plain marker, so resolving it first keeps the plain passes from
//! rewriting half of it.

use std::sync::OnceLock;

use regex::Regex;
use tracing::trace;

use crate::itinerary::prettify::model::{CodeMapping, RenderStyle, Token, TokenKind};

fn city_regex() -> &'static Regex {
    static CITY_RE: OnceLock<Regex> = OnceLock::new();
    CITY_RE.get_or_init(|| Regex::new(r"\*(?:#[A-Z]{3}|##[A-Z]{4})").unwrap())
}

fn iata_regex() -> &'static Regex {
    static IATA_RE: OnceLock<Regex> = OnceLock::new();
    IATA_RE.get_or_init(|| Regex::new(r"#[A-Z]{3}").unwrap())
}

fn icao_regex() -> &'static Regex {
    static ICAO_RE: OnceLock<Regex> = OnceLock::new();
    ICAO_RE.get_or_init(|| Regex::new(r"##[A-Z]{4}").unwrap())
}

/// One step of the code substitution pass.
#[derive(Debug, Clone, Copy)]
pub struct CodeMatcher {
    kind: TokenKind,
    regex: fn() -> &'static Regex,
}

impl CodeMatcher {
    pub const CITY: CodeMatcher = CodeMatcher {
        kind: TokenKind::City,
        regex: city_regex,
    };
    pub const IATA: CodeMatcher = CodeMatcher {
        kind: TokenKind::Iata,
        regex: iata_regex,
    };
    pub const ICAO: CodeMatcher = CodeMatcher {
        kind: TokenKind::Icao,
        regex: icao_regex,
    };

    /// Matchers in the order they must run over a line.
    pub const ORDERED: [CodeMatcher; 3] = [Self::CITY, Self::IATA, Self::ICAO];

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Finds every whole marker of this kind in `line`.
    ///
    /// A plain marker directly after `#` or `*` is part of a longer marker,
    /// and no marker may run into a further uppercase letter.
    pub fn find<'a>(&self, line: &'a str) -> Vec<Token<'a>> {
        let bytes = line.as_bytes();
        (self.regex)()
            .find_iter(line)
            .filter(|found| {
                let before = found.start().checked_sub(1).map(|idx| bytes[idx]);
                let after = bytes.get(found.end()).copied();
                let nested = self.kind != TokenKind::City && matches!(before, Some(b'#' | b'*'));
                let runs_on = after.is_some_and(|byte| byte.is_ascii_uppercase());
                !nested && !runs_on
            })
            .map(|found| Token {
                kind: self.kind,
                raw: found.as_str(),
                payload: found.as_str().trim_start_matches(['*', '#']),
                span: found.range(),
            })
            .collect()
    }

    /// Display name for a marker of this kind, if the lookup knows it.
    pub fn resolve<'m>(&self, mapping: &'m CodeMapping, raw: &str) -> Option<&'m str> {
        match self.kind {
            TokenKind::City => mapping.city(raw),
            TokenKind::Iata | TokenKind::Icao => mapping.airport(raw),
            TokenKind::Date | TokenKind::Time12 | TokenKind::Time24 => None,
        }
    }

    /// Replaces every resolvable marker of this kind in `line`.
    ///
    /// Unknown codes stay in the text as written. Returns the new line and
    /// the number of markers replaced.
    pub fn substitute(
        &self,
        line: &str,
        mapping: &CodeMapping,
        style: &RenderStyle,
    ) -> (String, usize) {
        let mut output = String::with_capacity(line.len());
        let mut cursor = 0;
        let mut replaced = 0;

        for token in self.find(line) {
            let Some(name) = self.resolve(mapping, token.raw) else {
                trace!(code = token.raw, "code not in lookup");
                continue;
            };
            output.push_str(&line[cursor..token.span.start]);
            output.push_str(&style.paint(name));
            cursor = token.span.end;
            replaced += 1;
        }
        output.push_str(&line[cursor..]);

        (output, replaced)
    }
}

/// Runs every code matcher over `line` in precedence order.
pub fn substitute_codes(
    line: &str,
    mapping: &CodeMapping,
    style: &RenderStyle,
) -> (String, usize) {
    CodeMatcher::ORDERED
        .iter()
        .fold((line.to_string(), 0), |(text, total), matcher| {
            let (next, replaced) = matcher.substitute(&text, mapping, style);
            (next, total + replaced)
        })
}
