use std::io::Write;
use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::itinerary::prettify::codes::substitute_codes;
use crate::itinerary::prettify::datetime::substitute_datetimes;
use crate::itinerary::prettify::error::Result;
use crate::itinerary::prettify::io::document;
use crate::itinerary::prettify::model::{CodeMapping, Diagnostic, PrettifyReport, RenderStyle};

/// Literal two-character escapes that stand for a line break in itineraries.
const LINE_BREAK_ESCAPES: [&str; 3] = ["\\v", "\\f", "\\r"];

/// Turns the literal `\v`, `\f` and `\r` escapes into real line breaks.
pub fn normalize_escapes(line: &str) -> String {
    LINE_BREAK_ESCAPES
        .iter()
        .fold(line.to_string(), |text, escape| text.replace(*escape, "\n"))
}

/// Trims every line and folds each run of blank lines into a single one.
pub fn collapse_blank_lines<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut collapsed = Vec::with_capacity(lines.len());
    let mut previous_blank = false;

    for line in lines {
        let line = line.as_ref().trim();
        if !line.is_empty() {
            collapsed.push(line.to_string());
            previous_blank = false;
        } else if !previous_blank {
            collapsed.push(String::new());
            previous_blank = true;
        }
    }

    collapsed
}

/// Runs the code and date/time passes over a whole document held in memory.
///
/// Returns the collapsed, colour-bearing lines and a report of what was
/// substituted. Date/time markers that fail to parse are kept verbatim and
/// listed in the report's diagnostics.
pub fn prettify_text(
    text: &str,
    mapping: &CodeMapping,
    style: &RenderStyle,
) -> (Vec<String>, PrettifyReport) {
    let mut report = PrettifyReport::default();
    let mut rendered = Vec::new();

    let physical_lines = text
        .lines()
        .map(normalize_escapes)
        .flat_map(|line| line.split('\n').map(str::to_string).collect::<Vec<_>>());

    for (idx, line) in physical_lines.enumerate() {
        let (line, resolved) = substitute_codes(&line, mapping, style);
        let pass = substitute_datetimes(&line, style);

        report.codes_resolved += resolved;
        report.markers_formatted += pass.formatted;
        for (marker, error) in pass.failures {
            warn!(line = idx + 1, %marker, %error, "date/time marker left unchanged");
            report.diagnostics.push(Diagnostic {
                line: idx + 1,
                marker,
                error,
            });
        }

        rendered.push(pass.text);
    }

    let collapsed = collapse_blank_lines(&rendered);
    debug!(
        raw_lines = rendered.len(),
        collapsed_lines = collapsed.len(),
        "blank lines collapsed"
    );
    report.lines_written = collapsed.len();
    (collapsed, report)
}

/// Prettifies the itinerary at `input`, echoing coloured lines to `console`
/// and writing the plain version to `output`.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn prettify_document<W: Write>(
    input: &Path,
    output: &Path,
    mapping: &CodeMapping,
    style: &RenderStyle,
    console: &mut W,
) -> Result<PrettifyReport> {
    let text = document::read_document(input)?;
    let (lines, report) = prettify_text(&text, mapping, style);

    for line in &lines {
        writeln!(console, "{line}")?;
    }
    console.flush()?;
    document::write_document(output, &lines)?;

    info!(
        lines = report.lines_written,
        codes = report.codes_resolved,
        markers = report.markers_formatted,
        failures = report.diagnostics.len(),
        "itinerary prettified"
    );
    Ok(report)
}
