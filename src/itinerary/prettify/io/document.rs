use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::itinerary::prettify::error::Result;

#[cfg(windows)]
const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
const LINE_ENDING: &str = "\n";

fn color_regex() -> &'static Regex {
    static COLOR_RE: OnceLock<Regex> = OnceLock::new();
    COLOR_RE.get_or_init(|| Regex::new(r"\x1b\[[;\d]*m").unwrap())
}

/// Reads the whole itinerary document into memory.
pub fn read_document(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

/// Removes ANSI colour directives from a rendered line.
pub fn strip_color(line: &str) -> String {
    color_regex().replace_all(line, "").into_owned()
}

/// Writes `lines` to `path` with colour directives stripped, one per record.
pub fn write_document<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for line in lines {
        writer.write_all(strip_color(line.as_ref()).as_bytes())?;
        writer.write_all(LINE_ENDING.as_bytes())?;
    }
    writer.flush()?;
    Ok(())
}
