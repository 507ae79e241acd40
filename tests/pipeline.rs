use std::fs;
use std::io::ErrorKind;

use itinerary_prettifier::assemble::{
    collapse_blank_lines, normalize_escapes, prettify_document, prettify_text,
};
use itinerary_prettifier::io::document::strip_color;
use itinerary_prettifier::io::lookup::{load_lookup, parse_lookup};
use itinerary_prettifier::model::{Highlight, RESET, RenderStyle};
use itinerary_prettifier::prompt::ask_for_color;
use tempfile::tempdir;

const GREEN: &str = "\u{1b}[32m";

const LOOKUP: &str = "\
name,iso_country,municipality,icao_code,iata_code,coordinates
John F Kennedy International Airport,US,New York,KJFK,JFK,\"-73.7789, 40.6398\"
Heathrow Airport,GB,London,EGLL,LHR,\"-0.4614, 51.4775\"
";

fn style() -> RenderStyle {
    RenderStyle::new(Highlight::Green)
}

#[test]
fn escapes_become_line_breaks() {
    assert_eq!(normalize_escapes(r"a\vb\fc\rd"), "a\nb\nc\nd");
    assert_eq!(normalize_escapes("no escapes"), "no escapes");
}

#[test]
fn blank_runs_collapse_to_one_line() {
    let lines = ["  first  ", "", "   ", "\t", "second", "", ""];
    let collapsed = collapse_blank_lines(&lines);

    assert_eq!(collapsed, vec!["first", "", "second", ""]);
    assert_eq!(collapse_blank_lines(&collapsed), collapsed);
}

#[test]
fn document_text_is_prettified_line_by_line() {
    let mapping = parse_lookup(LOOKUP.as_bytes()).expect("lookup parsed");
    let text = r"Flight to *#LHR from #JFK\v\v\vDate: D(2024-03-05)
Departs T12(2024-03-05T14:30Z)";

    let (lines, report) = prettify_text(text, &mapping, &style());

    assert_eq!(
        lines,
        vec![
            format!(
                "Flight to {GREEN}London{RESET} from \
                 {GREEN}John F Kennedy International Airport{RESET}"
            ),
            String::new(),
            "Date: 05 Mar 2024".to_string(),
            "Departs 02:30PM (+00:00)".to_string(),
        ]
    );
    assert_eq!(report.codes_resolved, 2);
    assert_eq!(report.markers_formatted, 2);
    assert_eq!(report.lines_written, 4);
    assert!(report.diagnostics.is_empty());
}

#[test]
fn bad_marker_does_not_stop_the_document() {
    let mapping = parse_lookup(LOOKUP.as_bytes()).expect("lookup parsed");
    let text = "Leave D(2024-13-45)\nArrive #LHR at T24(2024-03-05T18:00-01:00)";

    let (lines, report) = prettify_text(text, &mapping, &style());

    assert_eq!(lines[0], "Leave D(2024-13-45)");
    let arrival = format!("Arrive {GREEN}Heathrow Airport{RESET} at 18:00 (-01:00) ");
    assert!(lines[1].starts_with(&arrival));
    assert!(lines[1].contains("1 hour behind"));
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].line, 1);
    assert_eq!(report.diagnostics[0].marker, "D(2024-13-45)");
}

#[test]
fn color_directives_are_stripped() {
    let line = format!("{GREEN}London{RESET} \u{1b}[1mbold\u{1b}[0m");

    assert_eq!(strip_color(&line), "London bold");
}

#[test]
fn document_is_written_plain_and_echoed_in_color() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("input.txt");
    let output = temp_dir.path().join("output.txt");
    let lookup = temp_dir.path().join("airport-lookup.csv");
    fs::write(
        &input,
        "  Your flight from *##KJFK  \n\n\n\nLands at ##EGLL on D(2024-03-06)\n",
    )
    .expect("input written");
    fs::write(&lookup, LOOKUP).expect("lookup written");

    let mapping = load_lookup(&lookup).expect("lookup loaded");
    let mut console = Vec::new();
    let report = prettify_document(&input, &output, &mapping, &style(), &mut console)
        .expect("document prettified");

    let written = fs::read_to_string(&output).expect("output read");
    assert_eq!(
        written.lines().collect::<Vec<_>>(),
        vec![
            "Your flight from New York",
            "",
            "Lands at Heathrow Airport on 06 Mar 2024",
        ]
    );
    assert!(!written.contains('\u{1b}'));

    let echoed = String::from_utf8(console).expect("console output is UTF-8");
    assert!(echoed.contains(&format!("{GREEN}New York{RESET}")));
    assert_eq!(echoed.lines().count(), 3);
    assert_eq!(report.lines_written, 3);
}

#[test]
fn prompt_retries_until_a_valid_choice() {
    let mut input = "purple\n9\n0\n2\n".as_bytes();
    let mut output = Vec::new();

    let highlight = ask_for_color(&mut input, &mut output).expect("color chosen");

    assert_eq!(highlight, Highlight::Green);
    let shown = String::from_utf8(output).expect("prompt output is UTF-8");
    assert_eq!(shown.matches("Invalid input.").count(), 1);
    assert_eq!(shown.matches("Invalid choice.").count(), 2);
    assert!(shown.contains("5. Purple"));
    assert!(shown.contains(&format!("{GREEN}You chose this color.{RESET}")));
}

#[test]
fn prompt_gives_up_at_end_of_input() {
    let mut input = "7\n".as_bytes();
    let mut output = Vec::new();

    let error = ask_for_color(&mut input, &mut output).expect_err("no color chosen");

    assert_eq!(error.kind(), ErrorKind::UnexpectedEof);
}
