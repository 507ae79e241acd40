use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::itinerary::prettify::model::{Highlight, RESET};

/// Asks for a display colour until a valid menu number is entered.
///
/// Reaching end of input without a valid answer is reported as
/// [`io::ErrorKind::UnexpectedEof`].
pub fn ask_for_color<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<Highlight> {
    let limit = Highlight::ALL.len();
    let mut answer = String::new();

    loop {
        writeln!(output, "\nPlease choose your preferred color by number: \n")?;
        for (idx, highlight) in Highlight::ALL.iter().enumerate() {
            writeln!(output, "{}. {highlight}", idx + 1)?;
        }
        writeln!(output)?;
        output.flush()?;

        answer.clear();
        if input.read_line(&mut answer)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "no color chosen before end of input",
            ));
        }

        let Ok(number) = answer.trim().parse::<usize>() else {
            writeln!(output, "Invalid input. Please enter a number from 1 to {limit}.")?;
            continue;
        };
        let Some(highlight) = Highlight::from_menu_number(number) else {
            writeln!(output, "Invalid choice. Please choose a number from 1 to {limit}.")?;
            continue;
        };

        debug!(%highlight, "color chosen");
        writeln!(output, "{}You chose this color.{RESET}", highlight.ansi())?;
        return Ok(highlight);
    }
}
