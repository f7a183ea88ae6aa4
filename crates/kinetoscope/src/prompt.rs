//! The y/n question asked before exporting.

use std::io::{self, BufRead, Write};
use std::path::Path;

/// Whether an answer means yes: only `y`, ignoring case and surrounding
/// whitespace.
///
/// ```rust
/// use kinetoscope::prompt::is_affirmative;
///
/// assert!(is_affirmative("Y\n"));
/// assert!(!is_affirmative("yes"));
/// ```
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().to_lowercase() == "y"
}

/// Asks whether to save the animation as `file_name` and reads one line.
///
/// The question is written without a trailing newline. End of input counts
/// as no.
///
/// # Errors
///
/// Returns an error if writing the question or reading the answer fails.
pub fn prompt_save<R, W>(file_name: &Path, input: &mut R, output: &mut W) -> io::Result<bool>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    write!(output, "Save animation as {}? (y/n)", file_name.display())?;
    output.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        writeln!(output)?;
        return Ok(false);
    }
    Ok(is_affirmative(&answer))
}
