//! Line-oriented prompts that re-ask until the answer is acceptable.

use std::io::{self, BufRead, Write};

use crate::city::City;
use crate::filter::{DayFilter, Filter, MonthFilter};

pub const INVALID_SELECTION: &str = "Sorry, please make sure your selection is valid.";

/// Reads answers from `input` and writes questions to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Gives mutable access to the output stream, for printing between prompts.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Asks `question` until `parse` accepts the trimmed answer.
    ///
    /// # Errors
    ///
    /// I/O failures, and [`io::ErrorKind::UnexpectedEof`] once input is exhausted.
    pub fn ask<T>(&mut self, question: &str, parse: impl Fn(&str) -> Option<T>) -> io::Result<T> {
        loop {
            writeln!(self.output, "\n{question}")?;
            self.output.flush()?;

            let answer = self.read_line()?;
            if let Some(value) = parse(answer.trim()) {
                return Ok(value);
            }
            writeln!(self.output, "{INVALID_SELECTION}")?;
        }
    }

    /// Returns `true` only when the answer is `yes` (any case). Never re-asks.
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        writeln!(self.output, "\n{question}")?;
        self.output.flush()?;
        Ok(self.read_line()?.trim().eq_ignore_ascii_case("yes"))
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line)
    }

    /// Asks for city, month and day in turn.
    pub fn ask_selection(&mut self) -> io::Result<(City, Filter)> {
        let city = self.ask(
            "Which city would you like to select? Chicago, New York City, or Washington?",
            |s| s.parse::<City>().ok(),
        )?;
        let month = self.ask(
            "Which month would you like to select? January to June, or \"all\" if no preference.",
            |s| MonthFilter::parse(s).ok(),
        )?;
        let day = self.ask(
            "Which day would you like to select? Monday to Sunday, or \"all\" if no preference.",
            |s| DayFilter::parse(s).ok(),
        )?;
        Ok((city, Filter::new(month, day)))
    }
}
