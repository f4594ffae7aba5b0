//! Line-based prompting over any reader/writer pair.

use std::fmt::Display;
use std::io::{self, BufRead, Stdout, StdinLock, Write};

use color_eyre::eyre::{eyre, Result};

pub struct Console<I, O> {
    input: I,
    output: O,
}

impl Console<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Console::new(io::stdin().lock(), io::stdout())
    }
}

impl<I: BufRead, O: Write> Console<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Console { input, output }
    }

    pub fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Report a rejected entry and carry on.
    pub fn warn(&mut self, error: impl Display) -> Result<()> {
        self.say(format_args!("  ! {}", error))
    }

    /// Ask for one line. A blank answer takes `default`.
    pub fn ask(&mut self, prompt: &str, default: &str) -> Result<String> {
        if default.is_empty() {
            write!(self.output, "{}: ", prompt)?;
        } else {
            write!(self.output, "{} [{}]: ", prompt, default)?;
        }
        Ok(self.read_answer()?.unwrap_or_else(|| default.to_string()))
    }

    /// Yes/no question.
    pub fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        write!(self.output, "{} [{}]: ", prompt, if default { "Y/n" } else { "y/N" })?;
        Ok(match self.read_answer()? {
            Some(answer) => answer.to_ascii_lowercase().starts_with('y'),
            None => default,
        })
    }

    /// Trimmed answer, `None` when blank.
    fn read_answer(&mut self) -> Result<Option<String>> {
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(eyre!("input ended before the estimate was complete"));
        }

        let answer = line.trim();
        Ok((!answer.is_empty()).then(|| answer.to_string()))
    }

    #[cfg(test)]
    pub fn into_output(self) -> O {
        self.output
    }
}
