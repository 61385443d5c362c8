//! Coloured console output.
//!
//! Colours are plain ANSI escapes and are only emitted when the writer was
//! created with colour enabled; see [`colour_enabled`].

use std::io::{self, IsTerminal, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Colour {
    Default,
    Red,
    Green,
    Yellow,
    Cyan,
}

impl Colour {
    fn code(self) -> Option<&'static str> {
        match self {
            Colour::Default => None,
            Colour::Red => Some("31"),
            Colour::Green => Some("32"),
            Colour::Yellow => Some("33"),
            Colour::Cyan => Some("36"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub default: Colour,
    pub success: Colour,
    pub error: Colour,
    pub partial_error: Colour,
    pub emphasis: Colour,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            default: Colour::Default,
            success: Colour::Green,
            error: Colour::Red,
            partial_error: Colour::Yellow,
            emphasis: Colour::Cyan,
        }
    }
}

/// Stdout is a terminal and `NO_COLOR` is unset.
pub fn colour_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal()
}

pub struct ConsoleWriter<W: Write> {
    out: W,
    palette: Palette,
    colour: bool,
}

impl ConsoleWriter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout(), Palette::default(), colour_enabled())
    }
}

impl<W: Write> ConsoleWriter<W> {
    pub fn new(out: W, palette: Palette, colour: bool) -> Self {
        Self {
            out,
            palette,
            colour,
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn line(&mut self, text: &str) -> io::Result<()> {
        self.coloured_line(self.palette.default, text)
    }

    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    pub fn error_line(&mut self, text: &str) -> io::Result<()> {
        self.coloured_line(self.palette.error, text)
    }

    pub fn partial_error_line(&mut self, text: &str) -> io::Result<()> {
        self.coloured_line(self.palette.partial_error, text)
    }

    pub fn success_line(&mut self, text: &str) -> io::Result<()> {
        self.coloured_line(self.palette.success, text)
    }

    pub fn emphasis_line(&mut self, text: &str) -> io::Result<()> {
        self.coloured_line(self.palette.emphasis, text)
    }

    pub fn coloured_line(&mut self, colour: Colour, text: &str) -> io::Result<()> {
        match colour.code().filter(|_| self.colour) {
            Some(code) => writeln!(self.out, "\x1b[{code}m{text}\x1b[0m"),
            None => writeln!(self.out, "{text}"),
        }
    }

    /// `  ERRORS:` followed by one indented line per error; nothing for an empty list.
    pub fn errors<S: AsRef<str>>(&mut self, errors: &[S]) -> io::Result<()> {
        if errors.is_empty() {
            return Ok(());
        }
        self.error_line("  ERRORS:")?;
        for error in errors {
            self.error_line(&format!("    {}", error.as_ref()))?;
        }
        Ok(())
    }
}
