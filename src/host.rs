use colored::*;
use vnsh::engine::{ColorKind, Host};
use crate::logger::Transcript;

/// Host backed by the process's stdout/stderr.
pub struct TerminalHost {
    color: bool,
    transcript: Option<Transcript>,
}

impl TerminalHost {
    pub fn new(color: bool) -> Self {
        Self {
            color,
            transcript: None,
        }
    }

    /// Mirrors everything written from now on into a transcript.
    pub fn with_transcript(mut self) -> Self {
        self.transcript = Some(Transcript::new());
        self
    }

    pub fn begin_line(&mut self, input: &str) {
        if let Some(t) = &mut self.transcript {
            t.begin(input);
        }
    }

    pub fn end_line(&mut self, failed: bool) {
        if let Some(t) = &mut self.transcript {
            t.finish(failed);
        }
    }

    pub fn transcript(&self) -> Option<&Transcript> {
        self.transcript.as_ref()
    }

    fn mirror(&mut self, line: &str) {
        if let Some(t) = &mut self.transcript {
            t.record(line);
        }
    }
}

impl Host for TerminalHost {
    fn write(&mut self, text: &str) {
        println!("{}", text);
        self.mirror(text);
    }

    fn write_error(&mut self, text: &str) {
        let line = format!("{} {}", self.format_color("[ERROR]", ColorKind::Error), self.format_color(text, ColorKind::Error));
        eprintln!("{}", line);
        self.mirror(&line);
    }

    fn write_debug(&mut self, text: &str) {
        let line = format!("{} {}", self.format_color("[DEBUG]", ColorKind::Debug), self.format_color(text, ColorKind::Debug));
        println!("{}", line);
        self.mirror(&line);
    }

    fn supports_color(&self) -> bool {
        self.color
    }

    fn format_color(&self, text: &str, color: ColorKind) -> String {
        if !self.color {
            return text.to_string();
        }
        let styled = match color {
            ColorKind::Default => text.white(),
            ColorKind::Accented => text.yellow(),
            ColorKind::Debug => text.bright_black(),
            ColorKind::Error => text.red(),
            ColorKind::Text => text.bright_red(),
            ColorKind::Number => text.bright_blue(),
        };
        styled.to_string()
    }
}
