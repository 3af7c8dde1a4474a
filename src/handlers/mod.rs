pub mod list;
pub mod repl;
pub mod run;

use anyhow::Result;
use colored::*;
use log::debug;
use vnsh::engine::{Console, default_console};
use crate::config::{TranscriptStrategy, VnshConfig};
use crate::host::TerminalHost;
use crate::logger::write_transcript;

/// A console wired to the terminal, shared by `run` and the REPL.
pub struct Session {
    console: Console,
    host: TerminalHost,
}

impl Session {
    pub fn new(config: &VnshConfig, color: bool) -> Result<Self> {
        let console = default_console(config.console.options())?;
        let mut host = TerminalHost::new(color);
        if config.transcript.strategy != TranscriptStrategy::None {
            host = host.with_transcript();
        }
        debug!("Session started with {} command(s)", console.registry().len());
        Ok(Self { console, host })
    }

    /// Runs one line; `false` when it failed.
    pub fn execute(&mut self, line: &str) -> bool {
        self.host.begin_line(line);
        let ok = self.console.execute(line, &mut self.host).is_ok();
        self.host.end_line(!ok);
        ok
    }

    /// Ends the session, saving the transcript when configured.
    pub fn close(self, config: &VnshConfig) -> Result<()> {
        if let Some(transcript) = self.host.transcript() {
            if let Some(path) = write_transcript(transcript, &config.transcript)? {
                eprintln!("{} Transcript saved to: {}", "📝".cyan(), path.display());
            }
        }
        Ok(())
    }
}
