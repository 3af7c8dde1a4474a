use anyhow::Result;
use colored::*;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use crate::config::VnshConfig;
use crate::handlers::Session;

pub fn handle_repl(config: &VnshConfig, color: bool) -> Result<()> {
    let mut session = Session::new(config, color)?;
    let mut rl = DefaultEditor::new()?;

    eprintln!(
        "{} {} {}",
        "vnsh".bold(),
        env!("CARGO_PKG_VERSION").dimmed(),
        "(type 'exit' to leave)".dimmed()
    );

    loop {
        match rl.readline(&config.console.prompt) {
            Ok(line) => {
                if is_exit(&line) {
                    break;
                }
                // Blank lines still go to the console so they land in its history.
                if !line.trim().is_empty() {
                    rl.add_history_entry(line.as_str())?;
                }
                session.execute(&line);
            }
            // Ctrl-C drops the current line only.
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                session.close(config)?;
                return Err(err.into());
            }
        }
    }

    session.close(config)
}

fn is_exit(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit")
}
