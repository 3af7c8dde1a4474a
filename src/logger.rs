use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use regex::Regex;
use std::fs;
use std::path::PathBuf;
use crate::config::{TranscriptConfig, TranscriptStrategy};

pub fn strip_ansi(content: &str) -> Result<String> {
    let re = Regex::new(r"\x1b\[[0-9;]*m").context("Invalid ANSI pattern")?;
    Ok(re.replace_all(content, "").to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    pub input: String,
    pub output: Vec<String>,
    pub failed: bool,
}

/// Every line of one session together with what it printed.
#[derive(Debug, Clone)]
pub struct Transcript {
    started: DateTime<Local>,
    entries: Vec<TranscriptEntry>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            started: Local::now(),
            entries: Vec::new(),
        }
    }

    pub fn begin(&mut self, input: &str) {
        self.entries.push(TranscriptEntry {
            input: input.to_string(),
            output: Vec::new(),
            failed: false,
        });
    }

    /// Appends to the current entry. Output before the first `begin` is dropped.
    pub fn record(&mut self, line: &str) {
        if let Some(entry) = self.entries.last_mut() {
            entry.output.push(line.to_string());
        }
    }

    pub fn finish(&mut self, failed: bool) {
        if let Some(entry) = self.entries.last_mut() {
            entry.failed = failed;
        }
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn failures(&self) -> usize {
        self.entries.iter().filter(|e| e.failed).count()
    }
}

/// Writes the transcript as `<dir>/<date>/<time>_session.log` when the
/// strategy asks for it; returns where it went.
pub fn write_transcript(transcript: &Transcript, config: &TranscriptConfig) -> Result<Option<PathBuf>> {
    match config.strategy {
        TranscriptStrategy::None => return Ok(None),
        TranscriptStrategy::ErrorOnly => {
            if transcript.failures() == 0 {
                return Ok(None);
            }
        }
        TranscriptStrategy::Always => {}
    }

    let now = Local::now();
    let date_str = now.format("%Y-%m-%d").to_string();
    let time_str = now.format("%H%M%S").to_string();

    let log_dir = config.dir.join(date_str);
    fs::create_dir_all(&log_dir).context("Failed to create transcript directory")?;
    let log_path = log_dir.join(format!("{}_session.log", time_str));

    let mut file_content = String::new();

    // Header
    file_content.push_str("=== VNSH SESSION TRANSCRIPT ===\n");
    file_content.push_str(&format!("Started: {}\n", transcript.started.to_rfc3339()));
    file_content.push_str(&format!("Lines: {}\n", transcript.entries().len()));
    file_content.push_str("===============================\n\n");

    // Body
    let mut body = String::new();
    for entry in transcript.entries() {
        body.push_str(&format!("> {}\n", entry.input));
        for line in &entry.output {
            body.push_str(line);
            body.push('\n');
        }
    }
    let body = if config.plain { strip_ansi(&body)? } else { body };
    file_content.push_str(&body);

    // Footer
    let duration = now.signed_duration_since(transcript.started);
    file_content.push_str("\n===============================\n");
    file_content.push_str(&format!("Failures: {}\n", transcript.failures()));
    file_content.push_str(&format!("Duration: {} ms\n", duration.num_milliseconds()));
    file_content.push_str(&format!("End Time: {}\n", now.to_rfc3339()));
    file_content.push_str("===============================\n");

    fs::write(&log_path, file_content).context("Failed to write transcript")?;

    Ok(Some(log_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(strategy: TranscriptStrategy, dir: PathBuf) -> TranscriptConfig {
        TranscriptConfig {
            strategy,
            dir,
            plain: true,
        }
    }

    fn session(failed: bool) -> Transcript {
        let mut transcript = Transcript::new();
        transcript.begin("Add-Number 2 5");
        transcript.record("\x1b[94m7\x1b[0m");
        transcript.finish(false);
        transcript.begin("Add-Number 2");
        transcript.record("[ERROR] missing B");
        transcript.finish(failed);
        transcript
    }

    #[test]
    fn test_strip_ansi() {
        assert_eq!(strip_ansi("\x1b[1;31mred\x1b[0m text").unwrap(), "red text");
    }

    #[test]
    fn test_record_before_begin_is_dropped() {
        let mut transcript = Transcript::new();
        transcript.record("stray");
        assert!(transcript.entries().is_empty());
    }

    #[test]
    fn test_always_writes_plain_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_transcript(&session(true), &config(TranscriptStrategy::Always, dir.path().to_path_buf()))
            .unwrap()
            .unwrap();

        assert!(path.starts_with(dir.path()));
        assert!(path.to_string_lossy().ends_with("_session.log"));
        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("> Add-Number 2 5\n7\n"));
        assert!(content.contains("Lines: 2"));
        assert!(content.contains("Failures: 1"));
        assert!(!content.contains('\x1b'));
    }

    #[test]
    fn test_error_only_skips_clean_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(TranscriptStrategy::ErrorOnly, dir.path().to_path_buf());
        assert_eq!(write_transcript(&session(false), &cfg).unwrap(), None);
        assert!(write_transcript(&session(true), &cfg).unwrap().is_some());
    }

    #[test]
    fn test_none_never_writes() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(TranscriptStrategy::None, dir.path().join("unused"));
        assert_eq!(write_transcript(&session(true), &cfg).unwrap(), None);
        assert!(!dir.path().join("unused").exists());
    }
}
