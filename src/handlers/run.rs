use anyhow::Result;
use crate::config::VnshConfig;
use crate::handlers::Session;

/// Evaluates `lines` in order within one session. Returns whether every
/// line succeeded; a failing line does not stop the ones after it.
pub fn handle_run(lines: &[String], config: &VnshConfig, color: bool) -> Result<bool> {
    let mut session = Session::new(config, color)?;
    let mut all_ok = true;
    for line in lines {
        all_ok &= session.execute(line);
    }
    session.close(config)?;
    Ok(all_ok)
}
