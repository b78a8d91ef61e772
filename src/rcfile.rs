use crate::terminal::execute_source;
use kern::{Config, Session};
use std::fs;

/// Run the prelude file (~/.kernrc by default) if it exists.
///
/// Faults in the prelude are printed as warnings; the REPL still starts.
pub(crate) fn load_prelude(session: &mut Session, config: &Config) {
    let path = match &config.prelude {
        Some(p) => p,
        None => return,
    };

    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return, // Silently skip if not present
    };

    if execute_source(session, &content, false) {
        eprintln!("Warning: {} did not load cleanly", path.display());
    }
}
