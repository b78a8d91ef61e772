//! Effect bridge: the one way evaluation reaches the outside world
//!
//! Primitives describe what they want as an [`Effect`] and hand it to the
//! bridge held by the context. The bridge blocks until the action finishes
//! and answers with a Value or a Fault. It never retries, never normalizes
//! paths and holds no handle past the call that opened it.
//!
//! `SystemBridge` talks to the real filesystem and uses ureq (blocking)
//! for remote fetches. Hosts and tests can supply their own bridge.

use super::Fault;
use crate::ast::Value;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WriteMode {
    Truncate,
    Append,
}

/// A blocking external action
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect<'a> {
    /// Read a whole file as text -> String
    Read { path: &'a str },
    /// Write text to a file -> String (the text written)
    Write {
        path: &'a str,
        content: &'a str,
        mode: WriteMode,
    },
    /// Does the path exist -> Bool
    Probe { path: &'a str },
    /// GET a URL and drain the body -> String
    Fetch { url: &'a str },
}

impl Effect<'_> {
    /// The path or URL the effect acts on
    pub fn resource(&self) -> &str {
        match self {
            Effect::Read { path } | Effect::Write { path, .. } | Effect::Probe { path } => path,
            Effect::Fetch { url } => url,
        }
    }
}

pub trait EffectBridge {
    fn perform(&self, effect: Effect<'_>) -> Result<Value, Fault>;
}

/// Filesystem and network bridge
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBridge;

impl EffectBridge for SystemBridge {
    fn perform(&self, effect: Effect<'_>) -> Result<Value, Fault> {
        debug!(resource = effect.resource(), ?effect, "effect");
        match effect {
            Effect::Read { path } => read_file(path),
            Effect::Write {
                path,
                content,
                mode,
            } => write_file(path, content, mode),
            Effect::Probe { path } => Ok(Value::Bool(Path::new(path).exists())),
            Effect::Fetch { url } => fetch(url),
        }
    }
}

fn read_file(path: &str) -> Result<Value, Fault> {
    std::fs::read_to_string(path)
        .map(Value::String)
        .map_err(|e| Fault::io(format!("cannot read {}: {}", path, e), path))
}

fn write_file(path: &str, content: &str, mode: WriteMode) -> Result<Value, Fault> {
    // Checked before opening: truncation happens at open time. The file can
    // still change between this check and the open.
    if let Ok(meta) = std::fs::metadata(path) {
        if meta.permissions().readonly() {
            return Err(Fault::io(format!("{} is not writable", path), path));
        }
    }

    let mut file = OpenOptions::new()
        .create(true)
        .write(mode == WriteMode::Truncate)
        .truncate(mode == WriteMode::Truncate)
        .append(mode == WriteMode::Append)
        .open(path)
        .map_err(|e| Fault::io(format!("cannot open {} for writing: {}", path, e), path))?;

    file.write_all(content.as_bytes())
        .map_err(|e| Fault::io(format!("cannot write {}: {}", path, e), path))?;
    Ok(Value::string(content))
}

fn fetch(url: &str) -> Result<Value, Fault> {
    let response = match ureq::get(url).call() {
        Ok(resp) => resp,
        // Status is not inspected: an error page is still a body
        Err(ureq::Error::Status(_, resp)) => resp,
        Err(e) => return Err(Fault::io(format!("fetch {} failed: {}", url, e), url)),
    };

    response
        .into_string()
        .map(Value::String)
        .map_err(|e| Fault::io(format!("cannot read body of {}: {}", url, e), url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let path = path.to_str().unwrap();

        let bridge = SystemBridge;
        bridge
            .perform(Effect::Write {
                path,
                content: "one",
                mode: WriteMode::Truncate,
            })
            .unwrap();
        bridge
            .perform(Effect::Write {
                path,
                content: "two",
                mode: WriteMode::Append,
            })
            .unwrap();

        assert_eq!(
            bridge.perform(Effect::Read { path }).unwrap(),
            Value::string("onetwo")
        );
    }

    #[test]
    fn truncate_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "a much longer original").unwrap();
        let path = path.to_str().unwrap();

        SystemBridge
            .perform(Effect::Write {
                path,
                content: "short",
                mode: WriteMode::Truncate,
            })
            .unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "short");
    }

    #[test]
    fn probe_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing");
        assert_eq!(
            SystemBridge
                .perform(Effect::Probe {
                    path: path.to_str().unwrap()
                })
                .unwrap(),
            Value::Bool(false)
        );
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/file.txt");
        let path = path.to_str().unwrap();
        let fault = SystemBridge
            .perform(Effect::Write {
                path,
                content: "x",
                mode: WriteMode::Truncate,
            })
            .unwrap_err();
        assert_eq!(fault.kind(), "IOFailure");
        assert_eq!(fault.resource(), Some(path));
    }

    #[test]
    fn fetch_unreachable_is_io_failure() {
        // Port 9 on localhost is discard; nothing should be listening
        let fault = SystemBridge
            .perform(Effect::Fetch {
                url: "http://127.0.0.1:9/",
            })
            .unwrap_err();
        assert_eq!(fault.kind(), "IOFailure");
        assert_eq!(fault.resource(), Some("http://127.0.0.1:9/"));
    }
}
