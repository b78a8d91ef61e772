//! Diagnostic tracing for the kern binary.
//!
//! Reads the filter from `KERN_LOG` (same syntax as `RUST_LOG`) and
//! defaults to `warn`. Output goes to stderr so it never mixes with values
//! printed on stdout.
//!
//! # Example
//! ```bash
//! KERN_LOG=kern=debug kern -c '(slurp "notes.txt")'
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub(crate) fn init() {
    let filter = EnvFilter::try_from_env("KERN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
