//! Logging setup and the report channel.
//!
//! Handlers log through `tracing`; the subscriber serializes to a file
//! so the renderer thread never blocks on the terminal it owns.

use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::error::{GguiError, Result};

/// Install a file-writing subscriber. Call once, before the runtime
/// starts; a second call reports an error without side effects.
pub fn init_file(path: impl AsRef<Path>) -> Result<()> {
    let file = std::fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .try_init()
        .map_err(|e| GguiError::Internal(format!("logger already installed: {e}")))
}

/// Post a message to the log.
pub fn report(message: &str) {
    tracing::info!(target: "ggui", "{message}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_writes_reports_to_file() {
        let dir = match tempfile::tempdir() {
            Ok(d) => d,
            Err(_) => return,
        };
        let path = dir.path().join("ggui.log");
        // The global subscriber may already be installed by another
        // test; only assert file content when this init won.
        if init_file(&path).is_ok() {
            report("hello from the renderer");
            let contents = std::fs::read_to_string(&path).unwrap_or_default();
            assert!(contents.contains("hello from the renderer"));
        }
    }
}
