//! Logging bootstrap for plugins.
//!
//! Hosts rarely give plugins a console, so nothing is installed until the
//! host sends `INITIALISE`. The filter comes from `FFGL_LOG` using the usual
//! `tracing_subscriber::EnvFilter` syntax, e.g. `FFGL_LOG=sketchbook_reveal=trace`.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "FFGL_LOG";
pub const DEFAULT_FILTER: &str = "warn";

static INIT: Once = Once::new();

fn filter_from_env() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a stderr `fmt` subscriber once per process.
///
/// Does nothing if the host (or another plugin in the same process) already
/// set a global subscriber.
pub fn init_default_subscriber() {
    INIT.call_once(|| {
        let installed = tracing_subscriber::fmt()
            .with_env_filter(filter_from_env())
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_target(true)
            .try_init()
            .is_ok();

        if installed {
            tracing::debug!("logging to stderr, filter from {LOG_ENV}");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init_default_subscriber();
        init_default_subscriber();
        assert!(INIT.is_completed());
    }
}
