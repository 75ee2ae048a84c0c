//! Tracing subscriber set-up for the `wallet` binary
//!
//! `RUST_LOG` wins when set. Otherwise everything logs at `warn` and this
//! crate's level rises with each `-v`.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static TRACING_INIT: Once = Once::new();

const CRATE_TARGET: &str = "wallet_ledger";

/// Install the global subscriber; later calls are ignored
pub fn init(verbosity: u8) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbosity));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .without_time()
            .with_target(false)
            .try_init();
    });
}

fn default_filter(verbosity: u8) -> EnvFilter {
    let filter = EnvFilter::new("warn");
    match format!("{}={}", CRATE_TARGET, max_level(verbosity)).parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

fn max_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_level() {
        assert_eq!(max_level(0), "warn");
        assert_eq!(max_level(1), "info");
        assert_eq!(max_level(2), "debug");
        assert_eq!(max_level(9), "trace");
    }

    #[test]
    fn test_default_filter_raises_crate_level() {
        let filter = default_filter(2).to_string();
        assert!(filter.contains("wallet_ledger=debug"));
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(0);
        init(3);
    }
}
