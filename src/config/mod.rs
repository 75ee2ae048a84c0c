//! Configuration for the wallet ledger
//!
//! - data-directory resolution ([`LedgerPaths`])
//! - user settings persistence ([`Settings`])

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::Settings;
