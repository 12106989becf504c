//! Initializes the process-wide logger. `maskrelay-core` never does this
//! itself; only the binary crate is allowed to touch global logging state.
//! License: Apache-2.0

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes `env_logger`, reading `RUST_LOG` (defaulting to `info`) and
/// optionally overriding it with an explicit level requested via CLI flags.
pub fn init_logger(override_level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.format_timestamp_millis();
    if let Some(level) = override_level {
        builder.filter_level(level);
    }
    builder.init();
}
