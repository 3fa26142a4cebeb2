/*
 * Logging Module
 *
 * Sets up env_logger behind the `log` facade. RUST_LOG always wins over
 * the default level chosen here.
 */

use env_logger::{Builder, Env};
use log::{debug, LevelFilter};

// Debug level when verbose, info otherwise
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());

    // `try_init` only fails when a logger is already installed (tests, repeated init)
    if let Err(err) = Builder::from_env(env).format_timestamp_millis().try_init() {
        debug!("keeping the existing logger: {}", err);
    }
}
