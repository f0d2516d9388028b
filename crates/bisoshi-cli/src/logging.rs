use crate::args::LogLevel;
use env_logger::{Builder, Env, Target};

/// Log to stderr at `level` unless `RUST_LOG` says otherwise.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(level: LogLevel) {
    let _ = Builder::from_env(Env::default().default_filter_or(level.as_str()))
        .target(Target::Stderr)
        .format_timestamp(None)
        .try_init();
}
