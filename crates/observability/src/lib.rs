//! Process-wide tracing/logging setup shared by the binaries.

pub mod tracing;

pub use self::tracing::LogFormat;

/// Initialize tracing with settings taken from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(LogFormat::from_env());
}
