//! Console logger setup

use std::sync::Once;

/// Logger configuration
#[derive(Debug, Clone, Copy)]
pub struct LoggingConfig {
    pub level: log::Level,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: log::Level::Info,
        }
    }
}

static INIT: Once = Once::new();

/// Routes panics and `log` records to the browser console.
///
/// Idempotent; only the first call takes effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(config.level).is_ok() {
            log::debug!("logging initialized at {}", config.level);
        }
    });
}
