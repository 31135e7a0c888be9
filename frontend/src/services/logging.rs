use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" | "trace" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    fn as_u8(self) -> u8 {
        self as u8
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Debug,
            1 => LogLevel::Info,
            2 => LogLevel::Warn,
            _ => LogLevel::Error,
        }
    }
}

static MIN_LEVEL: AtomicU8 = AtomicU8::new(1);

/// Console logger tagged with the emitting component.
pub struct Logger;

impl Logger {
    pub fn init(level: LogLevel) {
        MIN_LEVEL.store(level.as_u8(), Ordering::Relaxed);
    }

    pub fn enabled(level: LogLevel) -> bool {
        level >= LogLevel::from_u8(MIN_LEVEL.load(Ordering::Relaxed))
    }

    pub fn debug_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Debug, component, message);
    }

    pub fn info_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Info, component, message);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Warn, component, message);
    }

    pub fn error_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Error, component, message);
    }

    fn log(level: LogLevel, component: &str, message: &str) {
        if !Self::enabled(level) {
            return;
        }
        let line = format_line(component, message);
        Self::write(level, line);
    }

    #[cfg(target_arch = "wasm32")]
    fn write(level: LogLevel, line: String) {
        match level {
            LogLevel::Debug => gloo::console::debug!(line),
            LogLevel::Info => gloo::console::info!(line),
            LogLevel::Warn => gloo::console::warn!(line),
            LogLevel::Error => gloo::console::error!(line),
        }
    }

    // Native unit tests have no browser console.
    #[cfg(not(target_arch = "wasm32"))]
    fn write(level: LogLevel, line: String) {
        eprintln!("{level:?} {line}");
    }
}

fn format_line(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_levels() {
        assert_eq!(LogLevel::parse("Warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse(" error "), Some(LogLevel::Error));
        assert_eq!(LogLevel::parse("verbose"), None);
    }

    #[test]
    fn test_level_filter() {
        Logger::init(LogLevel::Warn);
        assert!(!Logger::enabled(LogLevel::Info));
        assert!(Logger::enabled(LogLevel::Warn));
        assert!(Logger::enabled(LogLevel::Error));
        Logger::init(LogLevel::Info);
        assert!(Logger::enabled(LogLevel::Info));
    }

    #[test]
    fn test_format_line() {
        assert_eq!(format_line("api", "GET clients"), "[api] GET clients");
    }
}
