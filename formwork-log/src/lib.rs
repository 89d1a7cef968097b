//! Formwork Logging
//!
//! Environment-controlled logging shared by every Formwork crate.
//!
//! ```rust
//! use formwork_log::{debug, info, warn};
//!
//! debug!("validating {} fields", 3);
//! info!(target: "formwork::validation", "schema registered: {}", "signup");
//! warn!("regex format declared without a pattern");
//! ```
//!
//! # Environment Variables
//!
//! - `FORMWORK_DEBUG=1` - lowers the default level to debug
//! - `FORMWORK_LOG_LEVEL=trace|debug|info|warn|error|off`
//! - `FORMWORK_LOG_FORMAT=json|text|facade` - `json` needs the `json` feature, else text
//! - `FORMWORK_LOG_COLOR=1|0` - colored level names in `text` (`color` feature)
//! - `FORMWORK_LOG_TIMESTAMPS=1|0`
//!
//! With `facade`, records go to the [`log`] crate, so an application that
//! already installed a `log` backend keeps a single sink.

use once_cell::sync::Lazy;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// Severity of a record, ordered from most to least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    /// Disables output; never attached to a record
    Off = 5,
}

impl Level {
    const ALL: [Level; 6] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Off,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Off => "OFF",
        }
    }

    /// Case-insensitive; `warning` and `none` are accepted as aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("warning") {
            return Some(Level::Warn);
        }
        if name.eq_ignore_ascii_case("none") {
            return Some(Level::Off);
        }
        Self::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(name))
    }

    fn facade(self) -> Option<log::Level> {
        Some(match self {
            Level::Trace => log::Level::Trace,
            Level::Debug => log::Level::Debug,
            Level::Info => log::Level::Info,
            Level::Warn => log::Level::Warn,
            Level::Error => log::Level::Error,
            Level::Off => return None,
        })
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Where and how records are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    /// One JSON object per line on stderr
    Json,
    /// `timestamp LEVEL target: message` on stderr
    Text,
    /// The `log` crate facade
    Facade,
}

impl Output {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Output::Json),
            "text" | "pretty" => Some(Output::Text),
            "facade" | "log" => Some(Output::Facade),
            _ => None,
        }
    }
}

/// Settings read once from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: Level,
    pub output: Output,
    pub color: bool,
    pub timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            output: Output::Json,
            color: false,
            timestamps: true,
        }
    }
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any `FORMWORK_*` key lookup.
    ///
    /// Values that do not parse keep their default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str| {
            lookup(key).map(|v| {
                matches!(
                    v.trim().to_ascii_lowercase().as_str(),
                    "1" | "true" | "yes" | "on"
                )
            })
        };
        let defaults = Self::default();

        let debug = flag("FORMWORK_DEBUG").unwrap_or(false);
        let level = lookup("FORMWORK_LOG_LEVEL")
            .and_then(|v| Level::from_name(&v))
            .unwrap_or(if debug { Level::Debug } else { defaults.level });

        Self {
            level,
            output: lookup("FORMWORK_LOG_FORMAT")
                .and_then(|v| Output::from_name(&v))
                .unwrap_or(defaults.output),
            color: flag("FORMWORK_LOG_COLOR").unwrap_or(defaults.color),
            timestamps: flag("FORMWORK_LOG_TIMESTAMPS").unwrap_or(defaults.timestamps),
        }
    }
}

/// A single log line before it is written.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    pub level: Level,
    pub target: &'a str,
    pub message: &'a str,
}

impl Record<'_> {
    /// Line as written for `output`; `None` for the facade.
    ///
    /// Without the `json` feature, `Output::Json` is written as text.
    pub fn render(&self, output: Output, config: &LogConfig) -> Option<String> {
        match output {
            #[cfg(feature = "json")]
            Output::Json => Some(self.render_json(config)),
            #[cfg(not(feature = "json"))]
            Output::Json => Some(self.render_text(config)),
            Output::Text => Some(self.render_text(config)),
            Output::Facade => None,
        }
    }

    #[cfg(feature = "json")]
    fn render_json(&self, config: &LogConfig) -> String {
        let mut line = serde_json::Map::new();
        if config.timestamps {
            line.insert("timestamp".into(), chrono::Utc::now().to_rfc3339().into());
        }
        line.insert("level".into(), self.level.name().into());
        line.insert("target".into(), self.target.into());
        line.insert("message".into(), self.message.into());
        serde_json::Value::Object(line).to_string()
    }

    fn render_text(&self, config: &LogConfig) -> String {
        let mut line = String::new();
        if config.timestamps {
            line.push_str(&chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f ").to_string());
        }
        line.push_str(&level_label(self.level, config.color));
        line.push(' ');
        if !self.target.is_empty() {
            line.push_str(self.target);
            line.push_str(": ");
        }
        line.push_str(self.message);
        line
    }
}

#[cfg(feature = "color")]
fn level_label(level: Level, color: bool) -> String {
    use colored::Colorize;

    let name = format!("{:<5}", level);
    if !color {
        return name;
    }
    match level {
        Level::Trace => name.dimmed(),
        Level::Debug => name.cyan(),
        Level::Info => name.green(),
        Level::Warn => name.yellow(),
        Level::Error | Level::Off => name.red().bold(),
    }
    .to_string()
}

#[cfg(not(feature = "color"))]
fn level_label(level: Level, _color: bool) -> String {
    format!("{:<5}", level)
}

static CONFIG: Lazy<LogConfig> = Lazy::new(|| {
    let config = LogConfig::from_env();
    THRESHOLD.store(config.level as u8, Ordering::Relaxed);
    config
});

static THRESHOLD: AtomicU8 = AtomicU8::new(Level::Info as u8);

/// Configuration read at first use.
pub fn config() -> &'static LogConfig {
    &CONFIG
}

/// Minimum level that is currently written.
pub fn threshold() -> Level {
    Lazy::force(&CONFIG);
    let raw = THRESHOLD.load(Ordering::Relaxed);
    Level::ALL
        .into_iter()
        .find(|level| *level as u8 == raw)
        .unwrap_or(Level::Off)
}

/// Override the level read from the environment.
pub fn set_threshold(level: Level) {
    Lazy::force(&CONFIG);
    THRESHOLD.store(level as u8, Ordering::Relaxed);
}

#[inline]
pub fn enabled(level: Level) -> bool {
    level != Level::Off && level >= threshold()
}

#[doc(hidden)]
pub fn emit(level: Level, target: &str, args: fmt::Arguments<'_>) {
    if !enabled(level) {
        return;
    }

    let config = config();
    let message = args.to_string();
    let record = Record {
        level,
        target,
        message: &message,
    };

    match record.render(config.output, config) {
        Some(line) => eprintln!("{}", line),
        None => {
            if let Some(level) = level.facade() {
                log::log!(target: target, level, "{}", message);
            }
        }
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __emit {
    ($level:expr, target: $target:expr, $($arg:tt)+) => {
        if $crate::enabled($level) {
            $crate::emit($level, $target, format_args!($($arg)+));
        }
    };
    ($level:expr, $($arg:tt)+) => {
        $crate::__emit!($level, target: module_path!(), $($arg)+)
    };
}

#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => { $crate::__emit!($crate::Level::Trace, $($arg)+) };
}

/// Written when `FORMWORK_DEBUG=1` or `FORMWORK_LOG_LEVEL=debug`.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => { $crate::__emit!($crate::Level::Debug, $($arg)+) };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => { $crate::__emit!($crate::Level::Info, $($arg)+) };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => { $crate::__emit!($crate::Level::Warn, $($arg)+) };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => { $crate::__emit!($crate::Level::Error, $($arg)+) };
}

/// `tracing` subscriber at the configured level; `RUST_LOG` takes priority.
#[cfg(feature = "tracing")]
pub fn subscriber() -> impl tracing::Subscriber + Send + Sync {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let config = config();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.name().to_ascii_lowercase()));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_ansi(config.color))
}
