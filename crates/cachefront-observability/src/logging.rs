//! Decision log entries and the logger.

use std::fmt;

use serde::Serialize;

/// Log level for decision logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debug => write!(f, "DEBUG"),
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
        }
    }
}

/// One structured record of an edge decision.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionEntry {
    /// Log level.
    pub level: LogLevel,
    /// Request path.
    pub path: String,
    /// Routing-table pattern that matched.
    pub pattern: String,
    /// Asset classification (`versioned-image` / `other`).
    pub asset_class: String,
    /// Validator verdict (`allow` / `deny`).
    pub decision: String,
    /// Cache resolution (HIT/MISS/BYPASS/DENY), when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_status: Option<String>,
    /// Derived cache key, when lookup was reached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_key: Option<String>,
    /// Cache-control value written by the annotator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_control: Option<String>,
}

impl DecisionEntry {
    /// Create an entry for an allowed request.
    pub fn allow(path: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, path, pattern, "allow")
    }

    /// Create an entry for a denied request.
    ///
    /// Denies are expected traffic shape (a misconfigured caller), so
    /// they log at warn, not error.
    pub fn deny(path: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::new(LogLevel::Warn, path, pattern, "deny")
    }

    fn new(
        level: LogLevel,
        path: impl Into<String>,
        pattern: impl Into<String>,
        decision: &str,
    ) -> Self {
        Self {
            level,
            path: path.into(),
            pattern: pattern.into(),
            asset_class: String::new(),
            decision: decision.to_string(),
            cache_status: None,
            cache_key: None,
            cache_control: None,
        }
    }

    /// Set the asset class.
    pub fn with_asset_class(mut self, class: impl ToString) -> Self {
        self.asset_class = class.to_string();
        self
    }

    /// Set the cache resolution.
    pub fn with_cache_status(mut self, status: impl ToString) -> Self {
        self.cache_status = Some(status.to_string());
        self
    }

    /// Set the derived cache key.
    pub fn with_cache_key(mut self, key: impl ToString) -> Self {
        self.cache_key = Some(key.to_string());
        self
    }

    /// Set the annotated cache-control value.
    pub fn with_cache_control(mut self, value: impl Into<String>) -> Self {
        self.cache_control = Some(value.into());
        self
    }

    /// Format as a JSON line.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{} {}", self.decision, self.path))
    }

    /// Format as a human-readable line.
    pub fn to_human(&self) -> String {
        let mut s = format!(
            "[{}] {} {} (pattern={}, class={})",
            self.level, self.decision, self.path, self.pattern, self.asset_class
        );
        if let Some(status) = &self.cache_status {
            s.push_str(&format!(" status={}", status));
        }
        if let Some(key) = &self.cache_key {
            s.push_str(&format!(" key={}", key));
        }
        s
    }
}

/// Output format for decision logs.
#[derive(Debug, Clone, Copy, Default)]
pub enum LogFormat {
    /// JSON lines, for log aggregation.
    #[default]
    Json,
    /// Human-readable, for development.
    Human,
}

/// Writes decision entries to stderr.
#[derive(Debug, Clone)]
pub struct DecisionLogger {
    min_level: LogLevel,
    format: LogFormat,
}

impl DecisionLogger {
    /// Create a logger with JSON output at info level.
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            format: LogFormat::Json,
        }
    }

    /// Set the minimum level.
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set the output format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Emit an entry.
    pub fn log(&self, entry: &DecisionEntry) {
        if entry.level < self.min_level {
            return;
        }
        let line = match self.format {
            LogFormat::Json => entry.to_json(),
            LogFormat::Human => entry.to_human(),
        };
        eprintln!("{}", line);
    }
}

impl Default for DecisionLogger {
    fn default() -> Self {
        Self::new()
    }
}
