//! Core types for analysis results.

use serde::{Deserialize, Serialize};

/// Severity levels for diagnostics.
///
/// Every rule in the catalog reports at `Warning`; `Error` exists for
/// callers that reclassify diagnostics at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "warning" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            _ => Err(format!("unknown severity: {}", s)),
        }
    }
}

/// The topical rule categories, one per visitor in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "session_http")]
    SessionHttp,
    #[serde(rename = "connection_management")]
    ConnectionManagement,
    #[serde(rename = "content_delivery")]
    ContentDelivery,
    #[serde(rename = "data_caching")]
    DataCaching,
    #[serde(rename = "timeout_retry")]
    TimeoutRetry,
    #[serde(rename = "prefetch_background")]
    PrefetchBackground,
    #[serde(rename = "polling")]
    Polling,
    #[serde(rename = "app_lifecycle")]
    AppLifecycle,
    #[serde(rename = "push_notification")]
    PushNotification,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::SessionHttp => "session_http",
            Category::ConnectionManagement => "connection_management",
            Category::ContentDelivery => "content_delivery",
            Category::DataCaching => "data_caching",
            Category::TimeoutRetry => "timeout_retry",
            Category::PrefetchBackground => "prefetch_background",
            Category::Polling => "polling",
            Category::AppLifecycle => "app_lifecycle",
            Category::PushNotification => "push_notification",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "session_http" => Some(Category::SessionHttp),
            "connection_management" => Some(Category::ConnectionManagement),
            "content_delivery" => Some(Category::ContentDelivery),
            "data_caching" => Some(Category::DataCaching),
            "timeout_retry" => Some(Category::TimeoutRetry),
            "prefetch_background" => Some(Category::PrefetchBackground),
            "polling" => Some(Category::Polling),
            "app_lifecycle" => Some(Category::AppLifecycle),
            "push_notification" => Some(Category::PushNotification),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single reportable warning at a source position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub severity: Severity,
    pub category: Category,
    pub message: String,
}

impl Diagnostic {
    /// Render the diagnostic as one compiler-style text line.
    pub fn format(&self) -> String {
        format!(
            "{}:{}:{}: {}: {}",
            self.file, self.line, self.column, self.severity, self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_display_roundtrip() {
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!("warning".parse::<Severity>().unwrap(), Severity::Warning);
        assert!("fatal".parse::<Severity>().is_err());
    }

    #[test]
    fn test_category_roundtrip() {
        assert_eq!(Category::parse("polling"), Some(Category::Polling));
        assert_eq!(Category::Polling.as_str(), "polling");
        assert_eq!(Category::parse("unknown"), None);
    }

    #[test]
    fn test_diagnostic_format() {
        let diagnostic = Diagnostic {
            file: "App.swift".to_string(),
            line: 12,
            column: 5,
            severity: Severity::Warning,
            category: Category::ContentDelivery,
            message: "Too many connections.".to_string(),
        };
        assert_eq!(
            diagnostic.format(),
            "App.swift:12:5: warning: Too many connections."
        );
    }
}
