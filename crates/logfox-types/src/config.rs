//! Configuration types and structures.

use serde::{Deserialize, Serialize};
use crate::{Hotkey, Markup};

/// Settings read by the logger, the autoload and the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogFoxSettings {
    /// Host-side file logging switch
    #[serde(default)]
    pub file_logging: FileLoggingSettings,

    /// Broadcast to subscribers; `None` falls back to the host's build flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_mode: Option<bool>,

    /// Color markup for the console sink; `None` picks one from the terminal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markup: Option<Markup>,

    /// `strftime` pattern for the line timestamp
    #[serde(default = "default_time_format")]
    pub time_format: String,

    /// In-host log viewer
    #[serde(default)]
    pub viewer: ViewerSettings,

    /// The add-on's own tracing output
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

fn default_time_format() -> String {
    "%H:%M:%S".to_string()
}

impl Default for LogFoxSettings {
    fn default() -> Self {
        Self {
            file_logging: FileLoggingSettings::default(),
            debug_mode: None,
            markup: None,
            time_format: default_time_format(),
            viewer: ViewerSettings::default(),
            diagnostics: DiagnosticsConfig::default(),
        }
    }
}

/// Host file logging setting.
///
/// The host owns the actual file output; LogFox only checks the switch at
/// start-up and forces it on for the current run when it is off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileLoggingSettings {
    /// Whether the host writes its console output to a log file
    #[serde(default)]
    pub enabled: bool,
}

/// Log viewer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerSettings {
    /// Attach the viewer when running in debug mode
    #[serde(default = "default_viewer_enabled")]
    pub enabled: bool,
    /// Key toggling viewer visibility
    #[serde(default)]
    pub hotkey: Hotkey,
}

fn default_viewer_enabled() -> bool {
    true
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            enabled: default_viewer_enabled(),
            hotkey: Hotkey::default(),
        }
    }
}

/// Configuration of the add-on's own diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    /// `EnvFilter` directive used when no environment filter is set
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Output format
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

fn default_filter() -> String {
    "logfox=info".to_string()
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            format: default_log_format(),
        }
    }
}

/// Diagnostics output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format with colors
    Pretty,
    /// JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults_from_empty_document() {
        let settings: LogFoxSettings = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(settings, LogFoxSettings::default());
        assert!(!settings.file_logging.enabled);
        assert_eq!(settings.viewer.hotkey, Hotkey::Function(3));
        assert_eq!(settings.time_format, "%H:%M:%S");
    }

    #[test]
    fn test_settings_from_yaml() {
        let yaml = r#"
file_logging:
  enabled: true
debug_mode: false
markup: bbcode
viewer:
  hotkey: F9
diagnostics:
  format: json
"#;
        let settings: LogFoxSettings = serde_yaml::from_str(yaml).unwrap();
        assert!(settings.file_logging.enabled);
        assert_eq!(settings.debug_mode, Some(false));
        assert_eq!(settings.markup, Some(Markup::BbCode));
        assert_eq!(settings.viewer.hotkey, Hotkey::Function(9));
        assert!(settings.viewer.enabled);
        assert_eq!(settings.diagnostics.format, LogFormat::Json);
        assert_eq!(settings.diagnostics.filter, "logfox=info");
    }
}
