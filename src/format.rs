//! Output format selection.
//!
//! Library-side format type with no CLI dependency, plus dispatch helpers
//! over the writers in [`core::output`](crate::core::output).
//!
//! # Example
//!
//! ```rust
//! # fn example() -> chatshare::Result<()> {
//! use chatshare::core::models::OutputConfig;
//! use chatshare::format::{OutputFormat, to_format_string};
//!
//! let messages = chatshare::parse("[9:00] Alice: Hello");
//!
//! let text = to_format_string(&messages, OutputFormat::Text, &OutputConfig::new())?;
//! assert_eq!(text, "[9:00] Alice: Hello");
//!
//! let format = OutputFormat::from_path("chat.jsonl")?;
//! assert_eq!(format, OutputFormat::Jsonl);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use serde::{Deserialize, Serialize};

use crate::Message;
use crate::core::models::OutputConfig;
use crate::error::{ChatshareError, Result};

/// Output format for parsed chats.
///
/// - [`Json`](OutputFormat::Json) - array of messages, the stored representation
/// - [`Jsonl`](OutputFormat::Jsonl) - one message per line
/// - [`Csv`](OutputFormat::Csv) - semicolon separated `ID;Timestamp;Sender;Message`
/// - [`Text`](OutputFormat::Text) - bracketed chat text that parses back to the same messages
///
/// ```rust
/// use chatshare::format::OutputFormat;
/// use std::str::FromStr;
///
/// let format = OutputFormat::from_str("txt").unwrap();
/// assert_eq!(format, OutputFormat::Text);
/// assert_eq!(format.extension(), "txt");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// JSON array of messages (default)
    #[default]
    Json,

    /// JSON Lines, also known as NDJSON
    #[serde(alias = "ndjson")]
    Jsonl,

    /// CSV with semicolon delimiter
    Csv,

    /// Bracketed chat text
    #[serde(alias = "txt")]
    Text,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }

    /// Returns all accepted format names.
    pub fn all_names() -> &'static [&'static str] {
        &["json", "jsonl", "ndjson", "csv", "text", "txt"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [OutputFormat] {
        &[
            OutputFormat::Json,
            OutputFormat::Jsonl,
            OutputFormat::Csv,
            OutputFormat::Text,
        ]
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Json => "application/json",
            OutputFormat::Jsonl => "application/x-ndjson",
            OutputFormat::Csv => "text/csv",
            OutputFormat::Text => "text/plain",
        }
    }

    /// Detects format from a file path based on extension.
    ///
    /// ```rust
    /// use chatshare::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_path("out/chat.CSV").unwrap(), OutputFormat::Csv);
    /// assert!(OutputFormat::from_path("chat.docx").is_err());
    /// ```
    pub fn from_path(path: &str) -> Result<Self> {
        let ext = path.rsplit('.').next().unwrap_or("").to_lowercase();

        match ext.as_str() {
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            "csv" => Ok(OutputFormat::Csv),
            "txt" | "text" => Ok(OutputFormat::Text),
            _ => Err(ChatshareError::invalid_format(
                "output",
                format!("Unknown file extension: '.{ext}'. Expected one of: json, jsonl, csv, txt"),
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Text => write!(f, "Text"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            "csv" => Ok(OutputFormat::Csv),
            "text" | "txt" => Ok(OutputFormat::Text),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

#[cfg(not(feature = "csv-output"))]
fn csv_disabled() -> ChatshareError {
    ChatshareError::invalid_format(
        "output",
        "Output format CSV requires the 'csv-output' feature to be enabled",
    )
}

/// Writes messages to a file in the specified format.
///
/// # Errors
///
/// Returns an error if the file cannot be written, or if CSV is requested
/// without the `csv-output` feature.
pub fn write_to_format(
    messages: &[Message],
    path: &str,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<()> {
    use crate::core::output;

    match format {
        OutputFormat::Json => output::write_json(messages, path, config),
        OutputFormat::Jsonl => output::write_jsonl(messages, path, config),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => output::write_csv(messages, path, config),
        #[cfg(not(feature = "csv-output"))]
        OutputFormat::Csv => Err(csv_disabled()),
        OutputFormat::Text => output::write_text(messages, path),
    }
}

/// Converts messages to a string in the specified format.
pub fn to_format_string(
    messages: &[Message],
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<String> {
    use crate::core::output;

    match format {
        OutputFormat::Json => output::to_json(messages, config),
        OutputFormat::Jsonl => output::to_jsonl(messages, config),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => output::to_csv(messages, config),
        #[cfg(not(feature = "csv-output"))]
        OutputFormat::Csv => Err(csv_disabled()),
        OutputFormat::Text => output::to_raw_text(messages),
    }
}
