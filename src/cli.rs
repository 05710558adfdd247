//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - top-level arguments and the [`Command`] subcommands
//! - [`OutputFormat`] - `--format` values, convertible to [`crate::format::OutputFormat`]
//! - [`DialectArg`] - `--dialect` values, convertible to [`Dialect`]

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{LimitConfig, ParserConfig};
use crate::parser::Dialect;

/// Parse chat exports into messages with stable ids.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatshare")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatshare parse chat.txt
    chatshare parse chat.txt -o chat.json --max-words 5000
    chatshare parse export.txt -f csv --spans
    chatshare reconcile chat.json edited.txt -o chat.json
    chatshare convert web_export.txt
    chatshare trim chat.json --max-words 200")]
pub struct Args {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Parse a raw chat export into messages
    Parse(ParseArgs),

    /// Re-parse edited text, keeping ids from an earlier parse
    Reconcile(ReconcileArgs),

    /// Rewrite a generic web export into bracketed chat text
    Convert(ConvertArgs),

    /// Drop trailing messages until a word budget fits
    Trim(TrimArgs),
}

/// Output destination shared by the subcommands that write messages.
#[derive(clap::Args, Debug, Clone)]
pub struct OutputArgs {
    /// Path to output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format (inferred from the output extension, else JSON)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Leave message ids out of the output
    #[arg(long)]
    pub no_ids: bool,
}

impl OutputArgs {
    /// Resolves the output format from `--format` or the output path.
    pub fn resolve_format(&self) -> crate::Result<crate::format::OutputFormat> {
        match (self.format, &self.output) {
            (Some(format), _) => Ok(format.into()),
            (None, Some(path)) => crate::format::OutputFormat::from_path(path),
            (None, None) => Ok(crate::format::OutputFormat::default()),
        }
    }

    pub fn output_config(&self) -> crate::core::OutputConfig {
        crate::core::OutputConfig::new().with_ids(!self.no_ids)
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct ParseArgs {
    /// Path to the raw chat text
    pub input: String,

    #[command(flatten)]
    pub out: OutputArgs,

    /// Keep only as many leading messages as fit this many words
    #[arg(long, value_name = "N")]
    pub max_words: Option<usize>,

    /// Record each message's byte span in the input
    #[arg(long)]
    pub spans: bool,

    /// Dialects to try, in order (default: all)
    #[arg(long, value_enum, value_delimiter = ',')]
    pub dialect: Vec<DialectArg>,

    /// Skip the generic web export pre-pass
    #[arg(long)]
    pub no_convert: bool,
}

impl ParseArgs {
    pub fn parser_config(&self) -> ParserConfig {
        let mut config = ParserConfig::new()
            .with_track_spans(self.spans)
            .with_convert_generic_exports(!self.no_convert);
        if !self.dialect.is_empty() {
            config = config.with_dialects(self.dialect.iter().map(|&d| d.into()).collect());
        }
        config
    }

    pub fn limit_config(&self) -> LimitConfig {
        LimitConfig {
            max_words: self.max_words,
        }
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct ReconcileArgs {
    /// Earlier messages: a JSON array or a stored chat record
    pub old: String,

    /// Edited raw chat text
    pub new: String,

    #[command(flatten)]
    pub out: OutputArgs,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Path to the generic web export
    pub input: String,

    /// Path to output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<String>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct TrimArgs {
    /// Messages as a JSON array or a stored chat record
    pub input: String,

    /// Word budget
    #[arg(long, value_name = "N")]
    pub max_words: usize,

    #[command(flatten)]
    pub out: OutputArgs,
}

/// Output format options for `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum OutputFormat {
    /// JSON array of messages
    Json,

    /// JSON Lines, one message per line
    #[value(alias = "ndjson")]
    Jsonl,

    /// CSV with semicolon delimiter
    Csv,

    /// Bracketed chat text
    #[value(alias = "txt")]
    Text,
}

impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Text => crate::format::OutputFormat::Text,
        }
    }
}

/// Dialect options for `--dialect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum DialectArg {
    /// `[<timestamp>] <sender>: <body>`
    #[value(alias = "a")]
    Bracketed,

    /// `<sender>, [<timestamp>]: <body>`
    #[value(aliases = ["comma", "b"])]
    CommaPrefixed,

    /// Name line, timestamp line, body lines
    #[value(alias = "c")]
    Generic,
}

impl From<DialectArg> for Dialect {
    fn from(dialect: DialectArg) -> Dialect {
        match dialect {
            DialectArg::Bracketed => Dialect::Bracketed,
            DialectArg::CommaPrefixed => Dialect::CommaPrefixed,
            DialectArg::Generic => Dialect::Generic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_args(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_subcommand_defaults() {
        let args = parse_args(&["chatshare", "parse", "chat.txt"]);
        let Command::Parse(parse) = args.command else {
            panic!("expected parse");
        };
        assert_eq!(parse.input, "chat.txt");
        assert_eq!(parse.out.output, None);
        assert_eq!(parse.parser_config(), ParserConfig::default());
        assert!(parse.limit_config().is_unbounded());
        assert_eq!(
            parse.out.resolve_format().unwrap(),
            crate::format::OutputFormat::Json
        );
    }

    #[test]
    fn test_parse_subcommand_flags() {
        let args = parse_args(&[
            "chatshare", "-vv", "parse", "chat.txt", "-o", "out.csv", "--max-words", "50",
            "--spans", "--dialect", "comma,c", "--no-convert",
        ]);
        assert_eq!(args.verbose, 2);
        let Command::Parse(parse) = args.command else {
            panic!("expected parse");
        };

        let config = parse.parser_config();
        assert!(config.track_spans);
        assert!(!config.convert_generic_exports);
        assert_eq!(config.dialects, vec![Dialect::CommaPrefixed, Dialect::Generic]);
        assert_eq!(parse.limit_config().max_words, Some(50));
        assert_eq!(
            parse.out.resolve_format().unwrap(),
            crate::format::OutputFormat::Csv
        );
    }

    #[test]
    fn test_explicit_format_beats_extension() {
        let args = parse_args(&["chatshare", "parse", "chat.txt", "-o", "out.json", "-f", "txt"]);
        let Command::Parse(parse) = args.command else {
            panic!("expected parse");
        };
        assert_eq!(
            parse.out.resolve_format().unwrap(),
            crate::format::OutputFormat::Text
        );
    }

    #[test]
    fn test_trim_requires_max_words() {
        assert!(Args::try_parse_from(["chatshare", "trim", "chat.json"]).is_err());
        let args = parse_args(&["chatshare", "trim", "chat.json", "--max-words", "10", "--no-ids"]);
        let Command::Trim(trim) = args.command else {
            panic!("expected trim");
        };
        assert_eq!(trim.max_words, 10);
        assert!(!trim.out.output_config().include_ids);
    }

    #[test]
    fn test_reconcile_positional_args() {
        let args = parse_args(&["chatshare", "reconcile", "old.json", "new.txt"]);
        let Command::Reconcile(reconcile) = args.command else {
            panic!("expected reconcile");
        };
        assert_eq!(reconcile.old, "old.json");
        assert_eq!(reconcile.new, "new.txt");
    }
}
