//! # chatshare CLI
//!
//! Command-line interface for the chatshare library.

use std::borrow::Cow;
use std::fs;
use std::io::{self, Write};
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use chatshare::cli::{Args, Command, ConvertArgs, OutputArgs, ParseArgs, ReconcileArgs, TrimArgs};
use chatshare::config::LimitConfig;
use chatshare::convert::convert_if_generic_export;
use chatshare::core::{StoredChat, apply_limit};
use chatshare::format::{to_format_string, write_to_format};
use chatshare::parser::{ChatParser, ParseOutcome};
use chatshare::{ChatshareError, Message};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("❌ Error: {e}");
        process::exit(1);
    }
}

/// Logs go to stderr so stdout stays usable for output.
fn init_tracing(verbose: u8) {
    let default_directive = match verbose {
        0 => "warn",
        1 => "chatshare=debug",
        _ => "chatshare=trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<(), ChatshareError> {
    match args.command {
        Command::Parse(parse) => run_parse(&parse),
        Command::Reconcile(reconcile) => run_reconcile(&reconcile),
        Command::Convert(convert) => run_convert(&convert),
        Command::Trim(trim) => run_trim(&trim),
    }
}

fn run_parse(args: &ParseArgs) -> Result<(), ChatshareError> {
    let start = Instant::now();
    let text = fs::read_to_string(&args.input)?;
    let config = args.parser_config();
    let parser = ChatParser::with_config(config.clone());

    status(&args.out, format_args!("📦 chatshare v{}", env!("CARGO_PKG_VERSION")));
    status(&args.out, format_args!("📂 Input:   {}", args.input));

    let (dialect, converted, messages) = match parser.parse_outcome(&text) {
        ParseOutcome::Matched {
            dialect,
            converted,
            messages,
        } => (dialect, converted, messages),
        ParseOutcome::NoMatch => return Err(ChatshareError::unparseable(&config.dialects)),
    };

    status(&args.out, format_args!("🔎 Dialect: {dialect}"));
    if converted {
        status(&args.out, format_args!("🔄 Converted generic web export"));
    }
    status(&args.out, format_args!("   Found {} messages", messages.len()));

    let (messages, stats) = apply_limit(&messages, &args.limit_config());
    if stats.was_trimmed() {
        status(
            &args.out,
            format_args!(
                "✂️  Trimmed to {} messages ({} of {} words)",
                stats.kept_count, stats.kept_words, stats.original_words
            ),
        );
    }

    emit(&messages, &args.out)?;
    status(
        &args.out,
        format_args!("⚡ Done in {:.2}s", start.elapsed().as_secs_f64()),
    );
    Ok(())
}

fn run_reconcile(args: &ReconcileArgs) -> Result<(), ChatshareError> {
    let parser = ChatParser::new();
    let old = load_messages(&args.old, &parser)?;
    let new_text = fs::read_to_string(&args.new)?;

    let (messages, stats) = parser.reconcile_with_stats(&old, &new_text);
    if messages.is_empty() && !new_text.trim().is_empty() {
        return Err(ChatshareError::unparseable(&parser.config().dialects));
    }

    // stderr: stdout may be carrying the messages.
    eprintln!(
        "🔗 Reconciled {} messages: {} exact, {} positional, {} new",
        stats.total(),
        stats.exact,
        stats.positional,
        stats.fresh
    );

    emit(&messages, &args.out)
}

fn run_convert(args: &ConvertArgs) -> Result<(), ChatshareError> {
    let text = fs::read_to_string(&args.input)?;
    let converted = convert_if_generic_export(&text);
    if matches!(converted, Cow::Borrowed(_)) {
        eprintln!("ℹ️  Not a generic web export, input left unchanged");
    }

    match &args.output {
        Some(path) => {
            fs::write(path, converted.as_bytes())?;
            println!("✅ Done! Output saved to {path}");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(converted.as_bytes())?;
            if !converted.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}

fn run_trim(args: &TrimArgs) -> Result<(), ChatshareError> {
    let messages = load_messages(&args.input, &ChatParser::new())?;
    let (kept, stats) = apply_limit(&messages, &LimitConfig::new().with_max_words(args.max_words));

    status(
        &args.out,
        format_args!(
            "✂️  Kept {} of {} messages ({} words)",
            stats.kept_count, stats.original_count, stats.kept_words
        ),
    );
    emit(&kept, &args.out)
}

/// Loads messages from a JSON array, a stored chat record, or raw text.
fn load_messages(path: &str, parser: &ChatParser) -> Result<Vec<Message>, ChatshareError> {
    let contents = fs::read_to_string(path)?;

    let Ok(value) = serde_json::from_str::<Value>(&contents) else {
        return StoredChat::from_raw_text(contents).messages(parser);
    };

    let chat = if value.get("rawText").is_some() {
        serde_json::from_value(value)?
    } else {
        StoredChat {
            raw_text: value,
            ..StoredChat::from_raw_text(String::new())
        }
    };
    chat.messages(parser)
}

/// Writes messages to the output file, or stdout when none is given.
fn emit(messages: &[Message], out: &OutputArgs) -> Result<(), ChatshareError> {
    let format = out.resolve_format()?;
    let config = out.output_config();

    match &out.output {
        Some(path) => {
            write_to_format(messages, path, format, &config)?;
            println!("✅ Done! {} messages saved to {} ({})", messages.len(), path, format);
        }
        None => {
            let rendered = to_format_string(messages, format, &config)?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            if !rendered.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}

/// Progress lines go to stdout only when stdout isn't carrying the output.
fn status(out: &OutputArgs, line: std::fmt::Arguments<'_>) {
    if out.output.is_some() {
        println!("{line}");
    }
}
