//! Benchmarks for chatshare parsing, reconciliation and output.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench parsing -- reconcile`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chatshare::convert::convert_if_generic_export;
use chatshare::core::output::{to_csv, to_json, to_jsonl, to_raw_text};
use chatshare::core::{OutputConfig, reconcile_messages, trim_to_limit};
use chatshare::parser::{ChatParser, Strategy};
use chatshare::parsers::{BracketedStrategy, CommaStrategy, GenericStrategy};
use chatshare::{Message, parse};

const SIZES: [usize; 3] = [100, 1_000, 10_000];

// =============================================================================
// Test Data Generators
// =============================================================================

fn sender(i: usize) -> &'static str {
    if i % 2 == 0 { "Alice" } else { "Bob" }
}

fn generate_bracketed(count: usize) -> String {
    (0..count)
        .map(|i| {
            format!(
                "[1/15/24, {}:{:02} AM] {}: Message number {}",
                i % 12 + 1,
                i % 60,
                sender(i),
                i
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn generate_comma(count: usize) -> String {
    (0..count)
        .map(|i| format!("{}, [15.01.24 {:02}:{:02}]: Message, number {}", sender(i), i % 24, i % 60, i))
        .collect::<Vec<_>>()
        .join("\n")
}

fn generate_generic(count: usize) -> String {
    (0..count)
        .map(|i| format!("{}\n15/01/2024 {:02}:{:02}\nMessage number {}", sender(i), i % 24, i % 60, i))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn generate_web_export(count: usize) -> String {
    (0..count)
        .map(|i| {
            format!(
                "Profile Image\n{}\n{}\n{} Jan, {}:{:02}\nMessage number {}\nphoto_{}.jpg\n(1.2 MB)",
                sender(i),
                &sender(i)[..1],
                i % 28 + 1,
                i % 24,
                i % 60,
                i,
                i
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Same chat with every tenth body edited and one message inserted.
fn generate_edited(count: usize) -> String {
    let mut lines: Vec<String> = generate_bracketed(count)
        .lines()
        .enumerate()
        .map(|(i, line)| if i % 10 == 0 { format!("{line} (edited)") } else { line.to_string() })
        .collect();
    lines.insert(count / 2, "[1/15/24, 1:00 PM] Charlie: late reply".to_string());
    lines.join("\n")
}

// =============================================================================
// Parsing Benchmarks
// =============================================================================

fn bench_strategy<S: Strategy>(c: &mut Criterion, name: &str, strategy: &S, generate: fn(usize) -> String) {
    let mut group = c.benchmark_group(name);

    for size in SIZES {
        let text = generate(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| black_box(strategy.tokenize(black_box(text))));
        });
    }
    group.finish();
}

fn bench_dialects(c: &mut Criterion) {
    bench_strategy(c, "bracketed_tokenize", &BracketedStrategy::new(), generate_bracketed);
    bench_strategy(c, "comma_tokenize", &CommaStrategy::new(), generate_comma);
    bench_strategy(c, "generic_tokenize", &GenericStrategy::new(), generate_generic);
}

fn bench_full_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    let parser = ChatParser::new();

    for size in SIZES {
        // Generic text falls through both other dialects first.
        let text = generate_generic(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("generic_fallthrough", size), &text, |b, text| {
            b.iter(|| black_box(parser.parse(black_box(text))));
        });

        let export = generate_web_export(size);
        group.bench_with_input(BenchmarkId::new("web_export", size), &export, |b, text| {
            b.iter(|| black_box(parser.parse(black_box(text))));
        });
    }
    group.finish();
}

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");

    for size in SIZES {
        let text = generate_web_export(size);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| black_box(convert_if_generic_export(black_box(text))));
        });
    }
    group.finish();
}

// =============================================================================
// Processing Benchmarks
// =============================================================================

fn bench_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile");

    for size in SIZES {
        let old = parse(&generate_bracketed(size));
        let fresh = parse(&generate_edited(size));
        group.throughput(Throughput::Elements(fresh.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &(old, fresh),
            |b, (old, fresh)| {
                b.iter(|| black_box(reconcile_messages(black_box(old), fresh.clone())));
            },
        );
    }
    group.finish();
}

fn bench_trim(c: &mut Criterion) {
    let mut group = c.benchmark_group("trim_to_limit");

    for size in SIZES {
        let messages = parse(&generate_bracketed(size));
        // Budget for roughly half the chat.
        let budget = size * 3 / 2;
        group.bench_with_input(BenchmarkId::from_parameter(size), &messages, |b, messages| {
            b.iter(|| black_box(trim_to_limit(black_box(messages), Some(budget))));
        });
    }
    group.finish();
}

// =============================================================================
// Output Benchmarks
// =============================================================================

fn bench_output(c: &mut Criterion) {
    let mut group = c.benchmark_group("output");
    let messages: Vec<Message> = parse(&generate_bracketed(10_000));
    let config = OutputConfig::new();

    group.throughput(Throughput::Elements(messages.len() as u64));
    group.bench_function("json", |b| b.iter(|| black_box(to_json(&messages, &config))));
    group.bench_function("jsonl", |b| b.iter(|| black_box(to_jsonl(&messages, &config))));
    group.bench_function("csv", |b| b.iter(|| black_box(to_csv(&messages, &config))));
    group.bench_function("text", |b| b.iter(|| black_box(to_raw_text(&messages))));
    group.finish();
}

criterion_group!(
    benches,
    bench_dialects,
    bench_full_parse,
    bench_convert,
    bench_reconcile,
    bench_trim,
    bench_output,
);

criterion_main!(benches);
