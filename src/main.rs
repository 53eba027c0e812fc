//! # talklog CLI
//!
//! Command-line interface for the talklog library.

use std::fs;
use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use talklog::analysis::{ConversationSummary, ScriptTokenizer, conversation_summary};
use talklog::cli::Args;
use talklog::config::AnalysisConfig;
use talklog::core::apply_filters;
use talklog::format::write_to_format;
use talklog::integrity::OrderingIntegrityReport;
use talklog::parser::{ParseStats, ParsedLog, TalkParser};
use talklog::parsing::SourceEncoding;
use talklog::TalkError;

/// Shape of the `--stats` output file.
#[derive(Serialize)]
struct StatsReport<'a> {
    input: &'a str,
    encoding: SourceEncoding,
    parse: ParseStats,
    integrity: &'a OrderingIntegrityReport,
    summary: ConversationSummary,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("talklog=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("talklog=warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<(), TalkError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();
    init_tracing(args.verbose);

    let output_path = args.output_path();
    let filter_config = args.filter_config()?;
    let analysis_config = match args.config {
        Some(ref path) => AnalysisConfig::from_path(path)?,
        None => AnalysisConfig::default(),
    };

    println!("💬 talklog v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input);
    println!("💾 Output:  {}", output_path);
    if args.stats {
        println!("📊 Mode:    Statistics");
    } else {
        println!("📄 Format:  {}", args.format);
    }
    if let Some(ref after) = args.after {
        println!("📅 After:   {}", after);
    }
    if let Some(ref before) = args.before {
        println!("📅 Before:  {}", before);
    }
    if let Some(ref from) = args.from {
        println!("👤 From:    {}", from);
    }
    if let Some(ref keyword) = args.search {
        println!("🔎 Search:  {}", keyword);
    }
    println!();

    println!("⏳ Parsing talk history...");
    let parse_start = Instant::now();
    let parser = TalkParser::with_config(args.parser_config());
    let ParsedLog {
        records,
        integrity,
        encoding,
        stats,
    } = parser.parse(Path::new(&args.input))?;
    let original_count = records.len();
    println!(
        "   Found {} records in {} lines ({}, {:.2}s)",
        original_count,
        stats.physical_lines,
        encoding,
        parse_start.elapsed().as_secs_f64()
    );
    if !integrity.is_monotonic() {
        println!(
            "⚠️  {} timestamp(s) go backwards (largest gap {} min)",
            integrity.violation_count(),
            integrity.max_backward_gap().unwrap_or_default()
        );
    }

    let records = if filter_config.is_active() {
        println!("🔍 Filtering records...");
        let filtered = apply_filters(records, &filter_config);
        println!("   {} records after filtering", filtered.len());
        filtered
    } else {
        records
    };

    if args.stats {
        println!("📊 Computing statistics...");
        let summary = conversation_summary(&records, &ScriptTokenizer, &analysis_config);
        let report = StatsReport {
            input: &args.input,
            encoding,
            parse: stats,
            integrity: &integrity,
            summary,
        };
        fs::write(&output_path, serde_json::to_string_pretty(&report)?)?;
    } else {
        println!("💾 Writing {}...", args.format);
        write_to_format(&records, &output_path, args.format, &args.output_config())?;
    }

    println!();
    println!("✅ Done! Output saved to {}", output_path);
    println!();
    println!("📊 Summary:");
    println!("   Parsed:    {} records", original_count);
    if filter_config.is_active() {
        println!("   Filtered:  {} records", records.len());
    }
    println!("   Skipped:   {} lines", stats.skipped_lines + stats.malformed_timestamps);
    println!("   Total time: {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}
