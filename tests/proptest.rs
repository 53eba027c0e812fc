//! Property-based tests for talklog.
//!
//! These tests generate random talk logs to find edge cases in line
//! numbering, the date context and ordering checks.

use proptest::prelude::*;

use talklog::analysis::{ScriptTokenizer, word_frequency};
use talklog::config::AnalysisConfig;
use talklog::core::{FilterConfig, apply_filters};
use talklog::parser::TalkParser;
use talklog::record::is_physical_order;

/// Senders drawn from a fixed pool (no regex strategies, for speed).
fn arb_sender() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "Alice".to_string(),
        "Bob".to_string(),
        "たろう".to_string(),
        "花子".to_string(),
        "User123".to_string(),
    ])
}

/// Bodies without line breaks; some contain colons, tabs or emoji.
fn arb_body() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "hello".to_string(),
        "おはよう！".to_string(),
        "寿司食べたい🍣".to_string(),
        "meet at 10:30".to_string(),
        "a\tb".to_string(),
        "[スタンプ]".to_string(),
        "🎉🎉".to_string(),
    ])
}

/// A time as `(hour, minute)`.
fn arb_time() -> impl Strategy<Value = (u32, u32)> {
    (0u32..24, 0u32..60)
}

/// One bracketed line with a random but valid timestamp.
fn arb_bracketed_line() -> impl Strategy<Value = (String, String, String)> {
    (1u32..=28, arb_time(), arb_sender(), arb_body()).prop_map(|(day, (h, m), sender, body)| {
        let line = format!("[2025/3/{} {}:{:02}] {}: {}", day, h, m, sender, body);
        (line, sender, body)
    })
}

/// Any mix of line shapes, blank lines and noise.
fn arb_any_line() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_bracketed_line().prop_map(|(line, _, _)| line),
        (arb_time(), arb_sender(), arb_body())
            .prop_map(|((h, m), s, b)| format!("{:02}:{:02}\t{}\t{}", h, m, s, b)),
        (1u32..=28).prop_map(|d| format!("2025/3/{}(月)", d)),
        arb_time().prop_map(|(h, m)| format!("[2025/3/1 {}:{:02}] Someone joined", h, m)),
        Just(String::new()),
        Just("random noise".to_string()),
    ]
}

proptest! {
    #[test]
    fn prop_line_numbers_strictly_increase(lines in prop::collection::vec(arb_any_line(), 1..60)) {
        let text = lines.join("\n");
        if let Ok(log) = TalkParser::new().parse_str(&text) {
            prop_assert!(is_physical_order(&log.records));
            for record in &log.records {
                prop_assert!(record.line_number() >= 1);
                prop_assert!(record.line_number() <= lines.len());
                // Every record comes from the line it claims.
                let source = lines[record.line_number() - 1].trim();
                prop_assert!(source.contains(record.body()));
            }
        }
    }

    #[test]
    fn prop_bracketed_round_trip(entries in prop::collection::vec(arb_bracketed_line(), 1..40)) {
        let text: Vec<&str> = entries.iter().map(|(line, _, _)| line.as_str()).collect();
        let log = TalkParser::new().parse_str(&text.join("\n")).unwrap();

        prop_assert_eq!(log.records.len(), entries.len());
        for (record, (_, sender, body)) in log.records.iter().zip(&entries) {
            prop_assert_eq!(record.sender(), sender.as_str());
            prop_assert_eq!(record.body(), body.trim());
        }
    }

    #[test]
    fn prop_bare_time_without_header_never_yields(
        lines in prop::collection::vec((arb_time(), arb_sender(), arb_body()), 1..30)
    ) {
        let text: Vec<String> = lines
            .iter()
            .map(|((h, m), s, b)| format!("{:02}:{:02}\t{}\t{}", h, m, s, b))
            .collect();
        let err = TalkParser::new().parse_str(&text.join("\n")).unwrap_err();
        prop_assert!(err.is_no_messages());
    }

    #[test]
    fn prop_integrity_matches_adjacent_pairs(entries in prop::collection::vec(arb_bracketed_line(), 1..40)) {
        let text: Vec<&str> = entries.iter().map(|(line, _, _)| line.as_str()).collect();
        let log = TalkParser::new().parse_str(&text.join("\n")).unwrap();

        let backwards = log
            .records
            .windows(2)
            .filter(|pair| pair[1].timestamp() < pair[0].timestamp())
            .count();
        prop_assert_eq!(log.integrity.violation_count(), backwards);
        for violation in &log.integrity.violations {
            prop_assert!(violation.backward_gap_minutes > 0);
        }
    }

    #[test]
    fn prop_filter_never_grows(entries in prop::collection::vec(arb_bracketed_line(), 1..40), sender in arb_sender()) {
        let text: Vec<&str> = entries.iter().map(|(line, _, _)| line.as_str()).collect();
        let log = TalkParser::new().parse_str(&text.join("\n")).unwrap();
        let total = log.records.len();

        let filtered = apply_filters(log.records, &FilterConfig::new().with_sender(sender.clone()));
        prop_assert!(filtered.len() <= total);
        prop_assert!(filtered.iter().all(|r| r.sender() == sender));
        prop_assert!(is_physical_order(&filtered));
    }

    #[test]
    fn prop_word_counts_positive(entries in prop::collection::vec(arb_bracketed_line(), 0..30)) {
        let text: Vec<&str> = entries.iter().map(|(line, _, _)| line.as_str()).collect();
        if let Ok(log) = TalkParser::new().parse_str(&text.join("\n")) {
            let freq = word_frequency(&log.records, &ScriptTokenizer, &AnalysisConfig::default());
            prop_assert!(freq.words.iter().all(|w| w.count > 0));
            prop_assert!(freq.words.windows(2).all(|p| p[0].count >= p[1].count));
        }
    }
}
