//! Emoji and sticker usage.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::record::Record;

static EMOJI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"[\x{1F600}-\x{1F64F}",
        r"\x{1F300}-\x{1F5FF}",
        r"\x{1F680}-\x{1F6FF}",
        r"\x{1F1E0}-\x{1F1FF}",
        r"\x{2600}-\x{27BF}",
        r"\x{1F900}-\x{1F9FF}",
        r"\x{1F018}-\x{1F270}]",
    ))
    .expect("emoji pattern")
});

/// Returns `true` if `text` contains at least one emoji.
///
/// ```rust
/// use talklog::analysis::emoji::contains_emoji;
///
/// assert!(contains_emoji("おはよう😊"));
/// assert!(!contains_emoji("おはよう"));
/// ```
pub fn contains_emoji(text: &str) -> bool {
    EMOJI.is_match(text)
}

/// Iterates over every emoji character in `text`.
pub fn emoji_in(text: &str) -> impl Iterator<Item = &str> {
    EMOJI.find_iter(text).map(|m| m.as_str())
}

/// One emoji and how often it was used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmojiCount {
    pub emoji: String,
    pub count: usize,
}

/// Emoji and sticker totals for one speaker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpeakerEmojiUsage {
    pub speaker: String,
    pub emoji: usize,
    pub stickers: usize,
}

/// Emoji and sticker usage over message-kind records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmojiUsage {
    pub messages_with_emoji: usize,
    pub total_emoji: usize,
    pub messages_with_sticker: usize,
    pub total_stickers: usize,
    /// Speakers in first-appearance order
    pub by_speaker: Vec<SpeakerEmojiUsage>,
    /// Most used emoji, descending; ties keep first-seen order
    pub top_emoji: Vec<EmojiCount>,
}

/// Counts emoji and stickers. System records are ignored.
pub fn emoji_usage(records: &[Record], config: &AnalysisConfig) -> EmojiUsage {
    let mut usage = EmojiUsage::default();
    let mut speaker_slot: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<EmojiCount> = Vec::new();
    let mut emoji_slot: HashMap<&str, usize> = HashMap::new();

    for record in records.iter().filter(|r| r.is_message()) {
        let mut found = 0;
        for emoji in emoji_in(record.body()) {
            found += 1;
            match emoji_slot.get(emoji) {
                Some(&i) => counts[i].count += 1,
                None => {
                    emoji_slot.insert(emoji, counts.len());
                    counts.push(EmojiCount {
                        emoji: emoji.to_string(),
                        count: 1,
                    });
                }
            }
        }
        let stickers = record.body().matches(config.sticker_marker.as_str()).count();

        if found == 0 && stickers == 0 {
            continue;
        }
        if found > 0 {
            usage.messages_with_emoji += 1;
            usage.total_emoji += found;
        }
        if stickers > 0 {
            usage.messages_with_sticker += 1;
            usage.total_stickers += stickers;
        }

        let slot = *speaker_slot.entry(record.sender()).or_insert_with(|| {
            usage.by_speaker.push(SpeakerEmojiUsage {
                speaker: record.sender().to_string(),
                ..Default::default()
            });
            usage.by_speaker.len() - 1
        });
        usage.by_speaker[slot].emoji += found;
        usage.by_speaker[slot].stickers += stickers;
    }

    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(config.top_emoji);
    usage.top_emoji = counts;
    usage
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn msg(line: usize, sender: &str, body: &str) -> Record {
        let ts = NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        Record::message(line, ts, sender, body)
    }

    #[test]
    fn test_ranges() {
        assert!(contains_emoji("☀"));
        assert!(contains_emoji("🚀"));
        assert!(contains_emoji("🤔"));
        assert!(contains_emoji("🇯"));
        assert!(!contains_emoji("abc 日本語 ！"));
    }

    #[test]
    fn test_empty() {
        assert_eq!(emoji_usage(&[], &AnalysisConfig::default()), EmojiUsage::default());
    }

    #[test]
    fn test_counts_and_speakers() {
        let records = vec![
            msg(1, "Alice", "やった😊😊"),
            msg(2, "Bob", "[スタンプ]"),
            msg(3, "Alice", "🎉 [スタンプ]"),
            msg(4, "Carol", "no emoji here"),
        ];
        let usage = emoji_usage(&records, &AnalysisConfig::default());
        assert_eq!(usage.messages_with_emoji, 2);
        assert_eq!(usage.total_emoji, 3);
        assert_eq!(usage.messages_with_sticker, 2);
        assert_eq!(usage.total_stickers, 2);

        let speakers: Vec<&str> = usage.by_speaker.iter().map(|s| s.speaker.as_str()).collect();
        assert_eq!(speakers, vec!["Alice", "Bob"]);
        assert_eq!(usage.by_speaker[0].emoji, 3);
        assert_eq!(usage.by_speaker[0].stickers, 1);

        assert_eq!(usage.top_emoji[0].emoji, "😊");
        assert_eq!(usage.top_emoji[0].count, 2);
        assert_eq!(usage.top_emoji[1].emoji, "🎉");
    }

    #[test]
    fn test_top_limit_and_tie_order() {
        let records = vec![msg(1, "A", "🍣🍜🍙")];
        let config = AnalysisConfig::default().with_top_emoji(2);
        let usage = emoji_usage(&records, &config);
        let top: Vec<&str> = usage.top_emoji.iter().map(|e| e.emoji.as_str()).collect();
        assert_eq!(top, vec!["🍣", "🍜"]);
    }

    #[test]
    fn test_system_records_ignored() {
        let ts = NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let records = vec![Record::system(1, ts, "Alice changed the icon 😊")];
        assert_eq!(emoji_usage(&records, &AnalysisConfig::default()).total_emoji, 0);
    }
}
