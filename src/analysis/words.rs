//! Word frequency over message bodies.
//!
//! Counting needs a way to cut text into words and to tell content words
//! from particles and punctuation. That is abstracted behind [`Tokenizer`].
//! The built-in [`ScriptTokenizer`] needs no dictionary: Japanese writes
//! content words mostly in kanji or katakana and grammar in hiragana, so runs
//! of one script are a workable approximation of morphemes.
//!
//! | Run | Part of speech |
//! |-----|----------------|
//! | kanji, katakana, latin letters, digits | [`PartOfSpeech::Noun`] |
//! | hiragana | [`PartOfSpeech::Particle`] |
//! | punctuation, emoji, other symbols | [`PartOfSpeech::Symbol`] |
//!
//! Whitespace separates runs and is never a token.
//!
//! # Example
//!
//! ```rust
//! use talklog::analysis::words::{ScriptTokenizer, word_frequency};
//! use talklog::config::AnalysisConfig;
//! use talklog::parser::TalkParser;
//!
//! let log = TalkParser::new().parse_str(
//!     "[2025/1/15 12:00] Alice: 今日はラーメン\n[2025/1/15 12:01] Bob: ラーメンいいね",
//! )?;
//! let freq = word_frequency(&log.records, &ScriptTokenizer, &AnalysisConfig::default());
//!
//! assert_eq!(freq.words[0].word, "ラーメン");
//! assert_eq!(freq.words[0].count, 2);
//! # Ok::<(), talklog::TalkError>(())
//! ```

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::record::Record;

/// Coarse grammatical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PartOfSpeech {
    /// Content word; the only category that is counted
    Noun,
    /// Particle, auxiliary or other function word
    Particle,
    /// Punctuation, emoji and other non-word characters
    Symbol,
}

/// A slice of input text with its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub surface: &'a str,
    pub pos: PartOfSpeech,
}

/// Splits text into categorized tokens.
///
/// Implement this to plug in a dictionary-based morphological analyzer.
pub trait Tokenizer {
    /// Returns the tokens of `text` in order.
    fn tokenize<'a>(&self, text: &'a str) -> Vec<Token<'a>>;
}

/// Dictionary-free tokenizer that splits on Unicode script changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptTokenizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    Kanji,
    Hiragana,
    Katakana,
    Latin,
    Digit,
    Symbol,
    Space,
}

impl Script {
    fn of(c: char) -> Self {
        match c {
            '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' | '\u{F900}'..='\u{FAFF}' | '々' => {
                Script::Kanji
            }
            '\u{3041}'..='\u{309F}' => Script::Hiragana,
            '\u{30A0}'..='\u{30FA}' | '\u{30FD}'..='\u{30FF}' | '\u{FF66}'..='\u{FF9F}' => {
                Script::Katakana
            }
            '\u{30FB}' | PROLONGED_SOUND_MARK => Script::Symbol,
            c if c.is_whitespace() => Script::Space,
            c if c.is_numeric() => Script::Digit,
            c if c.is_alphabetic() => Script::Latin,
            _ => Script::Symbol,
        }
    }

    fn part_of_speech(self) -> PartOfSpeech {
        match self {
            Script::Kanji | Script::Katakana | Script::Latin | Script::Digit => PartOfSpeech::Noun,
            Script::Hiragana => PartOfSpeech::Particle,
            Script::Symbol | Script::Space => PartOfSpeech::Symbol,
        }
    }
}

// The prolonged sound mark extends kana runs (ラーメン, すごーい).
const PROLONGED_SOUND_MARK: char = 'ー';

impl Tokenizer for ScriptTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<Token<'a>> {
        let mut tokens = Vec::new();
        let mut run: Option<(usize, Script)> = None;

        for (i, c) in text.char_indices() {
            let script = match (c, run) {
                (PROLONGED_SOUND_MARK, Some((_, s @ (Script::Katakana | Script::Hiragana)))) => s,
                _ => Script::of(c),
            };
            match run {
                Some((_, current)) if current == script => {}
                Some((start, current)) => {
                    push_run(&mut tokens, &text[start..i], current);
                    run = Some((i, script));
                }
                None => run = Some((i, script)),
            }
        }
        if let Some((start, current)) = run {
            push_run(&mut tokens, &text[start..], current);
        }
        tokens
    }
}

fn push_run<'a>(tokens: &mut Vec<Token<'a>>, surface: &'a str, script: Script) {
    if script == Script::Space {
        return;
    }
    tokens.push(Token {
        surface,
        pos: script.part_of_speech(),
    });
}

/// One word and its count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Word counts ordered by descending count; ties keep first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WordFrequency {
    pub words: Vec<WordCount>,
}

impl WordFrequency {
    /// Returns the `n` most frequent words.
    pub fn top(&self, n: usize) -> &[WordCount] {
        &self.words[..n.min(self.words.len())]
    }

    /// Returns the count of `word`, or 0.
    pub fn count_of(&self, word: &str) -> usize {
        self.words
            .iter()
            .find(|w| w.word == word)
            .map_or(0, |w| w.count)
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Extracts the countable words of one text.
///
/// Keeps nouns longer than one character that are not stop-words.
pub fn extract_words<'a>(
    text: &'a str,
    tokenizer: &dyn Tokenizer,
    config: &AnalysisConfig,
) -> Vec<&'a str> {
    tokenizer
        .tokenize(text)
        .into_iter()
        .filter(|t| t.pos == PartOfSpeech::Noun)
        .map(|t| t.surface)
        .filter(|w| w.chars().count() > 1 && !config.is_stop_word(w))
        .collect()
}

/// Counts words over every message-kind record.
pub fn word_frequency(
    records: &[Record],
    tokenizer: &dyn Tokenizer,
    config: &AnalysisConfig,
) -> WordFrequency {
    count_words(records.iter(), tokenizer, config)
}

/// Counts words in the messages of one speaker.
pub fn speaker_word_frequency(
    records: &[Record],
    speaker: &str,
    tokenizer: &dyn Tokenizer,
    config: &AnalysisConfig,
) -> WordFrequency {
    count_words(
        records.iter().filter(|r| r.sender() == speaker),
        tokenizer,
        config,
    )
}

/// Counts words in the messages of one calendar date.
pub fn daily_word_frequency(
    records: &[Record],
    date: NaiveDate,
    tokenizer: &dyn Tokenizer,
    config: &AnalysisConfig,
) -> WordFrequency {
    count_words(
        records.iter().filter(|r| r.date() == date),
        tokenizer,
        config,
    )
}

fn count_words<'a>(
    records: impl Iterator<Item = &'a Record>,
    tokenizer: &dyn Tokenizer,
    config: &AnalysisConfig,
) -> WordFrequency {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut words: Vec<WordCount> = Vec::new();

    for record in records.filter(|r| r.is_message()) {
        for word in extract_words(record.body(), tokenizer, config) {
            match slots.get(word) {
                Some(&i) => words[i].count += 1,
                None => {
                    slots.insert(word, words.len());
                    words.push(WordCount {
                        word: word.to_string(),
                        count: 1,
                    });
                }
            }
        }
    }

    words.sort_by(|a, b| b.count.cmp(&a.count));
    WordFrequency { words }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn ts(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn surfaces(text: &str) -> Vec<(&str, PartOfSpeech)> {
        ScriptTokenizer
            .tokenize(text)
            .into_iter()
            .map(|t| (t.surface, t.pos))
            .collect()
    }

    #[test]
    fn test_tokenize_scripts() {
        assert_eq!(
            surfaces("今日はラーメン!"),
            vec![
                ("今日", PartOfSpeech::Noun),
                ("は", PartOfSpeech::Particle),
                ("ラーメン", PartOfSpeech::Noun),
                ("!", PartOfSpeech::Symbol),
            ]
        );
    }

    #[test]
    fn test_tokenize_latin_and_space() {
        assert_eq!(
            surfaces("see you 10時"),
            vec![
                ("see", PartOfSpeech::Noun),
                ("you", PartOfSpeech::Noun),
                ("10", PartOfSpeech::Noun),
                ("時", PartOfSpeech::Noun),
            ]
        );
    }

    #[test]
    fn test_prolonged_mark_alone_is_symbol() {
        assert_eq!(surfaces("ー"), vec![("ー", PartOfSpeech::Symbol)]);
    }

    #[test]
    fn test_empty_input() {
        let config = AnalysisConfig::default();
        assert!(word_frequency(&[], &ScriptTokenizer, &config).is_empty());
        assert!(ScriptTokenizer.tokenize("").is_empty());
    }

    #[test]
    fn test_stop_words_and_single_chars_excluded() {
        let config = AnalysisConfig::default().with_stop_word("ラーメン");
        let records = vec![Record::message(1, ts(15), "A", "ラーメンと寿司、犬")];
        let freq = word_frequency(&records, &ScriptTokenizer, &config);
        assert_eq!(freq.count_of("ラーメン"), 0);
        assert_eq!(freq.count_of("寿司"), 1);
        assert_eq!(freq.count_of("犬"), 0);
    }

    #[test]
    fn test_system_records_ignored() {
        let config = AnalysisConfig::default();
        let records = vec![Record::system(1, ts(15), "アリスがグループに参加しました")];
        assert!(word_frequency(&records, &ScriptTokenizer, &config).is_empty());
    }

    #[test]
    fn test_ordering_and_ties() {
        let config = AnalysisConfig::default();
        let records = vec![
            Record::message(1, ts(15), "A", "寿司 天丼"),
            Record::message(2, ts(15), "B", "天丼 蕎麦"),
        ];
        let freq = word_frequency(&records, &ScriptTokenizer, &config);
        let words: Vec<&str> = freq.words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(words, vec!["天丼", "寿司", "蕎麦"]);
        assert_eq!(freq.top(1).len(), 1);
        assert_eq!(freq.top(10).len(), 3);
    }

    #[test]
    fn test_speaker_and_daily_variants() {
        let config = AnalysisConfig::default();
        let records = vec![
            Record::message(1, ts(15), "A", "寿司"),
            Record::message(2, ts(16), "B", "蕎麦"),
        ];
        let by_b = speaker_word_frequency(&records, "B", &ScriptTokenizer, &config);
        assert_eq!(by_b.words.len(), 1);
        assert_eq!(by_b.words[0].word, "蕎麦");

        let day = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let on_15 = daily_word_frequency(&records, day, &ScriptTokenizer, &config);
        assert_eq!(on_15.words[0].word, "寿司");
    }
}
