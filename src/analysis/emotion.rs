//! Sentiment annotations.
//!
//! Model selection and inference are not part of this crate. A caller loads
//! whatever model it likes once, wraps it in an [`EmotionScorer`], and passes
//! it by reference into [`score_records`]. The crate never holds a model
//! itself.
//!
//! # Example
//!
//! ```rust
//! use talklog::analysis::emotion::{
//!     EmotionLabel, EmotionScorer, EmotionScores, daily_emotion_summary, score_records,
//! };
//! use talklog::parser::TalkParser;
//!
//! /// Toy scorer: anything with an exclamation mark is positive.
//! struct Excited;
//!
//! impl EmotionScorer for Excited {
//!     fn score(&self, text: &str) -> EmotionScores {
//!         if text.contains('!') {
//!             EmotionScores::from_label(EmotionLabel::Positive)
//!         } else {
//!             EmotionScores::from_label(EmotionLabel::Neutral)
//!         }
//!     }
//! }
//!
//! let log = TalkParser::new().parse_str(
//!     "[2025/1/15 9:00] Alice: yay!\n[2025/1/15 9:01] Bob: ok\n[2025/1/15 9:02] Bob joined",
//! )?;
//! let annotations = score_records(&log.records, &Excited);
//! assert_eq!(annotations.len(), 3);
//! assert_eq!(annotations[0].scores.positive, 0.8);
//!
//! let daily = daily_emotion_summary(&annotations);
//! assert_eq!(daily.len(), 1);
//! # Ok::<(), talklog::TalkError>(())
//! ```

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::record::Record;

/// Number of message bodies handed to the scorer per call.
pub const DEFAULT_BATCH_SIZE: usize = 32;

/// Probability-like scores for one text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionScores {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

/// Dominant sentiment label, as many classifiers report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionLabel {
    Positive,
    Negative,
    Neutral,
}

impl EmotionScores {
    /// Scores used when no model is available.
    pub const UNIFORM: EmotionScores = EmotionScores {
        positive: 0.33,
        negative: 0.33,
        neutral: 0.34,
    };

    /// Scores given to system notifications.
    pub const SYSTEM: EmotionScores = EmotionScores {
        positive: 0.0,
        negative: 0.0,
        neutral: 1.0,
    };

    /// Converts a single classifier label into scores (0.8 for the label, 0.1 otherwise).
    pub fn from_label(label: EmotionLabel) -> Self {
        let (positive, negative, neutral) = match label {
            EmotionLabel::Positive => (0.8, 0.1, 0.1),
            EmotionLabel::Negative => (0.1, 0.8, 0.1),
            EmotionLabel::Neutral => (0.1, 0.1, 0.8),
        };
        Self {
            positive,
            negative,
            neutral,
        }
    }

    /// Returns the score for `label`.
    pub fn get(&self, label: EmotionLabel) -> f64 {
        match label {
            EmotionLabel::Positive => self.positive,
            EmotionLabel::Negative => self.negative,
            EmotionLabel::Neutral => self.neutral,
        }
    }
}

/// A sentiment model owned by the caller.
pub trait EmotionScorer {
    /// Scores one text.
    fn score(&self, text: &str) -> EmotionScores;

    /// Scores a batch. Override when the model is faster in batches.
    ///
    /// Must return one entry per input text, in order.
    fn score_batch(&self, texts: &[&str]) -> Vec<EmotionScores> {
        texts.iter().map(|t| self.score(t)).collect()
    }
}

/// Scorer returning [`EmotionScores::UNIFORM`] for every text.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformScorer;

impl EmotionScorer for UniformScorer {
    fn score(&self, _text: &str) -> EmotionScores {
        EmotionScores::UNIFORM
    }
}

/// Scores attached to one record, keyed by its line number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmotionAnnotation {
    pub line_number: usize,
    pub date: NaiveDate,
    pub scores: EmotionScores,
}

/// Scores every record with the default batch size.
///
/// The result has one annotation per record, in the same order.
pub fn score_records(records: &[Record], scorer: &dyn EmotionScorer) -> Vec<EmotionAnnotation> {
    score_records_batched(records, scorer, DEFAULT_BATCH_SIZE)
}

/// Scores every record, sending message bodies to `scorer` in batches.
///
/// System notifications are not sent to the scorer and get
/// [`EmotionScores::SYSTEM`]. Empty bodies get [`EmotionScores::UNIFORM`]. If
/// the scorer returns the wrong number of results for a batch, the whole batch
/// falls back to uniform scores.
pub fn score_records_batched(
    records: &[Record],
    scorer: &dyn EmotionScorer,
    batch_size: usize,
) -> Vec<EmotionAnnotation> {
    let messages: Vec<&Record> = records
        .iter()
        .filter(|r| r.is_message() && !r.body().trim().is_empty())
        .collect();

    let mut scored: HashMap<usize, EmotionScores> = HashMap::with_capacity(messages.len());
    let total = messages.len();
    for (i, batch) in messages.chunks(batch_size.max(1)).enumerate() {
        let texts: Vec<&str> = batch.iter().map(|r| r.body()).collect();
        let mut results = scorer.score_batch(&texts);
        if results.len() != batch.len() {
            tracing::warn!(
                expected = batch.len(),
                got = results.len(),
                "emotion scorer returned a mismatched batch, using uniform scores"
            );
            results = vec![EmotionScores::UNIFORM; batch.len()];
        }
        for (record, scores) in batch.iter().zip(results) {
            scored.insert(record.line_number(), scores);
        }
        tracing::debug!(
            done = (i * batch_size.max(1) + batch.len()).min(total),
            total,
            "emotion scoring"
        );
    }

    records
        .iter()
        .map(|r| EmotionAnnotation {
            line_number: r.line_number(),
            date: r.date(),
            scores: if r.is_system() {
                EmotionScores::SYSTEM
            } else {
                scored
                    .get(&r.line_number())
                    .copied()
                    .unwrap_or(EmotionScores::UNIFORM)
            },
        })
        .collect()
}

/// Summed scores for one date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyEmotion {
    pub date: NaiveDate,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

/// Sums annotations per date, ascending by date.
pub fn daily_emotion_summary(annotations: &[EmotionAnnotation]) -> Vec<DailyEmotion> {
    let mut days: BTreeMap<NaiveDate, DailyEmotion> = BTreeMap::new();
    for a in annotations {
        let day = days.entry(a.date).or_insert(DailyEmotion {
            date: a.date,
            positive: 0.0,
            negative: 0.0,
            neutral: 0.0,
        });
        day.positive += a.scores.positive;
        day.negative += a.scores.negative;
        day.neutral += a.scores.neutral;
    }
    days.into_values().collect()
}

/// Returns the records whose `label` score is at least `threshold`.
///
/// Records without an annotation are excluded.
pub fn filter_by_emotion<'a>(
    records: &'a [Record],
    annotations: &[EmotionAnnotation],
    label: EmotionLabel,
    threshold: f64,
) -> Vec<&'a Record> {
    let by_line: HashMap<usize, &EmotionScores> = annotations
        .iter()
        .map(|a| (a.line_number, &a.scores))
        .collect();
    records
        .iter()
        .filter(|r| {
            by_line
                .get(&r.line_number())
                .is_some_and(|s| s.get(label) >= threshold)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn ts(day: u32, h: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, day)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    struct Counting {
        calls: Cell<usize>,
    }

    impl EmotionScorer for Counting {
        fn score(&self, text: &str) -> EmotionScores {
            if text.contains("嫌") {
                EmotionScores::from_label(EmotionLabel::Negative)
            } else {
                EmotionScores::from_label(EmotionLabel::Positive)
            }
        }

        fn score_batch(&self, texts: &[&str]) -> Vec<EmotionScores> {
            self.calls.set(self.calls.get() + 1);
            texts.iter().map(|t| self.score(t)).collect()
        }
    }

    struct Broken;

    impl EmotionScorer for Broken {
        fn score(&self, _text: &str) -> EmotionScores {
            EmotionScores::from_label(EmotionLabel::Positive)
        }

        fn score_batch(&self, _texts: &[&str]) -> Vec<EmotionScores> {
            Vec::new()
        }
    }

    #[test]
    fn test_uniform_scorer() {
        let records = vec![Record::message(1, ts(15, 9), "A", "hi")];
        let out = score_records(&records, &UniformScorer);
        assert_eq!(out[0].scores, EmotionScores::UNIFORM);
    }

    #[test]
    fn test_system_records_fixed_and_not_sent() {
        let records = vec![
            Record::system(1, ts(15, 9), "joined"),
            Record::message(2, ts(15, 9), "A", "嫌だ"),
        ];
        let scorer = Counting { calls: Cell::new(0) };
        let out = score_records(&records, &scorer);
        assert_eq!(out[0].scores, EmotionScores::SYSTEM);
        assert_eq!(out[1].scores.negative, 0.8);
        assert_eq!(out[1].line_number, 2);
        assert_eq!(scorer.calls.get(), 1);
    }

    #[test]
    fn test_batching() {
        let records: Vec<Record> = (1..=5)
            .map(|i| Record::message(i, ts(15, 9), "A", "good"))
            .collect();
        let scorer = Counting { calls: Cell::new(0) };
        let out = score_records_batched(&records, &scorer, 2);
        assert_eq!(out.len(), 5);
        assert_eq!(scorer.calls.get(), 3);
    }

    #[test]
    fn test_mismatched_batch_falls_back() {
        let records = vec![Record::message(1, ts(15, 9), "A", "good")];
        let out = score_records(&records, &Broken);
        assert_eq!(out[0].scores, EmotionScores::UNIFORM);
    }

    #[test]
    fn test_daily_summary_sums() {
        let records = vec![
            Record::message(1, ts(16, 9), "A", "good"),
            Record::message(2, ts(15, 9), "A", "嫌"),
            Record::system(3, ts(15, 10), "left"),
        ];
        let scorer = Counting { calls: Cell::new(0) };
        let daily = daily_emotion_summary(&score_records(&records, &scorer));
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        assert!((daily[0].negative - 0.8).abs() < 1e-9);
        assert!((daily[0].neutral - 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_filter_by_emotion() {
        let records = vec![
            Record::message(1, ts(15, 9), "A", "good"),
            Record::message(2, ts(15, 9), "B", "嫌"),
        ];
        let scorer = Counting { calls: Cell::new(0) };
        let annotations = score_records(&records, &scorer);
        let negative = filter_by_emotion(&records, &annotations, EmotionLabel::Negative, 0.5);
        assert_eq!(negative.len(), 1);
        assert_eq!(negative[0].sender(), "B");

        assert!(filter_by_emotion(&records, &[], EmotionLabel::Positive, 0.0).is_empty());
    }
}
