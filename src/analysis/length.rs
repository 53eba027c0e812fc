//! Message length statistics.
//!
//! Lengths are counted in characters, not bytes, over message-kind records.

use serde::Serialize;

use super::{Summary, group_by_speaker};
use crate::config::AnalysisConfig;
use crate::record::Record;

/// One histogram bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LengthBucket {
    /// `"0-10"`, `"11-50"`, ... and `"101+"` for the open last bucket
    pub label: String,
    pub count: usize,
}

/// Length statistics of one speaker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeakerLength {
    pub speaker: String,
    #[serde(flatten)]
    pub stats: Summary,
    pub total_chars: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MessageLengthStats {
    pub overall: Summary,
    pub buckets: Vec<LengthBucket>,
    /// Speakers in first-appearance order
    pub by_speaker: Vec<SpeakerLength>,
}

/// Computes length statistics.
///
/// Bucket bounds are inclusive upper limits: with the default `[10, 50, 100]`
/// a 10-character message lands in `0-10` and a 101-character one in `101+`.
pub fn message_length(records: &[Record], config: &AnalysisConfig) -> MessageLengthStats {
    let lengths: Vec<(&str, usize)> = records
        .iter()
        .filter(|r| r.is_message())
        .map(|r| (r.sender(), r.char_len()))
        .collect();

    let values: Vec<f64> = lengths.iter().map(|(_, len)| *len as f64).collect();

    let by_speaker = group_by_speaker(lengths.iter().map(|(s, len)| (*s, *len as f64)))
        .into_iter()
        .map(|(speaker, values)| SpeakerLength {
            speaker: speaker.to_string(),
            total_chars: values.iter().sum::<f64>() as usize,
            stats: Summary::of(&values),
        })
        .collect();

    MessageLengthStats {
        overall: Summary::of(&values),
        buckets: bucketize(lengths.iter().map(|(_, len)| *len), &config.length_buckets),
        by_speaker,
    }
}

fn bucketize(lengths: impl Iterator<Item = usize>, bounds: &[usize]) -> Vec<LengthBucket> {
    let mut buckets: Vec<LengthBucket> = Vec::with_capacity(bounds.len() + 1);
    let mut lower = 0;
    for bound in bounds {
        buckets.push(LengthBucket {
            label: format!("{lower}-{bound}"),
            count: 0,
        });
        lower = bound.saturating_add(1);
    }
    buckets.push(LengthBucket {
        label: format!("{lower}+"),
        count: 0,
    });

    for len in lengths {
        let slot = bounds.iter().position(|b| len <= *b).unwrap_or(bounds.len());
        buckets[slot].count += 1;
    }
    buckets
}
