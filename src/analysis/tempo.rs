//! Sending pace and conversation tempo.
//!
//! Three views over message-kind records in timestamp order:
//!
//! - **per speaker**: gaps between a speaker's own consecutive messages, up to
//!   [`tempo_cutoff_minutes`](crate::config::AnalysisConfig::tempo_cutoff_minutes)
//! - **per hour of day**: gaps between consecutive messages sent in that hour,
//!   same cutoff
//! - **overall**: gaps between any two adjacent messages, up to
//!   [`overall_gap_cutoff_minutes`](crate::config::AnalysisConfig::overall_gap_cutoff_minutes)
//!
//! Mean gaps are then mapped onto five tiers.

use serde::Serialize;

use super::Summary;
use crate::config::{AnalysisConfig, TierThresholds};
use crate::record::{Record, chronological_order};

/// Sending pace tier of a speaker or hour (default bounds 1, 3, 10, 30 minutes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedTier {
    VeryFast,
    Fast,
    Moderate,
    Slow,
    VerySlow,
}

impl SpeedTier {
    /// Maps a mean gap in minutes onto a tier.
    pub fn from_mean_gap(minutes: f64, thresholds: &TierThresholds) -> Self {
        match thresholds.level(minutes) {
            0 => SpeedTier::VeryFast,
            1 => SpeedTier::Fast,
            2 => SpeedTier::Moderate,
            3 => SpeedTier::Slow,
            _ => SpeedTier::VerySlow,
        }
    }
}

/// Tempo tier of the whole conversation (default bounds 2, 5, 15, 60 minutes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TempoTier {
    VeryActive,
    Active,
    Normal,
    Relaxed,
    Quiet,
}

impl TempoTier {
    /// Maps a mean gap in minutes onto a tier.
    pub fn from_mean_gap(minutes: f64, thresholds: &TierThresholds) -> Self {
        match thresholds.level(minutes) {
            0 => TempoTier::VeryActive,
            1 => TempoTier::Active,
            2 => TempoTier::Normal,
            3 => TempoTier::Relaxed,
            _ => TempoTier::Quiet,
        }
    }
}

/// Pace of one speaker. Only speakers with at least one counted gap appear.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeakerTempo {
    pub speaker: String,
    pub mean_gap: f64,
    pub min_gap: f64,
    pub max_gap: f64,
    /// Counted gaps plus one
    pub burst_messages: usize,
    pub tier: SpeedTier,
}

/// Pace within one hour of the day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyTempo {
    pub hour: u32,
    pub mean_gap: f64,
    /// Every message sent in this hour, counted gap or not
    pub messages: usize,
    pub tier: SpeedTier,
}

/// Conversation-wide tempo.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OverallTempo {
    /// Summary of the counted gaps
    pub gaps: Summary,
    pub total_messages: usize,
    /// Absent when no gap was counted
    pub tier: Option<TempoTier>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SendTempo {
    pub overall: OverallTempo,
    /// First-appearance order
    pub by_speaker: Vec<SpeakerTempo>,
    /// Ascending hour, only hours with a counted gap
    pub by_hour: Vec<HourlyTempo>,
}

/// Computes sending pace and conversation tempo.
pub fn send_tempo(records: &[Record], config: &AnalysisConfig) -> SendTempo {
    let messages: Vec<&Record> = chronological_order(records)
        .into_iter()
        .filter(|r| r.is_message())
        .collect();

    let overall_gaps = gaps_within(&messages, config.overall_gap_cutoff_minutes);
    let overall = OverallTempo {
        gaps: Summary::of(&overall_gaps),
        total_messages: messages.len(),
        tier: (!overall_gaps.is_empty()).then(|| {
            TempoTier::from_mean_gap(Summary::of(&overall_gaps).mean, &config.tempo_tiers)
        }),
    };

    let mut speakers: Vec<&str> = Vec::new();
    for record in records.iter().filter(|r| r.is_message()) {
        if !speakers.contains(&record.sender()) {
            speakers.push(record.sender());
        }
    }
    let by_speaker = speakers
        .into_iter()
        .filter_map(|speaker| {
            let own: Vec<&Record> = messages
                .iter()
                .copied()
                .filter(|r| r.sender() == speaker)
                .collect();
            let gaps = gaps_within(&own, config.tempo_cutoff_minutes);
            if gaps.is_empty() {
                return None;
            }
            let stats = Summary::of(&gaps);
            Some(SpeakerTempo {
                speaker: speaker.to_string(),
                mean_gap: stats.mean,
                min_gap: stats.min,
                max_gap: stats.max,
                burst_messages: stats.count + 1,
                tier: SpeedTier::from_mean_gap(stats.mean, &config.speed_tiers),
            })
        })
        .collect();

    let by_hour = (0..24)
        .filter_map(|hour| {
            let in_hour: Vec<&Record> = messages
                .iter()
                .copied()
                .filter(|r| r.hour() == hour)
                .collect();
            if in_hour.len() < 2 {
                return None;
            }
            let gaps = gaps_within(&in_hour, config.tempo_cutoff_minutes);
            if gaps.is_empty() {
                return None;
            }
            let mean = Summary::of(&gaps).mean;
            Some(HourlyTempo {
                hour,
                mean_gap: mean,
                messages: in_hour.len(),
                tier: SpeedTier::from_mean_gap(mean, &config.speed_tiers),
            })
        })
        .collect();

    SendTempo {
        overall,
        by_speaker,
        by_hour,
    }
}

/// Gaps in minutes between adjacent entries of a timestamp-ordered slice,
/// keeping those at or below `cutoff`.
fn gaps_within(ordered: &[&Record], cutoff: i64) -> Vec<f64> {
    ordered
        .windows(2)
        .map(|pair| (pair[1].timestamp() - pair[0].timestamp()).num_minutes())
        .filter(|gap| *gap <= cutoff)
        .map(|gap| gap as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(line: usize, day: u32, h: u32, m: u32, sender: &str) -> Record {
        let ts = NaiveDate::from_ymd_opt(2025, 1, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap();
        Record::message(line, ts, sender, "x")
    }

    #[test]
    fn test_speed_tier_boundaries() {
        let t = AnalysisConfig::default().speed_tiers;
        assert_eq!(SpeedTier::from_mean_gap(1.0, &t), SpeedTier::VeryFast);
        assert_eq!(SpeedTier::from_mean_gap(3.0, &t), SpeedTier::Fast);
        assert_eq!(SpeedTier::from_mean_gap(10.0, &t), SpeedTier::Moderate);
        assert_eq!(SpeedTier::from_mean_gap(30.0, &t), SpeedTier::Slow);
        assert_eq!(SpeedTier::from_mean_gap(30.5, &t), SpeedTier::VerySlow);
    }

    #[test]
    fn test_tempo_tier_boundaries() {
        let t = AnalysisConfig::default().tempo_tiers;
        assert_eq!(TempoTier::from_mean_gap(2.0, &t), TempoTier::VeryActive);
        assert_eq!(TempoTier::from_mean_gap(5.0, &t), TempoTier::Active);
        assert_eq!(TempoTier::from_mean_gap(15.0, &t), TempoTier::Normal);
        assert_eq!(TempoTier::from_mean_gap(60.0, &t), TempoTier::Relaxed);
        assert_eq!(TempoTier::from_mean_gap(61.0, &t), TempoTier::Quiet);
    }

    #[test]
    fn test_empty() {
        let tempo = send_tempo(&[], &AnalysisConfig::default());
        assert_eq!(tempo.overall.total_messages, 0);
        assert!(tempo.overall.tier.is_none());
        assert!(tempo.by_speaker.is_empty());
        assert!(tempo.by_hour.is_empty());
    }

    #[test]
    fn test_single_message_has_no_tier() {
        let tempo = send_tempo(&[at(1, 15, 9, 0, "A")], &AnalysisConfig::default());
        assert_eq!(tempo.overall.total_messages, 1);
        assert!(tempo.overall.tier.is_none());
    }

    #[test]
    fn test_speaker_bursts() {
        let records = vec![
            at(1, 15, 9, 0, "A"),
            at(2, 15, 9, 1, "A"),
            at(3, 15, 9, 2, "B"),
            at(4, 15, 9, 3, "A"),
            at(5, 15, 10, 0, "A"),
        ];
        let tempo = send_tempo(&records, &AnalysisConfig::default());

        // A: gaps 1, 2, 57 -> 57 is above the 30 minute cutoff.
        let a = &tempo.by_speaker[0];
        assert_eq!(a.speaker, "A");
        assert_eq!(a.burst_messages, 3);
        assert_eq!(a.mean_gap, 1.5);
        assert_eq!(a.tier, SpeedTier::Fast);

        // B has a single message, so no gaps and no entry.
        assert_eq!(tempo.by_speaker.len(), 1);
    }

    #[test]
    fn test_overall_gaps() {
        let records = vec![
            at(1, 15, 9, 0, "A"),
            at(2, 15, 9, 4, "B"),
            at(3, 15, 11, 0, "A"),
        ];
        let tempo = send_tempo(&records, &AnalysisConfig::default());
        assert_eq!(tempo.overall.gaps.count, 1);
        assert_eq!(tempo.overall.gaps.mean, 4.0);
        assert_eq!(tempo.overall.total_messages, 3);
        assert_eq!(tempo.overall.tier, Some(TempoTier::Active));
    }

    #[test]
    fn test_by_hour() {
        let records = vec![
            at(1, 15, 9, 0, "A"),
            at(2, 15, 9, 10, "B"),
            at(3, 15, 9, 40, "A"),
            at(4, 15, 21, 0, "A"),
        ];
        let tempo = send_tempo(&records, &AnalysisConfig::default());
        assert_eq!(tempo.by_hour.len(), 1);
        let nine = &tempo.by_hour[0];
        assert_eq!(nine.hour, 9);
        assert_eq!(nine.messages, 3);
        assert_eq!(nine.mean_gap, 20.0);
        assert_eq!(nine.tier, SpeedTier::Slow);
    }
}
