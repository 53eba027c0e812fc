//! Configuration types for parsing and analysis.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`ParserConfig`] - how [`TalkParser`](crate::parser::TalkParser) treats
//!   the source document
//! - [`AnalysisConfig`] - tables and cutoffs used by the aggregators in
//!   [`analysis`](crate::analysis)
//!
//! Every field has a default, so a config file only needs the keys it wants
//! to change:
//!
//! ```rust
//! use talklog::config::AnalysisConfig;
//!
//! let config = AnalysisConfig::from_json_str(r#"{ "latency_cutoff_minutes": 30 }"#)?;
//! assert_eq!(config.latency_cutoff_minutes, 30);
//! assert_eq!(config.tempo_cutoff_minutes, 30);
//! assert_eq!(config.time_bands.len(), 7);
//! # Ok::<(), talklog::TalkError>(())
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TalkError};
use crate::record::STICKER_MARKER;

/// Configuration for talk export parsing.
///
/// # Example
///
/// ```rust
/// use talklog::config::ParserConfig;
///
/// let config = ParserConfig::new()
///     .with_skip_system_messages(true)
///     .with_legacy_encoding(false);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Drop system notifications instead of emitting them as records (default: false)
    pub skip_system_messages: bool,

    /// Fall back to Shift_JIS when the bytes are not UTF-8 (default: true)
    pub legacy_encoding: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            skip_system_messages: false,
            legacy_encoding: true,
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to skip system messages.
    #[must_use]
    pub fn with_skip_system_messages(mut self, skip: bool) -> Self {
        self.skip_system_messages = skip;
        self
    }

    /// Enables or disables the Shift_JIS fallback.
    #[must_use]
    pub fn with_legacy_encoding(mut self, enabled: bool) -> Self {
        self.legacy_encoding = enabled;
        self
    }
}

/// A named hour-of-day band, half-open `[start, end)`.
///
/// A band whose `start` is greater than its `end` wraps past midnight and
/// covers `[start, 24) ∪ [0, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBand {
    /// Key used in the distribution output
    pub name: String,
    /// First hour included (0-23)
    pub start: u32,
    /// First hour excluded (0-24)
    pub end: u32,
}

impl TimeBand {
    /// Creates a band.
    pub fn new(name: impl Into<String>, start: u32, end: u32) -> Self {
        Self {
            name: name.into(),
            start,
            end,
        }
    }

    /// Returns `true` if `hour` falls inside this band.
    ///
    /// ```rust
    /// use talklog::config::TimeBand;
    ///
    /// let late = TimeBand::new("late_night", 23, 5);
    /// assert!(late.contains(23));
    /// assert!(late.contains(2));
    /// assert!(!late.contains(5));
    /// ```
    pub fn contains(&self, hour: u32) -> bool {
        if self.start <= self.end {
            self.start <= hour && hour < self.end
        } else {
            hour >= self.start || hour < self.end
        }
    }
}

/// Four ascending inclusive upper bounds splitting a value range into five tiers.
///
/// Tier `i` holds values `<= bounds[i]`; anything above the last bound is tier 4.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    /// Ascending inclusive upper bounds, in minutes
    pub bounds: [f64; 4],
}

impl TierThresholds {
    /// Creates thresholds from four ascending bounds.
    pub fn new(bounds: [f64; 4]) -> Self {
        Self { bounds }
    }

    /// Returns the tier index (0-4) of `value`.
    pub fn level(&self, value: f64) -> usize {
        self.bounds
            .iter()
            .position(|bound| value <= *bound)
            .unwrap_or(self.bounds.len())
    }
}

/// Tables and cutoffs used by the statistics aggregators.
///
/// # Example
///
/// ```rust
/// use talklog::config::{AnalysisConfig, TimeBand};
///
/// let config = AnalysisConfig::new()
///     .with_latency_cutoff(45)
///     .with_time_bands(vec![
///         TimeBand::new("day", 6, 18),
///         TimeBand::new("night", 18, 6),
///     ])
///     .with_stop_word("草");
/// assert!(config.is_stop_word("草"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Words never counted by word frequency
    pub stop_words: HashSet<String>,

    /// Named hour bands for the time-of-day distribution
    pub time_bands: Vec<TimeBand>,

    /// Ascending inclusive upper bounds of the message-length histogram
    pub length_buckets: Vec<usize>,

    /// Literal token the app writes in place of a sticker
    pub sticker_marker: String,

    /// Largest cross-sender gap counted as a reply, in minutes (default: 60)
    pub latency_cutoff_minutes: i64,

    /// Largest same-sender gap counted as a burst, in minutes (default: 30)
    pub tempo_cutoff_minutes: i64,

    /// Speed tiers for per-speaker and per-hour tempo (default: 1, 3, 10, 30)
    pub speed_tiers: TierThresholds,

    /// Largest gap counted in the overall conversation tempo, in minutes (default: 60)
    pub overall_gap_cutoff_minutes: i64,

    /// Tempo tiers for the whole conversation (default: 2, 5, 15, 60)
    pub tempo_tiers: TierThresholds,

    /// Number of emoji kept in the top list (default: 10)
    pub top_emoji: usize,
}

const DEFAULT_STOP_WORDS: &[&str] = &[
    "の", "に", "は", "を", "が", "で", "と", "から", "まで", "より", "や", "か", "も", "など",
    "って", "です", "ます", "だ", "お", "ご", "さん", "ちゃん", "くん", "ね", "よ", "な", "わ",
    "あ", "い", "う", "え", "ん", "っ", "ー", "！", "？", "。", "、", "「", "」", "（", "）",
    "【", "】", "『", "』", "・",
];

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            stop_words: DEFAULT_STOP_WORDS.iter().map(|w| (*w).to_string()).collect(),
            time_bands: vec![
                TimeBand::new("early_morning", 5, 8),
                TimeBand::new("morning", 8, 12),
                TimeBand::new("midday", 12, 14),
                TimeBand::new("afternoon", 14, 18),
                TimeBand::new("evening", 18, 20),
                TimeBand::new("night", 20, 23),
                TimeBand::new("late_night", 23, 5),
            ],
            length_buckets: vec![10, 50, 100],
            sticker_marker: STICKER_MARKER.to_string(),
            latency_cutoff_minutes: 60,
            tempo_cutoff_minutes: 30,
            speed_tiers: TierThresholds::new([1.0, 3.0, 10.0, 30.0]),
            overall_gap_cutoff_minutes: 60,
            tempo_tiers: TierThresholds::new([2.0, 5.0, 15.0, 60.0]),
            top_emoji: 10,
        }
    }
}

impl AnalysisConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TalkError::Json`] for malformed JSON and
    /// [`TalkError::InvalidConfig`] if the tables are inconsistent.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`TalkError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`from_json_str`](Self::from_json_str).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Checks the tables for values the aggregators cannot use.
    ///
    /// # Errors
    ///
    /// Returns [`TalkError::InvalidConfig`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        for band in &self.time_bands {
            if band.start > 23 || band.end > 24 || band.start == band.end {
                return Err(TalkError::invalid_config(format!(
                    "time band '{}' has invalid hours {}-{}",
                    band.name, band.start, band.end
                )));
            }
        }
        if self.length_buckets.windows(2).any(|w| w[0] >= w[1]) {
            return Err(TalkError::invalid_config(
                "length_buckets must be strictly ascending",
            ));
        }
        for (name, tiers) in [("speed_tiers", &self.speed_tiers), ("tempo_tiers", &self.tempo_tiers)] {
            if tiers.bounds.windows(2).any(|w| w[0] >= w[1]) {
                return Err(TalkError::invalid_config(format!(
                    "{name} bounds must be strictly ascending"
                )));
            }
        }
        if self.sticker_marker.is_empty() {
            return Err(TalkError::invalid_config("sticker_marker must not be empty"));
        }
        Ok(())
    }

    /// Returns `true` if `word` is a stop-word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Adds a stop-word.
    #[must_use]
    pub fn with_stop_word(mut self, word: impl Into<String>) -> Self {
        self.stop_words.insert(word.into());
        self
    }

    /// Replaces the time-band table.
    #[must_use]
    pub fn with_time_bands(mut self, bands: Vec<TimeBand>) -> Self {
        self.time_bands = bands;
        self
    }

    /// Replaces the message-length histogram bounds.
    #[must_use]
    pub fn with_length_buckets(mut self, bounds: Vec<usize>) -> Self {
        self.length_buckets = bounds;
        self
    }

    /// Sets the response-latency cutoff in minutes.
    #[must_use]
    pub fn with_latency_cutoff(mut self, minutes: i64) -> Self {
        self.latency_cutoff_minutes = minutes;
        self
    }

    /// Sets the send-tempo cutoff in minutes.
    #[must_use]
    pub fn with_tempo_cutoff(mut self, minutes: i64) -> Self {
        self.tempo_cutoff_minutes = minutes;
        self
    }

    /// Sets the overall-gap cutoff in minutes.
    #[must_use]
    pub fn with_overall_gap_cutoff(mut self, minutes: i64) -> Self {
        self.overall_gap_cutoff_minutes = minutes;
        self
    }

    /// Sets how many emoji the top list keeps.
    #[must_use]
    pub fn with_top_emoji(mut self, n: usize) -> Self {
        self.top_emoji = n;
        self
    }
}
