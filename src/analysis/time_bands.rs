//! Records per hour-of-day band.

use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::record::Record;

/// Count for one configured band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BandCount {
    pub band: String,
    pub count: usize,
}

/// Record counts per band, in configuration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TimeDistribution {
    pub bands: Vec<BandCount>,
}

impl TimeDistribution {
    /// Returns the count for `band`, if it is configured.
    pub fn get(&self, band: &str) -> Option<usize> {
        self.bands.iter().find(|b| b.band == band).map(|b| b.count)
    }
}

/// Counts every record, system notifications included, into the configured bands.
///
/// A record is counted in each band containing its hour; with the default
/// table that is exactly one. An empty input gives zero for every band.
///
/// ```rust
/// use talklog::analysis::time_distribution;
/// use talklog::config::AnalysisConfig;
/// use talklog::parser::TalkParser;
///
/// let log = TalkParser::new().parse_str(
///     "[2025/1/15 23:10] A: late\n[2025/1/16 2:30] B: later\n[2025/1/16 9:00] A: up",
/// )?;
/// let dist = time_distribution(&log.records, &AnalysisConfig::default());
/// assert_eq!(dist.get("late_night"), Some(2));
/// assert_eq!(dist.get("morning"), Some(1));
/// # Ok::<(), talklog::TalkError>(())
/// ```
pub fn time_distribution(records: &[Record], config: &AnalysisConfig) -> TimeDistribution {
    let bands = config
        .time_bands
        .iter()
        .map(|band| BandCount {
            band: band.name.clone(),
            count: records.iter().filter(|r| band.contains(r.hour())).count(),
        })
        .collect();
    TimeDistribution { bands }
}
