use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::util::duration::ConfigDuration;

/// Tuning for the phi accrual failure detector. The reference values live in
/// `reference.toml` and are what `Default` hands out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureDetectorSettings {
    /// Phi value above which a peer is considered unavailable. A low
    /// threshold is prone to wrong suspicions but detects real crashes
    /// quickly; a high threshold makes fewer mistakes but needs more time.
    pub threshold: f64,
    /// Number of inter-arrival samples kept for the mean and standard
    /// deviation estimate.
    #[serde(rename = "max-sample-size")]
    pub max_sample_size: usize,
    /// Floor for the modeled standard deviation. Too low a deviation makes
    /// the detector oversensitive to sudden but normal jitter.
    #[serde(rename = "min-std-deviation")]
    pub min_std_deviation: ConfigDuration,
    /// Silence tolerated on top of the modeled mean before suspicion rises,
    /// covering occasional pauses such as garbage collection or network drop.
    #[serde(rename = "acceptable-heartbeat-pause")]
    pub acceptable_heartbeat_pause: ConfigDuration,
    /// Interval used to seed the statistical model before any real
    /// inter-arrival time has been observed.
    #[serde(rename = "first-heartbeat-estimate")]
    pub first_heartbeat_estimate: ConfigDuration,
}

impl FailureDetectorSettings {
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.threshold > 0.0) {
            return Err(Error::NonPositiveSetting {
                key: "failure-detector.threshold",
            });
        }
        if self.max_sample_size == 0 {
            return Err(Error::NonPositiveSetting {
                key: "failure-detector.max-sample-size",
            });
        }
        if self.min_std_deviation.to_std_duration().is_zero() {
            return Err(Error::NonPositiveSetting {
                key: "failure-detector.min-std-deviation",
            });
        }
        if self.first_heartbeat_estimate.to_std_duration().is_zero() {
            return Err(Error::NonPositiveSetting {
                key: "failure-detector.first-heartbeat-estimate",
            });
        }
        Ok(())
    }
}

impl Default for FailureDetectorSettings {
    fn default() -> Self {
        Self {
            threshold: 8.0,
            max_sample_size: 200,
            min_std_deviation: ConfigDuration::from_millis(500),
            acceptable_heartbeat_pause: ConfigDuration::from_millis(0),
            first_heartbeat_estimate: ConfigDuration::from_millis(500),
        }
    }
}
