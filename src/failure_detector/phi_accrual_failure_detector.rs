use std::collections::VecDeque;

use tracing::warn;

use crate::config::failure_detector::FailureDetectorSettings;
use crate::error::{Error, Result};
use crate::failure_detector::FailureDetector;

/// Upper bound on phi, returned when the modeled probability of the observed
/// silence rounds to 1 in floating point. Keeps threshold comparisons ordered
/// where the raw logarithm would produce infinity.
pub const MAX_PHI: f64 = 1.0e9;

/// Implementation of 'The Phi Accrual Failure Detector' by Hayashibara et al. as defined in their paper:
/// [https://oneofus.la/have-emacs-will-hack/files/HDY04.pdf]
///
/// The suspicion level of failure is given by a value called φ (phi),
/// expressed on a scale that is dynamically adjusted to reflect current
/// network conditions:
///
/// {{{
/// φ = -log10(1 - F(timeSinceLastHeartbeat))
/// }}}
///
/// where F is the cumulative distribution function of a normal distribution
/// with mean and standard deviation estimated from historical heartbeat
/// inter-arrival times. A configurable threshold decides when φ counts as a
/// failure.
///
/// Timestamps are supplied by the caller in milliseconds rather than read
/// from a clock, so a detector fed the same heartbeat sequence always
/// produces the same verdicts. One instance monitors exactly one peer and
/// expects a single logical owner; shared use must be serialized externally.
#[derive(Debug)]
pub struct PhiAccrualFailureDetector {
    settings: FailureDetectorSettings,
    history: HeartbeatHistory,
    last_timestamp: Option<i64>,
}

impl PhiAccrualFailureDetector {
    pub fn new(settings: FailureDetectorSettings) -> Result<Self> {
        settings.validate()?;
        let history = HeartbeatHistory::new(settings.max_sample_size);
        Ok(Self {
            settings,
            history,
            last_timestamp: None,
        })
    }

    pub fn settings(&self) -> &FailureDetectorSettings {
        &self.settings
    }

    /// Suspicion level at `timestamp_millis`. Zero until the first heartbeat
    /// has been recorded, since an unmonitored peer is not suspected.
    pub fn phi(&self, timestamp_millis: i64) -> f64 {
        match self.last_timestamp {
            None => 0.0,
            Some(last) => {
                let time_diff = (timestamp_millis - last) as f64;
                let mean =
                    self.history.mean() + self.acceptable_heartbeat_pause_millis() as f64;
                let std_deviation =
                    self.ensure_valid_std_deviation(self.history.std_deviation());
                Self::phi_of(time_diff, mean, std_deviation)
            }
        }
    }

    /// Calculation of phi, derived from the cumulative distribution function
    /// for the N(mean, std_deviation) normal distribution, given by
    /// 1.0 / (1.0 + exp(-y * (1.5976 + 0.070566 * y * y)))
    /// where y = (x - mean) / standard_deviation
    /// This is an approximation defined in β Mathematics Handbook (Logistic
    /// approximation). Error is 0.00014 at +- 3.16
    /// The branch on `time_diff > mean` evaluates the distribution tail
    /// directly so large arguments do not cancel to zero.
    fn phi_of(time_diff: f64, mean: f64, std_deviation: f64) -> f64 {
        let y = (time_diff - mean) / std_deviation;
        let e = f64::exp(-y * (1.5976 + 0.070566 * y * y));
        let phi = if time_diff > mean {
            -f64::log10(e / (1.0 + e))
        } else {
            -f64::log10(1.0 - 1.0 / (1.0 + e))
        };
        if phi.is_finite() {
            phi
        } else {
            MAX_PHI
        }
    }

    fn ensure_valid_std_deviation(&self, std_deviation: f64) -> f64 {
        std_deviation.max(self.settings.min_std_deviation.as_millis() as f64)
    }

    fn acceptable_heartbeat_pause_millis(&self) -> i64 {
        self.settings.acceptable_heartbeat_pause.as_millis() as i64
    }

    fn first_heartbeat_estimate_millis(&self) -> i64 {
        self.settings.first_heartbeat_estimate.as_millis() as i64
    }
}

impl FailureDetector for PhiAccrualFailureDetector {
    fn is_available(&self, timestamp_millis: i64) -> bool {
        self.phi(timestamp_millis) < self.settings.threshold
    }

    fn is_monitoring(&self) -> bool {
        self.last_timestamp.is_some()
    }

    fn heartbeat(&mut self, timestamp_millis: i64) -> Result<()> {
        match self.last_timestamp {
            None => {
                // seed the model so mean and deviation are defined before any
                // real inter-arrival time has been observed
                self.history.add(self.first_heartbeat_estimate_millis());
            }
            Some(last) => {
                let interval = timestamp_millis - last;
                if interval < 0 {
                    return Err(Error::TimestampRegression {
                        timestamp: timestamp_millis,
                        last,
                    });
                }
                let acceptable_pause = self.acceptable_heartbeat_pause_millis();
                if acceptable_pause > 0 && interval >= acceptable_pause / 3 * 2 {
                    warn!(
                        "heartbeat interval is growing too large: {} millis",
                        interval
                    );
                }
                self.history.add(interval);
            }
        }
        self.last_timestamp = Some(timestamp_millis);
        Ok(())
    }
}

/// Bounded sliding window of inter-heartbeat intervals with running sum and
/// sum of squares, keeping mean and variance O(1) per update. Adding at
/// capacity evicts the oldest sample and retracts its contribution from both
/// aggregates before the new contribution lands.
#[derive(Debug, Clone)]
struct HeartbeatHistory {
    max_sample_size: usize,
    intervals: VecDeque<i64>,
    interval_sum: i64,
    squared_interval_sum: i64,
}

impl HeartbeatHistory {
    fn new(max_sample_size: usize) -> Self {
        Self {
            max_sample_size,
            intervals: VecDeque::with_capacity(max_sample_size),
            interval_sum: 0,
            squared_interval_sum: 0,
        }
    }

    fn add(&mut self, interval: i64) {
        debug_assert!(interval >= 0, "negative interval {} reached the history", interval);
        if self.intervals.len() >= self.max_sample_size {
            self.drop_oldest();
        }
        self.intervals.push_back(interval);
        self.interval_sum += interval;
        self.squared_interval_sum += interval * interval;
    }

    fn drop_oldest(&mut self) {
        if let Some(oldest) = self.intervals.pop_front() {
            self.interval_sum -= oldest;
            self.squared_interval_sum -= oldest * oldest;
        }
    }

    /// Callers guarantee at least one sample before asking for statistics.
    fn mean(&self) -> f64 {
        debug_assert!(!self.intervals.is_empty(), "mean of an empty history");
        self.interval_sum as f64 / self.intervals.len() as f64
    }

    /// Clamped at zero; near-identical samples can cancel slightly negative.
    fn variance(&self) -> f64 {
        let mean = self.mean();
        (self.squared_interval_sum as f64 / self.intervals.len() as f64 - mean * mean).max(0.0)
    }

    fn std_deviation(&self) -> f64 {
        self.variance().sqrt()
    }
}
