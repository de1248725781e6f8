pub mod default_failure_detector_registry;
pub mod failure_detector_registry;
pub mod phi_accrual_failure_detector;

use crate::error::Result;

/// Per-peer availability estimate driven by caller-supplied timestamps, so a
/// recorded heartbeat sequence can be replayed deterministically.
pub trait FailureDetector: Send {
    fn is_available(&self, timestamp_millis: i64) -> bool;

    fn is_monitoring(&self) -> bool;

    fn heartbeat(&mut self, timestamp_millis: i64) -> Result<()>;
}
