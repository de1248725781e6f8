use std::fmt::Debug;
use std::hash::Hash;

use crate::error::Result;

pub trait FailureDetectorRegistry: Debug + Send {
    type A: Hash + Eq;

    fn is_available(&self, resource: &Self::A, timestamp_millis: i64) -> bool;

    fn is_monitoring(&self, resource: &Self::A) -> bool;

    fn heartbeat(&mut self, resource: Self::A, timestamp_millis: i64) -> Result<()>;

    fn remove(&mut self, resource: &Self::A);

    fn reset(&mut self);
}
