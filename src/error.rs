use thiserror::Error;

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{key} must be > 0")]
    NonPositiveSetting { key: &'static str },
    #[error("heartbeat timestamp {timestamp} is earlier than the last recorded timestamp {last}")]
    TimestampRegression { timestamp: i64, last: i64 },
}
