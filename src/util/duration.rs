use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Duration as it appears in configuration sources, either a bare
/// millisecond count or a `{ seconds = n, milliseconds = m }` table.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigDuration {
    Millis(u64),
    Parts {
        #[serde(default)]
        seconds: u64,
        #[serde(default)]
        milliseconds: u64,
    },
}

impl ConfigDuration {
    pub fn from_millis(millis: u64) -> Self {
        Self::Millis(millis)
    }

    pub fn from_secs(secs: u64) -> Self {
        Self::Parts {
            seconds: secs,
            milliseconds: 0,
        }
    }

    pub fn to_std_duration(&self) -> Duration {
        match *self {
            Self::Millis(millis) => Duration::from_millis(millis),
            Self::Parts {
                seconds,
                milliseconds,
            } => Duration::from_secs(seconds) + Duration::from_millis(milliseconds),
        }
    }

    pub fn as_millis(&self) -> u64 {
        self.to_std_duration().as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde::Deserialize;

    use crate::util::duration::ConfigDuration;

    #[derive(Debug, Deserialize)]
    struct Holder {
        timeout: ConfigDuration,
    }

    #[test]
    fn test_bare_millis() {
        let holder: Holder = toml::from_str("timeout = 250").unwrap();
        assert_eq!(holder.timeout.to_std_duration(), Duration::from_millis(250));
    }

    #[test]
    fn test_parts_table() {
        let holder: Holder = toml::from_str("timeout = { seconds = 2, milliseconds = 500 }").unwrap();
        assert_eq!(holder.timeout.to_std_duration(), Duration::from_millis(2500));
        assert_eq!(holder.timeout.as_millis(), 2500);
    }
}
