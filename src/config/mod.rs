use config::builder::DefaultState;
use config::{File, FileFormat, Source};
use serde::{Deserialize, Serialize};

use crate::config::failure_detector::FailureDetectorSettings;
use crate::REFERENCE;

pub mod failure_detector;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    #[serde(rename = "failure-detector")]
    pub failure_detector: FailureDetectorSettings,
}

impl DetectorConfig {
    pub fn builder() -> DetectorConfigBuilder {
        DetectorConfigBuilder::default()
    }
}

#[derive(Debug)]
pub struct DetectorConfigBuilder {
    builder: config::ConfigBuilder<DefaultState>,
}

impl Default for DetectorConfigBuilder {
    fn default() -> Self {
        // the embedded reference config goes in first, caller sources override it
        let builder = config::ConfigBuilder::<DefaultState>::default()
            .add_source(File::from_str(REFERENCE, FileFormat::Toml));
        Self { builder }
    }
}

impl DetectorConfigBuilder {
    pub fn add_source<T>(self, source: T) -> Self
    where
        T: Source + Send + Sync + 'static,
    {
        Self {
            builder: self.builder.add_source(source),
        }
    }

    pub fn build(self) -> anyhow::Result<DetectorConfig> {
        let detector_config = self.builder.build()?.try_deserialize::<DetectorConfig>()?;
        Ok(detector_config)
    }
}
