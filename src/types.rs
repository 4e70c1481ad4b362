use opencv::core::Mat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub video: VideoConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoConfig {
    pub input_path: String,
    #[serde(default = "default_output_path")]
    pub output_path: String,
    #[serde(default = "default_events_path")]
    pub events_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

fn default_output_path() -> String {
    "processed_video.avi".to_string()
}

fn default_events_path() -> String {
    "events.txt".to_string()
}

/// A decoded BGR frame and its position on the container's clock.
#[derive(Debug)]
pub struct Frame {
    pub mat: Mat,
    pub timestamp_ms: f64,
}
