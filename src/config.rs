//! Fixed playback configuration: stream endpoint, engine options and timing.

use serde::Serialize;
use std::time::Duration;

/// Path the live FLV stream is served from.
pub const STREAM_ENDPOINT: &str = "/live";
/// Container type handed to the engine.
pub const STREAM_MEDIA_TYPE: &str = "flv";
/// Period of the reconnect loop.
pub const RETRY_PERIOD_MS: u64 = 5_000;
/// Patience before an initial silent load is treated as a stall.
pub const WATCHDOG_DELAY_MS: u64 = 5_000;
/// DOM id of the `<video>` element the player attaches to.
pub const VIDEO_ELEMENT_ID: &str = "videoElement";

/// First argument of `mpegts.createPlayer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaDataSource {
    #[serde(rename = "type")]
    pub media_type: String,
    pub url: String,
}

impl Default for MediaDataSource {
    fn default() -> Self {
        Self {
            media_type: STREAM_MEDIA_TYPE.to_string(),
            url: STREAM_ENDPOINT.to_string(),
        }
    }
}

/// Second argument of `mpegts.createPlayer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    pub is_live: bool,
    pub live_buffer_latency_chasing: bool,
    pub auto_cleanup_source_buffer: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            is_live: true,
            live_buffer_latency_chasing: true,
            auto_cleanup_source_buffer: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub retry_period: Duration,
    pub watchdog_delay: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            retry_period: Duration::from_millis(RETRY_PERIOD_MS),
            watchdog_delay: Duration::from_millis(WATCHDOG_DELAY_MS),
        }
    }
}

/// Everything the controller needs to build a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerConfig {
    pub source: MediaDataSource,
    pub engine: EngineConfig,
    pub timing: Timing,
}
