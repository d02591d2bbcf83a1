use crate::club::InjuryConfig;
use crate::r#match::EngineConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchdayConfig {
    pub engine: EngineConfig,
    pub injury: InjuryConfig,
    pub orchestrator: OrchestratorConfig,
    pub live: LiveConfig,
    pub scheduler: SchedulerConfig,
    /// Fixed seed for reproducible runs. Fresh entropy per match when absent.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    pub finalize_max_retries: u32,
    pub reset_max_retries: u32,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        OrchestratorConfig {
            finalize_max_retries: 3,
            reset_max_retries: 3,
        }
    }
}

/// Real-time pacing of the live view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveConfig {
    pub tick_interval_ms: u64,
    /// Real seconds for the 90 displayed minutes.
    pub match_duration_secs: u64,
    pub pre_match_secs: u64,
    pub half_time_secs: u64,
    pub extra_time_enabled: bool,
    pub penalties_secs: u64,
    /// Events sent with every snapshot.
    pub recent_events: usize,
    pub channel_capacity: usize,
}

impl Default for LiveConfig {
    fn default() -> Self {
        LiveConfig {
            tick_interval_ms: 5_000,
            match_duration_secs: 180,
            pre_match_secs: 5,
            half_time_secs: 10,
            extra_time_enabled: false,
            penalties_secs: 20,
            recent_events: 5,
            channel_capacity: 64,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub interval_secs: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig { interval_secs: 30 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let config: MatchdayConfig =
            serde_json::from_str(r#"{ "engine": { "actions_min": 10 }, "live": { "match_duration_secs": 90 } }"#)
                .unwrap();

        assert_eq!(config.engine.actions_min, 10);
        assert_eq!(config.engine.actions_max, 25);
        assert_eq!(config.live.match_duration_secs, 90);
        assert_eq!(config.live.tick_interval_ms, 5_000);
        assert_eq!(config.orchestrator.finalize_max_retries, 3);
    }
}
