//! Application Configuration
//!
//! Configuration for the Tracking application layer.

/// Tracking application configuration
#[derive(Debug, Clone)]
pub struct TrackingConfig {
    /// Most stages accepted in a single push
    pub max_stages_per_push: usize,
    /// Highest stage index accepted
    pub max_stage_index: u32,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            max_stages_per_push: 256,
            max_stage_index: 10_000,
        }
    }
}
