//! Mock Configuration
//!
//! Configuration types for [`Mock`](crate::Mock) instances.

use crate::result::MockResult;
use serde::{Deserialize, Serialize};

/// Default cap on recorded invocations per mock
pub const DEFAULT_MAX_RECORDED_INVOCATIONS: usize = 10_000;

/// How a mock answers a call that no setup accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MockBehavior {
    /// Unmatched calls fail with `MockError::NoMatchingSetup`
    #[default]
    Strict,
    /// Unmatched calls are answered by the mock's fallback
    Loose,
}

impl MockBehavior {
    /// Check if this is strict behavior
    #[must_use]
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// Configuration for a mock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    /// Name used in error messages and logs
    pub name: String,
    /// Answer policy for unmatched calls
    pub behavior: MockBehavior,
    /// Record every call for later inspection
    pub record_invocations: bool,
    /// Maximum invocations kept; older ones are dropped first
    pub max_recorded_invocations: usize,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            name: "mock".to_string(),
            behavior: MockBehavior::Strict,
            record_invocations: true,
            max_recorded_invocations: DEFAULT_MAX_RECORDED_INVOCATIONS,
        }
    }
}

impl MockConfig {
    /// Create a new config with the given mock name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> MockResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the answer policy
    #[must_use]
    pub fn with_behavior(mut self, behavior: MockBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Enable/disable invocation recording
    #[must_use]
    pub fn with_recording(mut self, enabled: bool) -> Self {
        self.record_invocations = enabled;
        self
    }

    /// Set the recorded invocation cap
    #[must_use]
    pub fn with_max_recorded_invocations(mut self, max: usize) -> Self {
        self.max_recorded_invocations = max;
        self
    }
}
