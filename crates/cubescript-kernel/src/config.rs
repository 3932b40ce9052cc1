//! Evaluation limits.

use serde::{Deserialize, Serialize};

/// Default cap on nested calls, brackets-with-interpolation included.
pub const DEFAULT_MAX_DEPTH: usize = 200;

/// Tunables for one [`Evaluator`](crate::Evaluator).
///
/// Missing fields take their defaults when deserialized, so hosts can keep
/// this in a larger config file and only override what they need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Deepest allowed nesting of expressions. Source text is user input,
    /// so this guards the native stack.
    pub max_depth: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EvalConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_depth() {
        assert_eq!(EvalConfig::default().max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config: EvalConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EvalConfig::default());
    }

    #[test]
    fn depth_round_trips_through_json() {
        let config = EvalConfig::default().with_max_depth(16);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"max_depth":16}"#);
        let back: EvalConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.max_depth, 16);
    }
}
