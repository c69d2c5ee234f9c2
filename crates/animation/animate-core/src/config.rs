//! Core configuration for animate-core.

use serde::{Deserialize, Serialize};

/// Configuration for engine sizing.
/// Missing fields fall back to their defaults when deserialized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial capacity hint for live instance storage.
    pub initial_instances: usize,
    /// Initial capacity hint for the template registry.
    pub initial_templates: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_instances: 64,
            initial_templates: 16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_uses_defaults() {
        let cfg: Config = serde_json::from_str(r#"{ "initial_instances": 512 }"#).unwrap();
        assert_eq!(cfg.initial_instances, 512);
        assert_eq!(cfg.initial_templates, Config::default().initial_templates);
    }
}
