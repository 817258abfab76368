//! Stream configuration

use canvas_artifact::ArtifactKind;
use serde::{Deserialize, Serialize};

/// Reducer and registry configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Log every folded delta at trace level
    pub trace_deltas: bool,
    /// Kinds whose hooks are not registered (generic transition only)
    pub disabled_kinds: Vec<ArtifactKind>,
}

impl StreamConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With per-delta logging
    #[inline]
    #[must_use]
    pub fn with_trace_deltas(mut self, enabled: bool) -> Self {
        self.trace_deltas = enabled;
        self
    }

    /// With the hook of `kind` disabled
    #[inline]
    #[must_use]
    pub fn with_disabled_kind(mut self, kind: ArtifactKind) -> Self {
        if !self.disabled_kinds.contains(&kind) {
            self.disabled_kinds.push(kind);
        }
        self
    }

    /// Check if the hook of `kind` is disabled
    #[inline]
    #[must_use]
    pub fn is_kind_disabled(&self, kind: ArtifactKind) -> bool {
        self.disabled_kinds.contains(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_everything() {
        let config = StreamConfig::new();
        assert!(!config.trace_deltas);
        assert!(ArtifactKind::ALL.iter().all(|k| !config.is_kind_disabled(*k)));
    }

    #[test]
    fn disabled_kind_not_duplicated() {
        let config = StreamConfig::new()
            .with_disabled_kind(ArtifactKind::Sheet)
            .with_disabled_kind(ArtifactKind::Sheet);
        assert_eq!(config.disabled_kinds, vec![ArtifactKind::Sheet]);
    }

    #[test]
    fn deserializes_partial_table() {
        let config: StreamConfig =
            serde_json::from_str(r#"{"disabled_kinds": ["image"]}"#).unwrap();
        assert!(config.is_kind_disabled(ArtifactKind::Image));
        assert!(!config.trace_deltas);
    }
}
