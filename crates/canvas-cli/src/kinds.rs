//! Registered kind listing

use canvas_stream::{KindRegistry, StreamConfig};
use serde::Serialize;

/// One registered kind, as shown by `canvas kinds`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KindInfo {
    /// Kind tag
    pub kind: String,
    /// Description
    pub description: String,
    /// Whether a delta hook is active
    pub hook: bool,
}

/// Kinds the given stream configuration registers, ordered by kind
#[must_use]
pub fn list_kinds(config: &StreamConfig) -> Vec<KindInfo> {
    KindRegistry::from_config(config)
        .definitions()
        .into_iter()
        .map(|definition| KindInfo {
            kind: definition.kind().to_string(),
            description: definition.description().to_string(),
            hook: definition.hook().is_some(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvas_artifact::ArtifactKind;

    #[test]
    fn lists_builtin_kinds_in_order() {
        let kinds: Vec<_> = list_kinds(&StreamConfig::default())
            .into_iter()
            .map(|k| k.kind)
            .collect();
        assert_eq!(kinds, vec!["text", "code", "image", "sheet"]);
    }

    #[test]
    fn disabled_kind_listed_without_hook() {
        let config = StreamConfig::new().with_disabled_kind(ArtifactKind::Image);
        let image = list_kinds(&config)
            .into_iter()
            .find(|k| k.kind == "image")
            .unwrap();
        assert!(!image.hook);
    }
}
