//! Kind registry
//!
//! Provides [`KindRegistry`], the static mapping from artifact kind to its
//! delta hook and rendering metadata.

use crate::config::StreamConfig;
use crate::hook::DeltaHook;
use crate::kinds;
use canvas_artifact::{ArtifactKind, Metadata};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Definition of one artifact kind
#[derive(Clone)]
pub struct KindDefinition {
    kind: ArtifactKind,
    description: String,
    initial_metadata: Metadata,
    on_delta: Option<Arc<dyn DeltaHook>>,
}

impl KindDefinition {
    /// Create definition without a hook
    #[must_use]
    pub fn new(kind: ArtifactKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            initial_metadata: Metadata::Null,
            on_delta: None,
        }
    }

    /// Attach a delta hook
    #[inline]
    #[must_use]
    pub fn with_hook(mut self, hook: impl DeltaHook + 'static) -> Self {
        let hook: Arc<dyn DeltaHook> = Arc::new(hook);
        self.on_delta = Some(hook);
        self
    }

    /// Set the metadata the UI seeds when this kind is first shown
    #[inline]
    #[must_use]
    pub fn with_initial_metadata(mut self, metadata: Metadata) -> Self {
        self.initial_metadata = metadata;
        self
    }

    /// Drop the hook, keeping the rendering metadata
    #[inline]
    #[must_use]
    pub fn without_hook(mut self) -> Self {
        self.on_delta = None;
        self
    }

    /// Kind this definition describes
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    /// Human-readable description
    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Initial metadata value
    #[inline]
    #[must_use]
    pub fn initial_metadata(&self) -> &Metadata {
        &self.initial_metadata
    }

    /// Delta hook, if the kind registers one
    #[inline]
    #[must_use]
    pub fn hook(&self) -> Option<&dyn DeltaHook> {
        self.on_delta.as_deref()
    }
}

impl fmt::Debug for KindDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KindDefinition")
            .field("kind", &self.kind)
            .field("description", &self.description)
            .field("initial_metadata", &self.initial_metadata)
            .field("has_hook", &self.on_delta.is_some())
            .finish()
    }
}

/// Registry of artifact kind definitions
///
/// Built once through [`KindRegistry::builder`] (or one of the default
/// constructors) and never mutated afterwards; share it behind an `Arc`.
#[derive(Debug, Default, Clone)]
pub struct KindRegistry {
    definitions: HashMap<ArtifactKind, KindDefinition>,
}

impl KindRegistry {
    /// Create empty registry
    ///
    /// Every lookup misses, so only the generic transition runs.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            definitions: HashMap::new(),
        }
    }

    /// Start building a registry
    #[inline]
    #[must_use]
    pub fn builder() -> KindRegistryBuilder {
        KindRegistryBuilder::default()
    }

    /// Create registry with the built-in text, code, image and sheet kinds
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::from_config(&StreamConfig::default())
    }

    /// Create registry with the built-in kinds, minus the hooks of kinds the
    /// configuration disables
    #[must_use]
    pub fn from_config(config: &StreamConfig) -> Self {
        kinds::builtin_definitions()
            .into_iter()
            .fold(Self::builder(), |builder, definition| {
                if config.is_kind_disabled(definition.kind()) {
                    builder.register(definition.without_hook())
                } else {
                    builder.register(definition)
                }
            })
            .build()
    }

    /// Look up a kind definition
    #[inline]
    #[must_use]
    pub fn lookup(&self, kind: ArtifactKind) -> Option<&KindDefinition> {
        self.definitions.get(&kind)
    }

    /// Look up a kind's delta hook
    #[inline]
    #[must_use]
    pub fn hook(&self, kind: ArtifactKind) -> Option<&dyn DeltaHook> {
        self.lookup(kind).and_then(KindDefinition::hook)
    }

    /// Check if a kind is registered
    #[inline]
    #[must_use]
    pub fn contains(&self, kind: ArtifactKind) -> bool {
        self.definitions.contains_key(&kind)
    }

    /// Registered definitions, ordered by kind
    #[must_use]
    pub fn definitions(&self) -> Vec<&KindDefinition> {
        let mut definitions: Vec<_> = self.definitions.values().collect();
        definitions.sort_by_key(|d| d.kind());
        definitions
    }

    /// Get number of registered kinds
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Builder for [`KindRegistry`]
#[derive(Debug, Default)]
pub struct KindRegistryBuilder {
    definitions: HashMap<ArtifactKind, KindDefinition>,
}

impl KindRegistryBuilder {
    /// Register a definition, replacing any earlier one for the same kind
    #[inline]
    #[must_use]
    pub fn register(mut self, definition: KindDefinition) -> Self {
        self.definitions.insert(definition.kind(), definition);
        self
    }

    /// Freeze the registry
    #[must_use]
    pub fn build(self) -> KindRegistry {
        KindRegistry {
            definitions: self.definitions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hook::HookError;
    use crate::store::ArtifactStore;
    use canvas_artifact::Delta;

    fn noop(_: &Delta, _: &ArtifactStore) -> Result<(), HookError> {
        Ok(())
    }

    #[test]
    fn registry_new_empty() {
        let registry = KindRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.lookup(ArtifactKind::Text).is_none());
        assert!(registry.hook(ArtifactKind::Text).is_none());
    }

    #[test]
    fn registry_with_defaults() {
        let registry = KindRegistry::with_defaults();
        assert_eq!(registry.len(), 4);
        for kind in ArtifactKind::ALL {
            assert!(registry.contains(kind));
            assert!(registry.hook(kind).is_some());
        }
    }

    #[test]
    fn registry_definitions_sorted() {
        let registry = KindRegistry::with_defaults();
        let kinds: Vec<_> = registry.definitions().iter().map(|d| d.kind()).collect();
        assert_eq!(kinds, ArtifactKind::ALL.to_vec());
    }

    #[test]
    fn registry_from_config_disables_hooks() {
        let config = StreamConfig::new().with_disabled_kind(ArtifactKind::Code);
        let registry = KindRegistry::from_config(&config);

        assert!(registry.contains(ArtifactKind::Code));
        assert!(registry.hook(ArtifactKind::Code).is_none());
        assert!(registry.hook(ArtifactKind::Text).is_some());
    }

    #[test]
    fn builder_register_replaces() {
        let registry = KindRegistry::builder()
            .register(KindDefinition::new(ArtifactKind::Text, "first"))
            .register(KindDefinition::new(ArtifactKind::Text, "second").with_hook(noop))
            .build();

        assert_eq!(registry.len(), 1);
        let definition = registry.lookup(ArtifactKind::Text).unwrap();
        assert_eq!(definition.description(), "second");
        assert!(definition.hook().is_some());
    }

    #[test]
    fn definition_without_hook() {
        let definition = KindDefinition::new(ArtifactKind::Image, "img")
            .with_hook(noop)
            .with_initial_metadata(serde_json::json!({"zoom": 1}))
            .without_hook();
        assert!(definition.hook().is_none());
        assert_eq!(definition.initial_metadata()["zoom"], 1);
    }

    #[test]
    fn definition_debug_hides_hook() {
        let definition = KindDefinition::new(ArtifactKind::Code, "code").with_hook(noop);
        let debug = format!("{definition:?}");
        assert!(debug.contains("has_hook: true"));
    }
}
