//! Language-keyed adapter registry with first-match file routing.

use camino::Utf8Path;

use crate::adapter::CallGraphAdapter;

/// Registered adapters, kept in registration order.
#[derive(Default)]
pub struct AdapterRegistry {
    adapters: Vec<Box<dyn CallGraphAdapter>>,
}

impl std::fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("languages", &self.languages().collect::<Vec<_>>())
            .finish()
    }
}

impl AdapterRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an adapter under its language tag.
    ///
    /// Registering a language again replaces the earlier adapter in place, so
    /// routing precedence stays with the original registration slot.
    pub fn register(&mut self, adapter: Box<dyn CallGraphAdapter>) {
        let existing = self
            .adapters
            .iter_mut()
            .find(|slot| slot.language() == adapter.language());
        match existing {
            Some(slot) => *slot = adapter,
            None => self.adapters.push(adapter),
        }
    }

    /// Returns the first adapter, in registration order, supporting `path`.
    #[must_use]
    pub fn adapter_for_file(&self, path: &Utf8Path) -> Option<&dyn CallGraphAdapter> {
        self.adapters
            .iter()
            .find(|adapter| adapter.supports_file(path))
            .map(AsRef::as_ref)
    }

    /// Mutable variant of [`Self::adapter_for_file`].
    pub fn adapter_for_file_mut(
        &mut self,
        path: &Utf8Path,
    ) -> Option<&mut (dyn CallGraphAdapter + 'static)> {
        self.adapters
            .iter_mut()
            .find(|adapter| adapter.supports_file(path))
            .map(AsMut::as_mut)
    }

    /// Returns the adapter registered for `language`.
    #[must_use]
    pub fn get(&self, language: &str) -> Option<&dyn CallGraphAdapter> {
        self.adapters
            .iter()
            .find(|adapter| adapter.language() == language)
            .map(AsRef::as_ref)
    }

    /// Returns the registered language tags in registration order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.adapters.iter().map(|adapter| adapter.language())
    }

    /// Returns the number of registered adapters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    /// Returns whether no adapters are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    pub(crate) fn iter_mut(
        &mut self,
    ) -> impl Iterator<Item = &mut (dyn CallGraphAdapter + 'static)> {
        self.adapters.iter_mut().map(AsMut::as_mut)
    }
}
