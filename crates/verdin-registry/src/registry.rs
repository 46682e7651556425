use crate::error::{RegisterError, ResolveError, SuiteInitError};
use std::collections::BTreeMap;
use std::fmt;
use verdin_config::HarnessConfig;
use verdin_core::{Suite, SuiteHandle};

type SuiteCtor = Box<dyn Fn() -> Result<Box<dyn Suite>, SuiteInitError> + Send + Sync>;
type SuiteGuard = Box<dyn Fn() -> Result<(), String> + Send + Sync>;

struct SuiteEntry {
    ctor: SuiteCtor,
    guard: Option<SuiteGuard>,
}

/// Registry of named suite constructors.
///
/// Entries are keyed by identifier in a `BTreeMap` so introspection order is
/// deterministic. Registration proves the suite capability through the
/// [`Suite`] bound; resolution never has to check the shape of what a
/// constructor produced.
#[derive(Default)]
pub struct SuiteRegistry {
    entries: BTreeMap<String, SuiteEntry>,
}

impl fmt::Debug for SuiteRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuiteRegistry")
            .field("suites", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl SuiteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a suite type constructible with no arguments.
    pub fn register<S>(&mut self, id: impl Into<String>) -> Result<(), RegisterError>
    where
        S: Suite + Default + 'static,
    {
        self.register_with(id, || Ok(Box::new(S::default())))
    }

    /// Register a suite with a fallible constructor.
    pub fn register_with(
        &mut self,
        id: impl Into<String>,
        ctor: impl Fn() -> Result<Box<dyn Suite>, SuiteInitError> + Send + Sync + 'static,
    ) -> Result<(), RegisterError> {
        self.insert(
            id.into(),
            SuiteEntry {
                ctor: Box::new(ctor),
                guard: None,
            },
        )
    }

    /// Register a suite that is only available when `guard` allows it, e.g.
    /// coverage that needs an external service or an opt-in flag. The guard
    /// returns the denial reason.
    pub fn register_guarded(
        &mut self,
        id: impl Into<String>,
        guard: impl Fn() -> Result<(), String> + Send + Sync + 'static,
        ctor: impl Fn() -> Result<Box<dyn Suite>, SuiteInitError> + Send + Sync + 'static,
    ) -> Result<(), RegisterError> {
        self.insert(
            id.into(),
            SuiteEntry {
                ctor: Box::new(ctor),
                guard: Some(Box::new(guard)),
            },
        )
    }

    fn insert(&mut self, id: String, entry: SuiteEntry) -> Result<(), RegisterError> {
        if self.entries.contains_key(&id) {
            return Err(RegisterError::DuplicateId { id });
        }

        self.entries.insert(id, entry);
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Registered identifiers, in deterministic order.
    pub fn suite_ids(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Resolve `name` to a freshly constructed suite handle.
    ///
    /// Every call runs the registered constructor again; handles are never
    /// shared between calls.
    pub fn resolve(&self, name: &str) -> Result<SuiteHandle, ResolveError> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| ResolveError::UnknownSuite {
                name: name.to_string(),
            })?;

        if let Some(guard) = &entry.guard {
            if let Err(reason) = guard() {
                return Err(ResolveError::Unavailable {
                    name: name.to_string(),
                    reason,
                });
            }
        }

        let suite = (entry.ctor)().map_err(|source| ResolveError::Construction {
            name: name.to_string(),
            source,
        })?;

        Ok(SuiteHandle::new(name, suite))
    }

    /// Resolve the suite named by the configuration.
    ///
    /// The identifier is read from `config` at call time (see
    /// [`HarnessConfig::suite_identifier`]), so configuration changes between
    /// calls are honored.
    pub fn resolve_configured(&self, config: &HarnessConfig) -> Result<SuiteHandle, ResolveError> {
        let name = config
            .suite_identifier()
            .ok_or(ResolveError::NotConfigured)?;
        self.resolve(&name)
    }

    /// Tolerant variant of [`SuiteRegistry::resolve_configured`] for harness
    /// bootstrap: on failure, log one diagnostic under the `verdin.registry`
    /// target and return `None` so the harness proceeds with no tests.
    pub fn resolve_configured_or_empty(&self, config: &HarnessConfig) -> Option<SuiteHandle> {
        match self.resolve_configured(config) {
            Ok(handle) => Some(handle),
            Err(err) => {
                tracing::error!(
                    target: "verdin.registry",
                    error = %err,
                    "failed to resolve configured suite"
                );
                None
            }
        }
    }
}
