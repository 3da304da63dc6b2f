//! Shared world state for multi-binding resolution BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use multibind::multi_binding::adapters::memory::InMemoryLocator;
use multibind::multi_binding::services::MultiBindingRegistry;
use rstest::fixture;

/// Registry type used by the BDD world.
pub type TestRegistry = MultiBindingRegistry<InMemoryLocator, DefaultClock>;

/// Logging capability resolved by the scenarios.
pub trait Logger: Send + Sync {
    /// Identifies the implementation for assertions.
    fn name(&self) -> &'static str;
}

/// File-backed logger implementation.
#[derive(Debug)]
pub struct FileLogger;

impl Logger for FileLogger {
    fn name(&self) -> &'static str {
        "file"
    }
}

/// Console logger implementation.
#[derive(Debug)]
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn name(&self) -> &'static str {
        "console"
    }
}

/// Capability that no scenario registers implementations for.
pub trait Metrics: Send + Sync {}

/// Scenario world for multi-binding resolution behaviour tests.
pub struct ResolutionWorld {
    /// The locator backing the registry.
    pub locator: Arc<InMemoryLocator>,
    /// The registry under test.
    pub registry: TestRegistry,
    /// Loggers resolved directly through the registry.
    pub resolved: Vec<Arc<dyn Logger>>,
    /// Metrics resolved directly through the registry.
    pub resolved_metrics: Option<Vec<Arc<dyn Metrics>>>,
    /// Logger sequence answered by the locator's query API.
    pub via_locator: Option<Vec<Arc<dyn Logger>>>,
}

impl ResolutionWorld {
    /// Creates a world with an empty locator and registry.
    #[must_use]
    pub fn new() -> Self {
        let locator = Arc::new(InMemoryLocator::new());
        let registry = MultiBindingRegistry::new(Arc::clone(&locator), Arc::new(DefaultClock));
        Self {
            locator,
            registry,
            resolved: Vec::new(),
            resolved_metrics: None,
            via_locator: None,
        }
    }
}

impl Default for ResolutionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ResolutionWorld {
    ResolutionWorld::default()
}
