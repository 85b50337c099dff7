//! Strategy registration and lazy instantiation
//!
//! The registry maps names to strategy constructors and caches one
//! instance per name. Caching is not an optimization: strategies carry
//! session-local state (baseline chains, view records) that must survive
//! across calls, so repeated lookups have to yield the same instance.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::canvas::SharedCanvas;
use crate::error::{DraftError, Result};
use crate::standard::StandardDefinition;
use crate::strategy::{
    DimensionDrawer, DrawingIntent, DrawingStrategy, ShapeDrawer, SymbolDrawer, ViewDrawer,
};
use crate::types::Handle;

/// Shared, interiorly mutable strategy instance
pub type SharedStrategy = Rc<RefCell<dyn DrawingStrategy>>;

/// Constructor bound to a strategy name
pub type StrategyConstructor =
    fn(SharedCanvas, Arc<StandardDefinition>) -> Result<SharedStrategy>;

/// Name-keyed strategy factory with per-name instance caching
pub struct StrategyRegistry {
    constructors: IndexMap<String, StrategyConstructor>,
    instances: IndexMap<String, SharedStrategy>,
}

impl StrategyRegistry {
    /// An empty registry with nothing bound
    pub fn new() -> StrategyRegistry {
        StrategyRegistry {
            constructors: IndexMap::new(),
            instances: IndexMap::new(),
        }
    }

    /// A registry with the four built-in strategies bound
    pub fn with_defaults() -> StrategyRegistry {
        let mut registry = StrategyRegistry::new();
        registry.register_override("basic_shapes", |canvas, standard| {
            Ok(Rc::new(RefCell::new(ShapeDrawer::new(canvas, standard))))
        });
        registry.register_override("dimensions", |canvas, standard| {
            Ok(Rc::new(RefCell::new(DimensionDrawer::new(canvas, standard))))
        });
        registry.register_override("symbols", |canvas, standard| {
            Ok(Rc::new(RefCell::new(SymbolDrawer::new(canvas, standard))))
        });
        registry.register_override("views", |canvas, standard| {
            Ok(Rc::new(RefCell::new(ViewDrawer::new(canvas, standard))))
        });
        registry
    }

    /// Bind a constructor to a new name
    ///
    /// Fails if the name is already bound; use
    /// [`register_override`](StrategyRegistry::register_override) to
    /// replace a binding deliberately.
    pub fn register(&mut self, name: &str, constructor: StrategyConstructor) -> Result<()> {
        if self.constructors.contains_key(name) {
            return Err(DraftError::DuplicateStrategy(name.to_string()));
        }
        self.constructors.insert(name.to_string(), constructor);
        debug!(name, "strategy registered");
        Ok(())
    }

    /// Bind a constructor, replacing any existing binding
    ///
    /// A cached instance built by the previous constructor is dropped so
    /// the next create goes through the new one.
    pub fn register_override(&mut self, name: &str, constructor: StrategyConstructor) {
        self.constructors.insert(name.to_string(), constructor);
        if self.instances.shift_remove(name).is_some() {
            debug!(name, "cached strategy instance dropped for override");
        }
    }

    /// Whether a constructor is bound to this name
    pub fn is_registered(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    /// Number of instantiated strategies
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Drop all cached instances, keeping the constructors
    ///
    /// Test isolation hook; a fresh instance is built on the next create.
    pub fn clear_instances(&mut self) {
        self.instances.clear();
        debug!("strategy instances cleared");
    }

    /// Resolve a strategy instance, constructing it on first use
    ///
    /// Repeated calls with the same name return the same instance. A
    /// constructor failure caches nothing.
    pub fn create(
        &mut self,
        name: &str,
        canvas: &SharedCanvas,
        standard: &Arc<StandardDefinition>,
    ) -> Result<SharedStrategy> {
        if let Some(instance) = self.instances.get(name) {
            return Ok(Rc::clone(instance));
        }
        let constructor = self
            .constructors
            .get(name)
            .copied()
            .ok_or_else(|| self.unknown(name))?;
        let instance = constructor(Rc::clone(canvas), Arc::clone(standard))?;
        self.instances.insert(name.to_string(), Rc::clone(&instance));
        debug!(name, "strategy instantiated");
        Ok(instance)
    }

    /// Route an intent to the strategy owning its family
    pub fn dispatch(
        &mut self,
        intent: DrawingIntent,
        canvas: &SharedCanvas,
        standard: &Arc<StandardDefinition>,
    ) -> Result<Vec<Handle>> {
        let strategy = self.create(intent.strategy_name(), canvas, standard)?;
        let handles = strategy.borrow_mut().dispatch(intent)?;
        Ok(handles)
    }

    fn unknown(&self, name: &str) -> DraftError {
        DraftError::UnknownStrategy {
            name: name.to_string(),
            registered: self.names().collect::<Vec<_>>().join(", "),
        }
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        StrategyRegistry::with_defaults()
    }
}
