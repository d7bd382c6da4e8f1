//! Domain types for dependency graphs.
//!
//! Entities live in an [`EntityRegistry`] arena and are referred to by
//! [`EntityId`] everywhere else, so chains never hold references into
//! individual entities.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use depcycles_edges::Edge;

/// Unique identifier for an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EntityId(pub i64);

impl EntityId {
    /// Create a new entity ID
    #[must_use]
    pub fn new(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A graph node and the entities it depends on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    /// Unique identifier
    pub id: EntityId,

    /// Direct dependencies in edge-discovery order, without duplicates
    pub dependencies: Vec<EntityId>,
}

impl Entity {
    /// Create an entity with no dependencies
    #[must_use]
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            dependencies: Vec::new(),
        }
    }

    /// Whether this entity directly depends on `other`
    #[must_use]
    pub fn depends_on(&self, other: EntityId) -> bool {
        self.dependencies.contains(&other)
    }
}

/// Arena of entities keyed by identifier.
///
/// Entities are stored in first-seen order; that order drives the order in
/// which the cycle search seeds its chains.
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
    index: HashMap<EntityId, usize>,
}

impl EntityRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from parsed edges
    #[must_use]
    pub fn from_edges(edges: &[Edge]) -> Self {
        let mut registry = Self::new();
        for edge in edges {
            registry.add_dependency(EntityId(edge.from), EntityId(edge.to));
        }
        tracing::debug!(
            entities = registry.len(),
            edges = registry.edge_count(),
            "Built entity registry"
        );
        registry
    }

    /// Record that `from` depends on `to`.
    ///
    /// Both entities are created on first sight (`from` before `to`).
    /// Returns `false` if the dependency was already present.
    pub fn add_dependency(&mut self, from: EntityId, to: EntityId) -> bool {
        let from_index = self.intern(from);
        self.intern(to);

        let entity = &mut self.entities[from_index];
        if entity.depends_on(to) {
            return false;
        }
        entity.dependencies.push(to);
        true
    }

    fn intern(&mut self, id: EntityId) -> usize {
        if let Some(&index) = self.index.get(&id) {
            return index;
        }
        let index = self.entities.len();
        self.entities.push(Entity::new(id));
        self.index.insert(id, index);
        index
    }

    /// Look up an entity by ID
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index.get(&id).map(|&index| &self.entities[index])
    }

    /// Whether the registry knows this ID
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.index.contains_key(&id)
    }

    /// Dependencies of an entity, or an empty slice for unknown IDs
    #[must_use]
    pub fn dependencies_of(&self, id: EntityId) -> &[EntityId] {
        self.get(id)
            .map_or(&[][..], |entity| entity.dependencies.as_slice())
    }

    /// Iterate entities in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Number of entities
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the registry holds no entities
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Number of distinct dependency edges
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.entities.iter().map(|e| e.dependencies.len()).sum()
    }
}
