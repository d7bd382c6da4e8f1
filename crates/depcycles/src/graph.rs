//! Strongly connected component view of the registry using petgraph.
//!
//! The cycle search only ever closes a chain `[e, d, ..., e]` when `d` can
//! reach `e` again, i.e. when both lie in the same strongly connected
//! component. Seeds that cross components are dead on arrival and can be
//! skipped without changing the search result.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

use crate::domain::{EntityId, EntityRegistry};

/// Component membership for every entity in a registry.
#[derive(Debug, Clone)]
pub struct ComponentIndex {
    component_of: HashMap<EntityId, usize>,
    components: usize,
}

impl ComponentIndex {
    /// Compute components with Tarjan's algorithm.
    #[must_use]
    pub fn build(registry: &EntityRegistry) -> Self {
        let (graph, _) = to_graph(registry);

        let mut component_of = HashMap::with_capacity(registry.len());
        let sccs = tarjan_scc(&graph);
        for (component, members) in sccs.iter().enumerate() {
            for &node in members {
                component_of.insert(graph[node], component);
            }
        }

        tracing::debug!(
            entities = registry.len(),
            components = sccs.len(),
            "Computed strongly connected components"
        );

        Self {
            component_of,
            components: sccs.len(),
        }
    }

    /// Whether a chain starting `[from, to]` could ever return to `from`.
    #[must_use]
    pub fn can_close(&self, from: EntityId, to: EntityId) -> bool {
        match (self.component_of.get(&from), self.component_of.get(&to)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Number of strongly connected components (singletons included).
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components
    }
}

/// Build a petgraph view of the registry.
///
/// Edges point from dependent to dependency. Returns the graph together
/// with the node index of each entity.
#[must_use]
pub fn to_graph(registry: &EntityRegistry) -> (DiGraph<EntityId, ()>, HashMap<EntityId, NodeIndex>) {
    let mut graph = DiGraph::with_capacity(registry.len(), registry.edge_count());
    let mut node_map = HashMap::with_capacity(registry.len());

    for entity in registry.iter() {
        node_map.insert(entity.id, graph.add_node(entity.id));
    }
    for entity in registry.iter() {
        let from = node_map[&entity.id];
        for dependency in &entity.dependencies {
            graph.add_edge(from, node_map[dependency], ());
        }
    }

    (graph, node_map)
}
