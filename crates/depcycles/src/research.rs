//! Exhaustive cycle search.
//!
//! The search seeds one two-entity chain per dependency edge and extends it
//! depth-first along every outgoing dependency of the tail:
//!
//! 1. a chain that has returned to its first entity is a result;
//! 2. a chain with a parasitic repeat ([`DependencyChain::contains_sub_cycles`])
//!    is a dead end;
//! 3. otherwise each dependency of the tail spawns a copy of the chain
//!    extended by that dependency.
//!
//! Every cycle is found once per entity on it, so the raw results are then
//! reduced to one representative per rotation class, keeping the first one
//! found.
//!
//! The number of explored paths grows exponentially with graph density, and
//! on dense strongly connected regions some chains grow without ever tripping
//! the sub-cycle check. Chains are therefore bounded: by
//! [`ResearchConfig::max_chain_len`] when set, which truncates, and otherwise
//! by [`search_limit`], which fails the search.

use serde::Serialize;

use crate::chain::DependencyChain;
use crate::config::{ResearchConfig, search_limit};
use crate::domain::EntityRegistry;
use crate::error::{Error, Result};
use crate::graph::ComponentIndex;

/// Counters collected during a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Dependency edges considered as seeds.
    pub seeds: usize,
    /// Seeds skipped because they cross strongly connected components.
    pub skipped_seeds: usize,
    /// Chains examined, seeds included.
    pub visited_chains: usize,
    /// Chains discarded for containing a sub-cycle.
    pub dead_ends: usize,
    /// Extendable chains abandoned at the length cap.
    pub truncated_chains: usize,
    /// Cycles found before rotation deduplication.
    pub raw_cycles: usize,
    /// Cycles left after deduplication.
    pub distinct_cycles: usize,
}

/// Outcome of [`DependencyResearcher::find_cycles`].
#[derive(Debug, Clone)]
pub struct CycleSearch<'r> {
    /// One representative per distinct cycle, in discovery order.
    pub cycles: Vec<DependencyChain<'r>>,
    /// Search counters.
    pub stats: SearchStats,
}

impl CycleSearch<'_> {
    /// Whether the result may be missing cycles because of the length cap.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.stats.truncated_chains > 0
    }
}

/// Finds every dependency cycle in a registry.
pub struct DependencyResearcher<'r> {
    registry: &'r EntityRegistry,
    config: ResearchConfig,
}

impl<'r> DependencyResearcher<'r> {
    /// Create a researcher over the given registry.
    #[must_use]
    pub fn new(registry: &'r EntityRegistry, config: ResearchConfig) -> Self {
        Self { registry, config }
    }

    /// Run the search from every dependency edge and deduplicate the results.
    ///
    /// # Errors
    ///
    /// Without a length cap, fails with [`Error::SearchLimit`] when a chain
    /// reaches [`search_limit`] entities while it can still be extended.
    /// [`Error::ChainExtension`] signals a bug; the search never triggers it.
    pub fn find_cycles(&self) -> Result<CycleSearch<'r>> {
        let components = self
            .config
            .prune_acyclic_seeds
            .then(|| ComponentIndex::build(self.registry));

        let limit = self
            .config
            .max_chain_len
            .unwrap_or_else(|| search_limit(self.registry.len()));

        tracing::debug!(
            entities = self.registry.len(),
            edges = self.registry.edge_count(),
            prune_acyclic_seeds = self.config.prune_acyclic_seeds,
            max_chain_len = ?self.config.max_chain_len,
            limit,
            "Starting cycle search"
        );

        let mut stats = SearchStats::default();
        let mut raw = Vec::new();

        for entity in self.registry.iter() {
            for &dependency in &entity.dependencies {
                stats.seeds += 1;

                if components
                    .as_ref()
                    .is_some_and(|index| !index.can_close(entity.id, dependency))
                {
                    stats.skipped_seeds += 1;
                    tracing::trace!(from = %entity.id, to = %dependency, "Skipping seed outside any cycle");
                    continue;
                }

                let mut base = DependencyChain::new(self.registry);
                base.append(entity.id)?;
                base.append(dependency)?;

                let found = self.child_cycles(base, limit, &mut stats)?;
                tracing::trace!(from = %entity.id, to = %dependency, cycles = found.len(), "Seed explored");
                raw.extend(found);
            }
        }

        stats.raw_cycles = raw.len();
        let cycles = remove_doubles(raw);
        stats.distinct_cycles = cycles.len();

        tracing::debug!(
            seeds = stats.seeds,
            skipped_seeds = stats.skipped_seeds,
            visited_chains = stats.visited_chains,
            dead_ends = stats.dead_ends,
            raw_cycles = stats.raw_cycles,
            distinct_cycles = stats.distinct_cycles,
            "Cycle search complete"
        );
        if stats.truncated_chains > 0 {
            tracing::warn!(
                truncated_chains = stats.truncated_chains,
                max_chain_len = ?self.config.max_chain_len,
                "Chains hit the length cap; some cycles may be missing"
            );
        }

        Ok(CycleSearch { cycles, stats })
    }

    /// All cycles reachable by extending `seed`, in depth-first order.
    fn child_cycles(
        &self,
        seed: DependencyChain<'r>,
        limit: usize,
        stats: &mut SearchStats,
    ) -> Result<Vec<DependencyChain<'r>>> {
        let mut cycles = Vec::new();
        let mut pending = vec![seed];

        while let Some(chain) = pending.pop() {
            stats.visited_chains += 1;

            if chain.is_cycled() {
                cycles.push(chain);
                continue;
            }

            if chain.contains_sub_cycles() {
                stats.dead_ends += 1;
                continue;
            }

            let dependencies = chain.dependencies_of_tail();
            if dependencies.is_empty() {
                continue;
            }

            if chain.len() >= limit {
                if self.config.max_chain_len.is_none() {
                    return Err(Error::SearchLimit {
                        limit,
                        chain: chain.to_string(),
                    });
                }
                stats.truncated_chains += 1;
                continue;
            }

            // Reversed so the first dependency is explored first.
            for &dependency in dependencies.iter().rev() {
                let mut next = chain.clone();
                next.append(dependency)?;
                pending.push(next);
            }
        }

        Ok(cycles)
    }
}

/// Keep the first chain of every rotation class.
///
/// Chains that are not closed are dropped outright.
#[must_use]
pub fn remove_doubles<'r>(chains: Vec<DependencyChain<'r>>) -> Vec<DependencyChain<'r>> {
    let mut distinct: Vec<DependencyChain<'r>> = Vec::new();

    for chain in chains.into_iter().filter(DependencyChain::is_cycled) {
        if !distinct
            .iter()
            .any(|kept| DependencyChain::equals_as_cycles(&chain, kept))
        {
            distinct.push(chain);
        }
    }

    distinct
}
