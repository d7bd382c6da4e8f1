//! Dependency chains.
//!
//! A [`DependencyChain`] is a path through the registry in which every entity
//! is a direct dependency of the one before it. Chains store entity IDs and
//! borrow the registry for adjacency checks, so copying a chain for a new
//! search branch only copies the ID vector.
//!
//! ## Predicates
//!
//! | Predicate | Meaning |
//! |-----------|---------|
//! | [`is_cycled`](DependencyChain::is_cycled) | at least two entities and the last equals the first |
//! | [`contains_sub_cycles`](DependencyChain::contains_sub_cycles) | a window of two or more entities repeats one position after itself ends |
//! | [`equals_as_cycles`](DependencyChain::equals_as_cycles) | two closed chains are rotations of each other |

use std::cmp::Ordering;
use std::fmt;

use crate::domain::{EntityId, EntityRegistry};
use crate::error::{Error, Result};

/// An ordered path of entities, each depending on the next.
#[derive(Debug, Clone)]
pub struct DependencyChain<'r> {
    registry: &'r EntityRegistry,
    entities: Vec<EntityId>,
}

impl<'r> DependencyChain<'r> {
    /// Create an empty chain over the given registry.
    #[must_use]
    pub fn new(registry: &'r EntityRegistry) -> Self {
        Self {
            registry,
            entities: Vec::new(),
        }
    }

    /// Build a chain from a sequence of IDs, validating every link.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChainExtension`] at the first ID that does not follow
    /// from its predecessor.
    pub fn from_ids(
        registry: &'r EntityRegistry,
        ids: impl IntoIterator<Item = EntityId>,
    ) -> Result<Self> {
        let mut chain = Self::new(registry);
        for id in ids {
            chain.append(id)?;
        }
        Ok(chain)
    }

    /// Append the next entity.
    ///
    /// An empty chain accepts any entity. Otherwise `entity` must be a direct
    /// dependency of the current tail.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChainExtension`] if the tail does not depend on `entity`.
    pub fn append(&mut self, entity: EntityId) -> Result<()> {
        self.check_follows(entity)?;
        self.entities.push(entity);
        Ok(())
    }

    /// Append every entity of `other`.
    ///
    /// Only the link between this chain's tail and `other`'s head is checked;
    /// `other` is assumed to be internally consistent. Appending an empty
    /// chain is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChainExtension`] if the tail does not depend on
    /// `other`'s first entity.
    pub fn append_chain(&mut self, other: &DependencyChain<'_>) -> Result<()> {
        let Some(&head) = other.entities.first() else {
            return Ok(());
        };
        self.check_follows(head)?;
        self.entities.extend_from_slice(&other.entities);
        Ok(())
    }

    fn check_follows(&self, entity: EntityId) -> Result<()> {
        if self.entities.is_empty() || self.dependencies_of_tail().contains(&entity) {
            return Ok(());
        }
        Err(Error::ChainExtension {
            entity,
            chain: self.to_string(),
        })
    }

    /// Whether the chain has returned to its starting entity.
    ///
    /// A single entity is not a cycle; a self-dependency shows up as `[a, a]`.
    #[must_use]
    pub fn is_cycled(&self) -> bool {
        self.entities.len() >= 2 && self.entities.first() == self.entities.last()
    }

    /// Whether the chain contains a parasitic repeat.
    ///
    /// For every window length `w >= 2`, the window starting at `i` is compared
    /// with the window starting at `i + w + 1`, i.e. one position after the
    /// first window ends. Any match means the path is looping without closing.
    #[must_use]
    pub fn contains_sub_cycles(&self) -> bool {
        let len = self.entities.len();

        for window in 2..len {
            let Some(starts) = len.checked_sub(window * 2) else {
                break;
            };
            for base in 0..starts {
                let matched = base + window + 1;
                if self.entities[base..base + window] == self.entities[matched..matched + window] {
                    return true;
                }
            }
        }

        false
    }

    /// Dependencies of the last entity, or an empty slice for an empty chain.
    #[must_use]
    pub fn dependencies_of_tail(&self) -> &'r [EntityId] {
        match self.entities.last() {
            Some(&tail) => self.registry.dependencies_of(tail),
            None => &[],
        }
    }

    /// Number of entities in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the chain is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// The chain's entities in order.
    #[must_use]
    pub fn entities(&self) -> &[EntityId] {
        &self.entities
    }

    /// Whether two closed chains describe the same cycle.
    ///
    /// Both chains must be cycled and of equal length. The closing entity is
    /// dropped from each, and `b` is rotated through every offset looking for
    /// an exact match with `a`. Direction matters: `1 2 3 1` and `1 3 2 1`
    /// are different cycles.
    #[must_use]
    pub fn equals_as_cycles(a: &DependencyChain<'_>, b: &DependencyChain<'_>) -> bool {
        if a.len() != b.len() || !a.is_cycled() || !b.is_cycled() {
            return false;
        }

        let pure_a = &a.entities[..a.len() - 1];
        let pure_b = &b.entities[..b.len() - 1];

        (0..pure_b.len()).any(|offset| {
            pure_a
                .iter()
                .eq(pure_b[offset..].iter().chain(&pure_b[..offset]))
        })
    }

    /// Entities separated by single spaces, with a trailing space.
    #[must_use]
    pub fn formatted_view(&self) -> String {
        self.entities.iter().map(|id| format!("{id} ")).collect()
    }
}

impl fmt::Display for DependencyChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, id) in self.entities.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{id}")?;
        }
        write!(f, "]")
    }
}

impl PartialEq for DependencyChain<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.entities == other.entities
    }
}

impl Eq for DependencyChain<'_> {}

impl PartialOrd for DependencyChain<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DependencyChain<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.entities.cmp(&other.entities)
    }
}
