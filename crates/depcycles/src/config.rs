//! Search configuration.
//!
//! Defaults can be overridden through environment variables, and CLI flags
//! override both.

use std::env;

/// Environment variable toggling component-based seed pruning.
pub const PRUNE_SEEDS_ENV: &str = "DEPCYCLES_PRUNE_SEEDS";

/// Environment variable capping chain length.
pub const MAX_CHAIN_LEN_ENV: &str = "DEPCYCLES_MAX_CHAIN_LEN";

/// Per-entity allowance of the default chain length limit.
pub const SEARCH_LIMIT_PER_ENTITY: usize = 4;

/// Fixed allowance added to the default chain length limit.
pub const SEARCH_LIMIT_SLACK: usize = 8;

/// Settings for a cycle search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResearchConfig {
    /// Skip seeds whose endpoints lie in different strongly connected components.
    ///
    /// Such seeds can never close a cycle, so this does not change results.
    pub prune_acyclic_seeds: bool,

    /// Abandon chains that reach this many entities without closing.
    ///
    /// `None` searches up to [`search_limit`] and fails past it. With a cap,
    /// long cycles may be missed.
    pub max_chain_len: Option<usize>,
}

/// Chain length past which an uncapped search gives up with an error.
#[must_use]
pub fn search_limit(entities: usize) -> usize {
    entities
        .saturating_mul(SEARCH_LIMIT_PER_ENTITY)
        .saturating_add(SEARCH_LIMIT_SLACK)
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            prune_acyclic_seeds: true,
            max_chain_len: None,
        }
    }
}

impl ResearchConfig {
    /// Create a configuration by reading from environment variables.
    ///
    /// Reads:
    /// - `DEPCYCLES_PRUNE_SEEDS`: "1"/"true" or "0"/"false" (default: true)
    /// - `DEPCYCLES_MAX_CHAIN_LEN`: positive integer (default: none, see [`search_limit`])
    ///
    /// Invalid values are logged and replaced with the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let prune_acyclic_seeds = match lookup(PRUNE_SEEDS_ENV) {
            Some(v) if v == "1" || v.eq_ignore_ascii_case("true") => true,
            Some(v) if v == "0" || v.eq_ignore_ascii_case("false") => false,
            Some(v) if v.is_empty() => defaults.prune_acyclic_seeds,
            Some(v) => {
                tracing::warn!(
                    env_var = PRUNE_SEEDS_ENV,
                    value = %v,
                    "Invalid value (expected '1', 'true', '0', or 'false'), using default"
                );
                defaults.prune_acyclic_seeds
            }
            None => defaults.prune_acyclic_seeds,
        };

        let max_chain_len = match lookup(MAX_CHAIN_LEN_ENV) {
            Some(s) if !s.is_empty() => match parse_chain_len(&s) {
                Ok(len) => Some(len),
                Err(reason) => {
                    tracing::warn!(
                        env_var = MAX_CHAIN_LEN_ENV,
                        value = %s,
                        reason = %reason,
                        "Invalid value, searching without a length cap"
                    );
                    defaults.max_chain_len
                }
            },
            _ => defaults.max_chain_len,
        };

        Self {
            prune_acyclic_seeds,
            max_chain_len,
        }
    }
}

/// Parse a chain length cap.
///
/// Used both for the environment variable and as a clap `value_parser`.
/// A cap below 2 would reject every seed chain, so it is refused.
pub fn parse_chain_len(s: &str) -> Result<usize, String> {
    let len: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a valid length"))?;
    if len < 2 {
        return Err(format!("chain length must be at least 2, got {len}"));
    }
    Ok(len)
}
