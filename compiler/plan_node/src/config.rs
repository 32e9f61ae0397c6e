//! Environment configuration.

use tracing::warn;

/// Environment variable holding the maximum node count of new environments.
pub const NODE_LIMIT_VAR: &str = "PLAN_NODE_LIMIT";

/// Settings for a new [`Environment`](crate::Environment).
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct EnvConfig {
    /// Maximum number of nodes, singletons included. `None` means bounded
    /// only by the 32-bit index space.
    pub node_limit: Option<u32>,
    /// Names reserved in the name table up front.
    pub name_capacity: usize,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            node_limit: None,
            name_capacity: 64,
        }
    }
}

impl EnvConfig {
    /// Defaults, with the node limit taken from `PLAN_NODE_LIMIT` if set.
    ///
    /// A value that is not a decimal `u32` is ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(NODE_LIMIT_VAR) {
            config.node_limit = parse_limit(&raw);
        }
        config
    }

    #[must_use]
    pub fn with_node_limit(mut self, limit: u32) -> Self {
        self.node_limit = Some(limit);
        self
    }
}

fn parse_limit(raw: &str) -> Option<u32> {
    match raw.trim().parse::<u32>() {
        Ok(limit) => Some(limit),
        Err(err) => {
            warn!(var = NODE_LIMIT_VAR, value = raw, %err, "ignoring invalid node limit");
            None
        }
    }
}
