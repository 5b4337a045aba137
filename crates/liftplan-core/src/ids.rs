//! Identifiers for hierarchy nodes.
//!
//! Rows stored by the backend are identified by their integer row id. Nodes
//! created in an editor and not yet saved carry a [`TempId`] instead, which is
//! always rendered as a `tmp-` prefixed string and therefore can never be
//! confused with a server id, neither in memory ([`NodeId`] keeps the two apart
//! at the type level) nor on the wire (integers vs. strings).

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

const TEMP_PREFIX: &str = "tmp-";

/// Largest sequence number accepted from callers. The generator counts on
/// from there, so it must stay far below `u64::MAX`.
const MAX_SEQUENCE: u64 = u32::MAX as u64;

/// Placeholder identifier for a node that has not been persisted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TempId(u64);

impl TempId {
    /// Sequence number of this placeholder within its generator.
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TempId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{TEMP_PREFIX}{}", self.0)
    }
}

impl FromStr for TempId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix(TEMP_PREFIX)
            .and_then(|n| n.parse::<u64>().ok())
            .filter(|&n| n <= MAX_SEQUENCE)
            .map(TempId)
            .ok_or_else(|| format!("Invalid temporary id: {s}"))
    }
}

impl Serialize for TempId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TempId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Issues temporary ids that are unique for the lifetime of the generator.
#[derive(Debug, Clone)]
pub struct TempIdGenerator {
    next: u64,
}

impl TempIdGenerator {
    /// Creates a generator whose first id is `tmp-1`.
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Returns a fresh id, never handed out before by this generator.
    pub fn next_id(&mut self) -> TempId {
        let id = TempId(self.next);
        self.next += 1;
        id
    }

    /// Ensures ids issued from now on are greater than `seen`.
    pub(crate) fn skip_past(&mut self, seen: TempId) {
        if let Some(after) = seen.0.checked_add(1) {
            self.next = self.next.max(after);
        }
    }
}

impl Default for TempIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Identity of a hierarchy node: a persisted row id or a temporary id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    /// Row id assigned by the backend
    Persisted(u64),
    /// Placeholder for a node created locally
    Temp(TempId),
}

impl NodeId {
    /// Returns the row id if the node has been persisted.
    pub fn persisted(&self) -> Option<u64> {
        match self {
            NodeId::Persisted(id) => Some(*id),
            NodeId::Temp(_) => None,
        }
    }

    /// Returns the placeholder if the node has not been persisted yet.
    pub fn temp(&self) -> Option<TempId> {
        match self {
            NodeId::Temp(id) => Some(*id),
            NodeId::Persisted(_) => None,
        }
    }

    pub fn is_temp(&self) -> bool {
        matches!(self, NodeId::Temp(_))
    }
}

impl From<TempId> for NodeId {
    fn from(id: TempId) -> Self {
        NodeId::Temp(id)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        NodeId::Persisted(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Persisted(id) => write!(f, "{id}"),
            NodeId::Temp(id) => write!(f, "{id}"),
        }
    }
}
