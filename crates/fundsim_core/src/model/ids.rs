//! Unique identifiers for simulation entities

use serde::{Deserialize, Serialize};

/// Zero-based rank of a stage in the stage order.
///
/// Stage order is a strict total order defining "progress"; a larger rank
/// is a later funding round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StageId(pub usize);
