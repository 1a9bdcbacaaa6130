use crate::SightingError;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Selects one of the two calibration anchors a camera holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum AnchorIndex {
    First,
    Second,
}

impl AnchorIndex {
    pub const ALL: [AnchorIndex; 2] = [AnchorIndex::First, AnchorIndex::Second];

    /// Position of the anchor in a two element array.
    pub fn index(self) -> usize {
        match self {
            AnchorIndex::First => 0,
            AnchorIndex::Second => 1,
        }
    }

    /// The anchor that is not `self`.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            AnchorIndex::First => AnchorIndex::Second,
            AnchorIndex::Second => AnchorIndex::First,
        }
    }
}

impl TryFrom<usize> for AnchorIndex {
    type Error = SightingError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(AnchorIndex::First),
            1 => Ok(AnchorIndex::Second),
            _ => Err(SightingError::InvalidAnchorIndex(index)),
        }
    }
}

impl From<AnchorIndex> for usize {
    fn from(index: AnchorIndex) -> Self {
        index.index()
    }
}
