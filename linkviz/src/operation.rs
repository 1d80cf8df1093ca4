use alloc::vec::Vec;

use crate::NodeId;

/// A user-facing list algorithm.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "op", rename_all = "snake_case"))]
pub enum Operation {
    InsertHead { value: i64 },
    /// Appends after walking the whole list, the way a list without a tail pointer must.
    InsertTail { value: i64 },
    /// Appends through the cached tail pointer.
    InsertTailConstant { value: i64 },
    DeleteHead,
    /// Walks to the second-to-last node before unlinking the tail.
    DeleteTail,
    InsertAt { position: usize, value: i64 },
    DeleteAt { position: usize },
    Reverse,
    FindMiddle,
    Search { value: i64 },
    Length,
    Nth { position: usize },
    RemoveDuplicates,
    /// Replaces the list with `values`.
    Create { values: Vec<i64> },
    Clear,
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::InsertHead { .. } => OperationKind::InsertHead,
            Self::InsertTail { .. } => OperationKind::InsertTail,
            Self::InsertTailConstant { .. } => OperationKind::InsertTailConstant,
            Self::DeleteHead => OperationKind::DeleteHead,
            Self::DeleteTail => OperationKind::DeleteTail,
            Self::InsertAt { .. } => OperationKind::InsertAt,
            Self::DeleteAt { .. } => OperationKind::DeleteAt,
            Self::Reverse => OperationKind::Reverse,
            Self::FindMiddle => OperationKind::FindMiddle,
            Self::Search { .. } => OperationKind::Search,
            Self::Length => OperationKind::Length,
            Self::Nth { .. } => OperationKind::Nth,
            Self::RemoveDuplicates => OperationKind::RemoveDuplicates,
            Self::Create { .. } => OperationKind::Create,
            Self::Clear => OperationKind::Clear,
        }
    }
}

/// Payload-free discriminant of [`Operation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OperationKind {
    InsertHead,
    InsertTail,
    InsertTailConstant,
    DeleteHead,
    DeleteTail,
    InsertAt,
    DeleteAt,
    Reverse,
    FindMiddle,
    Search,
    Length,
    Nth,
    RemoveDuplicates,
    Create,
    Clear,
}

impl OperationKind {
    /// Whether the operation can change the list.
    pub fn is_structural(self) -> bool {
        !matches!(
            self,
            Self::FindMiddle | Self::Search | Self::Length | Self::Nth
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hit {
    pub index: usize,
    pub value: i64,
}

/// What an operation produced.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "outcome", rename_all = "snake_case"))]
pub enum Outcome {
    /// A removal on an empty list.
    Unchanged,
    Inserted { id: NodeId, index: usize },
    Removed { value: i64, index: usize },
    Reversed,
    Middle { hit: Option<Hit> },
    /// Smallest index holding the value, if any.
    Search { position: Option<usize> },
    Length { len: usize },
    Nth { value: i64 },
    Deduplicated { removed: Vec<i64> },
    /// `replaced` counts the entries that were discarded.
    Created { len: usize, replaced: usize },
    Cleared,
}

impl Outcome {
    /// Whether nodes were removed, which is when hosts usually re-fit the viewport.
    pub fn removed_nodes(&self) -> bool {
        match self {
            Self::Removed { .. } | Self::Cleared => true,
            Self::Deduplicated { removed } => !removed.is_empty(),
            Self::Created { replaced, .. } => *replaced > 0,
            _ => false,
        }
    }
}
