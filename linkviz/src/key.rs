#[cfg(not(feature = "std"))]
use alloc::collections::BTreeSet;
#[cfg(feature = "std")]
use std::collections::HashSet;

/// Set of values already seen by a single pass over the list.
#[cfg(feature = "std")]
pub(crate) type SeenSet = HashSet<i64>;
#[cfg(not(feature = "std"))]
pub(crate) type SeenSet = BTreeSet<i64>;
