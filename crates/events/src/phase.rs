//! Phase identity and per-phase listener storage.

use std::fmt;
use std::sync::Arc;

/// Name of the distinguished phase every event owns.
pub const DEFAULT_PHASE: &str = "default";

/// Identifies one ordering bucket within an [`Event`](crate::Event).
///
/// Cheap to clone, usable as a map key; the string form is what cycle
/// warnings and errors print.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct PhaseId(Arc<str>);

impl PhaseId {
	pub fn new(id: impl AsRef<str>) -> Self {
		Self(Arc::from(id.as_ref()))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Default for PhaseId {
	/// The [`DEFAULT_PHASE`] id.
	fn default() -> Self {
		Self(Arc::from(DEFAULT_PHASE))
	}
}

impl fmt::Display for PhaseId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// One phase in the arena: its listeners plus ordering edges to other
/// slots, stored as arena indices.
///
/// The listener list is append-only and keeps registration order; phases
/// are never removed once referenced.
pub(crate) struct PhaseSlot<T> {
	pub(crate) id: PhaseId,
	pub(crate) listeners: Vec<T>,
	pub(crate) successors: Vec<usize>,
	pub(crate) predecessors: Vec<usize>,
}

impl<T> PhaseSlot<T> {
	pub(crate) fn new(id: PhaseId) -> Self {
		Self {
			id,
			listeners: Vec::new(),
			successors: Vec::new(),
			predecessors: Vec::new(),
		}
	}
}
