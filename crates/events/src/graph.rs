//! Arena-backed phase graph owned by one event.

use rustc_hash::FxHashMap;

use crate::phase::{PhaseId, PhaseSlot};

/// Phases in first-reference order plus an id index.
///
/// Ordering edges are arena index pairs kept in both directions. The
/// graph carries no traversal state; sort passes keep their marks in
/// scratch storage.
pub(crate) struct PhaseGraph<T> {
	slots: Vec<PhaseSlot<T>>,
	index: FxHashMap<PhaseId, usize>,
	listener_count: usize,
}

impl<T> PhaseGraph<T> {
	pub(crate) fn new() -> Self {
		Self {
			slots: Vec::new(),
			index: FxHashMap::default(),
			listener_count: 0,
		}
	}

	pub(crate) fn slots(&self) -> &[PhaseSlot<T>] {
		&self.slots
	}

	pub(crate) fn listener_count(&self) -> usize {
		self.listener_count
	}

	/// Index of `id`, creating the phase on first reference.
	pub(crate) fn get_or_create(&mut self, id: &PhaseId) -> usize {
		if let Some(&idx) = self.index.get(id) {
			return idx;
		}

		let idx = self.slots.len();
		self.slots.push(PhaseSlot::new(id.clone()));
		self.index.insert(id.clone(), idx);
		idx
	}

	pub(crate) fn push_listener(&mut self, phase: usize, listener: T) {
		self.slots[phase].listeners.push(listener);
		self.listener_count += 1;
	}

	/// Records the edge `first -> second`. Re-adding an existing edge is
	/// a no-op; callers reject self-edges before getting here.
	pub(crate) fn link(&mut self, first: usize, second: usize) {
		debug_assert_ne!(first, second, "self-edges are rejected upstream");

		if self.slots[first].successors.contains(&second) {
			return;
		}

		self.slots[first].successors.push(second);
		self.slots[second].predecessors.push(first);
	}

	/// Copies every listener into one flat array: phases in `order`,
	/// registration order within each phase.
	pub(crate) fn flatten(&self, order: &[usize]) -> Vec<T>
	where
		T: Clone,
	{
		let mut flat = Vec::with_capacity(self.listener_count);

		for &idx in order {
			flat.extend(self.slots[idx].listeners.iter().cloned());
		}

		flat
	}
}
