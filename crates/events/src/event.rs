//! The event registry: phased listener storage plus the cached
//! array-backed invoker.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use parking_lot::Mutex;

use crate::error::EventError;
use crate::graph::PhaseGraph;
use crate::phase::PhaseId;
use crate::sort;

/// Strategy turning the flattened listener array into one composite
/// value of the same callback shape.
///
/// The composite must call every listener in array order, synchronously,
/// and let the first failure propagate without running the rest.
pub type InvokerFactory<T> = Box<dyn Fn(&[T]) -> T + Send + Sync>;

/// Keeper of every listener registered for one callback shape `T`.
///
/// Built through [`create_array_backed`](crate::create_array_backed) or
/// [`create_with_phases`](crate::create_with_phases). Registration is
/// expected to be rare and front-loaded; [`Event::invoker`] is the hot
/// path and costs one atomic load while the cache is fresh.
///
/// The cache has exactly two states: *fresh* (the published invoker is
/// served as-is) and *stale* (`None` in the publish slot; the next
/// [`Event::invoker`] call rebuilds). Every mutation moves fresh to
/// stale.
pub struct Event<T> {
	graph: Mutex<PhaseGraph<T>>,
	/// Published composite invoker; `None` is the stale marker.
	invoker: ArcSwapOption<T>,
	factory: InvokerFactory<T>,
}

impl<T: Clone + Send + Sync + 'static> Event<T> {
	pub(crate) fn new(factory: InvokerFactory<T>) -> Self {
		Self {
			graph: Mutex::new(PhaseGraph::new()),
			invoker: ArcSwapOption::const_empty(),
			factory,
		}
	}

	/// Registers `listener` into the default phase.
	pub fn register(&self, listener: T) {
		self.register_phased(PhaseId::default(), listener);
	}

	/// Registers `listener` into `phase`, creating the phase on first
	/// reference.
	///
	/// Listeners within one phase fire in registration order. There is no
	/// deduplication: registering the same listener twice makes it fire
	/// twice per dispatch.
	pub fn register_phased(&self, phase: PhaseId, listener: T) {
		let mut graph = self.graph.lock();
		let idx = graph.get_or_create(&phase);
		graph.push_listener(idx, listener);
		self.invoker.store(None);
	}

	/// Requires every listener of `first` to fire before any listener of
	/// `second`.
	///
	/// Both phases are created on first reference; repeating an existing
	/// ordering is a no-op. Ordering a phase against itself is a
	/// configuration error. Contradictory orderings between distinct
	/// phases are not an error here: the cycle is broken
	/// deterministically at rebuild time and each implicated phase is
	/// named in a warning.
	pub fn add_phase_ordering(&self, first: PhaseId, second: PhaseId) -> Result<(), EventError> {
		if first == second {
			return Err(EventError::SelfOrdering(first));
		}

		let mut graph = self.graph.lock();
		let a = graph.get_or_create(&first);
		let b = graph.get_or_create(&second);
		graph.link(a, b);
		self.invoker.store(None);
		Ok(())
	}

	/// The composite invoker for this event.
	///
	/// Fresh cache: one atomic load, no further work. Stale cache: the
	/// phase graph is sorted, listeners are compacted into one array
	/// (phases in sorted order, registration order within a phase), the
	/// invoker factory wraps that array, and the result is published for
	/// every subsequent call until the next mutation.
	pub fn invoker(&self) -> Arc<T> {
		if let Some(invoker) = self.invoker.load_full() {
			return invoker;
		}

		self.rebuild()
	}

	#[cold]
	fn rebuild(&self) -> Arc<T> {
		let graph = self.graph.lock();

		// Another thread may have rebuilt while we waited on the lock.
		if let Some(invoker) = self.invoker.load_full() {
			return invoker;
		}

		let outcome = sort::sort(&graph);

		for cycle in &outcome.cycles {
			tracing::warn!(%cycle, "contradictory event phase ordering; dropping one constraint");
		}

		let listeners = graph.flatten(&outcome.order);
		tracing::trace!(
			listeners = listeners.len(),
			phases = outcome.order.len(),
			"rebuilt event invoker"
		);

		let invoker = Arc::new((self.factory)(&listeners));
		self.invoker.store(Some(Arc::clone(&invoker)));
		invoker
	}

	/// Whether any listener has been registered.
	pub fn has_listeners(&self) -> bool {
		self.graph.lock().listener_count() > 0
	}
}

// Hand-written: the boxed invoker factory has no Debug, and listener
// values are opaque; counts are what diagnostics need.
impl<T> fmt::Debug for Event<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let graph = self.graph.lock();
		f.debug_struct("Event")
			.field("phases", &graph.slots().len())
			.field("listeners", &graph.listener_count())
			.field("fresh", &self.invoker.load().is_some())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::factory::create_array_backed;

	type Cb = Arc<dyn Fn(&mut Vec<u32>) + Send + Sync>;

	fn fan_out(listeners: &[Cb]) -> Cb {
		let listeners = listeners.to_vec();
		Arc::new(move |log: &mut Vec<u32>| {
			for listener in &listeners {
				(**listener)(log);
			}
		})
	}

	fn push(value: u32) -> Cb {
		Arc::new(move |log: &mut Vec<u32>| log.push(value))
	}

	fn dispatch(event: &Event<Cb>, log: &mut Vec<u32>) {
		let invoker = event.invoker();
		(**invoker)(log);
	}

	#[test]
	fn cached_invoker_is_reused_until_mutation() {
		let event = create_array_backed(fan_out);
		event.register(push(1));

		let first = event.invoker();
		let second = event.invoker();
		assert!(Arc::ptr_eq(&first, &second));

		event.register(push(2));
		let third = event.invoker();
		assert!(!Arc::ptr_eq(&second, &third));
	}

	#[test]
	fn phase_ordering_marks_cache_stale() {
		let event = create_array_backed(fan_out);
		let before = event.invoker();

		event
			.add_phase_ordering(PhaseId::new("early"), PhaseId::default())
			.unwrap();
		let after = event.invoker();

		assert!(!Arc::ptr_eq(&before, &after));
	}

	#[test]
	fn self_ordering_is_rejected() {
		let event = create_array_backed(fan_out);
		let err = event
			.add_phase_ordering(PhaseId::new("loop"), PhaseId::new("loop"))
			.unwrap_err();

		assert_eq!(err, EventError::SelfOrdering(PhaseId::new("loop")));
	}

	#[test]
	fn has_listeners_tracks_registration_only() {
		let event = create_array_backed(fan_out);
		assert!(!event.has_listeners());

		// Referencing phases through an ordering adds no listeners.
		event
			.add_phase_ordering(PhaseId::new("early"), PhaseId::default())
			.unwrap();
		assert!(!event.has_listeners());

		event.register_phased(PhaseId::new("early"), push(1));
		assert!(event.has_listeners());
	}

	#[test]
	fn debug_output_summarizes_registry_state() {
		let event = create_array_backed(fan_out);
		event.register(push(1));

		let repr = format!("{event:?}");
		assert!(repr.contains("phases: 1"), "{repr}");
		assert!(repr.contains("listeners: 1"), "{repr}");
		assert!(repr.contains("fresh: false"), "{repr}");

		event.invoker();
		let repr = format!("{event:?}");
		assert!(repr.contains("fresh: true"), "{repr}");
	}

	#[test]
	fn phase_created_by_ordering_accepts_listeners() {
		let event = create_array_backed(fan_out);
		event
			.add_phase_ordering(PhaseId::new("a"), PhaseId::new("b"))
			.unwrap();
		event.register_phased(PhaseId::new("b"), push(1));
		event.register_phased(PhaseId::new("a"), push(2));

		let mut log = Vec::new();
		dispatch(&event, &mut log);
		assert_eq!(log, [2, 1]);
	}
}
