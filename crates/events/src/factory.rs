//! Construction API for events.

use crate::error::EventError;
use crate::event::{Event, InvokerFactory};
use crate::phase::{DEFAULT_PHASE, PhaseId};

/// Builds an empty event from an invoker factory that handles every
/// listener count itself, including zero and one.
pub fn create_array_backed<T, F>(invoker_factory: F) -> Event<T>
where
	T: Clone + Send + Sync + 'static,
	F: Fn(&[T]) -> T + Send + Sync + 'static,
{
	Event::new(Box::new(invoker_factory) as InvokerFactory<T>)
}

/// Builds an empty event with the common dispatch fast paths wired in.
///
/// No listeners yields a clone of `empty_invoker` instead of a useless
/// fan-out wrapper; a single listener is handed out directly; only two or
/// more listeners reach `invoker_factory`.
pub fn create_array_backed_with_empty<T, F>(empty_invoker: T, invoker_factory: F) -> Event<T>
where
	T: Clone + Send + Sync + 'static,
	F: Fn(&[T]) -> T + Send + Sync + 'static,
{
	create_array_backed(move |listeners: &[T]| match listeners {
		[] => empty_invoker.clone(),
		[single] => single.clone(),
		_ => invoker_factory(listeners),
	})
}

/// Builds an event pre-seeded with a chain of default phases, wired so
/// `default_phases[i]` fires before `default_phases[i + 1]`.
///
/// The chain must name [`DEFAULT_PHASE`] exactly once and contain no
/// duplicates; violating either is a configuration error and fails
/// construction.
pub fn create_with_phases<T, F>(
	invoker_factory: F,
	default_phases: &[PhaseId],
) -> Result<Event<T>, EventError>
where
	T: Clone + Send + Sync + 'static,
	F: Fn(&[T]) -> T + Send + Sync + 'static,
{
	ensure_contains_default(default_phases)?;
	ensure_no_duplicates(default_phases)?;

	let event = create_array_backed(invoker_factory);

	for pair in default_phases.windows(2) {
		event.add_phase_ordering(pair[0].clone(), pair[1].clone())?;
	}

	Ok(event)
}

fn ensure_contains_default(phases: &[PhaseId]) -> Result<(), EventError> {
	if phases.iter().any(|p| p.as_str() == DEFAULT_PHASE) {
		Ok(())
	} else {
		Err(EventError::MissingDefaultPhase)
	}
}

fn ensure_no_duplicates(phases: &[PhaseId]) -> Result<(), EventError> {
	for (i, phase) in phases.iter().enumerate() {
		if phases[i + 1..].contains(phase) {
			return Err(EventError::DuplicatePhase(phase.clone()));
		}
	}

	Ok(())
}
