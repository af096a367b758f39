#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Ordered multi-listener event dispatch.
//!
//! # Purpose
//!
//! An [`Event`] owns every listener registered for one callback shape `T`
//! and hands out a single cached composite invoker that fires all of them
//! in a deterministic order. Listeners are grouped into named *phases*;
//! phases only declare partial ordering constraints between each other
//! ("chat phases before render phases"), and the event resolves those
//! constraints into one total order.
//!
//! # Mental model
//!
//! 1. **Construction:** [`create_array_backed`] builds an empty event from
//!    an invoker factory (`&[T] -> T`); [`create_with_phases`] additionally
//!    seeds a default chain of phases in a fixed initial order.
//! 2. **Registration:** subsystems call [`Event::register`] (default
//!    phase) or [`Event::register_phased`], and may add ordering edges via
//!    [`Event::add_phase_ordering`]. Every mutation marks the cached
//!    invoker stale.
//! 3. **Dispatch:** [`Event::invoker`] returns the cached composite. When
//!    stale, the phase graph is topologically sorted, listeners are
//!    compacted into one flat array (phases in sorted order, registration
//!    order within a phase), and the factory wraps that array into a new
//!    invoker before it is published.
//!
//! # Ordering
//!
//! The produced order respects every edge added through
//! [`Event::add_phase_ordering`]; phases with no constraints between them
//! keep first-reference order, so a fixed registration sequence always
//! yields the same dispatch order. Contradictory constraints are not
//! fatal: the edge closing a cycle is dropped deterministically and each
//! implicated phase is named in a `tracing` warning.
//!
//! # Concurrency
//!
//! - **Reads:** wait-free; a fresh invoker is one atomic load away and is
//!   always a fully built value.
//! - **Writes:** serialized behind a mutex; the rebuilt invoker is
//!   published atomically, so readers never observe partial state.

mod error;
mod event;
mod factory;
mod graph;
mod phase;
mod sort;

pub use error::EventError;
pub use event::{Event, InvokerFactory};
pub use factory::{create_array_backed, create_array_backed_with_empty, create_with_phases};
pub use phase::{DEFAULT_PHASE, PhaseId};
