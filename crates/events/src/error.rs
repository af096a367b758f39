use thiserror::Error;

use crate::phase::{DEFAULT_PHASE, PhaseId};

/// Construction-time mistakes by the embedding code.
///
/// These are fail-fast configuration errors, not runtime conditions.
/// Contradictory phase orderings between distinct phases are handled
/// separately: they degrade to a deterministically broken order plus a
/// warning, and never surface here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
	/// A phase was ordered against itself.
	#[error("phase `{0}` cannot be ordered against itself")]
	SelfOrdering(PhaseId),
	/// A default phase chain did not include the default phase.
	#[error("default phase chain must contain `{}`", DEFAULT_PHASE)]
	MissingDefaultPhase,
	/// A default phase chain named the same phase twice.
	#[error("duplicate phase `{0}` in default phase chain")]
	DuplicatePhase(PhaseId),
}
