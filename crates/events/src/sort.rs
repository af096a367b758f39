//! Topological ordering of the phase graph.

use std::fmt;

use crate::graph::PhaseGraph;
use crate::phase::PhaseId;

/// Phases whose ordering constraints cannot all be satisfied.
///
/// Produced during a sort pass when a directed cycle is found. Dispatch
/// stays valid: the edge closing the cycle is dropped and the remaining
/// constraints are honored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CycleReport {
	phases: Vec<PhaseId>,
}

impl fmt::Display for CycleReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for id in &self.phases {
			write!(f, "{id} -> ")?;
		}

		// Close the loop back to the first phase.
		match self.phases.first() {
			Some(first) => write!(f, "{first}"),
			None => Ok(()),
		}
	}
}

/// Result of one sort pass: arena indices in dispatch order, plus any
/// cycles that had to be broken.
pub(crate) struct SortOutcome {
	pub(crate) order: Vec<usize>,
	pub(crate) cycles: Vec<CycleReport>,
}

#[derive(Clone, Copy, PartialEq)]
enum Mark {
	Unvisited,
	Visiting,
	Visited,
}

/// Orders every phase so that each edge `a -> b` places `a` first.
///
/// Depth-first with visiting marks: slots are taken in first-reference
/// order and a slot's predecessors are emitted before the slot itself,
/// so the output is already forward order and phases with no constraints
/// between them keep first-reference order. An edge that would close a
/// cycle on the active recursion path is dropped and reported; the drop
/// choice only depends on first-reference order, so identical
/// registration sequences break identically.
///
/// O(V + E); runs only on invoker rebuild, never per dispatch.
pub(crate) fn sort<T>(graph: &PhaseGraph<T>) -> SortOutcome {
	let mut marks = vec![Mark::Unvisited; graph.slots().len()];
	let mut path = Vec::new();
	let mut outcome = SortOutcome {
		order: Vec::with_capacity(graph.slots().len()),
		cycles: Vec::new(),
	};

	for idx in 0..graph.slots().len() {
		visit(graph, idx, &mut marks, &mut path, &mut outcome);
	}

	outcome
}

fn visit<T>(
	graph: &PhaseGraph<T>,
	idx: usize,
	marks: &mut [Mark],
	path: &mut Vec<usize>,
	outcome: &mut SortOutcome,
) {
	match marks[idx] {
		Mark::Visited => return,
		Mark::Visiting => {
			// The edge leading back into `idx` closes a loop. Report the
			// phases on the loop and ignore the edge.
			let start = path
				.iter()
				.position(|&p| p == idx)
				.expect("visiting phase must be on the active path");
			let mut phases: Vec<PhaseId> = path[start..]
				.iter()
				.map(|&p| graph.slots()[p].id.clone())
				.collect();
			// The path walks predecessors, so reverse to follow edge
			// direction in the report.
			phases.reverse();
			outcome.cycles.push(CycleReport { phases });
			return;
		}
		Mark::Unvisited => {}
	}

	marks[idx] = Mark::Visiting;
	path.push(idx);

	for &pred in &graph.slots()[idx].predecessors {
		visit(graph, pred, marks, path, outcome);
	}

	path.pop();
	marks[idx] = Mark::Visited;
	outcome.order.push(idx);
}
