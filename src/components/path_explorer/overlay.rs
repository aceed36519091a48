use std::collections::HashSet;

use super::types::{GraphSnapshot, UserId};

/// Which parts of the snapshot render as "on path".
///
/// Follow edges are identified by their index into
/// [`GraphSnapshot::follows`], so duplicate occurrences stay distinct.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overlay {
	pub nodes: HashSet<UserId>,
	pub follow_edges: HashSet<usize>,
}

/// Project a backend path onto the current snapshot.
///
/// Every id on the path is highlighted; a follow edge is highlighted iff both
/// endpoints are on the path. That is a structural approximation: any edge
/// between two path members lights up, not only the edges the path actually
/// traversed. Kept as-is until product intent says otherwise.
pub fn overlay(path: &[UserId], snapshot: &GraphSnapshot) -> Overlay {
	let nodes: HashSet<UserId> = path.iter().copied().collect();
	let follow_edges = snapshot
		.follows
		.iter()
		.enumerate()
		.filter(|(_, e)| nodes.contains(&e.from) && nodes.contains(&e.to))
		.map(|(i, _)| i)
		.collect();
	Overlay { nodes, follow_edges }
}
