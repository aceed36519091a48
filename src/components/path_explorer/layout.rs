use std::collections::HashMap;
use std::f64::consts::PI;

use super::types::{GraphSnapshot, NodeId};

const RING_CENTER_X: f64 = 500.0;
const RING_CENTER_Y: f64 = 200.0;
const RING_MAX_RADIUS: f64 = 260.0;

const GRID_COLS: usize = 10;
const GRID_ORIGIN_X: f64 = 50.0;
const GRID_ORIGIN_Y: f64 = 300.0;
const GRID_COL_STEP: f64 = 80.0;
const GRID_ROW_STEP: f64 = 50.0;

/// 2-D coordinates for one node, keyed by [`NodeId`] in the layout map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutPosition {
	pub x: f64,
	pub y: f64,
}

/// Compute deterministic coordinates for every node in the snapshot.
///
/// Users sit on a ring whose radius grows with the user count (capped so the
/// ring stays on canvas), first user at the top and proceeding clockwise.
/// Posts fill a fixed-width grid below the ring in backend return order.
/// Pure function of the snapshot ordering: no state survives between calls,
/// and edge count never affects positions.
pub fn layout(snapshot: &GraphSnapshot) -> HashMap<NodeId, LayoutPosition> {
	let mut positions = HashMap::new();

	let n = snapshot.users.len().max(1);
	let radius = (50.0 + 8.0 * n as f64).min(RING_MAX_RADIUS);
	for (i, user) in snapshot.users.iter().enumerate() {
		let angle = (2.0 * PI * i as f64) / n as f64 - PI / 2.0;
		positions.insert(
			NodeId::User(user.id),
			LayoutPosition {
				x: RING_CENTER_X + radius * angle.cos(),
				y: RING_CENTER_Y + radius * angle.sin(),
			},
		);
	}

	for (i, post) in snapshot.posts.iter().enumerate() {
		let (row, col) = (i / GRID_COLS, i % GRID_COLS);
		positions.insert(
			NodeId::Post(post.id),
			LayoutPosition {
				x: GRID_ORIGIN_X + col as f64 * GRID_COL_STEP,
				y: GRID_ORIGIN_Y + row as f64 * GRID_ROW_STEP,
			},
		);
	}

	positions
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::path_explorer::types::{Post, User};

	fn snapshot(users: usize, posts: usize) -> GraphSnapshot {
		GraphSnapshot {
			users: (0..users)
				.map(|i| User {
					id: i as u32 + 1,
					username: format!("user{i}"),
				})
				.collect(),
			posts: (0..posts)
				.map(|i| Post {
					id: i as u32 + 100,
					author: 1,
					content: String::new(),
				})
				.collect(),
			..GraphSnapshot::default()
		}
	}

	#[test]
	fn layout_is_deterministic() {
		let snap = snapshot(13, 27);
		assert_eq!(layout(&snap), layout(&snap));
	}

	#[test]
	fn first_user_sits_at_the_top_of_the_ring() {
		let snap = snapshot(4, 0);
		let pos = layout(&snap)[&NodeId::User(1)];
		// angle -pi/2: directly above the ring center by the ring radius
		let radius = 50.0 + 8.0 * 4.0;
		assert!((pos.x - RING_CENTER_X).abs() < 1e-9);
		assert!((pos.y - (RING_CENTER_Y - radius)).abs() < 1e-9);
	}

	#[test]
	fn ring_radius_is_capped() {
		let snap = snapshot(100, 0);
		for pos in layout(&snap).values() {
			let (dx, dy) = (pos.x - RING_CENTER_X, pos.y - RING_CENTER_Y);
			assert!((dx * dx + dy * dy).sqrt() <= RING_MAX_RADIUS + 1e-9);
		}
	}

	#[test]
	fn posts_fill_the_grid_in_backend_order() {
		let snap = snapshot(1, 12);
		let positions = layout(&snap);
		// 11th post wraps to the second row, first column
		assert_eq!(
			positions[&NodeId::Post(110)],
			LayoutPosition {
				x: GRID_ORIGIN_X,
				y: GRID_ORIGIN_Y + GRID_ROW_STEP,
			}
		);
		assert_eq!(
			positions[&NodeId::Post(101)],
			LayoutPosition {
				x: GRID_ORIGIN_X + GRID_COL_STEP,
				y: GRID_ORIGIN_Y,
			}
		);
	}

	#[test]
	fn empty_snapshot_yields_empty_layout() {
		assert!(layout(&GraphSnapshot::default()).is_empty());
	}
}
