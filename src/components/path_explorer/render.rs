use std::collections::HashMap;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::layout::LayoutPosition;
use super::overlay::Overlay;
use super::types::{GraphSnapshot, NodeId, UserId};

pub const CANVAS_WIDTH: f64 = 1000.0;
pub const CANVAS_HEIGHT: f64 = 600.0;

const USER_RADIUS: f64 = 14.0;
const USER_RADIUS_HIGHLIGHT: f64 = 18.0;
const POST_HALF: f64 = 10.0;
const ARROW_SIZE: f64 = 8.0;

const FOLLOW_COLOR: &str = "#2563eb";
const HIGHLIGHT_COLOR: &str = "#f97316";
const AUTHORSHIP_COLOR: &str = "#6b7280";
const LIKE_COLOR: &str = "#fb923c";
const USER_COLOR: &str = "#7c3aed";
const POST_COLOR: &str = "#10b981";
const NODE_STROKE: &str = "#0f172a";
const LABEL_COLOR: &str = "#e2e8f0";
const SUBLABEL_COLOR: &str = "#94a3b8";
const BADGE_COLOR: &str = "#06b6d4";
const BACKGROUND: &str = "#1a1a2e";

/// Everything one frame needs, borrowed from the component's signals.
pub struct Scene<'a> {
	pub snapshot: &'a GraphSnapshot,
	pub positions: &'a HashMap<NodeId, LayoutPosition>,
	pub overlay: &'a Overlay,
	pub post_counts: &'a HashMap<UserId, usize>,
}

/// Draw the full graph in a fixed stacking order: follow edges, authorship
/// edges, like edges, user nodes, post nodes. Highlighted elements are
/// restyled in place, so they always sit on top of non-highlighted elements
/// of the same type.
pub fn render(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT);
	draw_follow_edges(scene, ctx);
	draw_authorship_edges(scene, ctx);
	draw_like_edges(scene, ctx);
	draw_user_nodes(scene, ctx);
	draw_post_nodes(scene, ctx);
}

fn draw_follow_edges(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	for (i, edge) in scene.snapshot.follows.iter().enumerate() {
		let (Some(from), Some(to)) = (
			scene.positions.get(&NodeId::User(edge.from)),
			scene.positions.get(&NodeId::User(edge.to)),
		) else {
			// dangling endpoint, e.g. a follow target outside the directory page
			continue;
		};
		let highlighted = scene.overlay.follow_edges.contains(&i);
		let (color, width, alpha) = if highlighted {
			(HIGHLIGHT_COLOR, 3.0, 1.0)
		} else {
			(FOLLOW_COLOR, 1.8, 0.9)
		};
		ctx.set_global_alpha(alpha);
		draw_arrow(ctx, *from, *to, USER_RADIUS, color, width);
		ctx.set_global_alpha(1.0);
	}
}

fn draw_authorship_edges(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	ctx.set_global_alpha(0.8);
	for edge in &scene.snapshot.authorship {
		let (Some(from), Some(to)) = (
			scene.positions.get(&NodeId::User(edge.from)),
			scene.positions.get(&NodeId::Post(edge.to)),
		) else {
			continue;
		};
		draw_arrow(ctx, *from, *to, POST_HALF, AUTHORSHIP_COLOR, 1.5);
	}
	ctx.set_global_alpha(1.0);
}

fn draw_like_edges(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	ctx.set_global_alpha(0.85);
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(4.0),
		&JsValue::from_f64(3.0),
	));
	for edge in &scene.snapshot.likes {
		let (Some(from), Some(to)) = (
			scene.positions.get(&NodeId::User(edge.from)),
			scene.positions.get(&NodeId::Post(edge.to)),
		) else {
			continue;
		};
		draw_arrow(ctx, *from, *to, POST_HALF, LIKE_COLOR, 1.4);
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
	ctx.set_global_alpha(1.0);
}

fn draw_user_nodes(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	for user in &scene.snapshot.users {
		let Some(pos) = scene.positions.get(&NodeId::User(user.id)) else {
			continue;
		};
		let highlighted = scene.overlay.nodes.contains(&user.id);
		let (radius, fill, stroke_width) = if highlighted {
			(USER_RADIUS_HIGHLIGHT, HIGHLIGHT_COLOR, 3.0)
		} else {
			(USER_RADIUS, USER_COLOR, 1.0)
		};

		ctx.begin_path();
		let _ = ctx.arc(pos.x, pos.y, radius, 0.0, 2.0 * std::f64::consts::PI);
		ctx.set_fill_style_str(fill);
		ctx.fill();
		ctx.set_stroke_style_str(NODE_STROKE);
		ctx.set_line_width(stroke_width);
		ctx.stroke();

		ctx.set_text_align("center");
		ctx.set_fill_style_str(LABEL_COLOR);
		ctx.set_font("11px sans-serif");
		let _ = ctx.fill_text(&user.username, pos.x, pos.y - 22.0);
		ctx.set_fill_style_str(SUBLABEL_COLOR);
		let _ = ctx.fill_text(&format!("#{}", user.id), pos.x, pos.y + 28.0);

		if let Some(count) = scene.post_counts.get(&user.id) {
			ctx.begin_path();
			let _ = ctx.arc(
				pos.x + 18.0,
				pos.y - 18.0,
				10.0,
				0.0,
				2.0 * std::f64::consts::PI,
			);
			ctx.set_fill_style_str(BADGE_COLOR);
			ctx.fill();
			ctx.set_fill_style_str("#001217");
			ctx.set_font("10px sans-serif");
			let _ = ctx.fill_text(&count.to_string(), pos.x + 18.0, pos.y - 14.0);
		}
	}
}

fn draw_post_nodes(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	for post in &scene.snapshot.posts {
		let Some(pos) = scene.positions.get(&NodeId::Post(post.id)) else {
			continue;
		};
		ctx.set_fill_style_str(POST_COLOR);
		ctx.fill_rect(
			pos.x - POST_HALF,
			pos.y - POST_HALF,
			POST_HALF * 2.0,
			POST_HALF * 2.0,
		);
		ctx.set_stroke_style_str(NODE_STROKE);
		ctx.set_line_width(1.0);
		ctx.stroke_rect(
			pos.x - POST_HALF,
			pos.y - POST_HALF,
			POST_HALF * 2.0,
			POST_HALF * 2.0,
		);
		ctx.set_text_align("center");
		ctx.set_fill_style_str(LABEL_COLOR);
		ctx.set_font("10px sans-serif");
		let _ = ctx.fill_text(&post.id.to_string(), pos.x, pos.y + 25.0);
	}
}

/// Stroke a trimmed line between two nodes with a filled arrowhead at the
/// target end, same construction as a hand-drawn marker: unit vector, pull
/// both ends in by the node radius, triangle off the tip.
fn draw_arrow(
	ctx: &CanvasRenderingContext2d,
	from: LayoutPosition,
	to: LayoutPosition,
	target_radius: f64,
	color: &str,
	width: f64,
) {
	let (dx, dy) = (to.x - from.x, to.y - from.y);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}
	let (ux, uy) = (dx / dist, dy / dist);

	ctx.set_stroke_style_str(color);
	ctx.set_line_width(width);
	ctx.begin_path();
	ctx.move_to(from.x + ux * USER_RADIUS, from.y + uy * USER_RADIUS);
	ctx.line_to(
		to.x - ux * (target_radius + ARROW_SIZE),
		to.y - uy * (target_radius + ARROW_SIZE),
	);
	ctx.stroke();

	let (tip_x, tip_y) = (to.x - ux * target_radius, to.y - uy * target_radius);
	let (back_x, back_y) = (tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);
	let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
	ctx.set_fill_style_str(color);
	ctx.begin_path();
	ctx.move_to(tip_x, tip_y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}
