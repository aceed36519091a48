//! Graph assembly and path/recommendation visualization.
//!
//! Pulls the five backend relations into an immutable [`GraphSnapshot`],
//! resolves human-entered identifiers against it, derives a deterministic
//! layout, and overlays backend path/recommendation results for rendering.
//! Everything degrades per relation or per batch item; nothing here has a
//! fatal failure mode.

mod assemble;
mod component;
mod layout;
mod overlay;
mod recommend;
mod render;
mod resolve;
mod types;

pub use assemble::{AssemblyGate, assemble};
pub use component::PathExplorer;
pub use layout::{LayoutPosition, layout};
pub use overlay::{Overlay, overlay};
pub use recommend::connect_recommendations;
pub use resolve::{Resolution, resolve};
pub use types::{
	AuthorshipEdge, FollowEdge, GraphSnapshot, LikeEdge, NodeId, Post, PostId, Recommendation,
	User, UserId,
};
