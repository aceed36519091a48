use std::collections::HashMap;

use serde::Deserialize;

/// Canonical numeric user identifier, as issued by the backend.
pub type UserId = u32;
/// Canonical numeric post identifier.
pub type PostId = u32;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct User {
	#[serde(rename = "user_id")]
	pub id: UserId,
	pub username: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Post {
	#[serde(rename = "post_id")]
	pub id: PostId,
	#[serde(rename = "user_id")]
	pub author: UserId,
	pub content: String,
}

/// Directed follow relation. Duplicates are kept as-is; rendering draws
/// each occurrence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FollowEdge {
	pub from: UserId,
	pub to: UserId,
}

/// Directed like relation from a user to a post.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LikeEdge {
	pub from: UserId,
	pub to: PostId,
}

/// Author-to-post edge, derived locally from `Post::author` (one per post).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthorshipEdge {
	pub from: UserId,
	pub to: PostId,
}

/// Immutable point-in-time aggregate of every relation needed for rendering.
///
/// A refresh produces a whole new snapshot; nothing is patched in place. A
/// relation whose fetch failed is an empty collection, and the snapshot is
/// still valid (degraded) for rendering.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphSnapshot {
	pub users: Vec<User>,
	pub posts: Vec<Post>,
	pub follows: Vec<FollowEdge>,
	pub likes: Vec<LikeEdge>,
	pub authorship: Vec<AuthorshipEdge>,
}

impl GraphSnapshot {
	/// Number of posts per author, for the node badges.
	pub fn post_counts(&self) -> HashMap<UserId, usize> {
		let mut counts = HashMap::new();
		for post in &self.posts {
			*counts.entry(post.author).or_insert(0) += 1;
		}
		counts
	}

	pub fn username(&self, id: UserId) -> Option<&str> {
		self.users
			.iter()
			.find(|u| u.id == id)
			.map(|u| u.username.as_str())
	}
}

/// Layout key: user and post nodes live in one coordinate map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeId {
	User(UserId),
	Post(PostId),
}

/// One recommended user together with the connecting path the backend found
/// from the focal user. An empty path means none was found (or that single
/// lookup failed).
#[derive(Clone, Debug, PartialEq)]
pub struct Recommendation {
	pub user_id: UserId,
	pub connecting_path: Vec<UserId>,
}
