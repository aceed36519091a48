use std::sync::atomic::{AtomicU64, Ordering};

use futures::future::join_all;
use log::warn;

use crate::api::SocialApi;

use super::types::{AuthorshipEdge, FollowEdge, GraphSnapshot, LikeEdge};

/// Fetch and merge all five relations into one snapshot.
///
/// The directory and post list are fetched concurrently, then a per-user
/// fan-out fetches followings and liked posts (the two concurrent per user,
/// all users concurrent with each other) and joins before merging. Every
/// fetch fails independently: a failed relation or a failed per-user call
/// degrades only its own contribution to empty, never the whole assembly.
/// There are no retries; the refresh coordinator re-invokes this wholesale.
pub async fn assemble<A: SocialApi>(api: &A) -> GraphSnapshot {
	let (users, posts) = futures::join!(api.users(), api.posts());
	let users = users.unwrap_or_else(|e| {
		warn!("user directory fetch failed: {e}");
		Vec::new()
	});
	let posts = posts.unwrap_or_else(|e| {
		warn!("post list fetch failed: {e}");
		Vec::new()
	});

	// Authorship needs no round-trip: one edge per post, straight from the
	// author field.
	let authorship = posts
		.iter()
		.map(|p| AuthorshipEdge {
			from: p.author,
			to: p.id,
		})
		.collect();

	let per_user = join_all(users.iter().map(|u| async move {
		let (follows, likes) = futures::join!(api.followings(u.id), api.liked_posts(u.id));
		(u.id, follows, likes)
	}))
	.await;

	let mut follows = Vec::new();
	let mut likes = Vec::new();
	for (uid, follow_result, like_result) in per_user {
		match follow_result {
			Ok(targets) => follows.extend(targets.into_iter().map(|to| FollowEdge { from: uid, to })),
			Err(e) => warn!("followings fetch for user {uid} failed: {e}"),
		}
		match like_result {
			Ok(posts) => likes.extend(posts.into_iter().map(|to| LikeEdge { from: uid, to })),
			Err(e) => warn!("liked-posts fetch for user {uid} failed: {e}"),
		}
	}

	GraphSnapshot {
		users,
		posts,
		follows,
		likes,
		authorship,
	}
}

/// Generation gate that keeps superseded in-flight assemblies from
/// publishing over a newer snapshot.
///
/// Each invocation takes a generation from [`begin`](Self::begin) before
/// fetching and asks [`commit`](Self::commit) before publishing. The most
/// recently completed run wins; once a generation has published, no older
/// one may. In-flight requests are never aborted; staleness is resolved
/// here, at merge time.
#[derive(Debug, Default)]
pub struct AssemblyGate {
	issued: AtomicU64,
	published: AtomicU64,
}

impl AssemblyGate {
	pub fn begin(&self) -> u64 {
		self.issued.fetch_add(1, Ordering::Relaxed) + 1
	}

	pub fn commit(&self, generation: u64) -> bool {
		self.published.fetch_max(generation, Ordering::Relaxed) <= generation
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::collections::{HashMap, HashSet};

	use futures::channel::oneshot;
	use futures::executor::block_on;

	use crate::api::mock::MockApi;
	use crate::components::path_explorer::types::{Post, User};

	use super::*;

	fn user(id: u32, name: &str) -> User {
		User {
			id,
			username: name.into(),
		}
	}

	fn post(id: u32, author: u32) -> Post {
		Post {
			id,
			author,
			content: format!("post {id}"),
		}
	}

	fn populated() -> MockApi {
		MockApi {
			users: vec![user(1, "alice"), user(2, "bob"), user(7, "grace")],
			posts: vec![post(100, 1), post(101, 2)],
			followings: HashMap::from([(1, vec![2, 7]), (2, vec![1]), (7, vec![1])]),
			liked: HashMap::from([(2, vec![100]), (7, vec![100, 101])]),
			..MockApi::default()
		}
	}

	#[test]
	fn merges_all_relations() {
		let snapshot = block_on(assemble(&populated()));
		assert_eq!(snapshot.users.len(), 3);
		assert_eq!(snapshot.posts.len(), 2);
		assert_eq!(
			snapshot.authorship,
			vec![
				AuthorshipEdge { from: 1, to: 100 },
				AuthorshipEdge { from: 2, to: 101 },
			]
		);
		assert!(snapshot.follows.contains(&FollowEdge { from: 1, to: 7 }));
		assert!(snapshot.likes.contains(&LikeEdge { from: 7, to: 101 }));
	}

	#[test]
	fn one_users_follow_failure_degrades_only_that_user() {
		let mut api = populated();
		api.fail_followings = HashSet::from([7]);
		let degraded = block_on(assemble(&api));
		let full = block_on(assemble(&populated()));

		assert!(degraded.follows.iter().all(|e| e.from != 7));
		let expected: Vec<_> = full.follows.iter().filter(|e| e.from != 7).copied().collect();
		assert_eq!(degraded.follows, expected);
		// everything else is untouched, including the same user's likes
		assert_eq!(degraded.users, full.users);
		assert_eq!(degraded.likes, full.likes);
		assert_eq!(degraded.authorship, full.authorship);
	}

	#[test]
	fn directory_failure_yields_an_empty_but_valid_snapshot() {
		let mut api = populated();
		api.fail_users = true;
		let snapshot = block_on(assemble(&api));
		// no directory, so no fan-out either; posts still come through
		assert!(snapshot.users.is_empty());
		assert!(snapshot.follows.is_empty());
		assert!(snapshot.likes.is_empty());
		assert_eq!(snapshot.posts.len(), 2);
		assert_eq!(snapshot.authorship.len(), 2);
	}

	#[test]
	fn post_failure_leaves_the_user_relations_intact() {
		let mut api = populated();
		api.fail_posts = true;
		let snapshot = block_on(assemble(&api));
		assert!(snapshot.posts.is_empty());
		assert!(snapshot.authorship.is_empty());
		assert_eq!(snapshot.users.len(), 3);
		assert!(!snapshot.follows.is_empty());
	}

	#[test]
	fn gate_rejects_superseded_generations() {
		let gate = AssemblyGate::default();
		let a = gate.begin();
		let b = gate.begin();
		assert!(gate.commit(b));
		assert!(!gate.commit(a), "older run must not overwrite a newer snapshot");
	}

	#[test]
	fn gate_lets_runs_publish_in_completion_order() {
		let gate = AssemblyGate::default();
		let a = gate.begin();
		let b = gate.begin();
		assert!(gate.commit(a));
		assert!(gate.commit(b));
	}

	/// Directory fetch that parks until the test releases it, so two
	/// assemblies can be interleaved deterministically.
	struct StalledApi {
		inner: MockApi,
		release: RefCell<Option<oneshot::Receiver<()>>>,
	}

	impl crate::api::SocialApi for StalledApi {
		async fn users(&self) -> Result<Vec<User>, crate::api::FetchError> {
			let release = self.release.borrow_mut().take();
			if let Some(rx) = release {
				let _ = rx.await;
			}
			self.inner.users().await
		}
		async fn posts(&self) -> Result<Vec<Post>, crate::api::FetchError> {
			self.inner.posts().await
		}
		async fn followings(&self, user: u32) -> Result<Vec<u32>, crate::api::FetchError> {
			self.inner.followings(user).await
		}
		async fn liked_posts(&self, user: u32) -> Result<Vec<u32>, crate::api::FetchError> {
			self.inner.liked_posts(user).await
		}
		async fn shortest_path(&self, from: u32, to: u32) -> Result<Vec<u32>, crate::api::FetchError> {
			self.inner.shortest_path(from, to).await
		}
		async fn recommendations(&self, user: u32) -> Result<Vec<u32>, crate::api::FetchError> {
			self.inner.recommendations(user).await
		}
	}

	#[test]
	fn stale_run_is_discarded_on_arrival() {
		block_on(async {
			let gate = AssemblyGate::default();
			let (tx, rx) = oneshot::channel();
			let slow = StalledApi {
				inner: populated(),
				release: RefCell::new(Some(rx)),
			};
			let mut altered = populated();
			altered.users.push(user(9, "ivan"));

			// run A starts first but will finish last
			let generation_a = gate.begin();
			let run_a = assemble(&slow);

			let generation_b = gate.begin();
			let snapshot_b = assemble(&altered).await;
			assert!(gate.commit(generation_b));

			let mut published = snapshot_b.clone();

			tx.send(()).unwrap();
			let snapshot_a = run_a.await;
			if gate.commit(generation_a) {
				published = snapshot_a;
			}

			assert_eq!(published, snapshot_b);
		});
	}
}
