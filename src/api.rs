//! HTTP boundary for the social-graph backend.
//!
//! Everything the explorer reads comes through [`SocialApi`]; the concrete
//! [`HttpApi`] talks JSON over HTTP and validates response shapes with serde,
//! so a malformed payload surfaces as a typed [`FetchError`] instead of being
//! silently treated as empty. Callers decide how far a failure degrades;
//! the assembler and batch resolver catch per relation / per item.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::components::path_explorer::{Post, PostId, User, UserId};

/// One failed network call among many. Never fatal: the caller degrades the
/// affected relation or batch item to empty and carries on.
#[derive(Debug, Error)]
pub enum FetchError {
	#[error("request failed: {0}")]
	Http(#[from] reqwest::Error),
	#[error("unexpected status {0}")]
	Status(u16),
	#[error("malformed payload: {0}")]
	Shape(#[from] serde_json::Error),
}

/// Read endpoints the explorer consumes.
#[allow(async_fn_in_trait)]
pub trait SocialApi {
	/// `GET /users-list` - the user directory.
	async fn users(&self) -> Result<Vec<User>, FetchError>;
	/// `GET /posts/all` - every post.
	async fn posts(&self) -> Result<Vec<Post>, FetchError>;
	/// `GET /user/followings/{uid}` - one user's outgoing follows.
	async fn followings(&self, user: UserId) -> Result<Vec<UserId>, FetchError>;
	/// `GET /user/likedposts/{uid}` - one user's liked posts.
	async fn liked_posts(&self, user: UserId) -> Result<Vec<PostId>, FetchError>;
	/// `GET /path` - connecting path between two users; empty means none.
	async fn shortest_path(&self, from: UserId, to: UserId) -> Result<Vec<UserId>, FetchError>;
	/// `GET /recommendations` - recommended users for a focal user.
	async fn recommendations(&self, user: UserId) -> Result<Vec<UserId>, FetchError>;
}

#[derive(Deserialize)]
struct PathResponse {
	path: Vec<UserId>,
}

/// Kind of user-to-user interaction the management forms create.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interaction {
	Like,
	Follow,
}

impl Interaction {
	pub fn as_str(self) -> &'static str {
		match self {
			Interaction::Like => "like",
			Interaction::Follow => "follow",
		}
	}
}

/// The real backend client.
#[derive(Clone)]
pub struct HttpApi {
	client: reqwest::Client,
	base: String,
}

impl HttpApi {
	pub fn new(base: impl Into<String>) -> Self {
		Self {
			client: reqwest::Client::new(),
			base: base.into(),
		}
	}

	/// Client rooted at the page origin, for the browser build.
	pub fn from_window() -> Self {
		let base = web_sys::window()
			.and_then(|w| w.location().origin().ok())
			.unwrap_or_else(|| "http://localhost:8080".into());
		Self::new(base)
	}

	async fn get_json<T: DeserializeOwned>(
		&self,
		path: &str,
		query: &[(&str, String)],
	) -> Result<T, FetchError> {
		let response = self
			.client
			.get(format!("{}{}", self.base, path))
			.query(query)
			.send()
			.await?;
		if !response.status().is_success() {
			return Err(FetchError::Status(response.status().as_u16()));
		}
		let body = response.text().await?;
		Ok(serde_json::from_str(&body)?)
	}

	async fn post_form(&self, path: &str, form: &[(&str, String)]) -> Result<(), FetchError> {
		let response = self
			.client
			.post(format!("{}{}", self.base, path))
			.form(form)
			.send()
			.await?;
		if !response.status().is_success() {
			return Err(FetchError::Status(response.status().as_u16()));
		}
		Ok(())
	}

	/// `POST /user` - create a user. Success is status-only.
	pub async fn create_user(&self, username: &str) -> Result<(), FetchError> {
		self.post_form("/user", &[("username", username.to_owned())])
			.await
	}

	/// `POST /post` - create a post for an author.
	pub async fn create_post(&self, author: UserId, content: &str) -> Result<(), FetchError> {
		self.post_form(
			"/post",
			&[
				("user_id", author.to_string()),
				("content", content.to_owned()),
			],
		)
		.await
	}

	/// `POST /interaction` - add a like or follow between two users.
	pub async fn add_interaction(
		&self,
		user: UserId,
		target: UserId,
		kind: Interaction,
	) -> Result<(), FetchError> {
		self.post_form(
			"/interaction",
			&[
				("user_id", user.to_string()),
				("target_id", target.to_string()),
				("type", kind.as_str().to_owned()),
			],
		)
		.await
	}
}

impl SocialApi for HttpApi {
	async fn users(&self) -> Result<Vec<User>, FetchError> {
		self.get_json(
			"/users-list",
			&[("page", "1".into()), ("limit", "1000".into())],
		)
		.await
	}

	async fn posts(&self) -> Result<Vec<Post>, FetchError> {
		self.get_json("/posts/all", &[]).await
	}

	async fn followings(&self, user: UserId) -> Result<Vec<UserId>, FetchError> {
		self.get_json(&format!("/user/followings/{user}"), &[]).await
	}

	async fn liked_posts(&self, user: UserId) -> Result<Vec<PostId>, FetchError> {
		self.get_json(&format!("/user/likedposts/{user}"), &[]).await
	}

	async fn shortest_path(&self, from: UserId, to: UserId) -> Result<Vec<UserId>, FetchError> {
		let response: PathResponse = self
			.get_json(
				"/path",
				&[("u1", from.to_string()), ("u2", to.to_string())],
			)
			.await?;
		Ok(response.path)
	}

	async fn recommendations(&self, user: UserId) -> Result<Vec<UserId>, FetchError> {
		self.get_json("/recommendations", &[("u", user.to_string())])
			.await
	}
}
