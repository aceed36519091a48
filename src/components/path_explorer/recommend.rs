use futures::future::join_all;
use log::warn;

use crate::api::{FetchError, SocialApi};

use super::types::{Recommendation, UserId};

/// Fetch recommendations for a focal user and resolve a connecting path for
/// each, all path lookups concurrent.
///
/// Per-item tolerance: a failed path lookup degrades that entry to an empty
/// `connecting_path`, it never fails the batch or drops the entry. Results
/// keep the backend's recommendation order. The focal token is resolved by
/// the caller beforehand so a bad token causes no network activity at all.
pub async fn connect_recommendations<A: SocialApi>(
	api: &A,
	focal: UserId,
) -> Result<Vec<Recommendation>, FetchError> {
	let recommended = api.recommendations(focal).await?;
	let paths = join_all(recommended.iter().map(|&rec| async move {
		api.shortest_path(focal, rec).await.unwrap_or_else(|e| {
			warn!("path lookup {focal} -> {rec} failed: {e}");
			Vec::new()
		})
	}))
	.await;
	Ok(recommended
		.into_iter()
		.zip(paths)
		.map(|(user_id, connecting_path)| Recommendation {
			user_id,
			connecting_path,
		})
		.collect())
}
