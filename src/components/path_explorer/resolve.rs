use super::types::{User, UserId};

/// Outcome of resolving a human-entered token against the loaded directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
	Id(UserId),
	NotFound,
}

/// Map a user-supplied token to a canonical user id.
///
/// Digit-only tokens are taken verbatim without checking the directory; the
/// path/recommendation endpoints report unknown ids themselves. Anything else
/// is matched case-insensitively against the directory usernames, first match
/// wins (duplicate usernames depend on backend response order). There is no
/// fuzzy matching and no error: callers branch on [`Resolution::NotFound`].
pub fn resolve(token: &str, directory: &[User]) -> Resolution {
	let token = token.trim();
	if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
		return match token.parse() {
			Ok(id) => Resolution::Id(id),
			Err(_) => Resolution::NotFound,
		};
	}
	directory
		.iter()
		.find(|u| u.username.eq_ignore_ascii_case(token))
		.map(|u| Resolution::Id(u.id))
		.unwrap_or(Resolution::NotFound)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn directory() -> Vec<User> {
		vec![
			User {
				id: 1,
				username: "alice".into(),
			},
			User {
				id: 2,
				username: "Bob".into(),
			},
		]
	}

	#[test]
	fn numeric_tokens_pass_through_unvalidated() {
		// 99 is not in the directory; numeric ids are accepted on faith.
		assert_eq!(resolve("99", &directory()), Resolution::Id(99));
		assert_eq!(resolve(" 2 ", &directory()), Resolution::Id(2));
		assert_eq!(resolve("7", &[]), Resolution::Id(7));
	}

	#[test]
	fn usernames_match_case_insensitively() {
		assert_eq!(resolve("ALICE", &directory()), Resolution::Id(1));
		assert_eq!(resolve("bob", &directory()), Resolution::Id(2));
	}

	#[test]
	fn unknown_tokens_are_not_found() {
		assert_eq!(resolve("carol", &directory()), Resolution::NotFound);
		assert_eq!(resolve("", &directory()), Resolution::NotFound);
		assert_eq!(resolve("ali", &directory()), Resolution::NotFound);
	}

	#[test]
	fn duplicate_usernames_resolve_to_first_match() {
		let dupes = vec![
			User {
				id: 4,
				username: "dana".into(),
			},
			User {
				id: 9,
				username: "Dana".into(),
			},
		];
		assert_eq!(resolve("dana", &dupes), Resolution::Id(4));
	}

	#[test]
	fn overflowing_digit_strings_are_not_found() {
		assert_eq!(resolve("99999999999999999999", &directory()), Resolution::NotFound);
	}
}
