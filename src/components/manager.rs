use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;
use web_sys::SubmitEvent;

use crate::api::{HttpApi, Interaction};
use crate::bus::RefreshBus;

/// Mutation forms: create user, write post, add like/follow.
///
/// Each write broadcasts on the [`RefreshBus`] only after the
/// backend confirms it, so every mounted explorer re-synchronizes without any
/// direct coupling to these forms.
#[component]
pub fn GraphManager() -> impl IntoView {
	let api = HttpApi::from_window();
	let bus = expect_context::<RefreshBus>();

	let username = RwSignal::new(String::new());
	let post_user = RwSignal::new(String::new());
	let post_content = RwSignal::new(String::new());
	let int_user = RwSignal::new(String::new());
	let int_target = RwSignal::new(String::new());
	let int_kind = RwSignal::new("like".to_string());
	let message = RwSignal::new(None::<(String, bool)>);
	let running = RwSignal::new(false);

	let (api_user, bus_user) = (api.clone(), bus.clone());
	let add_user = move |ev: SubmitEvent| {
		ev.prevent_default();
		let name = username.get();
		if name.trim().is_empty() {
			return;
		}
		running.set(true);
		let (api, bus) = (api_user.clone(), bus_user.clone());
		spawn_local(async move {
			match api.create_user(name.trim()).await {
				Ok(()) => {
					username.set(String::new());
					message.set(Some(("User created".into(), true)));
					bus.notify();
				}
				Err(e) => {
					warn!("create user failed: {e}");
					message.set(Some(("Error creating user".into(), false)));
				}
			}
			running.set(false);
		});
	};

	let (api_post, bus_post) = (api.clone(), bus.clone());
	let add_post = move |ev: SubmitEvent| {
		ev.prevent_default();
		let (author, content) = (post_user.get(), post_content.get());
		let Ok(author) = author.trim().parse::<u32>() else {
			message.set(Some(("Author must be a numeric user ID".into(), false)));
			return;
		};
		if author == 0 || content.trim().is_empty() {
			return;
		}
		running.set(true);
		let (api, bus) = (api_post.clone(), bus_post.clone());
		spawn_local(async move {
			match api.create_post(author, &content).await {
				Ok(()) => {
					post_user.set(String::new());
					post_content.set(String::new());
					message.set(Some(("Post created".into(), true)));
					bus.notify();
				}
				Err(e) => {
					warn!("create post failed: {e}");
					message.set(Some(("Error creating post".into(), false)));
				}
			}
			running.set(false);
		});
	};

	let add_interaction = move |ev: SubmitEvent| {
		ev.prevent_default();
		let (Ok(user), Ok(target)) = (
			int_user.get().trim().parse::<u32>(),
			int_target.get().trim().parse::<u32>(),
		) else {
			message.set(Some(("Both IDs must be numeric".into(), false)));
			return;
		};
		if user == 0 || target == 0 {
			return;
		}
		let kind = if int_kind.get() == "follow" {
			Interaction::Follow
		} else {
			Interaction::Like
		};
		running.set(true);
		let (api, bus) = (api.clone(), bus.clone());
		spawn_local(async move {
			match api.add_interaction(user, target, kind).await {
				Ok(()) => {
					int_user.set(String::new());
					int_target.set(String::new());
					message.set(Some((format!("{} added", kind.as_str()), true)));
					bus.notify();
				}
				Err(e) => {
					warn!("add interaction failed: {e}");
					message.set(Some(("Error adding interaction".into(), false)));
				}
			}
			running.set(false);
		});
	};

	view! {
		<div class="graph-manager">
			<section class="card">
				<h3 class="card-title">"Create User"</h3>
				<form on:submit=add_user>
					<input
						placeholder="Username"
						prop:value=move || username.get()
						on:input=move |ev| username.set(event_target_value(&ev))
					/>
					<button type="submit" disabled=move || running.get()>
						"Create user"
					</button>
				</form>
			</section>

			<section class="card">
				<h3 class="card-title">"Write Post"</h3>
				<form on:submit=add_post>
					<input
						placeholder="Author user ID"
						prop:value=move || post_user.get()
						on:input=move |ev| post_user.set(event_target_value(&ev))
					/>
					<textarea
						placeholder="Content"
						prop:value=move || post_content.get()
						on:input=move |ev| post_content.set(event_target_value(&ev))
					/>
					<button type="submit" disabled=move || running.get()>
						"Post"
					</button>
				</form>
			</section>

			<section class="card">
				<h3 class="card-title">"Interaction"</h3>
				<form on:submit=add_interaction>
					<input
						placeholder="Your user ID"
						prop:value=move || int_user.get()
						on:input=move |ev| int_user.set(event_target_value(&ev))
					/>
					<input
						placeholder="Target ID"
						prop:value=move || int_target.get()
						on:input=move |ev| int_target.set(event_target_value(&ev))
					/>
					<select on:change=move |ev| int_kind.set(event_target_value(&ev))>
						<option value="like">"Like"</option>
						<option value="follow">"Follow"</option>
					</select>
					<button type="submit" disabled=move || running.get()>
						"Add"
					</button>
				</form>
			</section>

			{move || {
				message
					.get()
					.map(|(text, ok)| {
						view! { <p class=if ok { "message" } else { "error" }>{text}</p> }
					})
			}}
		</div>
	}
}
