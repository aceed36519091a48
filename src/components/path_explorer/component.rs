use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, SubmitEvent};

use crate::api::{HttpApi, SocialApi};
use crate::bus::RefreshBus;

use super::assemble::{AssemblyGate, assemble};
use super::layout::layout;
use super::overlay;
use super::recommend::connect_recommendations;
use super::render::{self, Scene};
use super::resolve::{Resolution, resolve};
use super::types::GraphSnapshot;

/// Interactive path/recommendation explorer over the social graph.
///
/// Holds the current [`GraphSnapshot`] in a signal and replaces it wholesale
/// on every re-assembly; layout and overlay are derived from it, never stored.
/// Subscribes to the [`RefreshBus`] for its whole mount window.
#[component]
pub fn PathExplorer() -> impl IntoView {
	let api = HttpApi::from_window();
	let bus = expect_context::<RefreshBus>();

	let u1 = RwSignal::new(String::new());
	let u2 = RwSignal::new(String::new());
	let rec_user = RwSignal::new(String::new());
	let path = RwSignal::new(Vec::new());
	let recs = RwSignal::new(Vec::new());
	let error = RwSignal::new(None::<String>);
	let no_connection = RwSignal::new(false);
	let loading = RwSignal::new(false);
	let snapshot = RwSignal::new(GraphSnapshot::default());
	let positions = Memo::new(move |_| layout(&snapshot.get()));
	let refresh_tick = RwSignal::new(0u64);

	// Re-assemble on every bus broadcast, for as long as we are mounted.
	let subscription = bus.subscribe(move || refresh_tick.update(|n| *n += 1));
	on_cleanup(move || drop(subscription));

	// Full re-assembly on mount and on every tick. The gate drops results of
	// superseded runs at publish time; nothing is cancelled in flight.
	let gate = Arc::new(AssemblyGate::default());
	let api_sync = api.clone();
	Effect::new(move |_| {
		refresh_tick.get();
		let api = api_sync.clone();
		let gate = gate.clone();
		spawn_local(async move {
			let generation = gate.begin();
			let assembled = assemble(&api).await;
			if gate.commit(generation) {
				snapshot.set(assembled);
			} else {
				debug!("discarding superseded assembly (generation {generation})");
			}
		});
	});

	// Redraw whenever the snapshot, the derived layout, or the active path
	// changes. The canvas holds no state of its own.
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	Effect::new(move |_| {
		let snap = snapshot.get();
		let positions = positions.get();
		let on_path = path.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		canvas.set_width(render::CANVAS_WIDTH as u32);
		canvas.set_height(render::CANVAS_HEIGHT as u32);
		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();
		let overlay = overlay::overlay(&on_path, &snap);
		let post_counts = snap.post_counts();
		render::render(
			&Scene {
				snapshot: &snap,
				positions: &positions,
				overlay: &overlay,
				post_counts: &post_counts,
			},
			&ctx,
		);
	});

	let api_path = api.clone();
	let find_path = move |ev: SubmitEvent| {
		ev.prevent_default();
		error.set(None);
		no_connection.set(false);
		let (start, end) = (u1.get(), u2.get());
		if start.trim().is_empty() || end.trim().is_empty() {
			return;
		}
		let directory = snapshot.get_untracked().users;
		let (Resolution::Id(from), Resolution::Id(to)) =
			(resolve(&start, &directory), resolve(&end, &directory))
		else {
			path.set(Vec::new());
			error.set(Some(
				"One or both users not found. Use numeric IDs or exact usernames.".into(),
			));
			return;
		};
		loading.set(true);
		let api = api_path.clone();
		spawn_local(async move {
			match api.shortest_path(from, to).await {
				Ok(found) => {
					no_connection.set(found.is_empty());
					path.set(found);
				}
				Err(e) => {
					warn!("path fetch failed: {e}");
					path.set(Vec::new());
					error.set(Some("Error fetching path".into()));
				}
			}
			loading.set(false);
		});
	};

	let api_recs = api;
	let get_recs = move |ev: SubmitEvent| {
		ev.prevent_default();
		error.set(None);
		let token = rec_user.get();
		if token.trim().is_empty() {
			return;
		}
		let directory = snapshot.get_untracked().users;
		// A bad token resolves locally; no network is touched.
		let Resolution::Id(focal) = resolve(&token, &directory) else {
			recs.set(Vec::new());
			error.set(Some(
				"User for recommendations not found (use ID or exact username)".into(),
			));
			return;
		};
		loading.set(true);
		let api = api_recs.clone();
		spawn_local(async move {
			match connect_recommendations(&api, focal).await {
				Ok(batch) => recs.set(batch),
				Err(e) => {
					warn!("recommendations fetch failed: {e}");
					recs.set(Vec::new());
					error.set(Some("Error fetching recommendations".into()));
				}
			}
			loading.set(false);
		});
	};

	view! {
		<div class="path-explorer">
			<section class="card">
				<h3 class="card-title">"Degrees of Separation"</h3>
				<form on:submit=find_path>
					<input
						placeholder="Start user ID or username"
						prop:value=move || u1.get()
						on:input=move |ev| u1.set(event_target_value(&ev))
					/>
					<input
						placeholder="End user ID or username"
						prop:value=move || u2.get()
						on:input=move |ev| u2.set(event_target_value(&ev))
					/>
					<button type="submit" disabled=move || loading.get()>
						{move || if loading.get() { "Finding path..." } else { "Find path" }}
					</button>
				</form>
				{move || {
					let on_path = path.get();
					(!on_path.is_empty())
						.then(|| {
							let hops = on_path.len() - 1;
							view! {
								<div class="path-result">
									<p>"Connection found!"</p>
									<div class="path-chain">
										{on_path
											.iter()
											.map(|id| view! { <span class="badge">{*id}</span> })
											.collect_view()}
									</div>
									<p class="muted">{hops} " degrees of separation"</p>
								</div>
							}
						})
				}}
				{move || {
					no_connection
						.get()
						.then(|| {
							view! { <p class="muted">"No connection found between these users"</p> }
						})
				}}
				{move || {
					error.get().map(|message| view! { <p class="error">{message}</p> })
				}}
			</section>

			<section class="card">
				<div class="card-header">
					<h3 class="card-title">"User Graph (follow / like)"</h3>
					<button on:click=move |_| refresh_tick.update(|n| *n += 1)>"Refresh"</button>
					<button on:click=move |_| {
						path.set(Vec::new());
						recs.set(Vec::new());
						no_connection.set(false);
						error.set(None);
					}>"Reset highlights"</button>
				</div>
				{move || {
					snapshot
						.with(|s| s.users.is_empty() && s.posts.is_empty())
						.then(|| view! { <p class="muted">"No data yet"</p> })
				}}
				<canvas node_ref=canvas_ref class="graph-canvas" />
				<p class="legend">
					"Blue = follow. Gray = authorship (to post). Orange dashed = like (to post). \
					Teal badge = post count. Green squares = posts. Path nodes highlight in orange."
				</p>
			</section>

			<section class="card">
				<h3 class="card-title">"People You May Know"</h3>
				<form on:submit=get_recs>
					<input
						placeholder="Your user ID or username"
						prop:value=move || rec_user.get()
						on:input=move |ev| rec_user.set(event_target_value(&ev))
					/>
					<button type="submit" disabled=move || loading.get()>
						{move || {
							if loading.get() { "Finding recommendations..." } else { "Get recommendations" }
						}}
					</button>
				</form>
				{move || {
					let batch = recs.get();
					(!batch.is_empty())
						.then(|| {
							view! {
								<div class="rec-list">
									{batch
										.into_iter()
										.map(|rec| {
											let label = snapshot
												.with(|s| s.username(rec.user_id).map(str::to_owned))
												.unwrap_or_else(|| rec.user_id.to_string());
											let connection = if rec.connecting_path.is_empty() {
												view! {
													<p class="muted">"No visible path (might be disconnected)"</p>
												}
													.into_any()
											} else {
												view! {
													<div class="path-chain">
														{rec
															.connecting_path
															.iter()
															.map(|id| view! { <span class="badge">{*id}</span> })
															.collect_view()}
													</div>
												}
													.into_any()
											};
											view! {
												<div class="rec">
													<p>{label} <span class="muted">" #"{rec.user_id}</span></p>
													{connection}
												</div>
											}
										})
										.collect_view()}
								</div>
							}
						})
				}}
			</section>
		</div>
	}
}
