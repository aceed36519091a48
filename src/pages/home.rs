use leptos::prelude::*;

use crate::components::manager::GraphManager;
use crate::components::path_explorer::PathExplorer;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<main class="container">
				<h1>"Social Graph Explorer"</h1>
				<PathExplorer />
				<h2>"Manage"</h2>
				<GraphManager />
			</main>
		</ErrorBoundary>
	}
}
