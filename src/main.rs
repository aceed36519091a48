use leptos::prelude::*;

fn main() {
	path_explorer::init_logging();
	mount_to_body(path_explorer::App);
}
