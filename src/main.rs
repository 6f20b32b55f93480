//! Browser entry point.

use leptos::prelude::*;
use river_replay::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(App)
}
