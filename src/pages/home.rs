use std::rc::Rc;

use leptos::prelude::*;
use log::info;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlInputElement};

use crate::components::force_graph::{ForceGraphCanvas, RiverView};
use crate::config::ReplayConfig;
use crate::replay::{ReplayDriver, WindowTimer, load_and_replay};

/// Home page: pick a game log, watch its claims replay on the map.
#[component]
pub fn Home() -> impl IntoView {
	let config = ReplayConfig::from_location();
	info!("Replay interval {:?}", config.interval);
	let driver = Rc::new(ReplayDriver::new(
		RiverView::shared(800.0, 600.0),
		WindowTimer,
		config,
	));
	let river_view = Rc::clone(driver.view());

	let on_change = move |ev: Event| {
		let Some(input) = ev
			.target()
			.and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
		else {
			return;
		};
		let Some(file) = input.files().and_then(|files| files.get(0)) else {
			return;
		};
		// Clearing lets the same file be picked again to restart its replay
		input.set_value("");
		wasm_bindgen_futures::spawn_local(load_and_replay(driver.clone(), file));
	};

	view! {
		<div class="fullscreen-graph">
			<ForceGraphCanvas view=river_view />
			<div class="graph-overlay">
				<h1>"River Replay"</h1>
				<p class="subtitle">
					"Choose a game log to replay its claims. Drag nodes to reposition. Scroll to zoom. Drag background to pan."
				</p>
				<input id="visfile" type="file" accept=".log,.txt,text/plain" on:change=on_change />
			</div>
		</div>
	}
}
