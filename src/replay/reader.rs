//! Browser file input -> replay driver.

use std::rc::Rc;

use log::{error, info, warn};
use wasm_bindgen_futures::JsFuture;
use web_sys::File;

use super::driver::ReplayDriver;
use super::timer::Scheduler;
use super::visualization::Visualization;
use crate::error::{ReplayError, Result};

/// Reads the whole file as text.
pub async fn read_text(file: &File) -> Result<String> {
	let value = JsFuture::from(file.text())
		.await
		.map_err(|e| ReplayError::FileRead(format!("{e:?}")))?;
	value
		.as_string()
		.ok_or_else(|| ReplayError::FileRead("file contents were not text".into()))
}

/// Reads `file` and starts a replay from it. A failed read never starts the
/// replay; a bad first line aborts it before any move is scheduled. The run is
/// reserved before the read, so a file selected later always wins.
pub async fn load_and_replay<V, S>(driver: Rc<ReplayDriver<V, S>>, file: File)
where
	V: Visualization + 'static,
	S: Scheduler,
{
	let name = file.name();
	info!("Reading {name} ({} bytes)", file.size());
	let ticket = driver.ticket();
	let text = match read_text(&file).await {
		Ok(text) => text,
		Err(e) => {
			warn!("{name}: {e}");
			return;
		}
	};
	match driver.replay_ticketed(ticket, &text) {
		Ok(moves) => info!("{name}: replaying {moves} moves"),
		Err(ReplayError::Superseded) => info!("{name}: skipped, a newer log was selected"),
		Err(e) => error!("{name}: replay aborted: {e}"),
	}
}
