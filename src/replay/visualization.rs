use super::document::GraphDescription;
use crate::error::{ReplayError, Result};

/// What the replay driver needs from whatever displays the graph.
pub trait Visualization {
	/// Builds the initial graph. Returning `Ok` means the view is ready to
	/// receive ownership updates.
	fn init_graph(&mut self, map: &GraphDescription) -> Result<()>;

	/// Marks the edge between `source` and `target` as owned by `piece`.
	fn update_edge_owner(&mut self, piece: &str, source: &str, target: &str) -> Result<()>;

	/// Called once per run after every move has been scheduled.
	fn replay_started(&mut self, _moves: usize) {}

	/// Called for each move that was dropped instead of applied.
	fn move_dropped(&mut self, _error: &ReplayError) {}
}
