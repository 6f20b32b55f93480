use std::cell::RefCell;
use std::rc::Rc;

use log::info;

use super::state::ForceGraphState;
use crate::error::{ReplayError, Result};
use crate::game::{Board, PunterScore, RiverMap};
use crate::replay::{GraphDescription, Visualization};

pub type SharedRiverView = Rc<RefCell<RiverView>>;

/// Replay progress for the current run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Progress {
	pub scheduled: usize,
	pub claimed: usize,
	pub dropped: usize,
}

/// The canvas state plus the board it is showing.
pub struct RiverView {
	pub graph: ForceGraphState,
	board: Board,
	scores: Vec<PunterScore>,
	progress: Progress,
}

impl RiverView {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			graph: ForceGraphState::new(width, height),
			board: Board::default(),
			scores: Vec::new(),
			progress: Progress::default(),
		}
	}

	pub fn shared(width: f64, height: f64) -> SharedRiverView {
		Rc::new(RefCell::new(Self::new(width, height)))
	}

	pub fn scores(&self) -> &[PunterScore] {
		&self.scores
	}

	pub fn progress(&self) -> Progress {
		self.progress
	}
}

impl Visualization for RiverView {
	fn init_graph(&mut self, map: &GraphDescription) -> Result<()> {
		let map = RiverMap::from_description(map)?;
		self.graph.load(&map.graph_data());
		info!(
			"Map: {} sites, {} rivers, {} mines",
			self.graph.node_count(),
			self.graph.edge_count(),
			map.mines.len()
		);
		self.board = Board::new(&map);
		self.scores.clear();
		self.progress = Progress::default();
		Ok(())
	}

	fn update_edge_owner(&mut self, piece: &str, source: &str, target: &str) -> Result<()> {
		let river = self.board.river(source, target)?;
		let (s, t) = (river.source.to_string(), river.target.to_string());
		if !self.graph.has_edge(&s, &t) {
			return Err(ReplayError::UnknownRiver { from: s, to: t });
		}
		let punter = self.board.claim(piece, source, target)?;
		self.graph.set_edge_owner(&s, &t, punter);
		self.scores = self.board.scores();
		self.progress.claimed += 1;
		Ok(())
	}

	fn replay_started(&mut self, moves: usize) {
		self.progress.scheduled = moves;
	}

	fn move_dropped(&mut self, _error: &ReplayError) {
		self.progress.dropped += 1;
	}
}
