use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use log::{debug, info, warn};

use super::document::{parse_initial_state, split_lines};
use super::record::MoveRecord;
use super::timer::Scheduler;
use super::visualization::Visualization;
use crate::config::ReplayConfig;
use crate::error::{ReplayError, Result};

/// Context owned by one replay run. Tasks hold it and go quiet once a newer
/// run has started.
pub struct ReplayRun<V> {
	view: Rc<RefCell<V>>,
	generation: u64,
	current: Rc<Cell<u64>>,
}

impl<V> ReplayRun<V> {
	pub fn is_live(&self) -> bool {
		self.current.get() == self.generation
	}
}

/// Claim on the next run, taken when a log is selected. Selecting another log
/// supersedes it, so a slow read cannot start after a faster, newer one.
pub struct ReplayTicket {
	generation: u64,
	current: Rc<Cell<u64>>,
}

impl ReplayTicket {
	pub fn is_current(&self) -> bool {
		self.current.get() == self.generation
	}
}

/// Applies one move line to the view. Failures are logged and the move is
/// dropped; nothing propagates to the caller.
pub fn apply_move<V: Visualization>(view: &RefCell<V>, line: &str) -> Option<MoveRecord> {
	debug!("{line}");
	let applied = line.parse::<MoveRecord>().and_then(|record| {
		view.borrow_mut()
			.update_edge_owner(&record.piece, &record.source, &record.target)?;
		Ok(record)
	});
	match applied {
		Ok(record) => Some(record),
		Err(e) => {
			warn!("Dropped move: {e}");
			view.borrow_mut().move_dropped(&e);
			None
		}
	}
}

/// Defers `apply_move(lines[i])` by `interval * i` for every line after the
/// first. Returns the number of tasks scheduled.
pub fn schedule_replay<V, S>(
	run: &Rc<ReplayRun<V>>,
	lines: &[String],
	scheduler: &S,
	interval: Duration,
) -> Result<usize>
where
	V: Visualization + 'static,
	S: Scheduler + ?Sized,
{
	let mut scheduled = 0;
	for (i, line) in lines.iter().enumerate().skip(1) {
		let (run, line) = (Rc::clone(run), line.clone());
		let delay = interval.saturating_mul(u32::try_from(i).unwrap_or(u32::MAX));
		scheduler.defer(
			delay,
			Box::new(move || {
				if run.is_live() {
					apply_move(&*run.view, &line);
				}
			}),
		)?;
		scheduled += 1;
	}
	Ok(scheduled)
}

/// Owns the view, the timer and the generation counter shared by all runs.
pub struct ReplayDriver<V, S> {
	view: Rc<RefCell<V>>,
	scheduler: S,
	config: ReplayConfig,
	generation: Rc<Cell<u64>>,
}

impl<V, S> ReplayDriver<V, S>
where
	V: Visualization + 'static,
	S: Scheduler,
{
	pub fn new(view: Rc<RefCell<V>>, scheduler: S, config: ReplayConfig) -> Self {
		Self {
			view,
			scheduler,
			config,
			generation: Rc::new(Cell::new(0)),
		}
	}

	pub fn view(&self) -> &Rc<RefCell<V>> {
		&self.view
	}

	/// Invalidates every task still pending from earlier runs.
	pub fn cancel(&self) {
		self.generation.set(self.generation.get().wrapping_add(1));
	}

	/// Cancels every earlier run and ticket, and reserves the next run.
	pub fn ticket(&self) -> ReplayTicket {
		self.cancel();
		ReplayTicket {
			generation: self.generation.get(),
			current: Rc::clone(&self.generation),
		}
	}

	fn begin_run(&self, ticket: ReplayTicket) -> Result<Rc<ReplayRun<V>>> {
		if !ticket.is_current() {
			return Err(ReplayError::Superseded);
		}
		Ok(Rc::new(ReplayRun {
			view: Rc::clone(&self.view),
			generation: ticket.generation,
			current: ticket.current,
		}))
	}

	/// Starts the run reserved by `ticket`. Fails with `Superseded`, leaving
	/// the view alone, if another log was selected since the ticket was taken.
	pub fn replay_ticketed(&self, ticket: ReplayTicket, text: &str) -> Result<usize> {
		let run = self.begin_run(ticket)?;
		let lines = split_lines(text);
		let first = lines.first().map(String::as_str).unwrap_or_default();
		let map = parse_initial_state(first)?;
		run.view.borrow_mut().init_graph(&map)?;

		let scheduled = schedule_replay(&run, &lines, &self.scheduler, self.config.interval)?;
		run.view.borrow_mut().replay_started(scheduled);
		info!(
			"Scheduled {scheduled} moves, {:?} apart",
			self.config.interval
		);
		Ok(scheduled)
	}
}
