use std::time::Duration;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::error::{ReplayError, Result};

/// A one-shot task run later on the same thread.
pub type Task = Box<dyn FnOnce()>;

/// Defers tasks without blocking the caller.
pub trait Scheduler {
	fn defer(&self, delay: Duration, task: Task) -> Result<()>;
}

/// Schedules through `window.setTimeout`.
#[derive(Clone, Copy, Debug, Default)]
pub struct WindowTimer;

impl Scheduler for WindowTimer {
	fn defer(&self, delay: Duration, task: Task) -> Result<()> {
		let window = web_sys::window().ok_or(ReplayError::NoWindow)?;
		let callback = Closure::once_into_js(move || task());
		let ms = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
		window
			.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), ms)
			.map_err(|e| ReplayError::Timer(format!("{e:?}")))?;
		Ok(())
	}
}

/// Virtual clock for tests: nothing fires until the clock is advanced.
#[cfg(test)]
pub(crate) mod manual {
	use std::cell::RefCell;
	use std::collections::BTreeMap;
	use std::rc::Rc;
	use std::time::Duration;

	use super::{Scheduler, Task};
	use crate::error::Result;

	#[derive(Default)]
	struct Queue {
		now: Duration,
		seq: u64,
		tasks: BTreeMap<(Duration, u64), Task>,
	}

	#[derive(Clone, Default)]
	pub struct ManualClock(Rc<RefCell<Queue>>);

	impl ManualClock {
		pub fn now(&self) -> Duration {
			self.0.borrow().now
		}

		pub fn pending(&self) -> usize {
			self.0.borrow().tasks.len()
		}

		/// Fires every task due within `by`, in (due time, insertion) order.
		pub fn advance(&self, by: Duration) {
			let until = self.now() + by;
			loop {
				let task = {
					let mut queue = self.0.borrow_mut();
					let due = queue.tasks.first_key_value().map(|(&(at, _), _)| at);
					match due {
						Some(at) if at <= until => {
							queue.now = at;
							queue.tasks.pop_first().map(|(_, task)| task)
						}
						_ => {
							queue.now = until;
							None
						}
					}
				};
				match task {
					Some(task) => task(),
					None => break,
				}
			}
		}
	}

	impl Scheduler for ManualClock {
		fn defer(&self, delay: Duration, task: Task) -> Result<()> {
			let mut queue = self.0.borrow_mut();
			let at = queue.now + delay;
			let seq = queue.seq;
			queue.seq += 1;
			queue.tasks.insert((at, seq), task);
			Ok(())
		}
	}

	mod tests {
		use std::cell::RefCell;
		use std::rc::Rc;

		use super::*;

		#[test]
		fn fires_in_due_order_only_when_advanced() {
			let clock = ManualClock::default();
			let fired = Rc::new(RefCell::new(Vec::new()));
			for (delay, name) in [(30, "c"), (10, "a"), (20, "b")] {
				let fired = fired.clone();
				clock
					.defer(
						Duration::from_millis(delay),
						Box::new(move || fired.borrow_mut().push((name, delay))),
					)
					.unwrap();
			}
			clock.advance(Duration::from_millis(5));
			assert!(fired.borrow().is_empty());
			clock.advance(Duration::from_millis(15));
			assert_eq!(*fired.borrow(), vec![("a", 10), ("b", 20)]);
			assert_eq!(clock.pending(), 1);
			clock.advance(Duration::from_millis(100));
			assert_eq!(fired.borrow().len(), 3);
			assert_eq!(clock.now(), Duration::from_millis(120));
		}
	}
}
