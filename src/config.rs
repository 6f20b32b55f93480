//! Replay tuning, with an optional override from the page URL.
//!
//! Usage:
//! `index.html?interval=50`

use std::time::Duration;

use log::warn;
use web_sys::UrlSearchParams;

/// Delay between consecutive moves when nothing overrides it.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayConfig {
	/// Move `i` fires `interval * i` after scheduling begins.
	pub interval: Duration,
}

impl Default for ReplayConfig {
	fn default() -> Self {
		Self {
			interval: DEFAULT_INTERVAL,
		}
	}
}

impl ReplayConfig {
	pub fn with_interval_ms(mut self, ms: u64) -> Self {
		self.interval = Duration::from_millis(ms);
		self
	}

	/// Applies a raw `interval` parameter in milliseconds. Unparseable
	/// values are ignored.
	pub fn with_interval_param(self, raw: Option<String>) -> Self {
		let Some(raw) = raw else {
			return self;
		};
		match raw.trim().parse::<u64>() {
			Ok(ms) => self.with_interval_ms(ms),
			Err(e) => {
				warn!("Ignoring interval={raw:?}: {e}");
				self
			}
		}
	}

	/// Reads overrides from the browser location, if there is one.
	pub fn from_location() -> Self {
		let interval = web_sys::window()
			.and_then(|w| w.location().search().ok())
			.and_then(|search| UrlSearchParams::new_with_str(&search).ok())
			.and_then(|params| params.get("interval"));
		Self::default().with_interval_param(interval)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_interval_is_ten_millis() {
		assert_eq!(ReplayConfig::default().interval, Duration::from_millis(10));
	}

	#[test]
	fn interval_param_overrides_default() {
		let config = ReplayConfig::default().with_interval_param(Some("250".into()));
		assert_eq!(config.interval, Duration::from_millis(250));
		let config = ReplayConfig::default().with_interval_param(Some(" 0 ".into()));
		assert_eq!(config.interval, Duration::ZERO);
	}

	#[test]
	fn bad_interval_param_is_ignored() {
		for raw in ["fast", "", "-5", "2.5"] {
			let config = ReplayConfig::default().with_interval_param(Some(raw.into()));
			assert_eq!(config, ReplayConfig::default(), "{raw:?}");
		}
		assert_eq!(ReplayConfig::default().with_interval_param(None), ReplayConfig::default());
	}
}
