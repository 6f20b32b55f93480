//! Error types raised while loading and replaying a game log.

use thiserror::Error;

/// Errors surfaced by the replay driver and the views it drives.
#[derive(Debug, Error)]
pub enum ReplayError {
	#[error("initial map line is not valid JSON: {0}")]
	InitialState(#[from] serde_json::Error),

	#[error("initial map does not describe sites and rivers: {0}")]
	InvalidMap(#[source] serde_json::Error),

	#[error("malformed move line {line:?}: expected at least 3 tokens, found {tokens}")]
	MalformedMove { line: String, tokens: usize },

	#[error("unknown site: {0}")]
	UnknownSite(String),

	#[error("no river between {from} and {to}")]
	UnknownRiver { from: String, to: String },

	#[error("failed to read log file: {0}")]
	FileRead(String),

	#[error("a newer log was selected before this one finished loading")]
	Superseded,

	#[error("failed to schedule move: {0}")]
	Timer(String),

	#[error("browser window not available")]
	NoWindow,
}

pub type Result<T> = std::result::Result<T, ReplayError>;
