use std::str::FromStr;

use crate::error::ReplayError;

/// One river claim: `<piece> <source> <target>`. Tokens after the third are
/// ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
	pub piece: String,
	pub source: String,
	pub target: String,
}

impl FromStr for MoveRecord {
	type Err = ReplayError;

	fn from_str(line: &str) -> Result<Self, Self::Err> {
		let tokens: Vec<&str> = line.split_whitespace().collect();
		match tokens.as_slice() {
			[piece, source, target, ..] => Ok(Self {
				piece: (*piece).to_owned(),
				source: (*source).to_owned(),
				target: (*target).to_owned(),
			}),
			_ => Err(ReplayError::MalformedMove {
				line: line.to_owned(),
				tokens: tokens.len(),
			}),
		}
	}
}
