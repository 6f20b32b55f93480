use serde_json::Value;

use crate::error::Result;

/// The decoded first line of a log. Opaque to the driver; views decide what
/// shape they expect.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphDescription(pub Value);

impl GraphDescription {
	pub fn value(&self) -> &Value {
		&self.0
	}
}

/// Splits a log on `'\n'` only, so a trailing newline yields a final empty
/// line and `\r` stays attached to its line.
pub fn split_lines(text: &str) -> Vec<String> {
	text.split('\n').map(str::to_owned).collect()
}

pub fn parse_initial_state(first_line: &str) -> Result<GraphDescription> {
	Ok(GraphDescription(serde_json::from_str(first_line)?))
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::error::ReplayError;

	#[test]
	fn split_keeps_trailing_empty_line() {
		let lines = split_lines("{}\np1 A B\n");
		assert_eq!(lines, vec!["{}", "p1 A B", ""]);
	}

	#[test]
	fn empty_text_is_one_empty_line() {
		assert_eq!(split_lines(""), vec![String::new()]);
	}

	#[test]
	fn parses_json_value_verbatim() {
		let desc = parse_initial_state("{\"nodes\":[]}\r").unwrap();
		assert_eq!(desc.value(), &json!({ "nodes": [] }));
	}

	#[test]
	fn rejects_non_json_first_line() {
		let err = parse_initial_state("p1 A B").unwrap_err();
		assert!(matches!(err, ReplayError::InitialState(_)));
		assert!(parse_initial_state("").is_err());
	}
}
