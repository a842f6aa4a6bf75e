use thiserror::Error;

/// Errors raised while turning path data into commands.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ParseError {
	#[error("No path elements found in string {input:?}")]
	NoCommands { input: String },

	#[error("Malformed path data: \"{command}\" must have {expected} elements and has {actual}: {segment:?}")]
	Arity { command: char, expected: usize, actual: usize, segment: String },

	#[error("Malformed path data: \"{command}\" expects an arc flag of 0 or 1 but found {found:?}: {segment:?}")]
	InvalidFlag { command: char, found: char, segment: String },

	#[error("Malformed path data: \"{command}\" expects a number: {segment:?}")]
	InvalidNumber { command: char, segment: String },
}

/// Errors raised while querying an assembled path.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum GeometryError {
	#[error("No segment at length {0}")]
	NoSegmentAtLength(f64),
}
