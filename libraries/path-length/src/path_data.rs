use crate::error::ParseError;
use crate::path_command::{CommandKind, PathCommand};
use once_cell::sync::Lazy;
use regex::Regex;

/// Path data substituted for empty input.
pub const DEFAULT_PATH_DATA: &str = "M0,0";

const NUMBER_PATTERN: &str = r"[-+]?[0-9]*\.?[0-9]+(?:[eE][-+]?[0-9]+)?";

static SEGMENT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)([astvzqmhlc])([^astvzqmhlc]*)").expect("segment pattern is valid"));
static NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(NUMBER_PATTERN).expect("number pattern is valid"));
static LEADING_NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(&format!("^{NUMBER_PATTERN}")).expect("number pattern is valid"));

/// Parses SVG path data into commands, expanding implicit command repetitions.
///
/// - Extra coordinate pairs after a moveto become implicit lineto commands (relative if the moveto was).
/// - Operand runs longer than the command's arity are split into one command per chunk.
/// - Arc flags may be packed against each other and the following coordinate, as in `a5,5 0 0110,0`.
/// - Empty or whitespace-only input parses as [`DEFAULT_PATH_DATA`].
pub fn parse_path_data(path_data: &str) -> Result<Vec<PathCommand>, ParseError> {
	let source = if path_data.trim().is_empty() { DEFAULT_PATH_DATA } else { path_data };

	let mut commands = Vec::new();
	let mut segment_count = 0;

	for captures in SEGMENT_REGEX.captures_iter(source) {
		let segment = captures.get(0).map_or("", |m| m.as_str());
		let operand_run = captures.get(2).map_or("", |m| m.as_str());
		let Some((kind, relative)) = segment.chars().next().and_then(CommandKind::from_letter) else { continue };
		segment_count += 1;

		if kind == CommandKind::ArcTo {
			parse_arc_operands(relative, operand_run, segment, &mut commands)?;
			continue;
		}

		let letter = kind.letter(relative);
		let mut operands = parse_numbers(letter, operand_run, segment)?;
		let mut kind = kind;

		if kind == CommandKind::MoveTo && operands.len() > 2 {
			commands.push(PathCommand::new(CommandKind::MoveTo, relative, operands.drain(..2))?);
			kind = CommandKind::LineTo;
		}

		push_chunks(kind, relative, &operands, segment, &mut commands)?;
	}

	if segment_count == 0 {
		return Err(ParseError::NoCommands { input: path_data.to_string() });
	}

	log::debug!("Parsed {} path commands from {} segments", commands.len(), segment_count);
	Ok(commands)
}

fn parse_numbers(command: char, operand_run: &str, segment: &str) -> Result<Vec<f64>, ParseError> {
	NUMBER_REGEX
		.find_iter(operand_run)
		.map(|number| {
			finite_number(number.as_str()).ok_or_else(|| ParseError::InvalidNumber {
				command,
				segment: segment.trim().to_string(),
			})
		})
		.collect()
}

/// Literals that overflow to infinity are rejected along with malformed ones.
fn finite_number(literal: &str) -> Option<f64> {
	literal.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn push_chunks(kind: CommandKind, relative: bool, operands: &[f64], segment: &str, commands: &mut Vec<PathCommand>) -> Result<(), ParseError> {
	let arity = kind.arity();
	let arity_error = |actual| ParseError::Arity {
		command: kind.letter(relative),
		expected: arity,
		actual,
		segment: segment.trim().to_string(),
	};

	if arity == 0 {
		if !operands.is_empty() {
			return Err(arity_error(operands.len()));
		}
		commands.push(PathCommand::new(kind, relative, [])?);
		return Ok(());
	}

	if operands.is_empty() {
		return Err(arity_error(0));
	}
	if operands.len() % arity != 0 {
		return Err(arity_error(operands.len() % arity));
	}

	for chunk in operands.chunks_exact(arity) {
		commands.push(PathCommand::new(kind, relative, chunk.iter().copied())?);
	}
	Ok(())
}

enum OperandError {
	End,
	Unexpected(char),
}

/// Reads arc operands one at a time so single-character flags can be split from their neighbours.
struct OperandCursor<'a> {
	rest: &'a str,
}

impl<'a> OperandCursor<'a> {
	fn new(rest: &'a str) -> Self {
		Self { rest }
	}

	fn skip_separators(&mut self) {
		self.rest = self.rest.trim_start_matches(|c: char| c.is_whitespace() || c == ',');
	}

	fn is_exhausted(&mut self) -> bool {
		self.skip_separators();
		self.rest.is_empty()
	}

	fn number(&mut self) -> Result<f64, OperandError> {
		self.skip_separators();
		let first = self.rest.chars().next().ok_or(OperandError::End)?;
		let number = LEADING_NUMBER_REGEX.find(self.rest).ok_or(OperandError::Unexpected(first))?;
		let value = finite_number(number.as_str()).ok_or(OperandError::Unexpected(first))?;
		self.rest = &self.rest[number.end()..];
		Ok(value)
	}

	fn flag(&mut self) -> Result<f64, OperandError> {
		self.skip_separators();
		let first = self.rest.chars().next().ok_or(OperandError::End)?;
		let value = match first {
			'0' => 0.,
			'1' => 1.,
			other => return Err(OperandError::Unexpected(other)),
		};
		self.rest = &self.rest[first.len_utf8()..];
		Ok(value)
	}
}

fn parse_arc_operands(relative: bool, operand_run: &str, segment: &str, commands: &mut Vec<PathCommand>) -> Result<(), ParseError> {
	const FLAG_INDICES: [usize; 2] = [3, 4];

	let command = CommandKind::ArcTo.letter(relative);
	let arity = CommandKind::ArcTo.arity();
	let mut cursor = OperandCursor::new(operand_run);

	let arity_error = |actual| ParseError::Arity {
		command,
		expected: arity,
		actual,
		segment: segment.trim().to_string(),
	};

	if cursor.is_exhausted() {
		return Err(arity_error(0));
	}

	while !cursor.is_exhausted() {
		let mut operands = [0.; 7];
		for (index, operand) in operands.iter_mut().enumerate() {
			let is_flag = FLAG_INDICES.contains(&index);
			let value = if is_flag { cursor.flag() } else { cursor.number() };
			*operand = match value {
				Ok(value) => value,
				Err(OperandError::End) => return Err(arity_error(index)),
				Err(OperandError::Unexpected(found)) if is_flag => {
					return Err(ParseError::InvalidFlag {
						command,
						found,
						segment: segment.trim().to_string(),
					});
				}
				Err(OperandError::Unexpected(_)) => {
					return Err(ParseError::InvalidNumber {
						command,
						segment: segment.trim().to_string(),
					});
				}
			};
		}
		commands.push(PathCommand::new(CommandKind::ArcTo, relative, operands)?);
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn command(letter: char, operands: &[f64]) -> PathCommand {
		let (kind, relative) = CommandKind::from_letter(letter).unwrap();
		PathCommand::new(kind, relative, operands.iter().copied()).unwrap()
	}

	#[test]
	fn simple_line() {
		assert_eq!(parse_path_data("M0,0 L10,0").unwrap(), vec![command('M', &[0., 0.]), command('L', &[10., 0.])]);
	}

	#[test]
	fn moveto_overload_becomes_lineto() {
		assert_eq!(parse_path_data("M0,0 5,5").unwrap(), vec![command('M', &[0., 0.]), command('L', &[5., 5.])]);
		assert_eq!(
			parse_path_data("m1 1 2 2 3 3").unwrap(),
			vec![command('m', &[1., 1.]), command('l', &[2., 2.]), command('l', &[3., 3.])]
		);
	}

	#[test]
	fn repeated_operands_split_into_commands() {
		assert_eq!(
			parse_path_data("M0 0 L1 1 2 2 3 3").unwrap(),
			vec![command('M', &[0., 0.]), command('L', &[1., 1.]), command('L', &[2., 2.]), command('L', &[3., 3.])]
		);
		assert_eq!(parse_path_data("M0 0 h5 5").unwrap(), vec![command('M', &[0., 0.]), command('h', &[5.]), command('h', &[5.])]);
	}

	#[test]
	fn concatenated_numbers() {
		assert_eq!(parse_path_data("M1.2.3").unwrap(), vec![command('M', &[1.2, 0.3])]);
		assert_eq!(parse_path_data("M-1-2L3e1-4E-1").unwrap(), vec![command('M', &[-1., -2.]), command('L', &[30., -0.4])]);
	}

	#[test]
	fn arc_flags_separated_and_packed() {
		let expected = vec![command('M', &[0., 0.]), command('A', &[5., 5., 0., 0., 1., 10., 0.])];
		assert_eq!(parse_path_data("M0,0 A5,5 0 0,1 10,0").unwrap(), expected);
		assert_eq!(parse_path_data("M0,0 A5,5 0 0110,0").unwrap(), expected);
		assert_eq!(parse_path_data("M0,0 A5 5 0 01 10 0").unwrap(), expected);
	}

	#[test]
	fn repeated_arcs() {
		let commands = parse_path_data("M0 0 a1 1 0 0 1 2 0 1 1 0 1 0 -2 0").unwrap();
		assert_eq!(commands.len(), 3);
		assert_eq!(commands[2], command('a', &[1., 1., 0., 1., 0., -2., 0.]));
	}

	#[test]
	fn close_path_takes_no_operands() {
		assert_eq!(parse_path_data("M0 0 L1 0 z").unwrap().last(), Some(&command('z', &[])));
		assert!(matches!(parse_path_data("M0 0 Z 1 2"), Err(ParseError::Arity { expected: 0, actual: 2, .. })));
	}

	#[test]
	fn empty_input_defaults_to_moveto() {
		assert_eq!(parse_path_data("").unwrap(), vec![command('M', &[0., 0.])]);
		assert_eq!(parse_path_data(" \n\t ").unwrap(), vec![command('M', &[0., 0.])]);
	}

	#[test]
	fn structural_errors() {
		assert_eq!(parse_path_data("123 456"), Err(ParseError::NoCommands { input: "123 456".to_string() }));
		assert_eq!(
			parse_path_data("M0 0 L1 2 3"),
			Err(ParseError::Arity {
				command: 'L',
				expected: 2,
				actual: 1,
				segment: "L1 2 3".to_string()
			})
		);
		assert!(matches!(parse_path_data("M0 0 C1 1"), Err(ParseError::Arity { expected: 6, actual: 2, .. })));
		assert!(matches!(parse_path_data("M0 0 L"), Err(ParseError::Arity { expected: 2, actual: 0, .. })));
		assert!(matches!(parse_path_data("M0 0 A5 5 0 0 1 10"), Err(ParseError::Arity { expected: 7, actual: 6, .. })));
		assert!(matches!(parse_path_data("M0 0 A5 5 0 2 1 10 0"), Err(ParseError::InvalidFlag { found: '2', .. })));
	}

	#[test]
	fn overflowing_numbers_are_rejected() {
		assert_eq!(
			parse_path_data("M1e999,0 L1e999,1"),
			Err(ParseError::InvalidNumber {
				command: 'M',
				segment: "M1e999,0".to_string()
			})
		);
		assert!(matches!(parse_path_data("M0,0 A1e400,5 0 0 1 10,0"), Err(ParseError::InvalidNumber { command: 'A', .. })));
		assert!(parse_path_data("M0,0 L1e308,-1e308").is_ok());
	}
}
