use crate::error::ParseError;
use glam::DVec2;
use smallvec::SmallVec;
use std::fmt;

/// The kind of a path-data command, independent of whether its operands are relative.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandKind {
	MoveTo,
	LineTo,
	HorizontalLineTo,
	VerticalLineTo,
	ClosePath,
	CubicCurveTo,
	CubicCurveSmoothTo,
	QuadraticCurveTo,
	QuadraticCurveSmoothTo,
	ArcTo,
}

impl CommandKind {
	/// Maps a command letter to its kind and whether it is the relative (lowercase) form.
	pub fn from_letter(letter: char) -> Option<(Self, bool)> {
		let kind = match letter.to_ascii_lowercase() {
			'm' => Self::MoveTo,
			'l' => Self::LineTo,
			'h' => Self::HorizontalLineTo,
			'v' => Self::VerticalLineTo,
			'z' => Self::ClosePath,
			'c' => Self::CubicCurveTo,
			's' => Self::CubicCurveSmoothTo,
			'q' => Self::QuadraticCurveTo,
			't' => Self::QuadraticCurveSmoothTo,
			'a' => Self::ArcTo,
			_ => return None,
		};
		Some((kind, letter.is_ascii_lowercase()))
	}

	pub fn letter(self, relative: bool) -> char {
		let letter = match self {
			Self::MoveTo => 'M',
			Self::LineTo => 'L',
			Self::HorizontalLineTo => 'H',
			Self::VerticalLineTo => 'V',
			Self::ClosePath => 'Z',
			Self::CubicCurveTo => 'C',
			Self::CubicCurveSmoothTo => 'S',
			Self::QuadraticCurveTo => 'Q',
			Self::QuadraticCurveSmoothTo => 'T',
			Self::ArcTo => 'A',
		};
		if relative { letter.to_ascii_lowercase() } else { letter }
	}

	/// Number of operands a single command of this kind takes.
	pub const fn arity(self) -> usize {
		match self {
			Self::ClosePath => 0,
			Self::HorizontalLineTo | Self::VerticalLineTo => 1,
			Self::MoveTo | Self::LineTo | Self::QuadraticCurveSmoothTo => 2,
			Self::CubicCurveSmoothTo | Self::QuadraticCurveTo => 4,
			Self::CubicCurveTo => 6,
			Self::ArcTo => 7,
		}
	}
}

/// A single path-data command whose operand count always matches its kind's arity.
///
/// Arc flags are stored as `0.` or `1.` in the operand list, in the same position as in path data.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PathCommand {
	kind: CommandKind,
	relative: bool,
	operands: SmallVec<[f64; 7]>,
}

impl PathCommand {
	pub fn new(kind: CommandKind, relative: bool, operands: impl IntoIterator<Item = f64>) -> Result<Self, ParseError> {
		let operands: SmallVec<[f64; 7]> = operands.into_iter().collect();
		if operands.len() != kind.arity() {
			let segment = operands.iter().map(f64::to_string).collect::<Vec<_>>().join(",");
			return Err(ParseError::Arity {
				command: kind.letter(relative),
				expected: kind.arity(),
				actual: operands.len(),
				segment: format!("{}{segment}", kind.letter(relative)),
			});
		}
		Ok(Self { kind, relative, operands })
	}

	pub fn kind(&self) -> CommandKind {
		self.kind
	}

	pub fn is_relative(&self) -> bool {
		self.relative
	}

	pub fn operands(&self) -> &[f64] {
		&self.operands
	}

	pub fn letter(&self) -> char {
		self.kind.letter(self.relative)
	}

	fn point(&self, index: usize) -> DVec2 {
		DVec2::new(self.operands[index], self.operands[index + 1])
	}
}

impl fmt::Display for PathCommand {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.letter())?;
		for (index, operand) in self.operands.iter().enumerate() {
			if index > 0 {
				write!(f, ",")?;
			}
			write!(f, "{operand}")?;
		}
		Ok(())
	}
}

/// Serializes commands back into a path-data string.
pub fn path_to_path_data<'a>(commands: impl IntoIterator<Item = &'a PathCommand>) -> String {
	commands.into_iter().map(PathCommand::to_string).collect::<Vec<_>>().join(" ")
}

/// A command with every coordinate resolved against the current point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AbsolutePathCommand {
	M(DVec2),
	L(DVec2),
	H(f64),
	V(f64),
	Z,
	C(DVec2, DVec2, DVec2),
	S(DVec2, DVec2),
	Q(DVec2, DVec2),
	T(DVec2),
	A(f64, f64, f64, bool, bool, DVec2),
}

pub fn to_absolute_commands<'a, I>(commands: I) -> impl Iterator<Item = AbsolutePathCommand> + 'a
where
	I: IntoIterator<Item = &'a PathCommand> + 'a,
{
	let mut current = DVec2::ZERO;
	let mut subpath_start = DVec2::ZERO;

	commands.into_iter().map(move |command| {
		let origin = if command.relative { current } else { DVec2::ZERO };
		let absolute = match command.kind {
			CommandKind::MoveTo => AbsolutePathCommand::M(origin + command.point(0)),
			CommandKind::LineTo => AbsolutePathCommand::L(origin + command.point(0)),
			CommandKind::HorizontalLineTo => AbsolutePathCommand::H(origin.x + command.operands[0]),
			CommandKind::VerticalLineTo => AbsolutePathCommand::V(origin.y + command.operands[0]),
			CommandKind::ClosePath => AbsolutePathCommand::Z,
			CommandKind::CubicCurveTo => AbsolutePathCommand::C(origin + command.point(0), origin + command.point(2), origin + command.point(4)),
			CommandKind::CubicCurveSmoothTo => AbsolutePathCommand::S(origin + command.point(0), origin + command.point(2)),
			CommandKind::QuadraticCurveTo => AbsolutePathCommand::Q(origin + command.point(0), origin + command.point(2)),
			CommandKind::QuadraticCurveSmoothTo => AbsolutePathCommand::T(origin + command.point(0)),
			CommandKind::ArcTo => {
				let operands = &command.operands;
				AbsolutePathCommand::A(operands[0], operands[1], operands[2], operands[3] != 0., operands[4] != 0., origin + command.point(5))
			}
		};

		current = match absolute {
			AbsolutePathCommand::M(point) => {
				subpath_start = point;
				point
			}
			AbsolutePathCommand::L(point) | AbsolutePathCommand::T(point) | AbsolutePathCommand::C(_, _, point) | AbsolutePathCommand::S(_, point) | AbsolutePathCommand::Q(_, point) => point,
			AbsolutePathCommand::A(.., point) => point,
			AbsolutePathCommand::H(x) => DVec2::new(x, current.y),
			AbsolutePathCommand::V(y) => DVec2::new(current.x, y),
			AbsolutePathCommand::Z => subpath_start,
		};

		absolute
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn arity_is_checked_on_construction() {
		assert!(PathCommand::new(CommandKind::LineTo, false, [1., 2.]).is_ok());
		assert_eq!(
			PathCommand::new(CommandKind::CubicCurveTo, true, [1., 2., 3.]),
			Err(ParseError::Arity {
				command: 'c',
				expected: 6,
				actual: 3,
				segment: "c1,2,3".to_string()
			})
		);
		assert!(PathCommand::new(CommandKind::ClosePath, false, []).is_ok());
	}

	#[test]
	fn letters_round_trip() {
		for letter in "MmLlHhVvZzCcSsQqTtAa".chars() {
			let (kind, relative) = CommandKind::from_letter(letter).unwrap();
			assert_eq!(kind.letter(relative), letter);
		}
		assert_eq!(CommandKind::from_letter('x'), None);
	}

	#[test]
	fn display_writes_path_data() {
		let commands = [
			PathCommand::new(CommandKind::MoveTo, false, [0., 0.]).unwrap(),
			PathCommand::new(CommandKind::ArcTo, true, [5., 5., 0., 0., 1., 10., 0.]).unwrap(),
			PathCommand::new(CommandKind::ClosePath, false, []).unwrap(),
		];
		assert_eq!(path_to_path_data(&commands), "M0,0 a5,5,0,0,1,10,0 Z");
	}

	#[test]
	fn relative_commands_resolve_against_current_point() {
		let commands = [
			PathCommand::new(CommandKind::MoveTo, false, [10., 10.]).unwrap(),
			PathCommand::new(CommandKind::LineTo, true, [5., 0.]).unwrap(),
			PathCommand::new(CommandKind::VerticalLineTo, true, [5.]).unwrap(),
			PathCommand::new(CommandKind::HorizontalLineTo, false, [0.]).unwrap(),
			PathCommand::new(CommandKind::ClosePath, true, []).unwrap(),
			PathCommand::new(CommandKind::QuadraticCurveTo, true, [1., 1., 2., 0.]).unwrap(),
		];
		let absolute = to_absolute_commands(&commands).collect::<Vec<_>>();
		assert_eq!(
			absolute,
			vec![
				AbsolutePathCommand::M(DVec2::new(10., 10.)),
				AbsolutePathCommand::L(DVec2::new(15., 10.)),
				AbsolutePathCommand::V(15.),
				AbsolutePathCommand::H(0.),
				AbsolutePathCommand::Z,
				AbsolutePathCommand::Q(DVec2::new(11., 11.), DVec2::new(12., 10.)),
			]
		);
	}
}
