use crate::error::{GeometryError, ParseError};
use crate::options::PathOptions;
use crate::path_command::{AbsolutePathCommand, CommandKind, PathCommand, to_absolute_commands};
use crate::path_data::parse_path_data;
use crate::segment::{CubicBezier, EllipticalArc, LineSegment, PathSegment, PointProperties, QuadraticBezier};
use glam::DVec2;
use std::str::FromStr;

/// A parsed path with every command resolved into an absolute segment, ready for queries by distance travelled.
///
/// Each command occupies one slot. Drawing commands hold a [`PathSegment`] and moveto commands hold `None`, so slot
/// indices line up with [`Path::commands`].
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
	commands: Vec<PathCommand>,
	segments: Vec<Option<PathSegment>>,
	/// Running total of segment lengths, one entry per slot.
	cumulative_lengths: Vec<f64>,
	/// Ordinal of each slot among the drawable segments.
	part_indices: Vec<Option<usize>>,
	initial_point: Option<DVec2>,
	options: PathOptions,
}

/// The slot that owns a given distance along a path.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartAtLength {
	/// Index into [`Path::commands`].
	pub command_index: usize,
	/// Index into [`Path::parts`], or `None` when the slot belongs to a moveto.
	pub part_index: Option<usize>,
	/// Distance remaining within the owning slot.
	pub fraction: f64,
}

/// A drawable segment of a path, as listed by [`Path::parts`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PathPart<'a> {
	command_index: usize,
	segment: &'a PathSegment,
}

impl<'a> PathPart<'a> {
	pub fn command_index(&self) -> usize {
		self.command_index
	}

	pub fn segment(&self) -> &'a PathSegment {
		self.segment
	}

	pub fn start(&self) -> DVec2 {
		self.segment.start()
	}

	pub fn end(&self) -> DVec2 {
		self.segment.end()
	}

	pub fn length(&self) -> f64 {
		self.segment.length()
	}

	pub fn point_at_length(&self, length: f64) -> DVec2 {
		self.segment.point_at_length(length)
	}

	pub fn tangent_at_length(&self, length: f64) -> DVec2 {
		self.segment.tangent_at_length(length)
	}

	pub fn properties_at_length(&self, length: f64) -> PointProperties {
		self.segment.properties_at_length(length)
	}
}

enum Located<'a> {
	Segment(&'a PathSegment, f64),
	InitialPoint(DVec2),
}

impl Path {
	pub fn from_path_data(path_data: &str) -> Result<Self, ParseError> {
		Self::with_options(path_data, PathOptions::default())
	}

	pub fn with_options(path_data: &str, options: PathOptions) -> Result<Self, ParseError> {
		Ok(Self::from_commands(parse_path_data(path_data)?, options))
	}

	/// Assembles already parsed commands. An empty list gives an empty path whose queries all fail.
	pub fn from_commands(commands: Vec<PathCommand>, options: PathOptions) -> Self {
		let initial_point = match commands.first() {
			Some(first) if first.kind() == CommandKind::MoveTo => to_absolute_commands(&commands[..1]).next().and_then(|command| match command {
				AbsolutePathCommand::M(point) => Some(point),
				_ => None,
			}),
			_ => None,
		};

		let segments = segments_from_commands(&commands, &options).collect::<Vec<_>>();

		let mut total_length = 0.;
		let cumulative_lengths = segments
			.iter()
			.map(|segment| {
				total_length += segment.as_ref().map_or(0., PathSegment::length);
				total_length
			})
			.collect::<Vec<_>>();

		let mut drawable = 0;
		let part_indices = segments
			.iter()
			.map(|segment| {
				segment.as_ref().map(|_| {
					drawable += 1;
					drawable - 1
				})
			})
			.collect::<Vec<_>>();

		log::debug!("Assembled {} segments from {} commands with a total length of {total_length}", drawable, commands.len());

		Self {
			commands,
			segments,
			cumulative_lengths,
			part_indices,
			initial_point,
			options,
		}
	}

	pub fn total_length(&self) -> f64 {
		self.cumulative_lengths.last().copied().unwrap_or(0.)
	}

	pub fn commands(&self) -> &[PathCommand] {
		&self.commands
	}

	pub fn segments(&self) -> &[Option<PathSegment>] {
		&self.segments
	}

	pub fn cumulative_lengths(&self) -> &[f64] {
		&self.cumulative_lengths
	}

	/// Point of the leading moveto, if the path starts with one.
	pub fn initial_point(&self) -> Option<DVec2> {
		self.initial_point
	}

	pub fn options(&self) -> &PathOptions {
		&self.options
	}

	/// Number of drawable segments, which is the length of [`Path::parts`].
	pub fn segment_count(&self) -> usize {
		self.segments.iter().flatten().count()
	}

	/// Finds the slot owning `length`, after clamping it into `[0, total_length]`.
	///
	/// Lengths on a boundary between two slots belong to the earlier one, so the end of a segment is reported as part of
	/// that segment rather than the start of the next.
	pub fn part_at_length(&self, length: f64) -> PartAtLength {
		// `max` maps NaN to 0 and `min` ignores a NaN total
		let length = length.max(0.).min(self.total_length());

		let first_covers = self.segments.first().is_some_and(Option::is_some) && self.cumulative_lengths.first().is_some_and(|&first| first >= length);
		let command_index = if self.cumulative_lengths.len() <= 1 || first_covers {
			0
		} else {
			let index = self.cumulative_lengths[1..].partition_point(|&cumulative| cumulative < length) + 1;
			index.min(self.cumulative_lengths.len() - 1)
		};

		let fraction = match command_index {
			0 => length,
			index => length - self.cumulative_lengths[index - 1],
		};

		PartAtLength {
			command_index,
			part_index: self.part_indices.get(command_index).copied().flatten(),
			fraction,
		}
	}

	fn locate(&self, length: f64) -> Result<Located<'_>, GeometryError> {
		let part = self.part_at_length(length);
		match (self.segments.get(part.command_index), self.initial_point) {
			(Some(Some(segment)), _) => Ok(Located::Segment(segment, part.fraction)),
			(_, Some(initial_point)) => Ok(Located::InitialPoint(initial_point)),
			_ => Err(GeometryError::NoSegmentAtLength(length)),
		}
	}

	pub fn point_at_length(&self, length: f64) -> Result<DVec2, GeometryError> {
		Ok(match self.locate(length)? {
			Located::Segment(segment, fraction) => segment.point_at_length(fraction),
			Located::InitialPoint(point) => point,
		})
	}

	/// Unit tangent at `length`. A moveto slot has no direction and yields zero.
	pub fn tangent_at_length(&self, length: f64) -> Result<DVec2, GeometryError> {
		Ok(match self.locate(length)? {
			Located::Segment(segment, fraction) => segment.tangent_at_length(fraction),
			Located::InitialPoint(_) => DVec2::ZERO,
		})
	}

	pub fn properties_at_length(&self, length: f64) -> Result<PointProperties, GeometryError> {
		Ok(match self.locate(length)? {
			Located::Segment(segment, fraction) => segment.properties_at_length(fraction),
			Located::InitialPoint(point) => PointProperties { point, tangent: DVec2::ZERO },
		})
	}

	/// Every drawable segment in order, skipping moveto slots.
	pub fn parts(&self) -> Vec<PathPart<'_>> {
		self.segments
			.iter()
			.enumerate()
			.filter_map(|(command_index, segment)| segment.as_ref().map(|segment| PathPart { command_index, segment }))
			.collect()
	}
}

impl FromStr for Path {
	type Err = ParseError;

	fn from_str(path_data: &str) -> Result<Self, Self::Err> {
		Self::from_path_data(path_data)
	}
}

fn reflect_control_point(point: DVec2, control_point: DVec2) -> DVec2 {
	point * 2. - control_point
}

/// A quadratic whose control point sits on its start traces a straight line, so it is built as one.
fn quadratic_or_line(start: DVec2, control: DVec2, end: DVec2, options: &PathOptions) -> PathSegment {
	if control == start {
		PathSegment::Line(LineSegment::new(start, end))
	} else {
		PathSegment::Quadratic(QuadraticBezier::new(start, control, end, &options.solver))
	}
}

fn segments_from_commands<'a>(commands: &'a [PathCommand], options: &'a PathOptions) -> impl Iterator<Item = Option<PathSegment>> + 'a {
	let mut current = DVec2::ZERO;
	let mut subpath_start = DVec2::ZERO;
	// Second control point of the previous command, kept only while it can be reflected by a smooth continuation
	let mut last_cubic_control: Option<DVec2> = None;
	let mut last_quadratic_control: Option<DVec2> = None;

	to_absolute_commands(commands).map(move |command| {
		let start = current;
		let (segment, cubic_control, quadratic_control) = match command {
			AbsolutePathCommand::M(point) => {
				subpath_start = point;
				current = point;
				(None, None, None)
			}
			AbsolutePathCommand::L(point) => {
				current = point;
				(Some(PathSegment::Line(LineSegment::new(start, point))), None, None)
			}
			AbsolutePathCommand::H(x) => {
				current = DVec2::new(x, start.y);
				(Some(PathSegment::Line(LineSegment::new(start, current))), None, None)
			}
			AbsolutePathCommand::V(y) => {
				current = DVec2::new(start.x, y);
				(Some(PathSegment::Line(LineSegment::new(start, current))), None, None)
			}
			AbsolutePathCommand::Z => {
				current = subpath_start;
				(Some(PathSegment::Line(LineSegment::new(start, subpath_start))), None, None)
			}
			AbsolutePathCommand::C(c1, c2, end) => {
				current = end;
				(Some(PathSegment::Cubic(CubicBezier::new(start, c1, c2, end, &options.solver))), Some(c2), None)
			}
			AbsolutePathCommand::S(c2, end) => {
				let c1 = reflect_control_point(start, last_cubic_control.unwrap_or(start));
				current = end;
				(Some(PathSegment::Cubic(CubicBezier::new(start, c1, c2, end, &options.solver))), Some(c2), None)
			}
			AbsolutePathCommand::Q(c, end) => {
				current = end;
				(Some(quadratic_or_line(start, c, end, options)), None, Some(c))
			}
			AbsolutePathCommand::T(end) => {
				let c = reflect_control_point(start, last_quadratic_control.unwrap_or(start));
				current = end;
				(Some(quadratic_or_line(start, c, end, options)), None, Some(c))
			}
			AbsolutePathCommand::A(rx, ry, x_axis_rotation, large_arc, sweep, end) => {
				current = end;
				let arc = EllipticalArc::new(start, rx, ry, x_axis_rotation, large_arc, sweep, end, options);
				(Some(PathSegment::Arc(arc)), None, None)
			}
		};

		last_cubic_control = cubic_control;
		last_quadratic_control = quadratic_control;
		segment
	})
}
