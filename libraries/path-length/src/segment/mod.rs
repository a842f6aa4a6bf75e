mod arc;
mod bezier;
mod line;

pub use arc::{ArcCenterParametrization, EllipticalArc};
pub use bezier::{CubicBezier, QuadraticBezier};
pub use line::LineSegment;

use glam::DVec2;

/// Position and unit tangent at a point along a segment or path.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointProperties {
	pub point: DVec2,
	/// Unit vector in the direction of travel, or zero where the direction is undefined.
	pub tangent: DVec2,
}

/// A drawable piece of a path in absolute coordinates, carrying its own cached length.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PathSegment {
	Line(LineSegment),
	Quadratic(QuadraticBezier),
	Cubic(CubicBezier),
	Arc(EllipticalArc),
}

impl PathSegment {
	pub fn start(&self) -> DVec2 {
		match self {
			PathSegment::Line(line) => line.start(),
			PathSegment::Quadratic(quadratic) => quadratic.start(),
			PathSegment::Cubic(cubic) => cubic.start(),
			PathSegment::Arc(arc) => arc.start(),
		}
	}

	pub fn end(&self) -> DVec2 {
		match self {
			PathSegment::Line(line) => line.end(),
			PathSegment::Quadratic(quadratic) => quadratic.end(),
			PathSegment::Cubic(cubic) => cubic.end(),
			PathSegment::Arc(arc) => arc.end(),
		}
	}

	pub fn length(&self) -> f64 {
		match self {
			PathSegment::Line(line) => line.length(),
			PathSegment::Quadratic(quadratic) => quadratic.length(),
			PathSegment::Cubic(cubic) => cubic.length(),
			PathSegment::Arc(arc) => arc.length(),
		}
	}

	/// Point at `length` along the segment. `length` is clamped to `[0, self.length()]`.
	pub fn point_at_length(&self, length: f64) -> DVec2 {
		match self {
			PathSegment::Line(line) => line.point_at_length(length),
			PathSegment::Quadratic(quadratic) => quadratic.point_at_length(length),
			PathSegment::Cubic(cubic) => cubic.point_at_length(length),
			PathSegment::Arc(arc) => arc.point_at_length(length),
		}
	}

	/// Unit tangent at `length` along the segment. `length` is clamped to `[0, self.length()]`.
	pub fn tangent_at_length(&self, length: f64) -> DVec2 {
		match self {
			PathSegment::Line(line) => line.tangent_at_length(length),
			PathSegment::Quadratic(quadratic) => quadratic.tangent_at_length(length),
			PathSegment::Cubic(cubic) => cubic.tangent_at_length(length),
			PathSegment::Arc(arc) => arc.tangent_at_length(length),
		}
	}

	pub fn properties_at_length(&self, length: f64) -> PointProperties {
		match self {
			PathSegment::Line(line) => line.properties_at_length(length),
			PathSegment::Quadratic(quadratic) => quadratic.properties_at_length(length),
			PathSegment::Cubic(cubic) => cubic.properties_at_length(length),
			PathSegment::Arc(arc) => arc.properties_at_length(length),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::options::{PathOptions, SolverOptions};

	#[test]
	fn dispatch_reaches_every_variant() {
		let options = PathOptions::default();
		let segments = [
			PathSegment::Line(LineSegment::new(DVec2::ZERO, DVec2::new(10., 0.))),
			PathSegment::Quadratic(QuadraticBezier::new(DVec2::ZERO, DVec2::new(5., 10.), DVec2::new(10., 0.), &SolverOptions::default())),
			PathSegment::Cubic(CubicBezier::new(DVec2::ZERO, DVec2::new(0., 10.), DVec2::new(10., 10.), DVec2::new(10., 0.), &SolverOptions::default())),
			PathSegment::Arc(EllipticalArc::new(DVec2::ZERO, 5., 5., 0., false, true, DVec2::new(10., 0.), &options)),
		];

		for segment in &segments {
			assert!(segment.length() >= 10.);
			assert!(segment.point_at_length(0.).abs_diff_eq(segment.start(), 1e-9));
			assert!(segment.point_at_length(segment.length()).abs_diff_eq(segment.end(), 1e-9));
			// Out of range lengths clamp to the ends
			assert!(segment.point_at_length(-1.).abs_diff_eq(segment.start(), 1e-9));
			assert!(segment.point_at_length(segment.length() + 1.).abs_diff_eq(segment.end(), 1e-9));

			let properties = segment.properties_at_length(segment.length() / 2.);
			assert!((properties.tangent.length() - 1.).abs() < 1e-9);
			assert_eq!(properties.point, segment.point_at_length(segment.length() / 2.));
		}
	}
}
