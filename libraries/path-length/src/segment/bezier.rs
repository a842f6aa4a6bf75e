use super::PointProperties;
use crate::arc_length::{cubic_arc_length, cubic_derivative, quadratic_arc_length, quadratic_derivative, t_from_length};
use crate::math::unit_or_zero;
use crate::options::SolverOptions;
use glam::DVec2;

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct QuadraticBezier {
	points: [DVec2; 3],
	length: f64,
	#[cfg_attr(feature = "serde", serde(skip))]
	solver: SolverOptions,
}

impl QuadraticBezier {
	pub fn new(start: DVec2, handle: DVec2, end: DVec2, solver: &SolverOptions) -> Self {
		let points = [start, handle, end];
		Self {
			points,
			length: quadratic_arc_length(points, 1.),
			solver: *solver,
		}
	}

	pub fn handle(&self) -> DVec2 {
		self.points[1]
	}

	pub fn evaluate(&self, t: f64) -> DVec2 {
		let [p0, p1, p2] = self.points;
		let p01 = p0.lerp(p1, t);
		let p12 = p1.lerp(p2, t);
		p01.lerp(p12, t)
	}

	fn derivative(&self, t: f64) -> DVec2 {
		quadratic_derivative(self.points, t)
	}

	fn arc_length(&self, t: f64) -> f64 {
		quadratic_arc_length(self.points, t)
	}
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CubicBezier {
	points: [DVec2; 4],
	length: f64,
	#[cfg_attr(feature = "serde", serde(skip))]
	solver: SolverOptions,
}

impl CubicBezier {
	pub fn new(start: DVec2, handle_start: DVec2, handle_end: DVec2, end: DVec2, solver: &SolverOptions) -> Self {
		let points = [start, handle_start, handle_end, end];
		Self {
			points,
			length: cubic_arc_length(points, 1.),
			solver: *solver,
		}
	}

	pub fn handle_start(&self) -> DVec2 {
		self.points[1]
	}

	pub fn handle_end(&self) -> DVec2 {
		self.points[2]
	}

	pub fn evaluate(&self, t: f64) -> DVec2 {
		let [p0, p1, p2, p3] = self.points;
		let p01 = p0.lerp(p1, t);
		let p12 = p1.lerp(p2, t);
		let p23 = p2.lerp(p3, t);
		let p012 = p01.lerp(p12, t);
		let p123 = p12.lerp(p23, t);
		p012.lerp(p123, t)
	}

	fn derivative(&self, t: f64) -> DVec2 {
		cubic_derivative(self.points, t)
	}

	fn arc_length(&self, t: f64) -> f64 {
		cubic_arc_length(self.points, t)
	}
}

/// Length-based queries shared by both Bézier degrees, which only differ in `evaluate`, `derivative` and `arc_length`.
macro_rules! impl_length_queries {
	($type:ty) => {
		impl $type {
			pub fn start(&self) -> DVec2 {
				self.points[0]
			}

			pub fn end(&self) -> DVec2 {
				self.points[self.points.len() - 1]
			}

			pub fn length(&self) -> f64 {
				self.length
			}

			/// Curve parameter at `length` along the curve, found by the iterative length solver.
			pub fn t_at_length(&self, length: f64) -> f64 {
				let length = length.max(0.).min(self.length);
				t_from_length(length, self.length, |t| self.arc_length(t), &self.solver)
			}

			pub fn point_at_length(&self, length: f64) -> DVec2 {
				self.evaluate(self.t_at_length(length))
			}

			pub fn tangent_at_length(&self, length: f64) -> DVec2 {
				unit_or_zero(self.derivative(self.t_at_length(length)))
			}

			pub fn properties_at_length(&self, length: f64) -> PointProperties {
				let t = self.t_at_length(length);
				PointProperties {
					point: self.evaluate(t),
					tangent: unit_or_zero(self.derivative(t)),
				}
			}
		}
	};
}

impl_length_queries!(QuadraticBezier);
impl_length_queries!(CubicBezier);
