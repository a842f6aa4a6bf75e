use super::{LineSegment, PointProperties};
use crate::math::{deg2rad, unit_or_zero, vector_angle};
use crate::options::PathOptions;
use glam::{DMat2, DVec2};
use std::f64::consts::TAU;

/// Center form of an elliptical arc: the ellipse's center, radii and rotation, plus the angular range swept by the arc.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArcCenterParametrization {
	pub center: DVec2,
	/// Angle of the start point before the ellipse is stretched and rotated, in radians.
	pub start_angle: f64,
	/// Signed angle swept from `start_angle`, positive when the sweep flag is set.
	pub sweep_angle: f64,
	/// Radii after scaling up to fit the chord.
	pub rx: f64,
	pub ry: f64,
	/// X-axis rotation in radians.
	pub rotation: f64,
}

impl ArcCenterParametrization {
	/// Converts the SVG endpoint form of an arc to its center form.
	///
	/// The radii must be nonzero and the endpoints distinct, see [`EllipticalArc::new`] for how those cases are handled.
	pub fn from_endpoints(start: DVec2, rx: f64, ry: f64, x_axis_rotation: f64, large_arc: bool, sweep: bool, end: DVec2) -> Self {
		let rotation = deg2rad(x_axis_rotation.rem_euclid(360.));
		let rotation_matrix = DMat2::from_angle(-rotation);
		let start_prime = rotation_matrix * (start - end) * 0.5;

		let x1_prime2 = start_prime.x * start_prime.x;
		let y1_prime2 = start_prime.y * start_prime.y;

		// Radii too small to span the chord are scaled up uniformly until they just fit
		let mut rx = rx.abs();
		let mut ry = ry.abs();
		let lambda = x1_prime2 / (rx * rx) + y1_prime2 / (ry * ry);
		if lambda > 1. {
			let lambda_sqrt = lambda.sqrt();
			rx *= lambda_sqrt;
			ry *= lambda_sqrt;
		}
		let rx2 = rx * rx;
		let ry2 = ry * ry;

		let sign = if large_arc != sweep { 1. } else { -1. };
		let radicand = ((rx2 * ry2 - rx2 * y1_prime2 - ry2 * x1_prime2) / (rx2 * y1_prime2 + ry2 * x1_prime2)).max(0.);
		let multiplier = sign * radicand.sqrt();
		let center_prime = DVec2::new(multiplier * (rx * start_prime.y / ry), multiplier * (-ry * start_prime.x / rx));

		let center = rotation_matrix.transpose() * center_prime + (start + end) * 0.5;

		let start_vector = DVec2::new((start_prime.x - center_prime.x) / rx, (start_prime.y - center_prime.y) / ry);
		let end_vector = DVec2::new((-start_prime.x - center_prime.x) / rx, (-start_prime.y - center_prime.y) / ry);
		let start_angle = vector_angle(DVec2::X, start_vector);
		let mut sweep_angle = vector_angle(start_vector, end_vector);

		if !sweep && sweep_angle > 0. {
			sweep_angle -= TAU;
		} else if sweep && sweep_angle < 0. {
			sweep_angle += TAU;
		}
		// Keeps the sign, unlike `rem_euclid`
		sweep_angle %= TAU;

		Self {
			center,
			start_angle,
			sweep_angle,
			rx,
			ry,
			rotation,
		}
	}

	pub fn end_angle(&self) -> f64 {
		self.start_angle + self.sweep_angle
	}

	/// Point at angular fraction `t` of the arc, with `t` in `[0, 1]`.
	pub fn point_at(&self, t: f64) -> DVec2 {
		let angle = self.start_angle + self.sweep_angle * t;
		let on_ellipse = DVec2::new(self.rx * angle.cos(), self.ry * angle.sin());
		DMat2::from_angle(self.rotation) * on_ellipse + self.center
	}
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
enum ArcShape {
	/// The endpoints coincide, so the arc is omitted.
	Point,
	/// A zero radius flattens the arc onto its chord.
	Line(LineSegment),
	Elliptical(ArcCenterParametrization),
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EllipticalArc {
	start: DVec2,
	end: DVec2,
	rx: f64,
	ry: f64,
	x_axis_rotation: f64,
	large_arc: bool,
	sweep: bool,
	shape: ArcShape,
	length: f64,
	#[cfg_attr(feature = "serde", serde(skip))]
	tangent_step: f64,
}

impl EllipticalArc {
	/// Builds an arc from its SVG endpoint form. `x_axis_rotation` is in degrees.
	///
	/// Identical endpoints produce a zero-length arc, and otherwise a zero radius produces a straight line between the
	/// endpoints. The length of a proper arc is approximated by a polyline of `options.arc_resolution` chords.
	#[allow(clippy::too_many_arguments)]
	pub fn new(start: DVec2, rx: f64, ry: f64, x_axis_rotation: f64, large_arc: bool, sweep: bool, end: DVec2, options: &PathOptions) -> Self {
		let shape = if start == end {
			ArcShape::Point
		} else if rx == 0. || ry == 0. {
			ArcShape::Line(LineSegment::new(start, end))
		} else {
			ArcShape::Elliptical(ArcCenterParametrization::from_endpoints(start, rx, ry, x_axis_rotation, large_arc, sweep, end))
		};

		let length = match &shape {
			ArcShape::Point => 0.,
			ArcShape::Line(line) => line.length(),
			ArcShape::Elliptical(parametrization) => polyline_length(parametrization, options.arc_resolution),
		};

		Self {
			start,
			end,
			rx,
			ry,
			x_axis_rotation,
			large_arc,
			sweep,
			shape,
			length,
			tangent_step: options.arc_tangent_step,
		}
	}

	pub fn start(&self) -> DVec2 {
		self.start
	}

	pub fn end(&self) -> DVec2 {
		self.end
	}

	pub fn length(&self) -> f64 {
		self.length
	}

	/// Radii as given, before any scaling.
	pub fn radii(&self) -> DVec2 {
		DVec2::new(self.rx, self.ry)
	}

	pub fn x_axis_rotation(&self) -> f64 {
		self.x_axis_rotation
	}

	pub fn large_arc(&self) -> bool {
		self.large_arc
	}

	pub fn sweep(&self) -> bool {
		self.sweep
	}

	/// The center form, or `None` when the arc degenerated to a point or a line.
	pub fn center_parametrization(&self) -> Option<&ArcCenterParametrization> {
		match &self.shape {
			ArcShape::Elliptical(parametrization) => Some(parametrization),
			_ => None,
		}
	}

	pub fn point_at_length(&self, length: f64) -> DVec2 {
		match &self.shape {
			ArcShape::Point => self.start,
			ArcShape::Line(line) => line.point_at_length(length),
			ArcShape::Elliptical(parametrization) => {
				let t = length.max(0.).min(self.length) / self.length;
				if t.is_finite() { parametrization.point_at(t) } else { self.start }
			}
		}
	}

	/// Direction of travel estimated from two nearby points `tangent_step` apart on either side, one-sided at the ends.
	pub fn tangent_at_length(&self, length: f64) -> DVec2 {
		match &self.shape {
			ArcShape::Point => DVec2::ZERO,
			ArcShape::Line(line) => line.tangent_at_length(length),
			ArcShape::Elliptical(_) => {
				let length = length.max(0.).min(self.length);
				let behind = (length - self.tangent_step).max(0.);
				let ahead = (length + self.tangent_step).min(self.length);
				unit_or_zero(self.point_at_length(ahead) - self.point_at_length(behind))
			}
		}
	}

	pub fn properties_at_length(&self, length: f64) -> PointProperties {
		PointProperties {
			point: self.point_at_length(length),
			tangent: self.tangent_at_length(length),
		}
	}
}

fn polyline_length(parametrization: &ArcCenterParametrization, resolution: usize) -> f64 {
	let resolution = resolution.max(1);
	let mut previous = parametrization.point_at(0.);
	(1..=resolution)
		.map(|step| {
			let next = parametrization.point_at(step as f64 / resolution as f64);
			let chord = previous.distance(next);
			previous = next;
			chord
		})
		.sum()
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::f64::consts::PI;

	fn arc(start: DVec2, rx: f64, ry: f64, rotation: f64, large_arc: bool, sweep: bool, end: DVec2) -> EllipticalArc {
		EllipticalArc::new(start, rx, ry, rotation, large_arc, sweep, end, &PathOptions::default())
	}

	#[test]
	fn half_circle() {
		let half_circle = arc(DVec2::ZERO, 5., 5., 0., false, true, DVec2::new(10., 0.));
		assert!((half_circle.length() - 5. * PI).abs() < 1e-3, "{}", half_circle.length());

		let middle = half_circle.length() / 2.;
		assert!(half_circle.point_at_length(middle).abs_diff_eq(DVec2::new(5., -5.), 1e-4));

		// Sweeping in the positive angle direction, so it bulges towards negative y
		assert!(half_circle.tangent_at_length(0.).abs_diff_eq(DVec2::new(0., -1.), 1e-2));
		assert!(half_circle.tangent_at_length(middle).abs_diff_eq(DVec2::X, 1e-6));
		assert!(half_circle.tangent_at_length(half_circle.length()).abs_diff_eq(DVec2::Y, 1e-2));

		let parametrization = half_circle.center_parametrization().unwrap();
		assert!(parametrization.center.abs_diff_eq(DVec2::new(5., 0.), 1e-12), "{}", parametrization.center);
		assert!((parametrization.sweep_angle - PI).abs() < 1e-4);
	}

	#[test]
	fn radii_scale_up_to_fit_chord() {
		let scaled = arc(DVec2::ZERO, 1., 1., 0., false, true, DVec2::new(10., 0.));
		let parametrization = scaled.center_parametrization().unwrap();
		assert!((parametrization.rx - 5.).abs() < 1e-4);
		assert!((parametrization.ry - 5.).abs() < 1e-4);
		assert!((scaled.length() - 5. * PI).abs() < 1e-3);
		assert_eq!(scaled.radii(), DVec2::new(1., 1.));
	}

	#[test]
	fn rotated_ellipse_hits_both_endpoints() {
		let start = DVec2::ZERO;
		let end = DVec2::new(7., 3.);
		let large = arc(start, 10., 5., 30., true, false, end);
		let small = arc(start, 10., 5., 30., false, true, end);

		for arc in [&large, &small] {
			assert!(arc.point_at_length(0.).abs_diff_eq(start, 1e-9));
			assert!(arc.point_at_length(arc.length()).abs_diff_eq(end, 1e-9));
		}
		assert!(large.length() > small.length());

		// Complementary arcs of the same ellipse add up to its circumference
		let circumference = PI * (45. - (35_f64 * 25.).sqrt());
		assert!((large.length() + small.length() - circumference).abs() < 1e-2);
	}

	#[test]
	fn rotation_is_normalized() {
		let a = arc(DVec2::ZERO, 10., 5., 30., false, true, DVec2::new(7., 3.));
		let b = arc(DVec2::ZERO, 10., 5., 390., false, true, DVec2::new(7., 3.));
		let c = arc(DVec2::ZERO, 10., 5., -330., false, true, DVec2::new(7., 3.));
		assert!((a.length() - b.length()).abs() < 1e-9);
		assert!((a.length() - c.length()).abs() < 1e-9);
	}

	#[test]
	fn zero_radius_is_a_line() {
		let flat = arc(DVec2::ZERO, 0., 5., 0., false, true, DVec2::new(6., 8.));
		assert!(flat.center_parametrization().is_none());
		assert_eq!(flat.length(), 10.);
		assert_eq!(flat.point_at_length(5.), DVec2::new(3., 4.));
		assert_eq!(flat.tangent_at_length(5.), DVec2::new(0.6, 0.8));
	}

	#[test]
	fn identical_endpoints_are_a_point() {
		let point = DVec2::new(2., 2.);
		// Coincident endpoints take precedence over the zero radius
		for arc in [arc(point, 5., 5., 0., false, true, point), arc(point, 0., 5., 0., false, true, point)] {
			assert_eq!(arc.length(), 0.);
			assert_eq!(arc.point_at_length(1.), point);
			assert_eq!(arc.tangent_at_length(1.), DVec2::ZERO);
		}
	}
}
