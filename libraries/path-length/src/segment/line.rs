use super::PointProperties;
use crate::math::unit_or_zero;
use glam::DVec2;

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LineSegment {
	start: DVec2,
	end: DVec2,
	length: f64,
}

impl LineSegment {
	pub fn new(start: DVec2, end: DVec2) -> Self {
		Self { start, end, length: start.distance(end) }
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

	pub fn point_at_length(&self, length: f64) -> DVec2 {
		let fraction = length.max(0.).min(self.length) / self.length;
		// Coincident endpoints
		if fraction.is_nan() {
			return self.start;
		}
		self.start.lerp(self.end, fraction)
	}

	pub fn tangent_at_length(&self, _length: f64) -> DVec2 {
		unit_or_zero(self.end - self.start)
	}

	pub fn properties_at_length(&self, length: f64) -> PointProperties {
		PointProperties {
			point: self.point_at_length(length),
			tangent: self.tangent_at_length(length),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn point_along_line() {
		let line = LineSegment::new(DVec2::new(1., 1.), DVec2::new(4., 5.));
		assert_eq!(line.length(), 5.);
		assert_eq!(line.point_at_length(2.5), DVec2::new(2.5, 3.));
		assert_eq!(line.tangent_at_length(1.), DVec2::new(0.6, 0.8));
	}

	#[test]
	fn coincident_endpoints_never_produce_nan() {
		let point = DVec2::new(3., -2.);
		let line = LineSegment::new(point, point);
		assert_eq!(line.length(), 0.);
		for length in [0., 1., -1., 100., f64::NAN] {
			assert_eq!(line.point_at_length(length), point);
		}
		assert_eq!(line.tangent_at_length(0.), DVec2::ZERO);
	}
}
