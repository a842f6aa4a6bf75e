use glam::DVec2;
use std::f64::consts::{PI, TAU};

pub fn deg2rad(degrees: f64) -> f64 {
	degrees / 180. * PI
}

/// Signed angle from `u` to `v` in `[-PI, PI]`.
pub fn vector_angle(u: DVec2, v: DVec2) -> f64 {
	const EPS: f64 = 1e-12;

	let sign = u.perp_dot(v);

	if sign.abs() < EPS && (u.normalize_or_zero() + v.normalize_or_zero()).length_squared() < EPS * EPS {
		return PI;
	}

	let cos = (u.dot(v) / (u.length() * v.length())).clamp(-1., 1.);
	let sign = if sign < 0. { -1. } else { 1. };
	sign * cos.acos()
}

/// Angle of `point` around `center`, measured from `start_angle` and wrapped into `[0, TAU)`.
pub fn angle_around(point: DVec2, center: DVec2, start_angle: f64) -> f64 {
	let offset = point - center;
	let angle = (offset.y.atan2(offset.x) - start_angle) % TAU;
	let angle = if angle < 0. { angle + TAU } else { angle };
	// Adding TAU to a tiny negative angle can round up to TAU itself
	if angle >= TAU { 0. } else { angle }
}

/// Unit vector in the direction of `v`, or zero when `v` has no direction.
pub fn unit_or_zero(v: DVec2) -> DVec2 {
	let length = v.length();
	if length > 0. && length.is_finite() { v / length } else { DVec2::ZERO }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn angle_between_vectors() {
		assert!((vector_angle(DVec2::X, DVec2::Y) - PI / 2.).abs() < 1e-12);
		assert!((vector_angle(DVec2::Y, DVec2::X) + PI / 2.).abs() < 1e-12);
		assert!((vector_angle(DVec2::X, -DVec2::X) - PI).abs() < 1e-12);
		// Scaled antiparallel vectors are still a half turn apart
		assert!((vector_angle(DVec2::new(5., 0.), DVec2::new(-0.5, 0.)) - PI).abs() < 1e-12);
	}

	#[test]
	fn angle_around_center_wraps() {
		let center = DVec2::new(10., 10.);
		assert!((angle_around(DVec2::new(20., 10.), center, 0.)).abs() < 1e-12);
		assert!((angle_around(DVec2::new(10., 0.), center, 0.) - 1.5 * PI).abs() < 1e-12);
		assert!((angle_around(DVec2::new(20., 10.), center, PI / 2.) - 1.5 * PI).abs() < 1e-12);
		assert_eq!(angle_around(DVec2::new(20., -1e-300), DVec2::ZERO, 0.), 0.);
	}

	#[test]
	fn unit_vectors() {
		assert_eq!(unit_or_zero(DVec2::new(3., 4.)), DVec2::new(0.6, 0.8));
		assert_eq!(unit_or_zero(DVec2::ZERO), DVec2::ZERO);
	}
}
