use crate::error::GeometryError;
use crate::math::angle_around;
use crate::path::Path;
use glam::DVec2;
use std::f64::consts::TAU;

/// One evenly spaced sample of a path.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LookupEntry {
	pub point: DVec2,
	/// Angle of `point` around the table's center in `[0, TAU)`, only present in radial tables.
	pub angle: Option<f64>,
}

/// Samples taken at `precision + 1` evenly spaced distances along a path, from its start to its end inclusive.
///
/// The table answers approximate inverse queries by scanning a window near the expected sample and interpolating
/// between neighbours, which avoids any curve math once the table is built.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LookupTable {
	entries: Vec<LookupEntry>,
	precision: usize,
}

impl LookupTable {
	/// A `precision` of zero is treated as one.
	pub fn new(path: &Path, precision: usize) -> Result<Self, GeometryError> {
		Self::build(path, precision, |_| None)
	}

	/// Also records the angle of each sample around `center`, measured from `start_angle` in radians.
	pub fn radial(path: &Path, precision: usize, center: DVec2, start_angle: f64) -> Result<Self, GeometryError> {
		Self::build(path, precision, |point| Some(angle_around(point, center, start_angle)))
	}

	fn build(path: &Path, precision: usize, angle: impl Fn(DVec2) -> Option<f64>) -> Result<Self, GeometryError> {
		let precision = precision.max(1);
		let total_length = path.total_length();

		let entries = (0..=precision)
			.map(|step| {
				let point = path.point_at_length(step as f64 / precision as f64 * total_length)?;
				Ok(LookupEntry { point, angle: angle(point) })
			})
			.collect::<Result<Vec<_>, GeometryError>>()?;

		log::trace!("Built a lookup table of {} samples over a length of {total_length}", entries.len());
		Ok(Self { entries, precision })
	}

	pub fn entries(&self) -> &[LookupEntry] {
		&self.entries
	}

	pub fn precision(&self) -> usize {
		self.precision
	}

	pub fn is_radial(&self) -> bool {
		self.entries.iter().all(|entry| entry.angle.is_some())
	}

	/// Approximate `y` of the path at `x`, for paths that advance monotonically along the x axis.
	pub fn y_at_x(&self, x: f64) -> f64 {
		let (Some(first), Some(last)) = (self.entries.first(), self.entries.last()) else { return 0. };

		let range = last.point.x - first.point.x;
		let fraction = if range > 0. { (x - first.point.x) / range } else { 0. };

		match self.bracket(fraction, |entry| Some(entry.point.x), x) {
			Some((lower, upper, percent)) => lower.point.y + (upper.point.y - lower.point.y) * percent,
			None => last.point.y,
		}
	}

	/// Approximate point of the path at `fraction` of a full turn around the table's center. `None` for tables built
	/// without angles.
	pub fn point_at_angle(&self, fraction: f64) -> Option<DVec2> {
		if !self.is_radial() {
			return None;
		}
		let last = self.entries.last()?;

		match self.bracket(fraction, |entry| entry.angle, fraction * TAU) {
			Some((lower, upper, percent)) => Some(lower.point.lerp(upper.point, percent)),
			None => Some(last.point),
		}
	}

	/// Finds the first sample whose `key` exceeds `target`, starting a third of the table before the index hinted by
	/// `fraction`. Returns that sample, the one before it and how far `target` lies between their keys.
	fn bracket(&self, fraction: f64, key: impl Fn(&LookupEntry) -> Option<f64>, target: f64) -> Option<(&LookupEntry, &LookupEntry, f64)> {
		let hint = (fraction.clamp(0., 1.) * self.precision as f64).floor() as usize;
		let start = hint.saturating_sub(self.precision / 3).max(1);

		let index = (start..self.entries.len()).find(|&index| key(&self.entries[index]).is_some_and(|value| value > target))?;
		let lower = &self.entries[index - 1];
		let upper = &self.entries[index];

		let (lower_key, upper_key) = (key(lower)?, key(upper)?);
		let span = upper_key - lower_key;
		let percent = if span > 0. { ((target - lower_key) / span).clamp(0., 1.) } else { 1. };

		Some((lower, upper, percent))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::f64::consts::PI;

	#[test]
	fn samples_are_evenly_spaced() {
		let path = Path::from_path_data("M0,0 L10,0").unwrap();
		let table = LookupTable::new(&path, 10).unwrap();
		assert_eq!(table.entries().len(), 11);
		for (index, entry) in table.entries().iter().enumerate() {
			assert!(entry.point.abs_diff_eq(DVec2::new(index as f64, 0.), 1e-9));
			assert_eq!(entry.angle, None);
		}
	}

	#[test]
	fn zero_precision_means_one() {
		let path = Path::from_path_data("M0,0 L10,0").unwrap();
		let table = LookupTable::new(&path, 0).unwrap();
		assert_eq!(table.precision(), 1);
		assert_eq!(table.entries().iter().map(|entry| entry.point).collect::<Vec<_>>(), vec![DVec2::ZERO, DVec2::new(10., 0.)]);
	}

	#[test]
	fn empty_path_cannot_be_sampled() {
		let path = Path::from_commands(Vec::new(), Default::default());
		assert!(LookupTable::new(&path, 4).is_err());
	}

	#[test]
	fn y_follows_a_straight_graph() {
		let path = Path::from_path_data("M0,0 L10,20").unwrap();
		let table = LookupTable::new(&path, 10).unwrap();
		assert!((table.y_at_x(2.5) - 5.).abs() < 1e-9);
		assert!((table.y_at_x(9.9) - 19.8).abs() < 1e-9);
		// Outside the sampled range
		assert_eq!(table.y_at_x(100.), 20.);
		assert_eq!(table.y_at_x(-5.), 0.);
	}

	#[test]
	fn y_follows_an_eased_graph() {
		let path = Path::from_path_data("M0,0 C30,0 70,100 100,100").unwrap();
		let table = LookupTable::new(&path, 100).unwrap();
		// The curve is symmetric about its midpoint
		assert!((table.y_at_x(50.) - 50.).abs() < 0.5);
		assert!(table.y_at_x(25.) < 25.);
		assert!(table.y_at_x(75.) > 75.);
	}

	#[test]
	fn radial_lookup_around_a_circle() {
		let circle = Path::from_path_data("M90,50 A40,40 0 1 1 10,50 A40,40 0 1 1 90,50").unwrap();
		let table = LookupTable::radial(&circle, 36, DVec2::new(50., 50.), 0.).unwrap();
		assert!(table.is_radial());

		// The first and last samples sit on the seam at angle zero
		let angles = table.entries()[1..36].iter().filter_map(|entry| entry.angle).collect::<Vec<_>>();
		assert!(angles.windows(2).all(|pair| pair[0] < pair[1]));

		assert!(table.point_at_angle(0.25).unwrap().abs_diff_eq(DVec2::new(50., 90.), 0.5));
		assert!(table.point_at_angle(0.5).unwrap().abs_diff_eq(DVec2::new(10., 50.), 0.5));
		assert!(table.point_at_angle(0.75).unwrap().abs_diff_eq(DVec2::new(50., 10.), 0.5));
	}

	#[test]
	fn radial_angles_start_from_start_angle() {
		let circle = Path::from_path_data("M90,50 A40,40 0 1 1 10,50 A40,40 0 1 1 90,50").unwrap();
		let table = LookupTable::radial(&circle, 8, DVec2::new(50., 50.), PI / 2.).unwrap();
		let first = table.entries()[0].angle.unwrap();
		assert!((first - 3. * PI / 2.).abs() < 1e-6);
		assert!(table.entries().iter().all(|entry| entry.angle.is_some_and(|angle| (0. ..TAU).contains(&angle))));
	}

	#[test]
	fn plain_table_has_no_angles() {
		let path = Path::from_path_data("M0,0 L10,0").unwrap();
		assert_eq!(LookupTable::new(&path, 4).unwrap().point_at_angle(0.5), None);
	}
}
