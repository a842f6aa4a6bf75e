/// Parameters of the length-to-`t` search used by the Bézier segments.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct SolverOptions {
	/// Relative error (as a fraction of the curve's total length) below which the search stops. The default value is `0.001`.
	pub tolerance: f64,
	/// Upper bound on search iterations. When it is reached the best `t` found so far is used. The default value is `500`.
	pub max_iterations: usize,
}

impl Default for SolverOptions {
	fn default() -> Self {
		Self {
			tolerance: 1e-3,
			max_iterations: 500,
		}
	}
}

/// Options controlling how a [`Path`](crate::Path) approximates its segments.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct PathOptions {
	/// Number of chords used to approximate the length of an elliptical arc. The default value is `300`.
	pub arc_resolution: usize,
	/// Distance between the two samples used to estimate the tangent of an elliptical arc. The default value is `0.05`.
	pub arc_tangent_step: f64,
	/// See [`SolverOptions`].
	pub solver: SolverOptions,
}

impl Default for PathOptions {
	fn default() -> Self {
		Self {
			arc_resolution: 300,
			arc_tangent_step: 0.05,
			solver: SolverOptions::default(),
		}
	}
}
