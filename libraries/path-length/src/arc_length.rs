use crate::options::SolverOptions;
use glam::DVec2;

// Legendre-Gauss abscissae and weights for n = 20, positive half. Each abscissa is used with both signs.
const LEGENDRE_ABSCISSAE: [f64; 10] = [
	0.076_526_521_133_497_33,
	0.227_785_851_141_645_08,
	0.373_706_088_715_419_56,
	0.510_867_001_950_827_1,
	0.636_053_680_726_515,
	0.746_331_906_460_150_8,
	0.839_116_971_822_218_8,
	0.912_234_428_251_326,
	0.963_971_927_277_913_8,
	0.993_128_599_185_094_9,
];
const LEGENDRE_WEIGHTS: [f64; 10] = [
	0.152_753_387_130_725_85,
	0.149_172_986_472_603_75,
	0.142_096_109_318_382_05,
	0.131_688_638_449_176_63,
	0.118_194_531_961_518_42,
	0.101_930_119_817_240_44,
	0.083_276_741_576_704_75,
	0.062_672_048_334_109_06,
	0.040_601_429_800_386_94,
	0.017_614_007_139_152_12,
];

/// Derivative of the quadratic Bézier `points` at `t`.
pub fn quadratic_derivative([p0, p1, p2]: [DVec2; 3], t: f64) -> DVec2 {
	2. * ((1. - t) * (p1 - p0) + t * (p2 - p1))
}

/// Derivative of the cubic Bézier `points` at `t`.
pub fn cubic_derivative([p0, p1, p2, p3]: [DVec2; 4], t: f64) -> DVec2 {
	let one_minus_t = 1. - t;
	3. * (one_minus_t * one_minus_t * (p1 - p0) + 2. * one_minus_t * t * (p2 - p1) + t * t * (p3 - p2))
}

/// Exact arc length of a quadratic Bézier from `0` to `t`.
pub fn quadratic_arc_length([p0, p1, p2]: [DVec2; 3], t: f64) -> f64 {
	// Speed squared is `a t^2 + b t + c`
	let second = p0 - 2. * p1 + p2;
	let first = 2. * (p1 - p0);
	let a = 4. * second.length_squared();
	let b = 4. * second.dot(first);
	let c = first.length_squared();

	// Control point halfway between the endpoints, so the speed is constant
	if a <= f64::EPSILON * c {
		return t * p0.distance(p2);
	}

	let b = b / (2. * a);
	let c = c / a;
	let u = t + b;
	let k = c - b * b;

	let uuk = if u * u + k > 0. { (u * u + k).sqrt() } else { 0. };
	let bbk = if b * b + k > 0. { (b * b + k).sqrt() } else { 0. };
	let ratio = (u + uuk) / (b + bbk);
	let term = if b + bbk != 0. && ratio != 0. && ratio.is_finite() { k * ratio.abs().ln() } else { 0. };

	(a.sqrt() / 2.) * (u * uuk - b * bbk + term)
}

/// Arc length of a cubic Bézier from `0` to `t`, integrated with 20-point Gauss-Legendre quadrature.
pub fn cubic_arc_length(points: [DVec2; 4], t: f64) -> f64 {
	let z = t / 2.;
	let speed = |t: f64| cubic_derivative(points, t).length();

	let sum: f64 = LEGENDRE_ABSCISSAE
		.iter()
		.zip(LEGENDRE_WEIGHTS)
		.map(|(&abscissa, weight)| weight * (speed(z * abscissa + z) + speed(z - z * abscissa)))
		.sum();

	z * sum
}

/// Finds the curve parameter `t` at which `arc_length(t)` reaches `length`.
///
/// Starts from `length / total_length` and walks towards the target with a step proportional to the initial residual,
/// halving the step whenever neither direction improves. Stops once the error relative to `total_length` is below the
/// tolerance, or after the iteration cap, in which case the best `t` found so far is returned.
pub fn t_from_length(length: f64, total_length: f64, arc_length: impl Fn(f64) -> f64, options: &SolverOptions) -> f64 {
	if total_length <= 0. || !total_length.is_finite() {
		return 0.;
	}

	let mut t = length / total_length;
	let residual = length - arc_length(t);
	let mut error = residual.abs() / total_length;
	let mut step = residual / total_length;
	let mut iterations = 0;

	while error > options.tolerance {
		if iterations >= options.max_iterations {
			log::trace!("Length solver stopped after {iterations} iterations with relative error {error}");
			break;
		}
		iterations += 1;

		let increased_error = (length - arc_length(t + step)).abs() / total_length;
		if increased_error < error {
			error = increased_error;
			t += step;
			continue;
		}

		let decreased_error = (length - arc_length(t - step)).abs() / total_length;
		if decreased_error < error {
			error = decreased_error;
			t -= step;
		} else {
			step /= 2.;
		}
	}

	t.clamp(0., 1.)
}
