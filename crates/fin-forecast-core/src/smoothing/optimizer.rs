use std::cmp::Ordering;

// Standard Nelder-Mead coefficients.
const REFLECTION: f64 = 1.0;
const EXPANSION: f64 = 2.0;
const CONTRACTION: f64 = 0.5;
const SHRINK: f64 = 0.5;

/// Termination settings for the simplex search.
#[derive(Debug, Clone)]
pub struct NelderMead {
    pub max_iter: usize,
    pub ftol: f64,
}

impl Default for NelderMead {
    fn default() -> Self {
        NelderMead {
            max_iter: 200,
            ftol: 1e-10,
        }
    }
}

/// Best vertex found by [`minimize`].
#[derive(Debug, Clone)]
pub struct Minimum<const N: usize> {
    pub x: [f64; N],
    pub value: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Derivative-free minimization over a box-bounded domain.
///
/// Every candidate point is clamped into `bounds` coordinate-wise, so the
/// objective is never evaluated outside the box. The search stops when the
/// simplex value spread falls below `ftol` or after `max_iter` steps;
/// hitting the iteration cap is reported through `converged`, not an error.
pub fn minimize<const N: usize>(
    f: impl Fn(&[f64; N]) -> f64,
    x0: [f64; N],
    steps: [f64; N],
    bounds: [(f64, f64); N],
    options: &NelderMead,
) -> Minimum<N> {
    let clamp = |mut x: [f64; N]| -> [f64; N] {
        for i in 0..N {
            let (lo, hi) = bounds[i];
            x[i] = if x[i].is_nan() {
                (lo + hi) / 2.0
            } else {
                x[i].clamp(lo, hi)
            };
        }
        x
    };
    let by_value = |a: &([f64; N], f64), b: &([f64; N], f64)| {
        a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal)
    };

    let mut simplex: Vec<([f64; N], f64)> = Vec::with_capacity(N + 1);
    let base = clamp(x0);
    simplex.push((base, f(&base)));
    for i in 0..N {
        let mut vertex = x0;
        vertex[i] += steps[i];
        let vertex = clamp(vertex);
        simplex.push((vertex, f(&vertex)));
    }

    let mut iterations = 0;
    let mut converged = false;

    for _ in 0..options.max_iter {
        simplex.sort_by(by_value);
        let best = simplex[0].1;
        let worst = simplex[N].1;
        if (worst - best).abs() < options.ftol {
            converged = true;
            break;
        }
        iterations += 1;

        // Centroid of every vertex except the worst.
        let mut centroid = [0.0; N];
        for (vertex, _) in &simplex[..N] {
            for i in 0..N {
                centroid[i] += vertex[i] / N as f64;
            }
        }

        let mut reflected = [0.0; N];
        for i in 0..N {
            reflected[i] = centroid[i] + REFLECTION * (centroid[i] - simplex[N].0[i]);
        }
        let reflected = clamp(reflected);
        let fr = f(&reflected);

        if fr < simplex[0].1 {
            // Reflection beat the best vertex: try going further out.
            let mut expanded = [0.0; N];
            for i in 0..N {
                expanded[i] = centroid[i] + EXPANSION * (reflected[i] - centroid[i]);
            }
            let expanded = clamp(expanded);
            let fe = f(&expanded);
            simplex[N] = if fe < fr { (expanded, fe) } else { (reflected, fr) };
        } else if fr < simplex[N - 1].1 {
            simplex[N] = (reflected, fr);
        } else {
            let mut contracted = [0.0; N];
            for i in 0..N {
                contracted[i] = centroid[i] + CONTRACTION * (simplex[N].0[i] - centroid[i]);
            }
            let contracted = clamp(contracted);
            let fc = f(&contracted);
            if fc < simplex[N].1 {
                simplex[N] = (contracted, fc);
            } else {
                // Nothing helped: shrink the whole simplex toward the best.
                let anchor = simplex[0].0;
                for entry in simplex.iter_mut().skip(1) {
                    for i in 0..N {
                        entry.0[i] = anchor[i] + SHRINK * (entry.0[i] - anchor[i]);
                    }
                    entry.0 = clamp(entry.0);
                    entry.1 = f(&entry.0);
                }
            }
        }
    }

    simplex.sort_by(by_value);
    Minimum {
        x: simplex[0].0,
        value: simplex[0].1,
        iterations,
        converged,
    }
}
