use strand_core::Snapshot;

use super::solution::Status;
use super::{Config, Point, Solution};

/// (3 - √5) / 2, the golden-section fraction of the larger side.
const GOLDEN: f64 = 0.381_966_011_250_105_1;

/// √ε for `f64`; trial steps are never shorter than this times `|x|`.
const SQRT_EPSILON: f64 = 1.490_116_119_384_765_6e-8;

/// Iteration state for Brent's method.
///
/// `best` is the lowest point seen, `second` the next lowest, and `third`
/// the previous value of `second`. `step` and `prev_step` are the last two
/// step lengths, used to reject parabolic steps that do not shrink.
pub(super) struct State<I, O> {
    lower: f64,
    upper: f64,
    best: Point,
    second: Point,
    third: Point,
    step: f64,
    prev_step: f64,
    best_snapshot: Snapshot<I, O>,
}

impl<I, O> State<I, O> {
    pub(super) fn new(lower: f64, upper: f64, guess: Point, snapshot: Snapshot<I, O>) -> Self {
        Self {
            lower,
            upper,
            best: guess,
            second: guess,
            third: guess,
            step: 0.0,
            prev_step: 0.0,
            best_snapshot: snapshot,
        }
    }

    pub(super) fn bracket(&self) -> [f64; 2] {
        [self.lower, self.upper]
    }

    pub(super) fn best(&self) -> Point {
        self.best
    }

    /// Chooses the next trial point and records the step taken.
    pub(super) fn propose<F: Fn(f64) -> f64>(&mut self, transform: &F) -> f64 {
        let z = self.best.x;
        let f_best = transform(self.best.objective);
        let f_second = transform(self.second.objective);
        let f_third = transform(self.third.objective);

        let room_below = z - self.lower;
        let room_above = self.upper - z;
        let tolerance = SQRT_EPSILON * z.abs();
        let midpoint = 0.5 * (self.lower + self.upper);

        let (mut p, mut q, mut r) = (0.0, 0.0, 0.0);
        if self.prev_step.abs() > tolerance {
            // Parabola through best, second, and third.
            r = (z - self.second.x) * (f_best - f_third);
            q = (z - self.third.x) * (f_best - f_second);
            p = (z - self.third.x) * q - (z - self.second.x) * r;
            q = 2.0 * (q - r);

            if q > 0.0 {
                p = -p;
            } else {
                q = -q;
            }

            r = self.prev_step;
            self.prev_step = self.step;
        }

        if p.abs() < (0.5 * q * r).abs() && p < q * room_below && p < q * room_above {
            self.step = p / q;
            let trial = z + self.step;

            // Stay at least two tolerances away from either bound.
            let margin = 2.0 * tolerance;
            if trial - self.lower < margin || self.upper - trial < margin {
                self.step = if z < midpoint { tolerance } else { -tolerance };
            }
        } else {
            self.prev_step = if z < midpoint {
                self.upper - z
            } else {
                -(z - self.lower)
            };
            self.step = GOLDEN * self.prev_step;
        }

        if self.step.abs() >= tolerance {
            z + self.step
        } else if self.step > 0.0 {
            z + tolerance
        } else {
            z - tolerance
        }
    }

    /// Shrinks the bracket with an evaluated trial point.
    ///
    /// `snapshot` is `None` when the trial was not a real evaluation; such a
    /// point must carry a worst-possible objective so it never becomes best.
    #[allow(clippy::float_cmp)]
    pub(super) fn apply<F: Fn(f64) -> f64>(
        &mut self,
        trial: Point,
        snapshot: Option<Snapshot<I, O>>,
        transform: &F,
    ) {
        let z = self.best.x;
        let f_trial = transform(trial.objective);

        match snapshot {
            Some(snapshot) if f_trial <= transform(self.best.objective) => {
                if trial.x < z {
                    self.upper = z;
                } else {
                    self.lower = z;
                }
                self.third = self.second;
                self.second = self.best;
                self.best = trial;
                self.best_snapshot = snapshot;
            }
            _ => {
                if trial.x < z {
                    self.lower = trial.x;
                } else {
                    self.upper = trial.x;
                }

                if f_trial <= transform(self.second.objective) || self.second.x == z {
                    self.third = self.second;
                    self.second = trial;
                } else if f_trial <= transform(self.third.objective)
                    || self.third.x == z
                    || self.third.x == self.second.x
                {
                    self.third = trial;
                }
            }
        }
    }

    pub(super) fn is_converged(&self, config: &Config) -> bool {
        let width = self.upper - self.lower;
        width < config.x_abs_tol() + config.x_rel_tol() * self.best.x.abs()
    }

    pub(super) fn into_solution(self, status: Status, iters: usize) -> Solution<I, O> {
        Solution {
            status,
            x: self.best.x,
            objective: self.best.objective,
            snapshot: self.best_snapshot,
            bracket: [self.lower, self.upper],
            iters,
        }
    }
}
