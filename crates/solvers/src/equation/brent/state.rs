use super::Config;

/// Next step chosen by [`State::propose`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum Proposal {
    /// Evaluate the residual at this x.
    Trial(f64),

    /// The bracket cannot shrink further in floating point.
    Exhausted,
}

/// Internal state of Brent's root-finding iteration.
///
/// `b` is the current iterate (smallest residual magnitude), `a` the previous
/// iterate, and `c` the point whose residual has the opposite sign of `b`'s.
/// `d` is the last step taken and `e` the step before it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct State {
    a: f64,
    fa: f64,
    b: f64,
    fb: f64,
    c: f64,
    fc: f64,
    d: f64,
    e: f64,
}

impl State {
    /// Creates the state from two endpoints with opposite residual signs.
    pub(super) fn new([lower, f_lower]: [f64; 2], [upper, f_upper]: [f64; 2]) -> Self {
        Self {
            a: lower,
            fa: f_lower,
            b: upper,
            fb: f_upper,
            c: upper,
            fc: f_upper,
            d: upper - lower,
            e: upper - lower,
        }
    }

    /// Returns the ordered pair of points whose residuals differ in sign.
    pub(super) fn bracket(&self) -> [f64; 2] {
        if self.fb == 0.0 {
            return [self.b, self.b];
        }
        let other = if same_sign(self.fb, self.fc) {
            self.a
        } else {
            self.c
        };
        [self.b.min(other), self.b.max(other)]
    }

    pub(super) fn midpoint(&self) -> f64 {
        let [lower, upper] = self.bracket();
        0.5 * (lower + upper)
    }

    pub(super) fn is_converged(&self, config: &Config) -> bool {
        if self.fb == 0.0 {
            return true;
        }
        let [lower, upper] = self.bracket();
        config.accepts(upper - lower, 0.5 * (lower + upper))
    }

    /// Chooses the next trial point.
    ///
    /// Interpolation is accepted only if it lands inside the bracket and the
    /// step is less than half the step from two iterations ago. Otherwise the
    /// proposal bisects.
    pub(super) fn propose(&mut self) -> Proposal {
        let mut secant = false;

        if same_sign(self.fb, self.fc) {
            secant = true;
            self.c = self.a;
            self.fc = self.fa;
            self.d = self.b - self.a;
            self.e = self.b - self.a;
        }

        if self.fc.abs() < self.fb.abs() {
            secant = true;
            self.a = self.b;
            self.b = self.c;
            self.c = self.a;
            self.fa = self.fb;
            self.fb = self.fc;
            self.fc = self.fa;
        }

        let tol = 0.5 * f64::EPSILON * self.b.abs();
        let m = 0.5 * (self.c - self.b);

        if self.fb == 0.0 || m.abs() <= tol {
            return Proposal::Exhausted;
        }

        if self.e.abs() < tol || self.fa.abs() <= self.fb.abs() {
            self.d = m;
            self.e = m;
        } else {
            let s = self.fb / self.fa;
            let (mut p, mut q) = if secant {
                (2.0 * m * s, 1.0 - s)
            } else {
                let q = self.fa / self.fc;
                let r = self.fb / self.fc;
                (
                    s * (2.0 * m * q * (q - r) - (self.b - self.a) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };

            if p > 0.0 {
                q = -q;
            } else {
                p = -p;
            }

            if 2.0 * p < (3.0 * m * q - (tol * q).abs()).min((self.e * q).abs()) {
                self.e = self.d;
                self.d = p / q;
            } else {
                self.d = m;
                self.e = m;
            }
        }

        let step = if self.d.abs() > tol {
            self.d
        } else {
            tol.copysign(m)
        };
        Proposal::Trial(self.b + step)
    }

    /// Moves the iterate to the trial point.
    pub(super) fn apply(&mut self, x: f64, residual: f64) {
        self.a = self.b;
        self.fa = self.fb;
        self.b = x;
        self.fb = residual;
    }
}

fn same_sign(lhs: f64, rhs: f64) -> bool {
    (lhs < 0.0 && rhs < 0.0) || (lhs > 0.0 && rhs > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn square_minus_two(x: f64) -> f64 {
        x * x - 2.0
    }

    #[test]
    fn first_proposal_bisects_a_symmetric_bracket() {
        let mut state = State::new([0.0, -2.0], [2.0, 2.0]);
        assert_eq!(state.bracket(), [0.0, 2.0]);

        let Proposal::Trial(x) = state.propose() else {
            panic!("expected a trial");
        };
        assert_relative_eq!(x, 1.0);
    }

    #[test]
    fn bracket_keeps_sign_change_and_shrinks() {
        let mut state = State::new([0.0, -2.0], [2.0, 2.0]);
        let mut width = 2.0;

        for _ in 0..6 {
            let Proposal::Trial(x) = state.propose() else {
                break;
            };
            state.apply(x, square_minus_two(x));

            let [lower, upper] = state.bracket();
            assert!(square_minus_two(lower) <= 0.0);
            assert!(square_minus_two(upper) >= 0.0);
            assert!(upper - lower <= width);
            width = upper - lower;
        }

        assert!(width < 1e-6);
    }

    #[test]
    fn exact_zero_collapses_bracket() {
        let mut state = State::new([0.0, -1.0], [2.0, 1.0]);
        let Proposal::Trial(x) = state.propose() else {
            panic!("expected a trial");
        };
        state.apply(x, 0.0);

        assert_eq!(state.bracket(), [1.0, 1.0]);
        assert!(state.is_converged(&Config::new(10, 0.0, 0.0).expect("valid config")));
        assert_eq!(state.propose(), Proposal::Exhausted);
    }
}
