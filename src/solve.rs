//! Freudenstein position solver.
use crate::fb::FourBar;
use std::f64::consts::PI;

/// Assembly branch of the linkage.
///
/// A feasible four-bar linkage admits two assemblies for each driver
/// angle, one per root of the Freudenstein quadratic.
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Branch {
    /// Open configuration, the minus root
    #[default]
    Open = 1,
    /// Crossed configuration, the plus root
    Crossed = 2,
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Crossed => write!(f, "crossed"),
        }
    }
}

/// Driven joint angle named in failure reasons.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Joint {
    /// Coupler orientation `theta3`
    Coupler,
    /// Follower orientation `theta4`
    Follower,
}

impl std::fmt::Display for Joint {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Coupler => write!(f, "theta3 (coupler)"),
            Self::Follower => write!(f, "theta4 (follower)"),
        }
    }
}

/// Reason a position analysis produced no result.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum SolveError {
    /// A link length is zero, negative, or non-finite.
    InvalidInput,
    /// No real assembly exists for the named joint at this driver angle.
    Infeasible(Joint),
    /// The geometry collapses at this driver angle and the named joint
    /// orientation is indeterminate.
    Degenerate(Joint),
}

impl std::fmt::Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::InvalidInput => write!(f, "link lengths must be positive finite numbers"),
            Self::Infeasible(joint) => write!(f, "no real solution for {joint}"),
            Self::Degenerate(joint) => write!(f, "degenerate geometry, {joint} is indeterminate"),
        }
    }
}

impl std::error::Error for SolveError {}

/// Coupler and follower orientations of one assembly branch.
///
/// Angles are in degrees, normalized to `(-180, 180]`.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct BranchPos {
    /// Coupler orientation
    pub theta3: f64,
    /// Follower orientation
    pub theta4: f64,
}

/// Both assembly branches for one driver angle.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PositionSolution {
    /// Branch 1, the minus root of the Freudenstein quadratic
    pub open: BranchPos,
    /// Branch 2, the plus root
    pub crossed: BranchPos,
}

impl PositionSolution {
    /// Pose of the given branch.
    pub const fn branch(&self, branch: Branch) -> BranchPos {
        match branch {
            Branch::Open => self.open,
            Branch::Crossed => self.crossed,
        }
    }
}

/// Result of one position analysis.
pub type SolveOutcome = Result<PositionSolution, SolveError>;

/// Freudenstein solver with a configurable numeric tolerance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Solver {
    /// Magnitudes at or below this are treated as zero when the quadratic
    /// collapses to a linear form, and a discriminant no further below
    /// zero than this is clamped to zero.
    pub eps: f64,
}

impl Default for Solver {
    fn default() -> Self {
        Self { eps: 1e-9 }
    }
}

impl Solver {
    /// Create a solver with the given tolerance.
    pub const fn new(eps: f64) -> Self {
        Self { eps }
    }

    /// Solve both branch poses for the driver angle `theta2` in degrees.
    pub fn solve(&self, fb: &FourBar, theta2: f64) -> SolveOutcome {
        if !fb.is_valid() {
            return Err(SolveError::InvalidInput);
        }
        let &FourBar { a, b, c, d } = fb;
        let (s2, c2) = theta2.to_radians().sin_cos();
        let k1 = d / a;
        let k2 = d / c;
        let k3 = (a * a - b * b + c * c + d * d) / (2. * a * c);
        let t4 = self
            .half_tan_roots(c2 - k1 - k2 * c2 + k3, -2. * s2, k1 - (k2 + 1.) * c2 + k3)
            .map_err(|e| e.at(Joint::Follower))?;
        let k4 = d / b;
        let k5 = (c * c - d * d - a * a - b * b) / (2. * a * b);
        let t3 = self
            .half_tan_roots(c2 - k1 + k4 * c2 + k5, -2. * s2, k1 + (k4 - 1.) * c2 + k5)
            .map_err(|e| e.at(Joint::Coupler))?;
        // Branch i takes the same-sign root of both quadratics; mixing
        // roots across branches breaks loop closure.
        Ok(PositionSolution {
            open: BranchPos { theta3: norm_deg(t3[0]), theta4: norm_deg(t4[0]) },
            crossed: BranchPos { theta3: norm_deg(t3[1]), theta4: norm_deg(t4[1]) },
        })
    }

    /// Angle roots of `a·tan²(θ/2) + b·tan(θ/2) + c = 0` in radians,
    /// ordered `[minus root, plus root]`.
    fn half_tan_roots(&self, a: f64, b: f64, c: f64) -> Result<[f64; 2], RootError> {
        if a.abs() <= self.eps {
            if b.abs() <= self.eps {
                return Err(if c.abs() <= self.eps {
                    RootError::Indeterminate
                } else {
                    RootError::NoReal
                });
            }
            // Linear form. The half-tangent substitution loses the θ = π
            // root; the quadratic's second root escaped to infinity, which
            // is exactly that angle. Order by the a → 0 limit of the
            // quadratic formula so branch labels stay continuous.
            let lin = 2. * (-c).atan2(b);
            return Ok(if b > 0. { [PI, lin] } else { [lin, PI] });
        }
        let disc = b * b - 4. * a * c;
        if disc < -self.eps {
            return Err(RootError::NoReal);
        }
        let sq = disc.max(0.).sqrt();
        Ok([2. * (-b - sq).atan2(2. * a), 2. * (-b + sq).atan2(2. * a)])
    }
}

/// Solve both branch poses with the default tolerance.
///
/// Link lengths `a` (crank), `b` (coupler), `c` (follower), `d` (ground)
/// must be positive; `theta2` is the driver angle in degrees, any range.
pub fn solve(a: f64, b: f64, c: f64, d: f64, theta2: f64) -> SolveOutcome {
    Solver::default().solve(&FourBar::new(a, b, c, d), theta2)
}

enum RootError {
    NoReal,
    Indeterminate,
}

impl RootError {
    fn at(self, joint: Joint) -> SolveError {
        match self {
            Self::NoReal => SolveError::Infeasible(joint),
            Self::Indeterminate => SolveError::Degenerate(joint),
        }
    }
}

/// Radians from a doubled `atan2` into degrees in `(-180, 180]`.
fn norm_deg(t: f64) -> f64 {
    let mut deg = t.to_degrees();
    while deg <= -180. {
        deg += 360.;
    }
    while deg > 180. {
        deg -= 360.;
    }
    deg
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn invalid_lengths() {
        assert_eq!(solve(0., 5., 4., 6., 45.), Err(SolveError::InvalidInput));
        assert_eq!(solve(2., -5., 4., 6., 45.), Err(SolveError::InvalidInput));
        assert_eq!(solve(2., 5., f64::NAN, 6., 45.), Err(SolveError::InvalidInput));
        assert_eq!(solve(2., 5., 4., f64::INFINITY, 45.), Err(SolveError::InvalidInput));
    }

    #[test]
    fn rocker_past_dead_point() {
        // Non-Grashof triple rocker, crank cannot pass 60 degrees.
        assert!(solve(4., 2., 3., 6., 30.).is_ok());
        assert_eq!(
            solve(4., 2., 3., 6., 60.),
            Err(SolveError::Infeasible(Joint::Follower))
        );
    }

    #[test]
    fn square_linkage_folds_at_zero() {
        // All coefficients vanish; the pose is indeterminate, not a fault.
        assert_eq!(
            solve(1., 1., 1., 1., 0.),
            Err(SolveError::Degenerate(Joint::Follower))
        );
    }

    #[test]
    fn square_linkage_linear_fallback() {
        // The θ4 quadratic is linear for a parallelogram at any angle;
        // one branch keeps the follower parallel to the crank and the
        // other folds it across the ground link.
        let fb = FourBar::new(1., 1., 1., 1.);
        for theta2 in [45., 90., -90., 135., 270.] {
            let sol = solve(1., 1., 1., 1., theta2).unwrap();
            let parallel = if theta2.to_radians().sin() > 0. {
                sol.open
            } else {
                sol.crossed
            };
            assert_abs_diff_eq!(parallel.theta4, norm_deg(theta2.to_radians()), epsilon = 1e-9);
            assert!(fb.closure_residual(theta2, &sol.open) < 1e-9);
            assert!(fb.closure_residual(theta2, &sol.crossed) < 1e-9);
        }
    }

    #[test]
    fn deterministic() {
        let first = solve(2., 5., 4., 6., 45.).unwrap();
        for _ in 0..10 {
            let again = solve(2., 5., 4., 6., 45.).unwrap();
            assert_eq!(first.open.theta3.to_bits(), again.open.theta3.to_bits());
            assert_eq!(first.open.theta4.to_bits(), again.open.theta4.to_bits());
            assert_eq!(first.crossed.theta3.to_bits(), again.crossed.theta3.to_bits());
            assert_eq!(first.crossed.theta4.to_bits(), again.crossed.theta4.to_bits());
        }
    }

    #[test]
    fn branch_accessor() {
        let sol = solve(2., 5., 4., 6., 45.).unwrap();
        assert_eq!(sol.branch(Branch::Open), sol.open);
        assert_eq!(sol.branch(Branch::Crossed), sol.crossed);
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            SolveError::Infeasible(Joint::Follower).to_string(),
            "no real solution for theta4 (follower)"
        );
        assert_eq!(
            SolveError::Degenerate(Joint::Coupler).to_string(),
            "degenerate geometry, theta3 (coupler) is indeterminate"
        );
    }
}
