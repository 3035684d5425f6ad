//! Planar four-bar linkage dimensions.
use crate::solve::BranchPos;

/// Link lengths of a planar four-bar linkage.
///
/// The crank pivot sits at the origin and the ground link lies along the
/// positive x-axis.
///
/// # Parameters
///
/// + Crank (driver) link `a`
/// + Coupler link `b`
/// + Follower (output) link `c`
/// + Ground link `d`
///
/// All four lengths must be strictly positive and finite; the solver
/// reports anything else as [`SolveError::InvalidInput`](crate::SolveError).
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FourBar {
    /// Length of the crank link
    pub a: f64,
    /// Length of the coupler link
    pub b: f64,
    /// Length of the follower link
    pub c: f64,
    /// Length of the ground link
    pub d: f64,
}

impl Default for FourBar {
    fn default() -> Self {
        Self::example()
    }
}

impl FourBar {
    /// Create a new instance from the four link lengths.
    pub const fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    /// An example crank rocker.
    pub const fn example() -> Self {
        Self::new(35., 70., 70., 90.)
    }

    /// Check that all four lengths are strictly positive and finite.
    pub fn is_valid(&self) -> bool {
        [self.a, self.b, self.c, self.d]
            .iter()
            .all(|l| l.is_finite() && *l > 0.)
    }

    /// Joint positions for one solved branch.
    ///
    /// Returns `[p1, p2, p3, p4]` where `p1` is the crank pivot (origin),
    /// `p2` the follower pivot on the ground link, `p3` the crank-coupler
    /// pin and `p4` the coupler-follower pin. `theta2` and the branch
    /// angles are in degrees.
    pub fn joints(&self, theta2: f64, pos: &BranchPos) -> [[f64; 2]; 4] {
        let t2 = theta2.to_radians();
        let t3 = pos.theta3.to_radians();
        let p3 = [self.a * t2.cos(), self.a * t2.sin()];
        let p4 = [p3[0] + self.b * t3.cos(), p3[1] + self.b * t3.sin()];
        [[0., 0.], [self.d, 0.], p3, p4]
    }

    /// Magnitude of the loop-closure defect for one solved branch.
    ///
    /// Walks the vector loop `a + b - c - d` with the given angles; a
    /// correctly paired branch returns a value near machine epsilon
    /// (scaled by the link lengths).
    pub fn closure_residual(&self, theta2: f64, pos: &BranchPos) -> f64 {
        let t2 = theta2.to_radians();
        let t3 = pos.theta3.to_radians();
        let t4 = pos.theta4.to_radians();
        let x = self.a * t2.cos() + self.b * t3.cos() - self.c * t4.cos() - self.d;
        let y = self.a * t2.sin() + self.b * t3.sin() - self.c * t4.sin();
        x.hypot(y)
    }
}
