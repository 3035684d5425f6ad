//! Closed-form position analysis for planar four-bar linkages.
//!
//! Given the four link lengths and the crank (driver) angle, the solver
//! returns the coupler and follower orientations for both assembly
//! branches of the mechanism, using Freudenstein's equation.
//!
//! ```
//! use four_bar_pos::{solve, Branch};
//!
//! let sol = solve(2., 5., 4., 6., 45.).unwrap();
//! let open = sol.branch(Branch::Open);
//! assert!((open.theta3 - 30.9915).abs() < 1e-4);
//! assert!((open.theta4 - 94.2950).abs() < 1e-4);
//! ```
//!
//! The computation is pure and stateless; it is safe to call from any
//! number of threads without coordination.
#![warn(missing_docs)]
pub use crate::fb::*;
pub use crate::solve::*;

mod fb;
mod solve;
