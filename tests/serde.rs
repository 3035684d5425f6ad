#![cfg(feature = "serde")]
//! Wire-format coverage for the transport layers that serialize results.
use four_bar_pos::{solve, FourBar, PositionSolution, SolveError};

#[test]
fn linkage_round_trip() {
    let fb = FourBar::new(2., 5., 4., 6.);
    let json = serde_json::to_string(&fb).unwrap();
    assert_eq!(serde_json::from_str::<FourBar>(&json).unwrap(), fb);
}

#[test]
fn solution_round_trip() {
    let sol = solve(2., 5., 4., 6., 45.).unwrap();
    let json = serde_json::to_string(&sol).unwrap();
    assert_eq!(serde_json::from_str::<PositionSolution>(&json).unwrap(), sol);
}

#[test]
fn error_is_serializable() {
    let err = solve(4., 2., 3., 6., 60.).unwrap_err();
    let json = serde_json::to_string(&err).unwrap();
    assert_eq!(serde_json::from_str::<SolveError>(&json).unwrap(), err);
}
