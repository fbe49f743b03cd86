use log::{debug, trace};
use nalgebra::{RealField, Scalar};
use num_traits::{Zero, One};
use crate::dense::*;

pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Reduces `a` to reduced row-echelon form by Gauss-Jordan elimination.
///
/// Pivots are taken by position only: a zero in the expected pivot position
/// abandons the column without searching other rows, so no row interchange
/// is ever performed. Entries of magnitude below `tol` are snapped to exact
/// zero after elimination.
pub fn rref<R>(a: &Mat<R>, tol: R) -> Mat<R>
where R: Scalar + RealField + Copy {
    rref_in_place(a.clone(), tol)
}

pub fn rref_in_place<R>(a: Mat<R>, tol: R) -> Mat<R>
where R: Scalar + RealField + Copy {
    debug!("start rref: {:?}.", a.shape());
    trace!("{}", a);

    let mut calc = RrefCalc::new(a, tol);
    calc.process();
    let res = calc.result();

    debug!("rref done.");
    trace!("{}", res);

    res
}

struct RrefCalc<R> {
    target: Mat<R>,
    tol: R
}

impl<R> RrefCalc<R>
where R: Scalar + RealField + Copy {
    fn new(target: Mat<R>, tol: R) -> Self {
        RrefCalc { target, tol }
    }

    fn result(self) -> Mat<R> {
        self.target
    }

    fn process(&mut self) {
        if self.target.is_empty() {
            return
        }

        self.eliminate_forward();
        self.eliminate_backward();
        self.snap_zeros();
    }

    // Establishes pivots top-to-bottom, left-to-right, clearing below each.
    fn eliminate_forward(&mut self) {
        let (m, n) = self.target.shape();
        let mut p = 0;

        for c in 0..n {
            if p >= m {
                break
            }

            let a = self.target[(p, c)];
            if a == R::zero() {
                // no pivot search below, the column is abandoned as-is
                continue
            }

            self.target.mul_row(p, &(R::one() / a));

            for i in p + 1..m {
                let f = self.target[(i, c)];
                if f != R::zero() {
                    self.target.add_row_to(p, i, &(-f));
                }
            }

            p += 1;
        }
    }

    // Clears entries above each pivot, bottom-to-top, right-to-left.
    // Any cell holding exact 1 is treated as a pivot here, not only the
    // ones established by the forward pass.
    fn eliminate_backward(&mut self) {
        let (m, n) = self.target.shape();

        for r in (0..m).rev() {
            for c in (0..n).rev() {
                if self.target[(r, c)] != R::one() {
                    continue
                }
                for i in (0..r).rev() {
                    let f = self.target[(i, c)];
                    if f != R::zero() {
                        self.target.add_row_to(r, i, &(-f));
                    }
                }
            }
        }
    }

    fn snap_zeros(&mut self) {
        let (m, n) = self.target.shape();

        for i in 0..m {
            for j in 0..n {
                if self.target[(i, j)].abs() < self.tol {
                    self.target[(i, j)] = R::zero();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_2x2() {
        let a = Mat::from_data((2, 2), [2.0, 4.0, 1.0, 3.0]);
        let e = rref(&a, DEFAULT_TOLERANCE);
        assert_eq!(e, Mat::from_data((2, 2), [1.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn no_row_interchange() {
        // the zero in the expected pivot position (0, 0) is not searched
        // past, so the 1 below it is never promoted.
        let a = Mat::from_data((2, 2), [0.0, 1.0, 1.0, 0.0]);
        let e = rref(&a, DEFAULT_TOLERANCE);
        assert_eq!(e, Mat::from_data((2, 2), [0.0, 1.0, 1.0, 0.0]));
    }

    #[test]
    fn id_unchanged() {
        for n in 1..=10 {
            let a: Mat<f64> = Mat::id(n);
            let e = rref(&a, DEFAULT_TOLERANCE);
            assert!(e.is_id());
        }
    }

    #[test]
    fn idempotent() {
        let a = Mat::from_data((3, 4), [
            1.0, 2.0, 0.0, 3.0,
            2.0, 4.0, 1.0, 7.0,
            0.0, 0.0, 2.0, 2.0
        ]);
        let e1 = rref(&a, DEFAULT_TOLERANCE);
        let e2 = rref(&e1, DEFAULT_TOLERANCE);
        assert_eq!(e1, e2);
    }

    #[test]
    fn zero_row_stays_zero() {
        let a = Mat::from_data((3, 3), [
            1.0, 2.0, 3.0,
            0.0, 0.0, 0.0,
            0.0, 1.0, 1.0
        ]);
        let e = rref(&a, DEFAULT_TOLERANCE);
        assert!((0..3).all(|j| e[(1, j)] == 0.0));
    }

    #[test]
    fn rect_3x4() {
        let a = Mat::from_data((3, 4), [
            1.0, 2.0, -1.0, 3.0,
            2.0, 5.0, 1.0, 4.0,
            3.0, 7.0, 2.0, 5.0
        ]);
        let e = rref(&a, DEFAULT_TOLERANCE);

        // pivots at (0,0), (1,1), (2,2), each alone in its column
        for p in 0..3 {
            assert_eq!(e[(p, p)], 1.0);
            for i in 0..3 {
                if i != p {
                    assert_eq!(e[(i, p)], 0.0);
                }
            }
        }
    }

    #[test]
    fn backward_fires_on_any_one() {
        // (2, 1) is never established as a pivot by the forward pass, yet
        // its exact 1 still clears the entries above it.
        let a = Mat::from_data((3, 2), [
            2.0, 6.0,
            0.0, 0.0,
            0.0, 1.0
        ]);
        let e = rref(&a, DEFAULT_TOLERANCE);
        assert_eq!(e, Mat::from_data((3, 2), [
            1.0, 0.0,
            0.0, 0.0,
            0.0, 1.0
        ]));
    }

    #[test]
    fn snap_below_tolerance() {
        let a = Mat::from_data((1, 2), [1.0, 0.001]);
        let e = rref(&a, 0.01);
        assert_eq!(e, Mat::from_data((1, 2), [1.0, 0.0]));

        let a = Mat::from_data((1, 2), [1.0, 0.1]);
        let e = rref(&a, 0.01);
        assert_eq!(e, Mat::from_data((1, 2), [1.0, 0.1]));
    }

    #[test]
    fn negative_tolerance_never_snaps() {
        let a = Mat::from_data((1, 2), [1.0, 1e-300]);
        let e = rref(&a, -1.0);
        assert_eq!(e[(0, 1)], 1e-300);
    }

    #[test]
    fn empty_shapes() {
        let a: Mat<f64> = Mat::zero((0, 0));
        assert_eq!(rref(&a, DEFAULT_TOLERANCE), a);

        let a: Mat<f64> = Mat::zero((0, 3));
        assert_eq!(rref(&a, DEFAULT_TOLERANCE), a);

        let a = Mat::from_data((3, 0), std::iter::empty::<f64>());
        assert_eq!(rref(&a, DEFAULT_TOLERANCE), a);
    }

    #[test]
    fn in_place_matches() {
        let a = Mat::from_data((2, 3), [
            0.0, 2.0, 4.0,
            1.0, 1.0, 1.0
        ]);
        assert_eq!(rref_in_place(a.clone(), DEFAULT_TOLERANCE), rref(&a, DEFAULT_TOLERANCE));
    }
}
