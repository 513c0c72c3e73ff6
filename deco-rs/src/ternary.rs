use anyhow::{bail, Error};
use ndarray::prelude::*;

/// Corner coordinates of the unit triangle, one row per collapsed label in
/// sorted label order.
pub fn corners() -> Array2<f64> {
    array![[0., 0.], [1., 0.], [0.5, 0.75f64.sqrt()]]
}

/// Place a three-way proportion vector in the triangle: `cornersᵀ · p`.
pub fn project(proportions: ArrayView1<f64>) -> Result<Array1<f64>, Error> {
    if proportions.len() != 3 {
        bail!("ternary projection needs 3 proportions, got {}", proportions.len());
    }
    Ok(corners().t().dot(&proportions))
}

#[cfg(test)]
mod test_ternary {
    use super::*;

    #[test]
    fn test_corners_map_to_themselves() {
        let c = corners();
        for (i, corner) in c.axis_iter(Axis(0)).enumerate() {
            let mut p = Array1::zeros(3);
            p[i] = 1.0;
            let projected = project(p.view()).unwrap();
            assert!(projected.abs_diff_eq(&corner.to_owned(), 1e-12));
        }
    }

    #[test]
    fn test_centroid() {
        let p = array![1. / 3., 1. / 3., 1. / 3.];
        let projected = project(p.view()).unwrap();
        assert!(projected.abs_diff_eq(&array![0.5, 0.75f64.sqrt() / 3.], 1e-12));
    }

    #[test]
    fn test_partial_weight_shrinks_toward_origin() {
        // Weights need not sum to 1; a half-weight vector lands halfway.
        let full = project(array![0., 1., 0.].view()).unwrap();
        let half = project(array![0., 0.5, 0.].view()).unwrap();
        assert!(half.abs_diff_eq(&(0.5 * &full), 1e-12));
    }

    #[test]
    fn test_wrong_arity() {
        assert!(project(array![0.5, 0.5].view()).is_err());
        assert!(project(array![0.25, 0.25, 0.25, 0.25].view()).is_err());
    }
}
