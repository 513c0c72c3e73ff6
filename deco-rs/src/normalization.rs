use crate::panel::ReferencePanel;
use log::warn;
use ndarray::prelude::*;

/// Scale each column of `matrix` to sum 1. Columns with a zero total are left
/// untouched rather than turned into NaN.
pub fn normalize_columns(matrix: &mut Array2<f64>) {
    let mut zeros = 0;
    for mut column in matrix.axis_iter_mut(Axis(1)) {
        let total = column.sum();
        if total > 0.0 {
            column.mapv_inplace(|v| v / total);
        } else {
            zeros += 1;
        }
    }
    if zeros > 0 {
        warn!("{} columns had zero total and were left unnormalized", zeros);
    }
}

/// Scale a single bulk sample to sum 1. A zero sample is left untouched.
pub fn normalize_sample(sample: &mut Array1<f64>) {
    let total = sample.sum();
    if total > 0.0 {
        sample.mapv_inplace(|v| v / total);
    } else {
        warn!("sample with zero total left unnormalized");
    }
}

/// Normalize every profile of a panel to sum 1.
pub fn normalize_panel(panel: &mut ReferencePanel) {
    normalize_columns(&mut panel.matrix);
}

#[cfg(test)]
mod test_normalization {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_columns_sum_to_one() {
        // mat = np.array([[1., 3., 0.], [1., 1., 0.], [2., 0., 0.]])
        // mat / mat.sum(axis=0)
        // array([[0.25, 0.75, nan], ...]) -- the zero column stays zero here
        let mut matrix = array![[1., 3., 0.], [1., 1., 0.], [2., 0., 0.]];
        normalize_columns(&mut matrix);
        let expected = array![[0.25, 0.75, 0.], [0.25, 0.25, 0.], [0.5, 0., 0.]];
        assert!(matrix.abs_diff_eq(&expected, 1e-12));
        assert_approx_eq!(matrix.column(0).sum(), 1.0);
        assert_approx_eq!(matrix.column(1).sum(), 1.0);
        assert_eq!(matrix.column(2).sum(), 0.0);
    }

    #[test]
    fn test_sample_sums_to_one() {
        let mut sample = array![2., 6., 2.];
        normalize_sample(&mut sample);
        assert!(sample.abs_diff_eq(&array![0.2, 0.6, 0.2], 1e-12));

        let mut zero = array![0., 0.];
        normalize_sample(&mut zero);
        assert_eq!(zero, array![0., 0.]);
    }
}
