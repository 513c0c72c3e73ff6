use crate::panel::ReferencePanel;
use crate::stats::quantile_mut;
use anyhow::Error;
use ndarray::prelude::*;

/// Quantile above which similarities are discarded by default.
pub const TRIM_QUANTILE: f64 = 0.95;

/// Cosine similarity of two expression vectors. Zero if either vector is
/// all-zero.
pub fn cosine(x: ArrayView1<f64>, y: ArrayView1<f64>) -> f64 {
    let (s_xx, s_yy, s_xy) = x.iter().zip(y).fold((0., 0., 0.), |acc, (&x, &y)| {
        (acc.0 + x * x, acc.1 + y * y, acc.2 + x * y)
    });
    if s_xx == 0.0 || s_yy == 0.0 {
        0.0
    } else {
        s_xy / (s_xx * s_yy).sqrt()
    }
}

/// Similarity of one cell against every column of `panel`, in column order.
pub fn similarity_profile(cell: ArrayView1<f64>, panel: &ReferencePanel) -> Array1<f64> {
    panel
        .matrix
        .axis_iter(Axis(1))
        .map(|column| cosine(cell, column))
        .collect()
}

/// Mean of a similarity profile before any trimming.
pub fn mean_similarity(profile: ArrayView1<f64>) -> f64 {
    if profile.is_empty() {
        0.0
    } else {
        profile.sum() / profile.len() as f64
    }
}

/// Drop the similarities above the `q`-quantile of `profile`, keeping the
/// rest in their original order.
pub fn trimmed(profile: ArrayView1<f64>, q: f64) -> Result<Array1<f64>, Error> {
    let mut sorted = profile.to_owned();
    let cutoff = quantile_mut(&mut sorted, q)?;
    Ok(profile.iter().copied().filter(|&v| v <= cutoff).collect())
}

#[cfg(test)]
mod test_similarity {
    use super::*;

    #[test]
    fn test_cosine_boundaries() {
        assert_eq!(cosine(array![3., 4.].view(), array![3., 4.].view()), 1.0);
        assert_eq!(cosine(array![3., 4.].view(), array![-4., 3.].view()), 0.0);
        assert_eq!(cosine(array![3., 4.].view(), array![-3., -4.].view()), -1.0);
        assert_eq!(cosine(array![1., 0.].view(), array![0., 0.].view()), 0.0);
    }

    #[test]
    fn test_cosine_scale_invariance() {
        let x = array![0.2, 0.5, 0.3];
        let y = array![2., 5., 3.];
        assert!((cosine(x.view(), y.view()) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_similarity_profile() {
        let panel = ReferencePanel::new(
            vec!["g0".into(), "g1".into()],
            vec!["a".into(), "b".into(), "c".into()],
            array![[1., 0., 1.], [0., 1., 1.]],
        )
        .unwrap();
        let profile = similarity_profile(array![1., 0.].view(), &panel);
        assert!((profile[0] - 1.0).abs() < 1e-12);
        assert!((profile[1] - 0.0).abs() < 1e-12);
        assert!((profile[2] - 0.5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_trim_drops_top_of_profile() {
        // 21 values 0.0, 0.05, .., 1.0: the 0.95 quantile is exactly 0.95,
        // so only the 1.0 entry goes.
        let profile: Array1<f64> = (0..21).map(|i| i as f64 * 0.05).collect();
        let kept = trimmed(profile.view(), TRIM_QUANTILE).unwrap();
        assert_eq!(kept.len(), 20);
        assert!(kept.iter().all(|&v| v <= 0.95));

        // The mean is taken before removal.
        assert!((mean_similarity(profile.view()) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_trim_keeps_order() {
        let profile = array![0.9, 0.1, 0.8, 0.2, 1.0];
        let kept = trimmed(profile.view(), 0.5).unwrap();
        assert_eq!(kept, array![0.1, 0.8, 0.2]);
    }

    #[test]
    fn test_mean_of_empty_profile() {
        let profile = Array1::<f64>::zeros(0);
        assert_eq!(mean_similarity(profile.view()), 0.0);
    }
}
