use crate::panel::ReferencePanel;
use crate::sampling::subsamples;
use anyhow::{bail, Error};
use log::{debug, info};
use ndarray::prelude::*;
use nnls::nnls;

/// Quality filter applied to each fitted proportion vector.
///
/// A draw is kept when the explained fraction `sum(x)` is above
/// `min_explained` and no single profile dominates the fit,
/// `max(x) < max_mode`. Defaults: 0.5 and 0.9.
#[derive(Clone, Copy, Debug)]
pub struct Qc {
    /// Lower bound (exclusive) on the explained fraction `sum(x)`
    pub min_explained: f64,
    /// Upper bound (exclusive) on the mode `max(x)`
    pub max_mode: f64,
}

impl Default for Qc {
    fn default() -> Qc {
        Qc {
            min_explained: 0.5,
            max_mode: 0.9,
        }
    }
}

impl Qc {
    /// Accept or reject a proportion vector.
    pub fn accept(&self, proportions: ArrayView1<f64>) -> bool {
        let explained = proportions.sum();
        let mode = proportions.fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));
        explained > self.min_explained && mode < self.max_mode
    }
}

/// One accepted deconvolution draw: the sampled cell-type labels and the
/// fitted non-negative weight of each sampled column. Weights need not sum
/// to 1.
#[derive(Clone, Debug)]
pub struct Deconvolution {
    /// Cell-type label of each sampled column
    pub cell_types: Vec<String>,
    /// Fitted weight of each sampled column, elementwise `>= 0`
    pub proportions: Array1<f64>,
}

/// Fit `bulk` against every panel in `draws` and keep the proportion vectors
/// accepted by `qc`.
///
/// The sequence is consumed eagerly; an empty result just means no draw
/// passed the filter, not a failure.
pub fn deconvolve<I, Q>(bulk: ArrayView1<f64>, draws: I, qc: Q) -> Result<Vec<Deconvolution>, Error>
where
    I: IntoIterator<Item = ReferencePanel>,
    Q: Fn(ArrayView1<f64>) -> bool,
{
    let mut accepted = Vec::new();
    let mut total = 0usize;
    for panel in draws {
        total += 1;
        if panel.n_genes() != bulk.len() {
            bail!(
                "panel draw has {} genes but the bulk sample has {}",
                panel.n_genes(),
                bulk.len()
            );
        }
        let fit = nnls(panel.matrix.view(), bulk)?;
        if qc(fit.x.view()) {
            debug!("draw {}: accepted, explained fraction {:.4}", total, fit.x.sum());
            accepted.push(Deconvolution {
                cell_types: panel.cell_types,
                proportions: fit.x,
            });
        } else {
            debug!("draw {}: rejected, explained fraction {:.4}", total, fit.x.sum());
        }
    }
    info!("accepted {} of {} deconvolution draws", accepted.len(), total);
    Ok(accepted)
}

/// Repeated-sampling deconvolution of one bulk sample: sub-sample `frac` of
/// the panel columns `repeats` times from a generator seeded with `seed`,
/// NNLS-fit each draw against `bulk` and filter with `qc`.
pub fn deconvolve_repeated(
    bulk: ArrayView1<f64>,
    panel: &ReferencePanel,
    frac: f64,
    repeats: usize,
    seed: u64,
    qc: Qc,
) -> Result<Vec<Deconvolution>, Error> {
    let draws = subsamples(panel, frac, repeats, seed)?;
    deconvolve(bulk, draws, |x| qc.accept(x))
}
