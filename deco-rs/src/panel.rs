use anyhow::{format_err, Error};
use ndarray::prelude::*;
use std::collections::BTreeMap;

/// Label taken by columns folded together by [`ReferencePanel::collapse_labels`].
pub const OTHERS: &str = "others";

/// Single-cell reference panel: a genes × profiles expression matrix with the
/// gene names and per-column cell-type labels carried alongside it.
#[derive(Clone, Debug)]
pub struct ReferencePanel {
    /// Gene names, one per row
    pub genes: Vec<String>,
    /// Cell-type label of each column
    pub cell_types: Vec<String>,
    /// Expression values, genes × profiles
    pub matrix: Array2<f64>,
}

impl ReferencePanel {
    /// Build a panel, checking that the names and the matrix agree in shape.
    pub fn new(
        genes: Vec<String>,
        cell_types: Vec<String>,
        matrix: Array2<f64>,
    ) -> Result<ReferencePanel, Error> {
        if genes.len() != matrix.nrows() {
            return Err(format_err!(
                "{} gene names for a matrix of {} rows",
                genes.len(),
                matrix.nrows()
            ));
        }
        if cell_types.len() != matrix.ncols() {
            return Err(format_err!(
                "{} cell-type labels for a matrix of {} columns",
                cell_types.len(),
                matrix.ncols()
            ));
        }
        Ok(ReferencePanel {
            genes,
            cell_types,
            matrix,
        })
    }

    /// Number of genes (rows).
    pub fn n_genes(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of profile columns.
    pub fn n_profiles(&self) -> usize {
        self.matrix.ncols()
    }

    /// Panel restricted to the columns in `indices`, in the given order.
    pub fn select_profiles(&self, indices: &[usize]) -> ReferencePanel {
        ReferencePanel {
            genes: self.genes.clone(),
            cell_types: indices.iter().map(|&i| self.cell_types[i].clone()).collect(),
            matrix: self.matrix.select(Axis(1), indices),
        }
    }

    /// Panel without the columns whose label appears in `unwanted`.
    pub fn drop_cell_types(&self, unwanted: &[&str]) -> ReferencePanel {
        let keep: Vec<usize> = self
            .cell_types
            .iter()
            .enumerate()
            .filter(|(_, label)| !unwanted.contains(&label.as_str()))
            .map(|(i, _)| i)
            .collect();
        self.select_profiles(&keep)
    }

    /// Relabel every column whose label is not in `keep` as [`OTHERS`].
    pub fn collapse_labels(&mut self, keep: &[&str]) {
        for label in &mut self.cell_types {
            if !keep.contains(&label.as_str()) {
                *label = OTHERS.to_string();
            }
        }
    }
}

/// Sum `weights` by label. Returns the distinct labels in sorted order and
/// the summed weight of each.
pub fn group_sum(
    labels: &[String],
    weights: ArrayView1<f64>,
) -> Result<(Vec<String>, Array1<f64>), Error> {
    if labels.len() != weights.len() {
        return Err(format_err!(
            "{} labels for {} weights",
            labels.len(),
            weights.len()
        ));
    }
    let mut sums = BTreeMap::new();
    for (label, &w) in labels.iter().zip(weights) {
        *sums.entry(label.clone()).or_insert(0.0) += w;
    }
    let (labels, weights): (Vec<_>, Vec<_>) = sums.into_iter().unzip();
    Ok((labels, Array1::from(weights)))
}
