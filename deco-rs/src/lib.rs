//! # deco-rs: Bulk RNA-seq deconvolution in Rust
//!
//! Decomposes bulk expression samples into cell-type proportions by
//! repeatedly sub-sampling a single-cell reference panel and fitting each
//! draw with non-negative least squares. Plotting and dataset access stay
//! outside this crate; everything here works on in-memory matrices.

#![deny(missing_docs)]
#![deny(warnings)]

#[allow(unused_extern_crates)]
extern crate blas_src;

/// Repeated-sampling NNLS deconvolution
pub mod deconv;

/// Per-sample normalization
pub mod normalization;

/// Labeled single-cell reference panels
pub mod panel;

/// Seeded sub-sampling of reference panels
pub mod sampling;

/// Cross-dataset cell similarity
pub mod similarity;

/// Statistics helpers
pub mod stats;

/// Ternary coordinates for three-way proportions
pub mod ternary;
