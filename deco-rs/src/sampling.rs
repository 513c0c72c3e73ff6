use crate::panel::ReferencePanel;
use anyhow::{bail, Error};
use rand::seq::index;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// Iterator of column sub-samples of a reference panel.
///
/// Each draw selects `round(frac · n)` distinct columns, kept in panel order.
/// A fraction of exactly 1 yields the full panel once and stops. The
/// generator is seeded once per run, so a fixed seed reproduces the whole
/// draw sequence.
pub struct SubsampleIter<'a> {
    panel: &'a ReferencePanel,
    frac: f64,
    remaining: usize,
    rng: Pcg64Mcg,
}

/// Sub-sample `frac` of the columns of `panel`, `repeats` times, from a
/// generator seeded with `seed`.
pub fn subsamples(
    panel: &ReferencePanel,
    frac: f64,
    repeats: usize,
    seed: u64,
) -> Result<SubsampleIter<'_>, Error> {
    if !(frac > 0.0 && frac <= 1.0) {
        bail!("sampling fraction must be in (0, 1], got {}", frac);
    }
    Ok(SubsampleIter {
        panel,
        frac,
        remaining: if frac == 1.0 { 1 } else { repeats },
        rng: Pcg64Mcg::seed_from_u64(seed),
    })
}

impl Iterator for SubsampleIter<'_> {
    type Item = ReferencePanel;

    fn next(&mut self) -> Option<ReferencePanel> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        if self.frac == 1.0 {
            return Some(self.panel.clone());
        }
        let n = self.panel.n_profiles();
        let amount = ((self.frac * n as f64).round() as usize).max(1).min(n);
        let mut indices = index::sample(&mut self.rng, n, amount).into_vec();
        indices.sort_unstable();
        Some(self.panel.select_profiles(&indices))
    }
}
