//! Bootstrap-aggregated ensemble of regression trees.

use crate::forecast::features::FeatureVector;
use crate::forecast::tree::{RegressionTree, TreeParams};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct RandomForestRegressor {
    trees: Vec<RegressionTree>,
}

impl RandomForestRegressor {
    /// Fits `n_trees` trees, each on its own bootstrap sample of the rows.
    ///
    /// Every tree draws its sample from an RNG seeded with `seed` and the tree's index, so
    /// the ensemble is identical across runs no matter how rayon schedules the trees.
    pub fn fit(
        features: &[FeatureVector],
        targets: &[f64],
        n_trees: usize,
        params: TreeParams,
        seed: u64,
    ) -> Self {
        let n = features.len();
        let trees = (0..n_trees)
            .into_par_iter()
            .map(|tree_index| {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(tree_index as u64));
                let rows: Vec<usize> = (0..n).map(|_| rng.random_range(0..n)).collect();
                RegressionTree::fit(features, targets, &rows, params)
            })
            .collect();
        Self { trees }
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Mean prediction over all trees.
    pub fn predict(&self, row: &FeatureVector) -> f64 {
        let total: f64 = self.trees.iter().map(|tree| tree.predict(row)).sum();
        total / self.trees.len() as f64
    }

    pub fn predict_all(&self, rows: &[FeatureVector]) -> Vec<f64> {
        rows.par_iter().map(|row| self.predict(row)).collect()
    }
}
