//! A CART regression tree with squared-error splits.

use crate::forecast::features::{FeatureVector, FEATURE_COUNT};
use ordered_float::OrderedFloat;

/// Minimum reduction in summed squared error for a split to be worth keeping.
const MIN_IMPURITY_DECREASE: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeParams {
    pub max_depth: usize,
    pub min_samples_split: usize,
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf(f64),
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    /// Fits a tree on the rows of `features`/`targets` selected by `rows`.
    ///
    /// `rows` may contain repeated indices (bootstrap samples) and must be non-empty.
    pub fn fit(
        features: &[FeatureVector],
        targets: &[f64],
        rows: &[usize],
        params: TreeParams,
    ) -> Self {
        let mut tree = RegressionTree { nodes: Vec::new() };
        tree.grow(features, targets, rows.to_vec(), 0, params);
        tree
    }

    pub fn predict(&self, row: &FeatureVector) -> f64 {
        let mut index = 0;
        loop {
            match self.nodes[index] {
                Node::Leaf(value) => return value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if row.get(feature) <= threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }

    #[cfg(test)]
    fn depth(&self) -> usize {
        self.node_depth(0)
    }

    #[cfg(test)]
    fn node_depth(&self, index: usize) -> usize {
        match self.nodes[index] {
            Node::Leaf(_) => 0,
            Node::Split { left, right, .. } => {
                1 + self.node_depth(left).max(self.node_depth(right))
            }
        }
    }

    /// Appends the subtree for `rows` and returns its node index.
    fn grow(
        &mut self,
        features: &[FeatureVector],
        targets: &[f64],
        rows: Vec<usize>,
        depth: usize,
        params: TreeParams,
    ) -> usize {
        let index = self.nodes.len();
        let n = rows.len() as f64;
        let sum: f64 = rows.iter().map(|&r| targets[r]).sum();
        let sum_sq: f64 = rows.iter().map(|&r| targets[r].powi(2)).sum();
        let mean = sum / n;
        self.nodes.push(Node::Leaf(mean));

        if depth >= params.max_depth || rows.len() < params.min_samples_split.max(2) {
            return index;
        }
        let parent_impurity = sum_sq - sum * sum / n;
        let Some(best) = best_split(features, targets, &rows, sum, sum_sq) else {
            return index;
        };
        if parent_impurity - best.impurity <= MIN_IMPURITY_DECREASE {
            return index;
        }

        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
            .into_iter()
            .partition(|&r| features[r].get(best.feature) <= best.threshold);
        let left = self.grow(features, targets, left_rows, depth + 1, params);
        let right = self.grow(features, targets, right_rows, depth + 1, params);
        self.nodes[index] = Node::Split {
            feature: best.feature,
            threshold: best.threshold,
            left,
            right,
        };
        index
    }
}

/// Finds the split with the lowest summed squared error over all features.
fn best_split(
    features: &[FeatureVector],
    targets: &[f64],
    rows: &[usize],
    sum: f64,
    sum_sq: f64,
) -> Option<BestSplit> {
    let n = rows.len();
    let mut best: Option<BestSplit> = None;
    let mut ordered = rows.to_vec();

    for feature in 0..FEATURE_COUNT {
        ordered.sort_by_key(|&r| OrderedFloat(features[r].get(feature)));

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        for i in 0..n - 1 {
            let y = targets[ordered[i]];
            left_sum += y;
            left_sq += y * y;

            let here = features[ordered[i]].get(feature);
            let next = features[ordered[i + 1]].get(feature);
            if here == next {
                continue;
            }

            let left_n = (i + 1) as f64;
            let right_n = (n - i - 1) as f64;
            let right_sum = sum - left_sum;
            let right_sq = sum_sq - left_sq;
            let impurity = (left_sq - left_sum * left_sum / left_n)
                + (right_sq - right_sum * right_sum / right_n);

            if best.as_ref().map_or(true, |b| impurity < b.impurity) {
                // Between adjacent floats the midpoint can round up to `next`.
                let midpoint = here + (next - here) / 2.0;
                let threshold = if midpoint < next { midpoint } else { here };
                best = Some(BestSplit {
                    feature,
                    threshold,
                    impurity,
                });
            }
        }
    }

    best
}
