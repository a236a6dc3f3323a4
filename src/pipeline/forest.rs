//! Random forest classifier: bagged CART trees with weighted Gini splits.
//!
//! Trees are grown on bootstrap samples with a random subset of features
//! considered at every split (sqrt of the feature count). Sample weights
//! carry the class-imbalance correction, so the minority class is weighted
//! inversely to its frequency. All randomness flows from one master seed;
//! per-tree seeds are drawn sequentially before the trees are fitted in
//! parallel, which keeps the forest deterministic under rayon.

use ndarray::ArrayView2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Forest hyperparameters. Fixed per run; no search is performed.
#[derive(Debug, Clone)]
pub struct ForestConfig {
    pub n_trees: usize,
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 16,
            min_samples_split: 2,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        /// Weighted fraction of positive (churned) samples at this leaf.
        probability: f64,
    },
}

/// A single CART tree. Only ever constructed through [`RandomForest::fit`].
#[derive(Debug, Clone)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    fn fit(
        x: ArrayView2<'_, f64>,
        y: &[bool],
        weights: &[f64],
        sample: Vec<usize>,
        mtry: usize,
        config: &ForestConfig,
        rng: &mut StdRng,
    ) -> Self {
        let mut nodes = Vec::new();
        grow(&mut nodes, x, y, weights, sample, 0, mtry, config, rng);
        Self { nodes }
    }

    fn predict_proba(&self, row: &[f64]) -> f64 {
        let mut node = 0usize;
        loop {
            match &self.nodes[node] {
                Node::Leaf { probability } => return *probability,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

/// Grow a subtree over `sample` and return its root node index.
#[allow(clippy::too_many_arguments)]
fn grow(
    nodes: &mut Vec<Node>,
    x: ArrayView2<'_, f64>,
    y: &[bool],
    weights: &[f64],
    sample: Vec<usize>,
    depth: usize,
    mtry: usize,
    config: &ForestConfig,
    rng: &mut StdRng,
) -> usize {
    let (w_pos, w_total) = weighted_counts(y, weights, &sample);
    let probability = if w_total > 0.0 { w_pos / w_total } else { 0.0 };

    let is_pure = w_pos == 0.0 || w_pos == w_total;
    if is_pure || depth >= config.max_depth || sample.len() < config.min_samples_split {
        nodes.push(Node::Leaf { probability });
        return nodes.len() - 1;
    }

    let split = match best_split(x, y, weights, &sample, mtry, rng) {
        Some(split) => split,
        None => {
            nodes.push(Node::Leaf { probability });
            return nodes.len() - 1;
        }
    };

    let (left_sample, right_sample): (Vec<usize>, Vec<usize>) = sample
        .into_iter()
        .partition(|&row| x[[row, split.feature]] <= split.threshold);

    // Reserve the split slot before growing children so child indices are known.
    nodes.push(Node::Leaf { probability });
    let this = nodes.len() - 1;
    let left = grow(
        nodes,
        x,
        y,
        weights,
        left_sample,
        depth + 1,
        mtry,
        config,
        rng,
    );
    let right = grow(
        nodes,
        x,
        y,
        weights,
        right_sample,
        depth + 1,
        mtry,
        config,
        rng,
    );
    nodes[this] = Node::Split {
        feature: split.feature,
        threshold: split.threshold,
        left,
        right,
    };
    this
}

struct Split {
    feature: usize,
    threshold: f64,
}

/// Exhaustive threshold search over a random feature subset, minimizing
/// the weighted Gini impurity of the children.
fn best_split(
    x: ArrayView2<'_, f64>,
    y: &[bool],
    weights: &[f64],
    sample: &[usize],
    mtry: usize,
    rng: &mut StdRng,
) -> Option<Split> {
    let n_features = x.ncols();
    let features = rand::seq::index::sample(rng, n_features, mtry.min(n_features));

    let (w_pos, w_total) = weighted_counts(y, weights, sample);
    let parent_impurity = gini(w_pos, w_total);

    let mut best: Option<(f64, Split)> = None;
    let mut column: Vec<(f64, f64, bool)> = Vec::with_capacity(sample.len());

    for feature in features.iter() {
        column.clear();
        column.extend(
            sample
                .iter()
                .map(|&row| (x[[row, feature]], weights[row], y[row])),
        );
        column.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let mut left_pos = 0.0;
        let mut left_total = 0.0;
        for i in 0..column.len() - 1 {
            let (value, weight, label) = column[i];
            left_total += weight;
            if label {
                left_pos += weight;
            }

            let next_value = column[i + 1].0;
            if next_value <= value {
                continue;
            }

            let right_total = w_total - left_total;
            let right_pos = w_pos - left_pos;
            let child_impurity = (left_total * gini(left_pos, left_total)
                + right_total * gini(right_pos, right_total))
                / w_total;
            let gain = parent_impurity - child_impurity;

            if gain > 1e-12 && best.as_ref().map_or(true, |(g, _)| gain > *g) {
                best = Some((
                    gain,
                    Split {
                        feature,
                        threshold: (value + next_value) / 2.0,
                    },
                ));
            }
        }
    }

    best.map(|(_, split)| split)
}

fn weighted_counts(y: &[bool], weights: &[f64], sample: &[usize]) -> (f64, f64) {
    let mut w_pos = 0.0;
    let mut w_total = 0.0;
    for &row in sample {
        w_total += weights[row];
        if y[row] {
            w_pos += weights[row];
        }
    }
    (w_pos, w_total)
}

fn gini(w_pos: f64, w_total: f64) -> f64 {
    if w_total <= 0.0 {
        return 0.0;
    }
    let p = w_pos / w_total;
    1.0 - p * p - (1.0 - p) * (1.0 - p)
}

/// The fitted ensemble. Immutable after fitting; prediction averages the
/// per-tree leaf probabilities for the churned class.
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Fit the forest on a feature matrix, labels, and per-sample weights.
    pub fn fit(
        x: ArrayView2<'_, f64>,
        y: &[bool],
        weights: &[f64],
        config: &ForestConfig,
    ) -> Self {
        let n_rows = x.nrows();
        let mtry = ((x.ncols() as f64).sqrt().round() as usize).max(1);

        // Per-tree seeds drawn sequentially so parallel fitting stays
        // deterministic regardless of thread scheduling.
        let mut master = StdRng::seed_from_u64(config.seed);
        let seeds: Vec<u64> = (0..config.n_trees).map(|_| master.gen()).collect();

        let trees = seeds
            .par_iter()
            .map(|&seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                let sample: Vec<usize> =
                    (0..n_rows).map(|_| rng.gen_range(0..n_rows)).collect();
                DecisionTree::fit(x, y, weights, sample, mtry, config, &mut rng)
            })
            .collect();

        Self { trees }
    }

    /// Probability of the positive (churned) class for one feature row,
    /// in [0, 1].
    pub fn predict_proba(&self, row: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.trees.iter().map(|t| t.predict_proba(row)).sum();
        sum / self.trees.len() as f64
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}
