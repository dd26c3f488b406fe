//! Regression tree ensembles (random forest / gradient boosted style).
//!
//! Each tree is stored as a flat node list with node `0` as the root. A split
//! sends a row left when `x[feature] <= threshold`; a NaN input fails the
//! comparison and goes right.

use serde::{Deserialize, Serialize};

use crate::{
    error::{ArtifactError, PredictError, Result},
    model::{ModelKind, ProfitModel, check_width},
};

/// Index of a node within its tree.
pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: NodeId,
        right: NodeId,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<TreeNode>,
}

impl RegressionTree {
    pub fn new(nodes: Vec<TreeNode>) -> Result<Self> {
        let tree = Self { nodes };
        tree.validate(0).map_err(ArtifactError::Validation)?;
        Ok(tree)
    }

    /// Walks from the root to a leaf.
    ///
    /// A path longer than the node count or a dangling index is reported
    /// instead of looping or panicking, so deserialized trees that skipped
    /// validation stay safe to score.
    pub fn predict_row(&self, row: &[f64]) -> std::result::Result<f64, PredictError> {
        let malformed = |node| PredictError::MalformedTree { node };
        let mut node = 0;
        for _ in 0..self.nodes.len() {
            match self.nodes.get(node).ok_or(malformed(node))? {
                TreeNode::Leaf { value } => return Ok(*value),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let x = row.get(*feature).ok_or(malformed(node))?;
                    node = if x <= threshold { *left } else { *right };
                }
            }
        }
        Err(malformed(node))
    }

    fn max_feature(&self) -> Option<usize> {
        self.nodes
            .iter()
            .filter_map(|node| match node {
                TreeNode::Split { feature, .. } => Some(*feature),
                TreeNode::Leaf { .. } => None,
            })
            .max()
    }

    /// Children must point forward so traversal always terminates.
    fn validate(&self, tree_idx: usize) -> std::result::Result<(), String> {
        if self.nodes.is_empty() {
            return Err(format!("tree {tree_idx} has no nodes"));
        }
        let n_nodes = self.nodes.len();
        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Leaf { value } if !value.is_finite() => {
                    return Err(format!("tree {tree_idx} node {idx}: leaf value is not finite"));
                }
                TreeNode::Leaf { .. } => {}
                TreeNode::Split {
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    if threshold.is_nan() {
                        return Err(format!("tree {tree_idx} node {idx}: threshold is NaN"));
                    }
                    for (side, child) in [("left", *left), ("right", *right)] {
                        if child <= idx || child >= n_nodes {
                            return Err(format!(
                                "tree {tree_idx} node {idx}: {side} child {child} out of bounds \
                                 (must be in {}..{n_nodes})",
                                idx + 1
                            ));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// How per-tree outputs combine into one prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Random-forest style averaging.
    #[default]
    Mean,
    /// Boosting style accumulation.
    Sum,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    trees: Vec<RegressionTree>,
    #[serde(default)]
    aggregation: Aggregation,
    #[serde(default)]
    base_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    n_features: Option<usize>,
}

impl TreeEnsemble {
    /// `n_features` defaults to one past the highest split feature when `None`.
    pub fn new(
        trees: Vec<RegressionTree>,
        aggregation: Aggregation,
        base_score: f64,
        n_features: Option<usize>,
    ) -> Result<Self> {
        let ensemble = Self {
            trees,
            aggregation,
            base_score,
            n_features,
        };
        ensemble.validate().map_err(ArtifactError::Validation)?;
        Ok(ensemble)
    }

    pub(crate) fn validate(&self) -> std::result::Result<(), String> {
        if self.trees.is_empty() {
            return Err("tree ensemble has no trees".to_string());
        }
        if !self.base_score.is_finite() {
            return Err("base_score is not finite".to_string());
        }
        for (idx, tree) in self.trees.iter().enumerate() {
            tree.validate(idx)?;
        }
        let used = self.trees.iter().filter_map(RegressionTree::max_feature).max();
        if let (Some(declared), Some(max_feature)) = (self.n_features, used) {
            if max_feature >= declared {
                return Err(format!(
                    "split on feature {max_feature} but n_features is {declared}"
                ));
            }
        }
        if self.n_features() == 0 {
            return Err("tree ensemble uses no features; set n_features".to_string());
        }
        Ok(())
    }

    fn predict_row(&self, row: &[f64]) -> std::result::Result<f64, PredictError> {
        let mut total = 0.0;
        for tree in &self.trees {
            total += tree.predict_row(row)?;
        }
        let combined = match self.aggregation {
            Aggregation::Mean => total / self.trees.len() as f64,
            Aggregation::Sum => total,
        };
        Ok(self.base_score + combined)
    }
}

impl ProfitModel for TreeEnsemble {
    fn kind(&self) -> ModelKind {
        ModelKind::TreeEnsemble
    }

    fn n_features(&self) -> usize {
        self.n_features.unwrap_or_else(|| {
            self.trees
                .iter()
                .filter_map(RegressionTree::max_feature)
                .max()
                .map_or(0, |max| max + 1)
        })
    }

    fn predict(&self, batch: &[&[f64]]) -> std::result::Result<Vec<f64>, PredictError> {
        let n_features = self.n_features();
        batch
            .iter()
            .map(|row| {
                check_width(self.kind(), n_features, row)?;
                self.predict_row(row)
            })
            .collect()
    }
}
