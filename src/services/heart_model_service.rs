use ndarray::Array1;
use serde::Deserialize;
use std::path::Path;

use crate::error::AppError;
use crate::models::{HeartCondition, HeartFeatures, FEATURE_NAMES};

/// Exported decision-tree ensemble as written by the training pipeline.
#[derive(Debug, Deserialize)]
struct ModelArtifact {
    #[serde(default)]
    version: Option<String>,
    n_features: usize,
    n_classes: usize,
    trees: Vec<DecisionTree>,
}

#[derive(Debug, Deserialize)]
struct DecisionTree {
    nodes: Vec<TreeNode>,
}

/// Nodes are stored flat, children always after their parent.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: Vec<f64>,
    },
}

/// Pre-trained heart disease classifier, read-only once loaded.
#[derive(Debug)]
pub struct HeartModelService {
    version: String,
    trees: Vec<DecisionTree>,
}

impl HeartModelService {
    /// Load and validate the model artifact at `path`.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AppError::Model(format!("cannot read {}: {}", path.display(), e)))?;
        let model = Self::from_json(&raw)?;
        tracing::info!(
            path = %path.display(),
            version = %model.version,
            trees = model.trees.len(),
            "Loaded heart disease model"
        );
        Ok(model)
    }

    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        let artifact: ModelArtifact = serde_json::from_str(raw)
            .map_err(|e| AppError::Model(format!("malformed model artifact: {}", e)))?;

        if artifact.n_features != FEATURE_NAMES.len() {
            return Err(AppError::Model(format!(
                "expected {} features, artifact declares {}",
                FEATURE_NAMES.len(),
                artifact.n_features
            )));
        }
        if artifact.n_classes != HeartCondition::ALL.len() {
            return Err(AppError::Model(format!(
                "expected {} classes, artifact declares {}",
                HeartCondition::ALL.len(),
                artifact.n_classes
            )));
        }
        if artifact.trees.is_empty() {
            return Err(AppError::Model("artifact contains no trees".to_string()));
        }
        for (index, tree) in artifact.trees.iter().enumerate() {
            validate_tree(tree, artifact.n_features, artifact.n_classes)
                .map_err(|msg| AppError::Model(format!("tree {}: {}", index, msg)))?;
        }

        Ok(Self {
            version: artifact.version.unwrap_or_else(|| "unversioned".to_string()),
            trees: artifact.trees,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Mean class probabilities across all trees.
    pub fn predict_proba(&self, features: &HeartFeatures) -> Array1<f64> {
        let x = features.to_array();
        let mut total = Array1::<f64>::zeros(HeartCondition::ALL.len());
        for tree in &self.trees {
            let leaf = tree.leaf_for(&x);
            let sum: f64 = leaf.iter().sum();
            total += &(Array1::from(leaf.to_vec()) / sum);
        }
        total / self.trees.len() as f64
    }

    /// Most probable condition. Ties go to the lowest class id.
    pub fn predict(&self, features: &HeartFeatures) -> HeartCondition {
        let proba = self.predict_proba(features);
        let mut best = 0;
        for (class_id, p) in proba.iter().enumerate() {
            if *p > proba[best] {
                best = class_id;
            }
        }
        // n_classes is checked against the label set at load time
        HeartCondition::from_class_id(best).unwrap_or(HeartCondition::GeneralHeartDisease)
    }
}

impl DecisionTree {
    fn leaf_for(&self, x: &Array1<f64>) -> &[f64] {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if x[*feature] <= *threshold { *left } else { *right };
                }
                TreeNode::Leaf { value } => return value,
            }
        }
    }
}

fn validate_tree(tree: &DecisionTree, n_features: usize, n_classes: usize) -> Result<(), String> {
    if tree.nodes.is_empty() {
        return Err("no nodes".to_string());
    }
    for (index, node) in tree.nodes.iter().enumerate() {
        match node {
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if *feature >= n_features {
                    return Err(format!("node {} splits on unknown feature {}", index, feature));
                }
                if !threshold.is_finite() {
                    return Err(format!("node {} has a non-finite threshold", index));
                }
                for child in [left, right] {
                    if *child <= index || *child >= tree.nodes.len() {
                        return Err(format!("node {} has invalid child {}", index, child));
                    }
                }
            }
            TreeNode::Leaf { value } => {
                if value.len() != n_classes {
                    return Err(format!(
                        "leaf {} has {} class weights, expected {}",
                        index,
                        value.len(),
                        n_classes
                    ));
                }
                if value.iter().any(|w| !w.is_finite() || *w < 0.0) {
                    return Err(format!("leaf {} has a negative or non-finite weight", index));
                }
                if value.iter().sum::<f64>() <= 0.0 {
                    return Err(format!("leaf {} has no weight", index));
                }
            }
        }
    }
    Ok(())
}
