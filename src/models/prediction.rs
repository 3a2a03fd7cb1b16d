use serde::{Deserialize, Serialize};

use super::heart::{HeartCondition, HeartFeatures};

/// Entry appended under `predictions/{uid}` for every authenticated prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub data: HeartFeatures,
    pub prediction: HeartCondition,
}

/// A stored record together with the key the database assigned to it.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredPrediction {
    pub id: String,
    pub record: PredictionRecord,
}
