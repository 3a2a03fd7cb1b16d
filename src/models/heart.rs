//! Patient feature vector and the label set produced by the classifier.

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::validation::{parse_float, parse_int, ValidationError};

/// Feature names in the column order the classifier was trained on.
pub const FEATURE_NAMES: [&str; 13] = [
    "age", "sex", "cp", "trestbps", "chol", "fbs", "restecg", "thalach", "exang", "oldpeak",
    "slope", "ca", "thal",
];

/// Clinical measurements for one patient.
///
/// Categorical codes are integers, measured quantities are floats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeartFeatures {
    /// Age in years
    pub age: i64,
    /// 1 = male, 0 = female
    pub sex: i64,
    /// Chest pain type (0-3)
    pub cp: i64,
    /// Resting blood pressure in mmHg
    pub trestbps: f64,
    /// Serum cholesterol in mg/dL
    pub chol: f64,
    /// Fasting blood sugar > 120 mg/dL
    pub fbs: i64,
    /// Resting electrocardiographic result (0-2)
    pub restecg: i64,
    /// Maximum heart rate achieved
    pub thalach: f64,
    /// Exercise-induced angina
    pub exang: i64,
    /// ST depression induced by exercise relative to rest
    pub oldpeak: f64,
    /// Slope of the peak exercise ST segment
    pub slope: i64,
    /// Number of major vessels colored by fluoroscopy
    pub ca: f64,
    /// Thalassemia code
    pub thal: i64,
}

impl HeartFeatures {
    /// Coerce raw form values into a feature vector.
    pub fn from_form(input: &HashMap<String, String>) -> Result<Self, ValidationError> {
        Ok(Self {
            age: parse_int(input, "age")?,
            sex: parse_int(input, "sex")?,
            cp: parse_int(input, "cp")?,
            trestbps: parse_float(input, "trestbps")?,
            chol: parse_float(input, "chol")?,
            fbs: parse_int(input, "fbs")?,
            restecg: parse_int(input, "restecg")?,
            thalach: parse_float(input, "thalach")?,
            exang: parse_int(input, "exang")?,
            oldpeak: parse_float(input, "oldpeak")?,
            slope: parse_int(input, "slope")?,
            ca: parse_float(input, "ca")?,
            thal: parse_int(input, "thal")?,
        })
    }

    /// Values in [`FEATURE_NAMES`] order.
    pub fn to_array(&self) -> Array1<f64> {
        Array1::from(vec![
            self.age as f64,
            self.sex as f64,
            self.cp as f64,
            self.trestbps,
            self.chol,
            self.fbs as f64,
            self.restecg as f64,
            self.thalach,
            self.exang as f64,
            self.oldpeak,
            self.slope as f64,
            self.ca,
            self.thal as f64,
        ])
    }

    /// Name/value pairs in [`FEATURE_NAMES`] order, formatted for a query string.
    pub fn named_values(&self) -> Vec<(&'static str, String)> {
        vec![
            ("age", self.age.to_string()),
            ("sex", self.sex.to_string()),
            ("cp", self.cp.to_string()),
            ("trestbps", self.trestbps.to_string()),
            ("chol", self.chol.to_string()),
            ("fbs", self.fbs.to_string()),
            ("restecg", self.restecg.to_string()),
            ("thalach", self.thalach.to_string()),
            ("exang", self.exang.to_string()),
            ("oldpeak", self.oldpeak.to_string()),
            ("slope", self.slope.to_string()),
            ("ca", self.ca.to_string()),
            ("thal", self.thal.to_string()),
        ]
    }
}

/// Heart disease categories, indexed by the classifier's class id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeartCondition {
    #[serde(rename = "No Disease")]
    NoDisease,
    #[serde(rename = "Angina")]
    Angina,
    #[serde(rename = "Arrhythmia")]
    Arrhythmia,
    #[serde(rename = "Heart Failure")]
    HeartFailure,
    #[serde(rename = "Myocardial Infarction")]
    MyocardialInfarction,
    #[serde(rename = "General Heart Disease")]
    GeneralHeartDisease,
}

impl HeartCondition {
    pub const ALL: [HeartCondition; 6] = [
        HeartCondition::NoDisease,
        HeartCondition::Angina,
        HeartCondition::Arrhythmia,
        HeartCondition::HeartFailure,
        HeartCondition::MyocardialInfarction,
        HeartCondition::GeneralHeartDisease,
    ];

    pub fn from_class_id(id: usize) -> Option<Self> {
        Self::ALL.get(id).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            HeartCondition::NoDisease => "No Disease",
            HeartCondition::Angina => "Angina",
            HeartCondition::Arrhythmia => "Arrhythmia",
            HeartCondition::HeartFailure => "Heart Failure",
            HeartCondition::MyocardialInfarction => "Myocardial Infarction",
            HeartCondition::GeneralHeartDisease => "General Heart Disease",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.label() == label)
    }
}

impl fmt::Display for HeartCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
