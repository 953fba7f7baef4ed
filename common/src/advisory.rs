//! 病害アドバイス表モジュール
//!
//! 予測ラベル → 症状・対処法の静的な対応表。
//! 作物ごとの組み込みプリセットと、JSONによる差し替えに対応する。

use crate::error::{Error, Result};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// 症状と対処法
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    pub symptoms: String,
    pub treatment: String,
}

impl Advisory {
    pub fn new(symptoms: impl Into<String>, treatment: impl Into<String>) -> Self {
        Self {
            symptoms: symptoms.into(),
            treatment: treatment.into(),
        }
    }
}

/// 組み込みプリセットの作物
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Crop {
    #[default]
    Tomato,
    Apple,
}

impl Crop {
    pub fn as_str(&self) -> &'static str {
        match self {
            Crop::Tomato => "tomato",
            Crop::Apple => "apple",
        }
    }
}

impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Crop {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "tomato" | "トマト" => Ok(Crop::Tomato),
            "apple" | "りんご" => Ok(Crop::Apple),
            other => Err(Error::UnknownPreset(other.to_string())),
        }
    }
}

/// ラベル → アドバイスの対応表（読み取り専用）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdvisoryTable {
    entries: BTreeMap<String, Advisory>,
}

lazy_static! {
    static ref TOMATO: AdvisoryTable = AdvisoryTable::tomato_preset();
    static ref APPLE: AdvisoryTable = AdvisoryTable::apple_preset();
}

const NO_SYMPTOMS: &str =
    "Normal leaf color and texture, no visible lesions or discoloration, vigorous growth.";
const ROUTINE_CARE: &str =
    "Maintain regular watering, proper fertilization, and routine pruning for continued plant health.";

impl AdvisoryTable {
    /// 組み込みプリセット（プロセス内で一度だけ構築）
    pub fn builtin(crop: Crop) -> &'static AdvisoryTable {
        match crop {
            Crop::Tomato => &TOMATO,
            Crop::Apple => &APPLE,
        }
    }

    /// プリセット名から取得
    pub fn from_preset(name: &str) -> Result<&'static AdvisoryTable> {
        name.parse::<Crop>().map(Self::builtin)
    }

    /// JSONファイルから読み込み（非WASM環境のみ）
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSON文字列から読み込み
    ///
    /// 形式: `{"Early Blight": {"symptoms": "...", "treatment": "..."}}`
    pub fn from_json(json: &str) -> Result<Self> {
        let table: Self = serde_json::from_str(json)?;
        Ok(table)
    }

    /// ラベルの完全一致で検索。見つからなければNone（エラーではない）
    pub fn lookup(&self, label: &str) -> Option<&Advisory> {
        self.entries.get(label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, label: &str, symptoms: &str, treatment: &str) {
        self.entries
            .insert(label.to_string(), Advisory::new(symptoms, treatment));
    }

    /// トマト用プリセット
    fn tomato_preset() -> Self {
        let mut table = Self::default();

        table.insert(
            "Early Blight",
            "Dark olive-green spots on leaves and fruit, lesions turn dark and scabby, premature leaf drop.",
            "Apply fungicides early in the season, remove and destroy fallen leaves, prune to improve air circulation, plant resistant varieties.",
        );
        table.insert(
            "Bacterial Spot",
            "Circular purple spots on leaves, rotting fruit with concentric rings, cankers on branches.",
            "Prune out infected branches, remove mummified fruit, apply fungicides, ensure good air circulation, avoid overhead irrigation.",
        );
        table.insert(
            "Late Blight",
            "Bright orange-yellow spots on leaves, small yellow cups on underside of leaves, premature leaf drop.",
            "Remove nearby cedar trees if possible, apply protective fungicides, plant resistant varieties, maintain tree vigor with proper fertilization.",
        );
        for label in [
            "Leaf Mold",
            "Septoria Leaf Spot",
            "Spotted Spider Mite",
            "Target Spot",
            "Leaf Curl Virus",
            "Tomato Mosaic Virus",
        ] {
            table.insert(label, NO_SYMPTOMS, ROUTINE_CARE);
        }

        table
    }

    /// りんご用プリセット
    fn apple_preset() -> Self {
        let mut table = Self::default();

        table.insert(
            "Apple Scab",
            "Dark olive-green spots on leaves and fruit, lesions turn dark and scabby, premature leaf drop.",
            "Apply fungicides early in the season, remove and destroy fallen leaves, prune to improve air circulation, plant resistant varieties.",
        );
        table.insert(
            "Black Rot",
            "Circular purple spots on leaves, rotting fruit with concentric rings, cankers on branches.",
            "Prune out infected branches, remove mummified fruit, apply fungicides, ensure good air circulation, avoid overhead irrigation.",
        );
        table.insert(
            "Cedar Apple Rust",
            "Bright orange-yellow spots on leaves, small yellow cups on underside of leaves, premature leaf drop.",
            "Remove nearby cedar trees if possible, apply protective fungicides, plant resistant varieties, maintain tree vigor with proper fertilization.",
        );
        table.insert("Healthy", NO_SYMPTOMS, ROUTINE_CARE);

        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tomato_preset() {
        let table = AdvisoryTable::builtin(Crop::Tomato);
        assert_eq!(table.len(), 9);
        let advisory = table.lookup("Early Blight").expect("Early Blight");
        assert!(advisory.symptoms.contains("olive-green"));
        assert!(table.lookup("Apple Scab").is_none());
    }

    #[test]
    fn test_apple_preset() {
        let table = AdvisoryTable::builtin(Crop::Apple);
        assert_eq!(table.len(), 4);
        assert!(table.lookup("Cedar Apple Rust").is_some());
        assert!(table.lookup("Healthy").is_some());
        assert!(table.lookup("Early Blight").is_none());
    }

    #[test]
    fn test_builtin_is_shared() {
        let a = AdvisoryTable::builtin(Crop::Tomato);
        let b = AdvisoryTable::builtin(Crop::Tomato);
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn test_lookup_miss_is_none() {
        let table = AdvisoryTable::builtin(Crop::Tomato);
        assert!(table.lookup("Unknown Disease").is_none());
        // 完全一致のみ
        assert!(table.lookup("early blight").is_none());
    }

    #[test]
    fn test_from_preset() {
        assert_eq!(AdvisoryTable::from_preset("apple").unwrap().len(), 4);
        assert_eq!(AdvisoryTable::from_preset(" Tomato ").unwrap().len(), 9);
        let err = AdvisoryTable::from_preset("grape").unwrap_err();
        assert!(matches!(err, Error::UnknownPreset(name) if name == "grape"));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "Powdery Mildew": {"symptoms": "White powder", "treatment": "Sulfur spray"}
        }"#;
        let table = AdvisoryTable::from_json(json).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("Powdery Mildew").unwrap().treatment, "Sulfur spray");
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(AdvisoryTable::from_json(r#"{"X": {"symptoms": 1}}"#).is_err());
    }

    #[test]
    fn test_labels_sorted() {
        let labels: Vec<&str> = AdvisoryTable::builtin(Crop::Apple).labels().collect();
        assert_eq!(labels, vec!["Apple Scab", "Black Rot", "Cedar Apple Rust", "Healthy"]);
    }

    #[test]
    fn test_crop_parse_and_display() {
        assert_eq!("APPLE".parse::<Crop>().unwrap(), Crop::Apple);
        assert_eq!(Crop::Tomato.to_string(), "tomato");
        assert_eq!(Crop::default(), Crop::Tomato);
        assert!("".parse::<Crop>().is_err());
    }

    #[test]
    fn test_crop_serde() {
        assert_eq!(serde_json::to_string(&Crop::Apple).unwrap(), "\"apple\"");
        let crop: Crop = serde_json::from_str("\"tomato\"").unwrap();
        assert_eq!(crop, Crop::Tomato);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_from_file_not_found() {
        let result = AdvisoryTable::from_file(std::path::Path::new("/nonexistent/advisory.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
