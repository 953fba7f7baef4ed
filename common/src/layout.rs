//! 画面レイアウト設定

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// アップロードフォームの配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// フォームと結果を1枚のカードに縦並び
    Single,
    /// 左にフォーム、右に診断結果
    #[default]
    Split,
}

impl LayoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutMode::Single => "single",
            LayoutMode::Split => "split",
        }
    }

    /// ルート要素に付与するCSSクラス
    pub fn css_class(&self) -> &'static str {
        match self {
            LayoutMode::Single => "layout-single",
            LayoutMode::Split => "layout-split",
        }
    }
}

impl FromStr for LayoutMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" => Ok(LayoutMode::Single),
            "split" => Ok(LayoutMode::Split),
            other => Err(Error::Config(format!("unknown layout: {}", other))),
        }
    }
}
