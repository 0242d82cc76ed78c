//! Cấu hình căn lề, hướng trục và biên hiển thị của item.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TimelineError;

/// Căn thân item so với thời điểm neo trên trục.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Left,
    Right,
    #[default]
    Center,
}

impl FromStr for Align {
    type Err = TimelineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Align::Left),
            "right" => Ok(Align::Right),
            "center" => Ok(Align::Center),
            other => Err(TimelineError::Parse(format!("align không hợp lệ: {other}"))),
        }
    }
}

/// Vị trí trục thời gian so với vùng chứa item.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Top,
    #[default]
    Bottom,
}

impl FromStr for Orientation {
    type Err = TimelineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Orientation::Top),
            "bottom" => Ok(Orientation::Bottom),
            other => Err(TimelineError::Parse(format!(
                "orientation không hợp lệ: {other}"
            ))),
        }
    }
}

/// Tùy chọn item. Giá trị `None` rơi về cấu hình chung của timeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ItemOptions {
    #[serde(default)]
    pub align: Option<Align>,
    #[serde(default)]
    pub orientation: Option<Orientation>,
    /// Tỉ lệ nới rộng cửa sổ hiển thị hai phía khi lọc item, theo độ dài
    /// cửa sổ. Mặc định 0: chỉ giữ item nằm hẳn trong cửa sổ.
    #[serde(default)]
    pub visibility_margin: Option<f64>,
}

/// Tùy chọn đã gộp giữa item và cấu hình chung.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResolvedOptions {
    pub align: Align,
    pub orientation: Orientation,
    pub visibility_margin: f64,
}

impl ItemOptions {
    pub fn resolve(&self, defaults: &ItemOptions) -> ResolvedOptions {
        ResolvedOptions {
            align: self.align.or(defaults.align).unwrap_or_default(),
            orientation: self
                .orientation
                .or(defaults.orientation)
                .unwrap_or_default(),
            visibility_margin: self
                .visibility_margin
                .or(defaults.visibility_margin)
                .unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn item_values_override_collection_defaults() {
        let defaults = ItemOptions {
            align: Some(Align::Left),
            orientation: Some(Orientation::Top),
            visibility_margin: Some(0.25),
        };
        let own = ItemOptions {
            align: Some(Align::Right),
            ..ItemOptions::default()
        };

        assert_eq!(
            own.resolve(&defaults),
            ResolvedOptions {
                align: Align::Right,
                orientation: Orientation::Top,
                visibility_margin: 0.25,
            }
        );
    }

    #[test]
    fn empty_options_fall_back_to_center_bottom() {
        let resolved = ItemOptions::default().resolve(&ItemOptions::default());
        assert_eq!(resolved.align, Align::Center);
        assert_eq!(resolved.orientation, Orientation::Bottom);
        assert_eq!(resolved.visibility_margin, 0.0);
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("RIGHT".parse::<Align>(), Ok(Align::Right));
        assert_eq!(" top ".parse::<Orientation>(), Ok(Orientation::Top));
        assert!("middle".parse::<Align>().is_err());
    }

    #[test]
    fn deserializes_partial_json() {
        let options: ItemOptions = serde_json::from_str(r#"{"align":"left"}"#).unwrap();
        assert_eq!(options.align, Some(Align::Left));
        assert_eq!(options.orientation, None);
    }
}
