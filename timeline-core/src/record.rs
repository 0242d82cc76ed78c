//! Dữ liệu một sự kiện hiển thị trên timeline.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::TimelineError;

/// Định danh item, duy nhất trong tập item của timeline cha.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum MarkerId {
    Number(i64),
    Text(String),
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerId::Number(value) => write!(f, "{value}"),
            MarkerId::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for MarkerId {
    fn from(value: i64) -> Self {
        MarkerId::Number(value)
    }
}

impl From<&str> for MarkerId {
    fn from(value: &str) -> Self {
        MarkerId::Text(value.to_string())
    }
}

/// Nội dung hiển thị trong thân item.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerContent<N> {
    /// Văn bản hoặc markup thô.
    Markup(String),
    /// Node dựng sẵn trên bề mặt vẽ, gắn trực tiếp vào thân item.
    Node(N),
}

impl<N> From<&str> for MarkerContent<N> {
    fn from(value: &str) -> Self {
        MarkerContent::Markup(value.to_string())
    }
}

/// Dữ liệu thô của item như nhận từ phía gọi, chưa kiểm tra.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(bound(deserialize = ""), rename_all = "camelCase")]
pub struct MarkerData<N> {
    pub id: MarkerId,
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "markup_content")]
    pub content: Option<MarkerContent<N>>,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub selected: bool,
}

impl<N> MarkerData<N> {
    pub fn new(id: impl Into<MarkerId>, start: Option<DateTime<Utc>>) -> Self {
        Self {
            id: id.into(),
            start,
            content: None,
            class_name: None,
            selected: false,
        }
    }

    pub fn with_content(mut self, content: impl Into<MarkerContent<N>>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }
}

fn markup_content<'de, D, N>(deserializer: D) -> Result<Option<MarkerContent<N>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map(MarkerContent::Markup))
}

/// Item đã kiểm tra: luôn có `start`. `content` chỉ bắt buộc khi vẽ.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerRecord<N> {
    pub id: MarkerId,
    pub start: DateTime<Utc>,
    pub content: Option<MarkerContent<N>>,
    pub class_name: Option<String>,
    pub selected: bool,
}

impl<N> TryFrom<MarkerData<N>> for MarkerRecord<N> {
    type Error = TimelineError;

    fn try_from(data: MarkerData<N>) -> Result<Self, Self::Error> {
        let start = data.start.ok_or_else(|| TimelineError::MissingField {
            field: "start",
            item: data.id.to_string(),
        })?;

        Ok(Self {
            id: data.id,
            start,
            content: data.content,
            class_name: data.class_name,
            selected: data.selected,
        })
    }
}

impl<N> MarkerRecord<N> {
    /// Hậu tố class: class riêng của item và cờ `selected`.
    pub fn class_suffix(&self) -> String {
        let mut suffix = String::new();
        if let Some(class_name) = &self.class_name {
            suffix.push(' ');
            suffix.push_str(class_name);
        }
        if self.selected {
            suffix.push_str(" selected");
        }
        suffix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_start_is_rejected() {
        let data = MarkerData::<()>::new(7_i64, None).with_content("A");
        assert_eq!(
            MarkerRecord::try_from(data),
            Err(TimelineError::MissingField {
                field: "start",
                item: "7".to_string(),
            })
        );
    }

    #[test]
    fn deserializes_camel_case_json() {
        let data: MarkerData<()> = serde_json::from_str(
            r#"{"id":"evt-1","start":"2024-03-01T08:00:00Z","content":"<b>ICU</b>","className":"urgent"}"#,
        )
        .unwrap();

        assert_eq!(data.id, MarkerId::Text("evt-1".to_string()));
        assert_eq!(
            data.start,
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap())
        );
        assert_eq!(
            data.content,
            Some(MarkerContent::Markup("<b>ICU</b>".to_string()))
        );
        assert_eq!(data.class_name.as_deref(), Some("urgent"));
        assert!(!data.selected);
    }

    #[test]
    fn class_suffix_combines_custom_class_and_selection() {
        let mut record = MarkerRecord::<()>::try_from(
            MarkerData::new(1_i64, Some(Utc::now())).with_class_name("warn"),
        )
        .unwrap();
        assert_eq!(record.class_suffix(), " warn");

        record.selected = true;
        assert_eq!(record.class_suffix(), " warn selected");

        record.class_name = None;
        assert_eq!(record.class_suffix(), " selected");
    }
}
