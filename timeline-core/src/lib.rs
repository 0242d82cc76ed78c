//! Logic lõi hiển thị marker trên timeline: dữ liệu item, cấu hình, bố cục
//! và vòng đời các phần tử hiển thị trên một bề mặt vẽ bên ngoài.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod host;
pub mod item;
pub mod item_box;
pub mod item_point;
pub mod layout;
pub mod memory;
pub mod options;
pub mod range;
pub mod record;
pub mod surface;

pub use host::LayerHost;
pub use item::{Geometry, ItemBase, ItemParent, Positionable, Visible};
pub use item_box::ItemBox;
pub use item_point::ItemPoint;
pub use layout::{BoxFootprint, BoxLayout, HorizontalBoxLayout, PointLayout, VerticalBoxLayout};
pub use memory::{MemorySurface, NodeId};
pub use options::{Align, ItemOptions, Orientation, ResolvedOptions};
pub use range::{validate_margin, TimeScale, VisibleRange};
pub use record::{MarkerContent, MarkerData, MarkerId, MarkerRecord};
pub use surface::{Size, StyleProp, Surface};

/// Các lớp chứa do timeline cha cung cấp để gắn phần tử của item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HostLayer {
    Foreground,
    Background,
    Axis,
}

impl fmt::Display for HostLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HostLayer::Foreground => "foreground",
            HostLayer::Background => "background",
            HostLayer::Axis => "axis",
        };
        f.write_str(name)
    }
}

/// Lỗi chung khi dựng và vẽ item trên timeline.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TimelineError {
    #[error("Thiếu thuộc tính \"{field}\" trong item {item}")]
    MissingField { field: &'static str, item: String },
    #[error("Không thể vẽ lại item: chưa gắn vào timeline cha")]
    MissingParent,
    #[error("Không thể vẽ lại item: timeline cha không có lớp {0}")]
    MissingHostLayer(HostLayer),
    #[error("Item chưa được vẽ lần nào")]
    NotRendered,
    #[error("Khoảng thời gian không hợp lệ: {0}")]
    InvalidRange(String),
    #[error("Không đọc được dữ liệu: {0}")]
    Parse(String),
    #[error("Bề mặt vẽ báo lỗi: {0}")]
    Surface(String),
}
