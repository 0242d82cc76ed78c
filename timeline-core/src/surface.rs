//! Hợp đồng tối thiểu giữa item và bề mặt vẽ (DOM, bộ nhớ...).

use serde::{Deserialize, Serialize};

use crate::TimelineError;

/// Kích thước đo được của một phần tử, đơn vị pixel.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Thuộc tính style inline mà item được phép điều khiển.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleProp {
    Left,
    Top,
    Bottom,
    Height,
    MarginLeft,
}

impl StyleProp {
    /// Tên thuộc tính CSS tương ứng.
    pub fn css_name(self) -> &'static str {
        match self {
            StyleProp::Left => "left",
            StyleProp::Top => "top",
            StyleProp::Bottom => "bottom",
            StyleProp::Height => "height",
            StyleProp::MarginLeft => "margin-left",
        }
    }
}

/// Bề mặt vẽ mà item dùng để tạo, gắn, đo và định vị phần tử.
///
/// Item chỉ thêm hoặc gỡ các node của chính nó khỏi lớp chứa. Không có thao
/// tác nào duyệt hay xóa các node khác của lớp chứa.
pub trait Surface {
    type Node: Clone + PartialEq;

    fn create_node(&mut self) -> Result<Self::Node, TimelineError>;

    /// Gắn `child` vào cuối `parent`, tách khỏi cha cũ nếu có.
    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node);

    /// Tách node khỏi cây. Node vẫn dùng lại được.
    fn detach(&mut self, node: &Self::Node);

    fn is_attached(&self, node: &Self::Node) -> bool;

    fn set_class(&mut self, node: &Self::Node, class_name: &str);

    /// Thay nội dung node bằng markup thô.
    fn set_markup(&mut self, node: &Self::Node, markup: &str);

    /// Thay toàn bộ con của node bằng một node dựng sẵn.
    fn replace_children(&mut self, node: &Self::Node, child: &Self::Node);

    /// Gán style theo pixel; `None` xóa giá trị inline.
    fn set_style(&mut self, node: &Self::Node, prop: StyleProp, value: Option<f64>);

    /// Đo kích thước hiển thị. Thao tác đắt (buộc layout đồng bộ).
    fn measure(&mut self, node: &Self::Node) -> Size;
}
