//! Tính toán vị trí thuần túy cho marker dạng hộp và dạng điểm.
//!
//! Các hàm ở đây không chạm tới bề mặt vẽ: chúng nhận tọa độ neo (pixel của
//! thời điểm `start`) cùng các kích thước đã đo và trả về tọa độ cần gán.

use serde::{Deserialize, Serialize};

use crate::options::{Align, Orientation};
use crate::surface::Size;

/// Kích thước đã đo của ba phần tử marker dạng hộp.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct BoxFootprint {
    pub body: Size,
    pub line: Size,
    pub dot: Size,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HorizontalBoxLayout {
    pub box_left: f64,
    pub line_left: f64,
    pub dot_left: f64,
}

impl HorizontalBoxLayout {
    /// Thân hộp lệch theo `align`; đường nối và chấm luôn căn giữa tại `anchor`.
    pub fn compute(anchor: f64, footprint: &BoxFootprint, align: Align) -> Self {
        let box_left = match align {
            Align::Right => anchor - footprint.body.width,
            Align::Left => anchor,
            Align::Center => anchor - footprint.body.width / 2.0,
        };

        Self {
            box_left,
            line_left: anchor - footprint.line.width / 2.0,
            dot_left: anchor - footprint.dot.width / 2.0,
        }
    }
}

/// Tọa độ dọc; `None` nghĩa là xóa giá trị inline tương ứng.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct VerticalBoxLayout {
    pub box_top: Option<f64>,
    pub box_bottom: Option<f64>,
    pub line_top: Option<f64>,
    pub line_bottom: Option<f64>,
    pub line_height: f64,
    pub dot_top: f64,
}

impl VerticalBoxLayout {
    /// `top` là khoảng cách từ trục tới thân hộp, do lượt xếp chồng của
    /// timeline cha gán; coi như 0 khi chưa có.
    pub fn compute(top: Option<f64>, dot: Size, orientation: Orientation) -> Self {
        let top = top.unwrap_or(0.0);
        let dot_top = -dot.height / 2.0;

        match orientation {
            Orientation::Top => Self {
                box_top: Some(top),
                box_bottom: None,
                line_top: Some(0.0),
                line_bottom: None,
                line_height: top,
                dot_top,
            },
            Orientation::Bottom => Self {
                box_top: None,
                box_bottom: Some(top),
                line_top: None,
                line_bottom: Some(0.0),
                line_height: top,
                dot_top,
            },
        }
    }
}

/// Bố cục đầy đủ của marker dạng hộp.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoxLayout {
    pub horizontal: HorizontalBoxLayout,
    pub vertical: VerticalBoxLayout,
}

impl BoxLayout {
    pub fn compute(
        anchor: f64,
        footprint: &BoxFootprint,
        top: Option<f64>,
        align: Align,
        orientation: Orientation,
    ) -> Self {
        Self {
            horizontal: HorizontalBoxLayout::compute(anchor, footprint, align),
            vertical: VerticalBoxLayout::compute(top, footprint.dot, orientation),
        }
    }
}

/// Bố cục marker dạng điểm: chấm nằm bên trái, nội dung đẩy sang phải.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PointLayout {
    pub left: f64,
    pub top: f64,
    pub content_margin_left: f64,
    pub dot_left: f64,
    pub dot_top: f64,
}

impl PointLayout {
    /// Vị trí bên trong thân điểm, chỉ phụ thuộc kích thước đã đo.
    pub fn inner(body: Size, dot: Size) -> (f64, f64, f64) {
        (2.0 * dot.width, dot.width / 2.0, (body.height - dot.height) / 2.0)
    }

    pub fn left(anchor: f64, dot: Size) -> f64 {
        anchor - dot.width
    }

    /// Với trục ở dưới, `top` được đổi sang tọa độ từ mép trên của vùng chứa
    /// cao `container_height`.
    pub fn top(
        top: Option<f64>,
        body_height: f64,
        container_height: f64,
        orientation: Orientation,
    ) -> f64 {
        let top = top.unwrap_or(0.0);
        match orientation {
            Orientation::Top => top,
            Orientation::Bottom => container_height - top - body_height,
        }
    }

    pub fn compute(
        anchor: f64,
        body: Size,
        dot: Size,
        top: Option<f64>,
        container_height: f64,
        orientation: Orientation,
    ) -> Self {
        let (content_margin_left, dot_left, dot_top) = Self::inner(body, dot);
        Self {
            left: Self::left(anchor, dot),
            top: Self::top(top, body.height, container_height, orientation),
            content_margin_left,
            dot_left,
            dot_top,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn footprint() -> BoxFootprint {
        BoxFootprint {
            body: Size::new(40.0, 24.0),
            line: Size::new(2.0, 0.0),
            dot: Size::new(10.0, 10.0),
        }
    }

    #[rstest]
    #[case(Align::Center, 230.0)]
    #[case(Align::Right, 210.0)]
    #[case(Align::Left, 250.0)]
    fn body_offset_follows_alignment(#[case] align: Align, #[case] expected: f64) {
        let layout = HorizontalBoxLayout::compute(250.0, &footprint(), align);
        assert_eq!(layout.box_left, expected);
        assert_eq!(layout.line_left, 249.0);
        assert_eq!(layout.dot_left, 245.0);
    }

    #[test]
    fn left_and_right_differ_by_body_width() {
        let left = HorizontalBoxLayout::compute(80.0, &footprint(), Align::Left).box_left;
        let right = HorizontalBoxLayout::compute(80.0, &footprint(), Align::Right).box_left;
        let center = HorizontalBoxLayout::compute(80.0, &footprint(), Align::Center).box_left;
        assert_eq!(left - right, 40.0);
        assert_eq!(center, (left + right) / 2.0);
    }

    #[test]
    fn top_orientation_hangs_connector_from_axis() {
        let layout = VerticalBoxLayout::compute(Some(30.0), Size::new(8.0, 8.0), Orientation::Top);
        assert_eq!(
            layout,
            VerticalBoxLayout {
                box_top: Some(30.0),
                box_bottom: None,
                line_top: Some(0.0),
                line_bottom: None,
                line_height: 30.0,
                dot_top: -4.0,
            }
        );
    }

    #[test]
    fn bottom_orientation_raises_connector_from_axis() {
        let layout =
            VerticalBoxLayout::compute(Some(30.0), Size::new(8.0, 8.0), Orientation::Bottom);
        assert_eq!(
            layout,
            VerticalBoxLayout {
                box_top: None,
                box_bottom: Some(30.0),
                line_top: None,
                line_bottom: Some(0.0),
                line_height: 30.0,
                dot_top: -4.0,
            }
        );
    }

    #[test]
    fn unset_top_counts_as_zero() {
        let layout = VerticalBoxLayout::compute(None, Size::new(6.0, 6.0), Orientation::Top);
        assert_eq!(layout.box_top, Some(0.0));
        assert_eq!(layout.line_height, 0.0);
    }

    #[test]
    fn point_layout_places_dot_left_of_content() {
        let layout = PointLayout::compute(
            100.0,
            Size::new(60.0, 20.0),
            Size::new(8.0, 8.0),
            Some(15.0),
            200.0,
            Orientation::Bottom,
        );
        assert_eq!(
            layout,
            PointLayout {
                left: 92.0,
                top: 165.0,
                content_margin_left: 16.0,
                dot_left: 4.0,
                dot_top: 6.0,
            }
        );
    }
}
