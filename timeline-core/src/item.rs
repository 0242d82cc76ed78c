//! Khả năng chung của các loại marker và phần trạng thái dùng chung.

use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::options::{ItemOptions, ResolvedOptions};
use crate::range::VisibleRange;
use crate::record::{MarkerContent, MarkerData, MarkerRecord};
use crate::surface::{Size, Surface};
use crate::{HostLayer, TimelineError};

/// Những gì item cần từ tập item (timeline cha) sở hữu nó.
pub trait ItemParent<S: Surface> {
    /// Quy đổi thời điểm sang tọa độ ngang trong vùng nhìn hiện tại.
    fn to_screen(&self, time: DateTime<Utc>) -> f64;

    fn foreground(&self) -> Option<S::Node>;

    fn background(&self) -> Option<S::Node>;

    fn axis(&self) -> Option<S::Node>;

    /// Chiều cao vùng chứa item.
    fn height(&self) -> f64 {
        0.0
    }

    /// Móc trang trí thân item (ví dụ nút xóa khi item được chọn).
    fn decorate_item(
        &self,
        _surface: &mut S,
        _record: &MarkerRecord<S::Node>,
        _body: &S::Node,
    ) {
    }
}

/// Hình học dẫn xuất của item, tính lại khi cần.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Geometry {
    pub width: f64,
    pub height: f64,
    pub left: Option<f64>,
    pub top: Option<f64>,
    pub dot: Size,
    pub line: Size,
}

/// Lọc và bật/tắt hiển thị.
pub trait Visible<S: Surface> {
    fn is_visible(&self, range: &VisibleRange) -> bool;

    fn is_displayed(&self) -> bool;

    /// Hiển thị item nếu đang ẩn. Phần tử được tạo ở lần đầu.
    fn show(&mut self, surface: &mut S) -> Result<(), TimelineError>;

    /// Gỡ phần tử khỏi các lớp chứa và xóa vị trí đã tính.
    fn hide(&mut self, surface: &mut S);
}

/// Đồng bộ phần tử và định vị theo trục thời gian.
pub trait Positionable<S: Surface> {
    /// Đưa phần tử về đúng trạng thái dữ liệu hiện tại. Gọi lặp lại an toàn.
    fn repaint(&mut self, surface: &mut S) -> Result<(), TimelineError>;

    fn reposition_x(&mut self, surface: &mut S) -> Result<(), TimelineError>;

    fn reposition_y(&mut self, surface: &mut S) -> Result<(), TimelineError>;

    fn geometry(&self) -> &Geometry;

    /// Khoảng cách tới trục do lượt xếp chồng của timeline cha gán.
    fn set_top(&mut self, top: Option<f64>);
}

/// Dữ liệu, tùy chọn và cờ trạng thái dùng chung cho mọi loại marker.
pub struct ItemBase<S: Surface> {
    record: MarkerRecord<S::Node>,
    options: ItemOptions,
    defaults: ItemOptions,
    parent: Option<Rc<dyn ItemParent<S>>>,
    displayed: bool,
    dirty: bool,
    rendered_content: Option<MarkerContent<S::Node>>,
    rendered_class: Option<String>,
    pub(crate) geometry: Geometry,
}

impl<S: Surface> ItemBase<S> {
    pub fn new(
        data: MarkerData<S::Node>,
        options: ItemOptions,
        defaults: ItemOptions,
    ) -> Result<Self, TimelineError> {
        Ok(Self {
            record: MarkerRecord::try_from(data)?,
            options,
            defaults,
            parent: None,
            displayed: false,
            dirty: true,
            rendered_content: None,
            rendered_class: None,
            geometry: Geometry::default(),
        })
    }

    pub fn record(&self) -> &MarkerRecord<S::Node> {
        &self.record
    }

    /// Thay dữ liệu item; nội dung và class mới được áp dụng ở lần vẽ sau.
    pub fn set_data(&mut self, data: MarkerData<S::Node>) -> Result<(), TimelineError> {
        self.record = MarkerRecord::try_from(data)?;
        Ok(())
    }

    pub fn set_parent(&mut self, parent: Option<Rc<dyn ItemParent<S>>>) {
        self.parent = parent;
    }

    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    pub fn select(&mut self) {
        self.record.selected = true;
    }

    pub fn unselect(&mut self) {
        self.record.selected = false;
    }

    pub fn options(&self) -> ResolvedOptions {
        self.options.resolve(&self.defaults)
    }

    pub fn is_visible(&self, range: &VisibleRange) -> bool {
        range.contains(self.record.start, self.options().visibility_margin)
    }

    pub fn is_displayed(&self) -> bool {
        self.displayed
    }

    pub(crate) fn set_displayed(&mut self, displayed: bool) {
        self.displayed = displayed;
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub(crate) fn parent(&self) -> Result<Rc<dyn ItemParent<S>>, TimelineError> {
        self.parent.clone().ok_or(TimelineError::MissingParent)
    }

    pub(crate) fn anchor(&self) -> Result<f64, TimelineError> {
        Ok(self.parent()?.to_screen(self.record.start))
    }

    /// Lớp chứa `layer` của timeline cha; tra trước khi tạo hay gắn node nào.
    pub(crate) fn container(
        parent: &dyn ItemParent<S>,
        layer: HostLayer,
    ) -> Result<S::Node, TimelineError> {
        match layer {
            HostLayer::Foreground => parent.foreground(),
            HostLayer::Background => parent.background(),
            HostLayer::Axis => parent.axis(),
        }
        .ok_or(TimelineError::MissingHostLayer(layer))
    }

    /// Gắn `node` vào `container` nếu node chưa nằm trong cây.
    pub(crate) fn attach(&self, surface: &mut S, container: &S::Node, node: &S::Node) {
        if surface.is_attached(node) {
            return;
        }
        surface.append_child(container, node);
        log::trace!("item {}: gắn vào lớp chứa", self.record.id);
    }

    /// Cập nhật nội dung vào `wrapper` nếu dữ liệu đã đổi.
    pub(crate) fn sync_content(
        &mut self,
        surface: &mut S,
        wrapper: &S::Node,
    ) -> Result<(), TimelineError> {
        if self.record.content == self.rendered_content {
            return match self.record.content {
                Some(_) => Ok(()),
                None => Err(self.missing_content()),
            };
        }

        match &self.record.content {
            Some(MarkerContent::Node(node)) => surface.replace_children(wrapper, node),
            Some(MarkerContent::Markup(markup)) => surface.set_markup(wrapper, markup),
            None => return Err(self.missing_content()),
        }

        self.rendered_content = self.record.content.clone();
        self.dirty = true;
        Ok(())
    }

    /// Trả về hậu tố class mới khi khác lần áp dụng trước.
    pub(crate) fn class_change(&mut self) -> Option<String> {
        let suffix = self.record.class_suffix();
        if self.rendered_class.as_deref() == Some(suffix.as_str()) {
            return None;
        }
        self.rendered_class = Some(suffix.clone());
        self.dirty = true;
        Some(suffix)
    }

    fn missing_content(&self) -> TimelineError {
        TimelineError::MissingField {
            field: "content",
            item: self.record.id.to_string(),
        }
    }
}
