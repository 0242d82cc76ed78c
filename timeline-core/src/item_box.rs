//! Marker dạng hộp: thân hộp ở lớp trước, đường nối ở lớp nền và chấm trên
//! trục thời gian.

use std::rc::Rc;

use crate::item::{Geometry, ItemBase, ItemParent, Positionable, Visible};
use crate::layout::{BoxFootprint, HorizontalBoxLayout, VerticalBoxLayout};
use crate::options::{ItemOptions, ResolvedOptions};
use crate::range::VisibleRange;
use crate::record::{MarkerData, MarkerRecord};
use crate::surface::{StyleProp, Surface};
use crate::{HostLayer, TimelineError};

#[derive(Debug, Clone)]
struct BoxNodes<N> {
    body: N,
    content: N,
    line: N,
    dot: N,
}

#[derive(Debug, Clone)]
enum DomState<N> {
    Uninitialized,
    Created(BoxNodes<N>),
}

pub struct ItemBox<S: Surface> {
    base: ItemBase<S>,
    dom: DomState<S::Node>,
}

impl<S: Surface> ItemBox<S> {
    /// Dựng item từ dữ liệu thô; lỗi `MissingField` nếu thiếu `start`.
    pub fn new(
        data: MarkerData<S::Node>,
        options: ItemOptions,
        defaults: ItemOptions,
    ) -> Result<Self, TimelineError> {
        Ok(Self {
            base: ItemBase::new(data, options, defaults)?,
            dom: DomState::Uninitialized,
        })
    }

    pub fn with_parent(mut self, parent: Rc<dyn ItemParent<S>>) -> Self {
        self.base.set_parent(Some(parent));
        self
    }

    pub fn set_parent(&mut self, parent: Option<Rc<dyn ItemParent<S>>>) {
        self.base.set_parent(parent);
    }

    pub fn set_data(&mut self, data: MarkerData<S::Node>) -> Result<(), TimelineError> {
        self.base.set_data(data)
    }

    pub fn record(&self) -> &MarkerRecord<S::Node> {
        self.base.record()
    }

    pub fn options(&self) -> ResolvedOptions {
        self.base.options()
    }

    pub fn select(&mut self) {
        self.base.select();
    }

    pub fn unselect(&mut self) {
        self.base.unselect();
    }

    /// Node thân hộp, nếu đã được tạo.
    pub fn body(&self) -> Option<&S::Node> {
        match &self.dom {
            DomState::Created(nodes) => Some(&nodes.body),
            DomState::Uninitialized => None,
        }
    }

    /// Ba node (thân, đường nối, chấm) nếu đã được tạo.
    pub fn parts(&self) -> Option<[&S::Node; 3]> {
        match &self.dom {
            DomState::Created(nodes) => Some([&nodes.body, &nodes.line, &nodes.dot]),
            DomState::Uninitialized => None,
        }
    }

    fn footprint(&self) -> BoxFootprint {
        let geometry = &self.base.geometry;
        BoxFootprint {
            body: crate::Size::new(geometry.width, geometry.height),
            line: geometry.line,
            dot: geometry.dot,
        }
    }

    fn ensure_nodes(&mut self, surface: &mut S) -> Result<BoxNodes<S::Node>, TimelineError> {
        if let DomState::Created(nodes) = &self.dom {
            return Ok(nodes.clone());
        }

        let body = surface.create_node()?;
        let content = surface.create_node()?;
        surface.set_class(&content, "content");
        surface.append_child(&body, &content);

        let line = surface.create_node()?;
        surface.set_class(&line, "line");

        let dot = surface.create_node()?;
        surface.set_class(&dot, "dot");

        let nodes = BoxNodes {
            body,
            content,
            line,
            dot,
        };
        log::debug!("item {}: tạo phần tử hộp", self.base.record().id);
        self.dom = DomState::Created(nodes.clone());
        Ok(nodes)
    }

    fn created(&self) -> Result<&BoxNodes<S::Node>, TimelineError> {
        match &self.dom {
            DomState::Created(nodes) => Ok(nodes),
            DomState::Uninitialized => Err(TimelineError::NotRendered),
        }
    }
}

impl<S: Surface> Visible<S> for ItemBox<S> {
    fn is_visible(&self, range: &VisibleRange) -> bool {
        self.base.is_visible(range)
    }

    fn is_displayed(&self) -> bool {
        self.base.is_displayed()
    }

    fn show(&mut self, surface: &mut S) -> Result<(), TimelineError> {
        if self.base.is_displayed() {
            return Ok(());
        }
        self.repaint(surface)
    }

    fn hide(&mut self, surface: &mut S) {
        if !self.base.is_displayed() {
            return;
        }

        if let DomState::Created(nodes) = &self.dom {
            for node in [&nodes.body, &nodes.line, &nodes.dot] {
                if surface.is_attached(node) {
                    surface.detach(node);
                }
            }
        }

        self.base.geometry.top = None;
        self.base.geometry.left = None;
        self.base.set_displayed(false);
        log::debug!("item {}: ẩn", self.base.record().id);
    }
}

impl<S: Surface> Positionable<S> for ItemBox<S> {
    fn repaint(&mut self, surface: &mut S) -> Result<(), TimelineError> {
        let parent = self.base.parent()?;
        let foreground = ItemBase::container(&*parent, HostLayer::Foreground)?;
        let background = ItemBase::container(&*parent, HostLayer::Background)?;
        let axis = ItemBase::container(&*parent, HostLayer::Axis)?;
        let nodes = self.ensure_nodes(surface)?;

        self.base.attach(surface, &foreground, &nodes.body);
        self.base.attach(surface, &background, &nodes.line);
        self.base.attach(surface, &axis, &nodes.dot);
        self.base.set_displayed(true);

        self.base.sync_content(surface, &nodes.content)?;

        if let Some(suffix) = self.base.class_change() {
            surface.set_class(&nodes.body, &format!("item box{suffix}"));
            surface.set_class(&nodes.line, &format!("item line{suffix}"));
            surface.set_class(&nodes.dot, &format!("item dot{suffix}"));
        }

        if self.base.is_dirty() {
            let dot = surface.measure(&nodes.dot);
            let line = surface.measure(&nodes.line);
            let body = surface.measure(&nodes.body);

            let geometry = &mut self.base.geometry;
            geometry.dot = dot;
            geometry.line = line;
            geometry.width = body.width;
            geometry.height = body.height;

            self.base.mark_clean();
            log::trace!(
                "item {}: đo lại {}x{}",
                self.base.record().id,
                body.width,
                body.height
            );
        }

        parent.decorate_item(surface, self.base.record(), &nodes.body);
        Ok(())
    }

    fn reposition_x(&mut self, surface: &mut S) -> Result<(), TimelineError> {
        let anchor = self.base.anchor()?;
        let layout =
            HorizontalBoxLayout::compute(anchor, &self.footprint(), self.base.options().align);
        let nodes = self.created()?;

        surface.set_style(&nodes.body, StyleProp::Left, Some(layout.box_left));
        surface.set_style(&nodes.line, StyleProp::Left, Some(layout.line_left));
        surface.set_style(&nodes.dot, StyleProp::Left, Some(layout.dot_left));

        self.base.geometry.left = Some(layout.box_left);
        Ok(())
    }

    fn reposition_y(&mut self, surface: &mut S) -> Result<(), TimelineError> {
        let geometry = &self.base.geometry;
        let layout =
            VerticalBoxLayout::compute(geometry.top, geometry.dot, self.base.options().orientation);
        let nodes = self.created()?;

        surface.set_style(&nodes.body, StyleProp::Top, layout.box_top);
        surface.set_style(&nodes.body, StyleProp::Bottom, layout.box_bottom);

        surface.set_style(&nodes.line, StyleProp::Top, layout.line_top);
        surface.set_style(&nodes.line, StyleProp::Bottom, layout.line_bottom);
        surface.set_style(&nodes.line, StyleProp::Height, Some(layout.line_height));

        surface.set_style(&nodes.dot, StyleProp::Top, Some(layout.dot_top));
        Ok(())
    }

    fn geometry(&self) -> &Geometry {
        &self.base.geometry
    }

    fn set_top(&mut self, top: Option<f64>) {
        self.base.geometry.top = top;
    }
}
