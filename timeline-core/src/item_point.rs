//! Marker dạng điểm: một chấm kèm nội dung bên phải, không có đường nối.

use std::rc::Rc;

use crate::item::{Geometry, ItemBase, ItemParent, Positionable, Visible};
use crate::layout::PointLayout;
use crate::options::ItemOptions;
use crate::range::VisibleRange;
use crate::record::{MarkerData, MarkerRecord};
use crate::surface::{Size, StyleProp, Surface};
use crate::{HostLayer, TimelineError};

#[derive(Debug, Clone)]
struct PointNodes<N> {
    body: N,
    content: N,
    dot: N,
}

#[derive(Debug, Clone)]
enum DomState<N> {
    Uninitialized,
    Created(PointNodes<N>),
}

pub struct ItemPoint<S: Surface> {
    base: ItemBase<S>,
    dom: DomState<S::Node>,
}

impl<S: Surface> ItemPoint<S> {
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

    pub fn select(&mut self) {
        self.base.select();
    }

    pub fn unselect(&mut self) {
        self.base.unselect();
    }

    pub fn body(&self) -> Option<&S::Node> {
        match &self.dom {
            DomState::Created(nodes) => Some(&nodes.body),
            DomState::Uninitialized => None,
        }
    }

    pub fn dot(&self) -> Option<&S::Node> {
        match &self.dom {
            DomState::Created(nodes) => Some(&nodes.dot),
            DomState::Uninitialized => None,
        }
    }

    /// Kích thước thân điểm đo ở lần vẽ gần nhất.
    pub fn size(&self) -> Size {
        Size::new(self.base.geometry.width, self.base.geometry.height)
    }

    fn ensure_nodes(&mut self, surface: &mut S) -> Result<PointNodes<S::Node>, TimelineError> {
        if let DomState::Created(nodes) = &self.dom {
            return Ok(nodes.clone());
        }

        let body = surface.create_node()?;
        let content = surface.create_node()?;
        surface.set_class(&content, "content");
        surface.append_child(&body, &content);

        let dot = surface.create_node()?;
        surface.append_child(&body, &dot);

        let nodes = PointNodes { body, content, dot };
        log::debug!("item {}: tạo phần tử điểm", self.base.record().id);
        self.dom = DomState::Created(nodes.clone());
        Ok(nodes)
    }

    fn created(&self) -> Result<&PointNodes<S::Node>, TimelineError> {
        match &self.dom {
            DomState::Created(nodes) => Ok(nodes),
            DomState::Uninitialized => Err(TimelineError::NotRendered),
        }
    }
}

impl<S: Surface> Visible<S> for ItemPoint<S> {
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
            if surface.is_attached(&nodes.body) {
                surface.detach(&nodes.body);
            }
        }

        self.base.geometry.top = None;
        self.base.geometry.left = None;
        self.base.set_displayed(false);
        log::debug!("item {}: ẩn", self.base.record().id);
    }
}

impl<S: Surface> Positionable<S> for ItemPoint<S> {
    fn repaint(&mut self, surface: &mut S) -> Result<(), TimelineError> {
        let parent = self.base.parent()?;
        let foreground = ItemBase::container(&*parent, HostLayer::Foreground)?;
        let nodes = self.ensure_nodes(surface)?;

        self.base.attach(surface, &foreground, &nodes.body);
        self.base.set_displayed(true);

        self.base.sync_content(surface, &nodes.content)?;

        if let Some(suffix) = self.base.class_change() {
            surface.set_class(&nodes.body, &format!("item point{suffix}"));
            surface.set_class(&nodes.dot, &format!("item dot{suffix}"));
        }

        if self.base.is_dirty() {
            let body = surface.measure(&nodes.body);
            let dot = surface.measure(&nodes.dot);

            let geometry = &mut self.base.geometry;
            geometry.width = body.width;
            geometry.height = body.height;
            geometry.dot = dot;

            let (margin_left, dot_left, dot_top) = PointLayout::inner(body, dot);
            surface.set_style(&nodes.content, StyleProp::MarginLeft, Some(margin_left));
            surface.set_style(&nodes.dot, StyleProp::Left, Some(dot_left));
            surface.set_style(&nodes.dot, StyleProp::Top, Some(dot_top));

            self.base.mark_clean();
        }

        parent.decorate_item(surface, self.base.record(), &nodes.body);
        Ok(())
    }

    fn reposition_x(&mut self, surface: &mut S) -> Result<(), TimelineError> {
        let anchor = self.base.anchor()?;
        let left = PointLayout::left(anchor, self.base.geometry.dot);
        let nodes = self.created()?;

        surface.set_style(&nodes.body, StyleProp::Left, Some(left));
        self.base.geometry.left = Some(left);
        Ok(())
    }

    fn reposition_y(&mut self, surface: &mut S) -> Result<(), TimelineError> {
        let parent = self.base.parent()?;
        let geometry = &self.base.geometry;
        let top = PointLayout::top(
            geometry.top,
            geometry.height,
            parent.height(),
            self.base.options().orientation,
        );
        let nodes = self.created()?;

        surface.set_style(&nodes.body, StyleProp::Top, Some(top));
        Ok(())
    }

    fn geometry(&self) -> &Geometry {
        &self.base.geometry
    }

    fn set_top(&mut self, top: Option<f64>) {
        self.base.geometry.top = top;
    }
}
