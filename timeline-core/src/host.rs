//! Timeline cha tối giản: giữ thang thời gian và ba lớp chứa.

use chrono::{DateTime, Utc};

use crate::item::ItemParent;
use crate::range::TimeScale;
use crate::surface::Surface;

pub struct LayerHost<S: Surface> {
    scale: TimeScale,
    foreground: Option<S::Node>,
    background: Option<S::Node>,
    axis: Option<S::Node>,
    height: f64,
}

impl<S: Surface> LayerHost<S> {
    pub fn new(scale: TimeScale) -> Self {
        Self {
            scale,
            foreground: None,
            background: None,
            axis: None,
            height: 0.0,
        }
    }

    /// Tạo đủ ba lớp chứa mới trên `surface`.
    pub fn with_layers(scale: TimeScale, surface: &mut S) -> Result<Self, crate::TimelineError> {
        Ok(Self::new(scale)
            .with_foreground(surface.create_node()?)
            .with_background(surface.create_node()?)
            .with_axis(surface.create_node()?))
    }

    pub fn with_foreground(mut self, node: S::Node) -> Self {
        self.foreground = Some(node);
        self
    }

    pub fn with_background(mut self, node: S::Node) -> Self {
        self.background = Some(node);
        self
    }

    pub fn with_axis(mut self, node: S::Node) -> Self {
        self.axis = Some(node);
        self
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    pub fn scale(&self) -> &TimeScale {
        &self.scale
    }
}

impl<S: Surface> ItemParent<S> for LayerHost<S> {
    fn to_screen(&self, time: DateTime<Utc>) -> f64 {
        self.scale.to_screen(time)
    }

    fn foreground(&self) -> Option<S::Node> {
        self.foreground.clone()
    }

    fn background(&self) -> Option<S::Node> {
        self.background.clone()
    }

    fn axis(&self) -> Option<S::Node> {
        self.axis.clone()
    }

    fn height(&self) -> f64 {
        self.height
    }
}
