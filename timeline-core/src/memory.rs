//! Bề mặt vẽ trong bộ nhớ, dùng cho chế độ headless (CLI) và kiểm thử.

use std::collections::{BTreeMap, HashMap};

use crate::surface::{Size, StyleProp, Surface};
use crate::TimelineError;

/// Định danh node trong `MemorySurface`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Default, Clone)]
struct MemoryNode {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    class_name: String,
    markup: Option<String>,
    styles: BTreeMap<StyleProp, f64>,
}

/// Cây node tối giản. Kích thước đo được lấy theo class của node: token
/// class đầu tiên có kích thước đăng ký qua `with_size` sẽ được dùng.
#[derive(Debug, Default, Clone)]
pub struct MemorySurface {
    nodes: Vec<MemoryNode>,
    sizes: HashMap<String, Size>,
    measurements: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, class_token: &str, size: Size) -> Self {
        self.sizes.insert(class_token.to_string(), size);
        self
    }

    /// Tạo một node rời dùng làm lớp chứa.
    pub fn create_layer(&mut self) -> NodeId {
        self.push_node()
    }

    pub fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.node(node).children.clone()
    }

    pub fn parent_of(&self, node: &NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    pub fn class_name(&self, node: &NodeId) -> &str {
        &self.node(node).class_name
    }

    pub fn markup(&self, node: &NodeId) -> Option<&str> {
        self.node(node).markup.as_deref()
    }

    pub fn style(&self, node: &NodeId, prop: StyleProp) -> Option<f64> {
        self.node(node).styles.get(&prop).copied()
    }

    /// Số lần `measure` đã được gọi.
    pub fn measurement_count(&self) -> usize {
        self.measurements
    }

    fn push_node(&mut self) -> NodeId {
        self.nodes.push(MemoryNode::default());
        NodeId(self.nodes.len() - 1)
    }

    fn node(&self, id: &NodeId) -> &MemoryNode {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: &NodeId) -> &mut MemoryNode {
        &mut self.nodes[id.0]
    }

    fn clear_children(&mut self, node: &NodeId) {
        let children = std::mem::take(&mut self.node_mut(node).children);
        for child in children {
            self.node_mut(&child).parent = None;
        }
    }
}

impl Surface for MemorySurface {
    type Node = NodeId;

    fn create_node(&mut self) -> Result<NodeId, TimelineError> {
        Ok(self.push_node())
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) {
        self.detach(child);
        self.node_mut(parent).children.push(*child);
        self.node_mut(child).parent = Some(*parent);
    }

    fn detach(&mut self, node: &NodeId) {
        if let Some(parent) = self.node_mut(node).parent.take() {
            self.node_mut(&parent).children.retain(|child| child != node);
        }
    }

    fn is_attached(&self, node: &NodeId) -> bool {
        self.node(node).parent.is_some()
    }

    fn set_class(&mut self, node: &NodeId, class_name: &str) {
        self.node_mut(node).class_name = class_name.to_string();
    }

    fn set_markup(&mut self, node: &NodeId, markup: &str) {
        self.clear_children(node);
        self.node_mut(node).markup = Some(markup.to_string());
    }

    fn replace_children(&mut self, node: &NodeId, child: &NodeId) {
        self.clear_children(node);
        self.node_mut(node).markup = None;
        self.append_child(node, child);
    }

    fn set_style(&mut self, node: &NodeId, prop: StyleProp, value: Option<f64>) {
        let styles = &mut self.node_mut(node).styles;
        match value {
            Some(value) => {
                styles.insert(prop, value);
            }
            None => {
                styles.remove(&prop);
            }
        }
    }

    fn measure(&mut self, node: &NodeId) -> Size {
        self.measurements += 1;
        let node = &self.nodes[node.0];
        node.class_name
            .split_whitespace()
            .find_map(|token| self.sizes.get(token).copied())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn append_moves_node_between_parents() {
        let mut surface = MemorySurface::new();
        let first = surface.create_layer();
        let second = surface.create_layer();
        let child = surface.create_node().unwrap();

        surface.append_child(&first, &child);
        surface.append_child(&second, &child);

        assert!(surface.children(&first).is_empty());
        assert_eq!(surface.children(&second), vec![child]);
        assert_eq!(surface.parent_of(&child), Some(second));
    }

    #[test]
    fn markup_replaces_existing_children() {
        let mut surface = MemorySurface::new();
        let wrapper = surface.create_node().unwrap();
        let inner = surface.create_node().unwrap();
        surface.replace_children(&wrapper, &inner);

        surface.set_markup(&wrapper, "<b>x</b>");

        assert!(surface.children(&wrapper).is_empty());
        assert!(!surface.is_attached(&inner));
        assert_eq!(surface.markup(&wrapper), Some("<b>x</b>"));
    }

    #[test]
    fn measure_uses_first_registered_class_token() {
        let mut surface = MemorySurface::new().with_size("box", Size::new(40.0, 20.0));
        let node = surface.create_node().unwrap();
        surface.set_class(&node, "item box selected");

        assert_eq!(surface.measure(&node), Size::new(40.0, 20.0));
        surface.set_class(&node, "item line");
        assert_eq!(surface.measure(&node), Size::default());
        assert_eq!(surface.measurement_count(), 2);
    }

    #[test]
    fn cleared_style_is_removed() {
        let mut surface = MemorySurface::new();
        let node = surface.create_node().unwrap();
        surface.set_style(&node, StyleProp::Top, Some(4.0));
        surface.set_style(&node, StyleProp::Top, None);
        assert_eq!(surface.style(&node, StyleProp::Top), None);
    }
}
