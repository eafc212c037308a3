//! The scene composition tree: leaf elements, flattened composites and
//! tagged, positioned chunks.
//!
//! Every node renders through the one [`Render`] capability. Children render
//! in insertion order; there is no z-index, so callers layer shapes purely by
//! the order in which they add them.

use inkwash_core::{bounding_box, BoundingBox, InkError, Point};

use crate::element::Element;
use crate::kind::SceneKind;

/// Anything that serializes to a markup fragment.
pub trait Render {
    fn render(&self) -> String;
}

/// An ordered, flat list of leaf elements built by one generator call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Composite {
    elements: Vec<Element>,
}

impl Composite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node. Composites and chunks contribute their elements
    /// rather than nesting, so the list stays one level deep.
    pub fn add(&mut self, node: impl Into<SceneNode>) {
        match node.into() {
            SceneNode::Leaf(element) => self.elements.push(element),
            SceneNode::Composite(composite) => self.elements.extend(composite.elements),
            SceneNode::Chunk(chunk) => self.elements.extend(chunk.body.elements),
        }
    }

    /// Builder form of [`Composite::add`].
    pub fn with(mut self, node: impl Into<SceneNode>) -> Self {
        self.add(node);
        self
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Bounding box of every polygon point. Text is ignored.
    ///
    /// Returns `InkError::InsufficientPoints` if there are no polygon points.
    pub fn bounds(&self) -> Result<BoundingBox, InkError> {
        let points: Vec<Point> = self
            .elements
            .iter()
            .filter_map(Element::points)
            .flatten()
            .copied()
            .collect();
        bounding_box(&points)
    }
}

impl Render for Composite {
    fn render(&self) -> String {
        self.elements.iter().map(Render::render).collect()
    }
}

/// One placed scene object: a composite tagged with its kind and anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    kind: SceneKind,
    x: f64,
    y: f64,
    body: Composite,
}

impl Chunk {
    pub fn new(kind: SceneKind, x: f64, y: f64, body: Composite) -> Self {
        Self { kind, x, y, body }
    }

    pub fn kind(&self) -> SceneKind {
        self.kind
    }

    /// Anchor position.
    pub fn anchor(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn body(&self) -> &Composite {
        &self.body
    }

    pub fn elements(&self) -> &[Element] {
        self.body.elements()
    }
}

impl Render for Chunk {
    fn render(&self) -> String {
        self.body.render()
    }
}

/// A node of the scene tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    Leaf(Element),
    Composite(Composite),
    Chunk(Chunk),
}

impl SceneNode {
    /// All leaf elements below this node, in render order.
    pub fn elements(&self) -> &[Element] {
        match self {
            SceneNode::Leaf(element) => std::slice::from_ref(element),
            SceneNode::Composite(composite) => composite.elements(),
            SceneNode::Chunk(chunk) => chunk.elements(),
        }
    }
}

impl Render for SceneNode {
    fn render(&self) -> String {
        match self {
            SceneNode::Leaf(element) => element.render(),
            SceneNode::Composite(composite) => composite.render(),
            SceneNode::Chunk(chunk) => chunk.render(),
        }
    }
}

impl From<Element> for SceneNode {
    fn from(element: Element) -> Self {
        SceneNode::Leaf(element)
    }
}

impl From<Composite> for SceneNode {
    fn from(composite: Composite) -> Self {
        SceneNode::Composite(composite)
    }
}

impl From<Chunk> for SceneNode {
    fn from(chunk: Chunk) -> Self {
        SceneNode::Chunk(chunk)
    }
}
