//! Scene and layer stack.
//!
//! A [`Scene`] holds dimensions and an ordered stack of [`Layer`]s. Layers
//! are identified by unique names and rendered bottom-to-top (index 0 =
//! bottom). Serializing layers is independent per layer, so
//! [`Scene::render_parallel`] spreads it over the rayon pool and reassembles
//! the fragments by layer index.

use inkwash_core::InkError;
use rayon::prelude::*;

use crate::node::{Render, SceneNode};

/// A named list of scene nodes rendered in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    name: String,
    visible: bool,
    nodes: Vec<SceneNode>,
}

impl Layer {
    /// Creates an empty, visible layer.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            nodes: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Returns the layer with the given visibility.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Appends a node on top of the existing ones.
    pub fn push(&mut self, node: impl Into<SceneNode>) {
        self.nodes.push(node.into());
    }

    /// Builder form of [`Layer::push`].
    pub fn with(mut self, node: impl Into<SceneNode>) -> Self {
        self.push(node);
        self
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    /// Markup of every node, or an empty string when hidden.
    pub fn render(&self) -> String {
        if !self.visible {
            return String::new();
        }
        self.nodes.iter().map(Render::render).collect()
    }
}

/// A drawing surface with an ordered layer stack.
///
/// Layers are stored bottom-to-top. Layer names must be unique.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    width: f64,
    height: f64,
    layers: Vec<Layer>,
}

impl Scene {
    /// Returns `InkError::InvalidParameter` unless both dimensions are
    /// finite and positive.
    pub fn new(width: f64, height: f64) -> Result<Self, InkError> {
        for (name, value) in [("width", width), ("height", height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(InkError::InvalidParameter {
                    name: name.into(),
                    reason: format!("must be finite and positive, got {value}"),
                });
            }
        }
        Ok(Self {
            width,
            height,
            layers: Vec::new(),
        })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Returns all layers, bottom-to-top.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Adds a layer to the top of the stack.
    ///
    /// Returns `InkError::DuplicateLayerName` if the name is taken.
    pub fn add_layer(&mut self, layer: Layer) -> Result<(), InkError> {
        if self.layers.iter().any(|l| l.name == layer.name) {
            return Err(InkError::DuplicateLayerName(layer.name));
        }
        self.layers.push(layer);
        Ok(())
    }

    /// Removes a layer by name and returns it.
    pub fn remove_layer(&mut self, name: &str) -> Result<Layer, InkError> {
        let idx = self.index_of(name)?;
        Ok(self.layers.remove(idx))
    }

    pub fn layer(&self, name: &str) -> Result<&Layer, InkError> {
        self.layers
            .iter()
            .find(|l| l.name == name)
            .ok_or_else(|| InkError::LayerNotFound(name.to_string()))
    }

    pub fn layer_mut(&mut self, name: &str) -> Result<&mut Layer, InkError> {
        self.layers
            .iter_mut()
            .find(|l| l.name == name)
            .ok_or_else(|| InkError::LayerNotFound(name.to_string()))
    }

    /// Moves a layer to `index`; an index past the top moves it to the top.
    pub fn move_layer_to(&mut self, name: &str, index: usize) -> Result<(), InkError> {
        let idx = self.index_of(name)?;
        let layer = self.layers.remove(idx);
        let target = index.min(self.layers.len());
        self.layers.insert(target, layer);
        Ok(())
    }

    /// Sequential render: every layer's markup, bottom layer first.
    pub fn render(&self) -> String {
        self.layers.iter().map(Layer::render).collect()
    }

    /// Renders each layer on the rayon pool. The returned fragments are in
    /// layer order regardless of which worker finished first.
    #[tracing::instrument(skip(self), fields(layers = self.layers.len()))]
    pub fn render_layers_parallel(&self) -> Vec<String> {
        self.layers.par_iter().map(Layer::render).collect()
    }

    /// Parallel equivalent of [`Scene::render`]; the output is identical.
    pub fn render_parallel(&self) -> String {
        self.render_layers_parallel().concat()
    }

    fn index_of(&self, name: &str) -> Result<usize, InkError> {
        self.layers
            .iter()
            .position(|l| l.name == name)
            .ok_or_else(|| InkError::LayerNotFound(name.to_string()))
    }
}
