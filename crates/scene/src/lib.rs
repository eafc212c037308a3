#![deny(unsafe_code)]
//! Scene composition and markup for the inkwash landscape generator.
//!
//! Wraps the shapes from `inkwash-core` into a small tree of renderable
//! nodes (leaf [`Element`], flattened [`Composite`], tagged [`Chunk`]),
//! provides the `generate_scene` call surface over the kind recipes, and an
//! ordered [`Scene`] layer stack whose layers may be serialized in parallel.

pub mod element;
pub mod generate;
pub mod kind;
pub mod layer;
pub mod markup;
pub mod node;
pub mod recipes;
pub mod shapes;

pub use element::{Element, Shape, Style};
pub use generate::{generate_from_spec, generate_scene};
pub use kind::SceneKind;
pub use layer::{Layer, Scene};
pub use node::{Chunk, Composite, Render, SceneNode};
