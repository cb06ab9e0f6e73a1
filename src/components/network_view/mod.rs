mod adapter;
pub mod bindings;
mod canvas;
pub mod color;
mod component;
pub mod config;
mod engine;
mod error;
mod render;
mod state;
mod types;

pub use adapter::NetworkView;
pub use canvas::{CanvasEngine, DomLookup};
pub use component::NetworkPanel;
pub use engine::{ContainerLookup, NodeClickHandler, RenderEngine};
pub use error::ViewError;
pub use state::{EdgeKey, NodeKey};
pub use types::{Bounds, EdgeId, GraphData, GraphLink, GraphNode, Label, NodeAttributes, NodeId, NodeState};
