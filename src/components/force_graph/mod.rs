mod component;
mod render;
mod state;
mod types;
mod view;

pub use component::ForceGraphCanvas;
pub use types::{GraphData, GraphLink, GraphNode};
pub use view::RiverView;
