pub mod highlight;
pub mod scene;

pub use highlight::HighlightPlugin;
pub use scene::ScenePlugin;
