pub mod session;
pub mod tap;

pub use tap::TapPlugin;
