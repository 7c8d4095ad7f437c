mod escape;
mod render;
mod report;

pub use escape::*;
pub use render::*;
pub use report::*;
