mod conllu;
mod emotion;
mod loader;
mod matrix;
mod score;
mod transcript;

pub use conllu::*;
pub use emotion::*;
pub use loader::*;
pub use matrix::*;
pub use score::*;
pub use transcript::*;
