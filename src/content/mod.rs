//! Placeable content: which image comes next and how it is shaded

mod cycle;
mod material;

pub use cycle::{ContentCycle, ContentId};
pub use material::{MaterialUniform, UnlitMaterial};
