//! Cut-rectangle computation and pixel extraction.

mod expand;
mod extract;

pub use expand::{allowance, expand_bounds};
pub use extract::extract;
