mod detection;
mod recognition;

pub use detection::*;
pub use recognition::*;
