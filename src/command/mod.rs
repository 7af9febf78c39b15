mod validate;

pub use validate::{normalize, validate};
