mod builder;

pub use builder::{PathBuilder, PathError, PATH_MAX, SEPARATOR};
