pub mod iterative;

pub use iterative::IterativeResolver;
