pub mod builder;
pub mod flatten;
pub mod multi_zipper;
pub mod node;
pub mod traverse;
pub mod zipper;

pub use multi_zipper::MultiZipper;
pub use node::{NonNullViolation, ResultNode};
pub use zipper::{NodePosition, ResultNodeZipper};

#[cfg(test)]
pub(crate) mod test_nodes;
