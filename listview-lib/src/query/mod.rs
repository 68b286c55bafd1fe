//! Query compilation: predicate and order-by derivation

mod compile;
mod literal;
mod order;

pub use compile::*;
pub use literal::*;
pub use order::*;
