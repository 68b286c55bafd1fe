//! Filter state: the independently-editable facets of the view

mod facet;
mod store;

pub use facet::*;
pub use store::*;
