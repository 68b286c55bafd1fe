//! Data model types

mod record;
mod schema;
mod value;

pub use record::*;
pub use schema::*;
pub use value::*;
