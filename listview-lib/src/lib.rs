//! Record list-view query engine
//!
//! A configurable record list view for low-code platforms: given an object
//! type, a set of fields, and declarative configuration, it reconciles
//! independently-changing facets (free-text search, column sort, per-field
//! filters, page size, page number) into a single consistent remote query,
//! decides when an expensive total-count refetch is required versus a cheap
//! page refetch, and keeps pagination consistent when the result set shrinks
//! out from under the current page.
//!
//! Remote data access goes through the [`DataService`] trait; rendering and
//! navigation stay with the host, which observes [`view::ListViewEvent`]s.

pub mod columns;
pub mod config;
pub mod error;
pub mod model;
pub mod paging;
pub mod query;
pub mod service;
pub mod state;
pub mod view;

pub use config::ListViewConfig;
pub use service::DataService;
pub use view::ListView;
pub use view::ListViewEvent;
