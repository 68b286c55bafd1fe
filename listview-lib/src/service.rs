//! External data service boundary

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::DataError;
use crate::model::ObjectSchema;
use crate::model::PicklistOption;
use crate::model::Record;

/// The remote data and metadata services the list view depends on.
///
/// Implementations wrap whatever transport the hosting platform provides.
/// The engine never interprets transport concerns; failures surface as
/// [`DataError`] and are handled locally (toast + safe empty state), never
/// propagated to the host as faults.
#[async_trait]
pub trait DataService: Send + Sync {
    /// Total number of records of `object` matching `predicate` (empty
    /// predicate means all records).
    async fn fetch_record_count(&self, object: &str, predicate: &str)
    -> Result<u64, DataError>;

    /// Fetches one page of records.
    async fn fetch_record_page(
        &self,
        object: &str,
        fields: &[String],
        predicate: &str,
        limit: u32,
        offset: u64,
        order_by: &str,
    ) -> Result<Vec<Record>, DataError>;

    /// Fetches field metadata for an object type.
    async fn fetch_schema(&self, object: &str) -> Result<ObjectSchema, DataError>;

    /// Fetches record-type-scoped picklist values, keyed by field name.
    async fn fetch_picklist_values(
        &self,
        object: &str,
        record_type_id: &str,
    ) -> Result<HashMap<String, Vec<PicklistOption>>, DataError>;
}
