//! Filter state store

use serde::Deserialize;
use serde::Serialize;

use super::DateFacet;
use super::DateFacetPatch;
use super::DateTimeFacet;
use super::FilterFacetState;
use crate::columns::FacetConfig;
use crate::columns::FacetKind;
use crate::config::DEFAULT_PAGE_SIZE;
use crate::model::DataType;
use crate::query::Direction;
use crate::query::SortSpec;

/// One filterable field with its current facet state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterFacet {
    /// API name of the field.
    pub field_name: String,
    /// The field's data type (decides `IN` versus `INCLUDES`, date versus
    /// instant literals).
    pub data_type: DataType,
    /// Current facet state.
    pub state: FilterFacetState,
}

/// The independently-editable facets of the list view.
///
/// Owns all facet state exclusively. Mutations are synchronous and have no
/// side effects beyond the in-memory update; fetching is the orchestrator's
/// responsibility, invoked explicitly after a mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    search_term: String,
    facets: Vec<FilterFacet>,
    sort: Option<SortSpec>,
    page_size: u32,
    current_page: u64,
}

impl FilterState {
    /// Creates a cleared state for the given facet configuration.
    ///
    /// The facet list is built once here, in configured order, and never
    /// restructured afterwards; only its values are mutated.
    pub fn new(configs: &[FacetConfig], page_size: u32) -> Self {
        let facets = configs
            .iter()
            .map(|config| FilterFacet {
                field_name: config.field_name.clone(),
                data_type: config.data_type,
                state: match &config.kind {
                    FacetKind::Picklist { .. } => FilterFacetState::empty_picklist(),
                    FacetKind::Date => FilterFacetState::Date(DateFacet::default()),
                    FacetKind::DateTime => FilterFacetState::DateTime(DateTimeFacet::default()),
                },
            })
            .collect();

        Self {
            search_term: String::new(),
            facets,
            sort: None,
            page_size: if page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size
            },
            current_page: 1,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current free-text search term.
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// All facets, in configured order.
    pub fn facets(&self) -> &[FilterFacet] {
        &self.facets
    }

    /// Looks up a facet by field name.
    pub fn facet(&self, field_name: &str) -> Option<&FilterFacet> {
        self.facets.iter().find(|f| f.field_name == field_name)
    }

    /// Current sort request, if any.
    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    /// Current page size.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Current page, 1-based.
    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Sets the free-text search term.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Replaces the selection of a picklist facet, deduplicating while
    /// preserving the given order. Ignored for non-picklist facets.
    pub fn set_picklist_selection<I, S>(&mut self, field_name: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let Some(facet) = self.facet_mut(field_name) else {
            return;
        };
        if let FilterFacetState::Picklist { selected } = &mut facet.state {
            selected.clear();
            for value in values {
                let value = value.into();
                if !selected.contains(&value) {
                    selected.push(value);
                }
            }
        }
    }

    /// Applies a patch to a date/datetime facet. Unknown fields and
    /// mismatched patches are ignored.
    pub fn set_date_facet(&mut self, field_name: &str, patch: DateFacetPatch) {
        if let Some(facet) = self.facet_mut(field_name) {
            facet.state.apply_patch(patch);
        }
    }

    /// Requests a column sort. Validation against the sortable subset
    /// happens at compile time; an invalid field simply falls back to the
    /// default order.
    pub fn set_sort(&mut self, field: impl Into<String>, direction: Direction) {
        self.sort = Some(SortSpec::new(field, direction));
    }

    /// Clears the sort request.
    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    /// Sets the page size. Zero is ignored.
    pub fn set_page_size(&mut self, page_size: u32) {
        if page_size > 0 {
            self.page_size = page_size;
        }
    }

    /// Sets the current page (1-based). Zero is treated as page 1.
    pub fn set_page(&mut self, page: u64) {
        self.current_page = page.max(1);
    }

    /// Resets every facet to its cleared state.
    ///
    /// Facet configuration (which fields are filterable) is untouched, as
    /// are sort and page size.
    pub fn clear_all_filters(&mut self) {
        for facet in &mut self.facets {
            facet.state.clear();
        }
    }

    /// Returns `true` while any `between` facet has exactly one side
    /// populated. The apply action must stay disabled until every range is
    /// complete or cleared.
    pub fn is_apply_blocked(&self) -> bool {
        self.facets
            .iter()
            .any(|f| f.state.is_incomplete_between())
    }

    fn facet_mut(&mut self, field_name: &str) -> Option<&mut FilterFacet> {
        self.facets.iter_mut().find(|f| f.field_name == field_name)
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(&[], DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PicklistOption;
    use crate::state::FacetMode;

    fn configs() -> Vec<FacetConfig> {
        vec![
            FacetConfig {
                field_name: "Industry".to_string(),
                label: "Industry".to_string(),
                data_type: DataType::Picklist,
                kind: FacetKind::Picklist {
                    options: vec![
                        PicklistOption::new("Technology", "Tech"),
                        PicklistOption::new("Finance", "Finance"),
                    ],
                },
            },
            FacetConfig {
                field_name: "CloseDate".to_string(),
                label: "Close Date".to_string(),
                data_type: DataType::Date,
                kind: FacetKind::Date,
            },
        ]
    }

    #[test]
    fn test_picklist_selection_dedupes_and_keeps_order() {
        let mut state = FilterState::new(&configs(), 25);
        state.set_picklist_selection("Industry", ["Tech", "Finance", "Tech"]);
        let facet = state.facet("Industry").unwrap();
        let FilterFacetState::Picklist { selected } = &facet.state else {
            panic!("expected picklist facet");
        };
        assert_eq!(selected, &["Tech", "Finance"]);
    }

    #[test]
    fn test_apply_blocked_on_half_open_range() {
        let mut state = FilterState::new(&configs(), 25);
        assert!(!state.is_apply_blocked());

        state.set_date_facet("CloseDate", DateFacetPatch::Mode(FacetMode::Between));
        state.set_date_facet(
            "CloseDate",
            DateFacetPatch::Start(Some("2024-01-01".parse().unwrap())),
        );
        assert!(state.is_apply_blocked());

        state.set_date_facet(
            "CloseDate",
            DateFacetPatch::End(Some("2024-02-01".parse().unwrap())),
        );
        assert!(!state.is_apply_blocked());
    }

    #[test]
    fn test_clear_all_filters_keeps_configuration_sort_and_page_size() {
        let mut state = FilterState::new(&configs(), 50);
        state.set_picklist_selection("Industry", ["Tech"]);
        state.set_date_facet(
            "CloseDate",
            DateFacetPatch::Day(Some("2024-01-01".parse().unwrap())),
        );
        state.set_sort("Name", Direction::Asc);

        state.clear_all_filters();

        assert_eq!(state.facets().len(), 2);
        assert!(state.facets().iter().all(|f| f.state.is_empty()));
        assert!(state.sort().is_some());
        assert_eq!(state.page_size(), 50);
    }

    #[test]
    fn test_set_page_clamps_zero_to_one() {
        let mut state = FilterState::default();
        state.set_page(0);
        assert_eq!(state.current_page(), 1);
        state.set_page_size(0);
        assert_eq!(state.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_unknown_field_mutations_are_ignored() {
        let mut state = FilterState::new(&configs(), 25);
        state.set_picklist_selection("Nope", ["x"]);
        state.set_date_facet("Nope", DateFacetPatch::Mode(FacetMode::Between));
        assert!(!state.is_apply_blocked());
    }
}
