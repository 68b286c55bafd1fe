//! Query compilation
//!
//! Deterministically compiles a [`FilterState`] snapshot into a normalized
//! predicate expression and an order-by expression. The compiler is pure:
//! identical input state yields byte-identical output, which is what makes
//! the normalized predicate usable as the cache key for the count-refetch
//! decision.

use std::collections::HashSet;

use chrono::Local;
use chrono::TimeZone;

use super::build_order_by;
use super::date_literal;
use super::instant_literal;
use super::local_day_bounds;
use crate::config::ListViewConfig;
use crate::model::DataType;
use crate::model::ObjectSchema;
use crate::state::FacetMode;
use crate::state::FilterFacetState;
use crate::state::FilterState;

/// The compiled remote query: normalized predicate plus order-by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledQuery {
    /// Whitespace-normalized predicate expression; empty when no facet
    /// contributes.
    pub predicate: String,
    /// Order-by expression, never empty.
    pub order_by: String,
}

/// Compiles filter state snapshots into remote queries.
///
/// Built once from schema and configuration; holds no mutable state. The
/// timezone parameter governs how a datetime facet's single local day is
/// expanded to an instant range — the view uses [`Local`], tests use fixed
/// offsets for determinism.
///
/// # Example
///
/// ```
/// use listview_lib::ListViewConfig;
/// use listview_lib::model::{DataType, FieldDescriptor, ObjectSchema};
/// use listview_lib::query::QueryCompiler;
/// use listview_lib::state::FilterState;
///
/// let mut schema = ObjectSchema::new();
/// schema.add_field(FieldDescriptor::new("Name", DataType::Text));
///
/// let config = ListViewConfig::new("Account").with_fields_to_display("Name");
/// let compiler = QueryCompiler::new(&schema, &config, Default::default());
///
/// let compiled = compiler.compile(&FilterState::default());
/// assert_eq!(compiled.predicate, "");
/// assert_eq!(compiled.order_by, "CreatedDate DESC");
/// ```
#[derive(Debug, Clone)]
pub struct QueryCompiler<Tz: TimeZone = Local> {
    base_where: String,
    search_enabled: bool,
    /// Displayed fields eligible for free-text search, in display order.
    searchable_fields: Vec<String>,
    sortable_fields: HashSet<String>,
    timezone: Tz,
}

impl QueryCompiler<Local> {
    /// Builds a compiler from schema and configuration.
    ///
    /// The searchable field list is the displayed fields whose schema type
    /// is in the search allow-list; fields missing from the schema are not
    /// searchable.
    pub fn new(
        schema: &ObjectSchema,
        config: &ListViewConfig,
        sortable_fields: HashSet<String>,
    ) -> Self {
        let searchable_fields = config
            .displayed_fields()
            .into_iter()
            .filter(|field| {
                schema
                    .field(field)
                    .is_some_and(|d| d.data_type.is_searchable())
            })
            .collect();

        Self {
            base_where: config.where_clause.clone(),
            search_enabled: config.show_search,
            searchable_fields,
            sortable_fields,
            timezone: Local,
        }
    }
}

impl<Tz: TimeZone> QueryCompiler<Tz> {
    /// Replaces the timezone used for local-day expansion.
    pub fn with_timezone<Tz2: TimeZone>(self, timezone: Tz2) -> QueryCompiler<Tz2> {
        QueryCompiler {
            base_where: self.base_where,
            search_enabled: self.search_enabled,
            searchable_fields: self.searchable_fields,
            sortable_fields: self.sortable_fields,
            timezone,
        }
    }

    /// Returns the sortable field subset.
    pub fn sortable_fields(&self) -> &HashSet<String> {
        &self.sortable_fields
    }

    /// Compiles the current filter state into a normalized predicate and an
    /// order-by expression.
    ///
    /// Construction order is fixed: base predicate, then free-text search,
    /// then per-field filters, each sub-predicate parenthesized and
    /// AND-joined. Absent sub-predicates contribute nothing. Incomplete
    /// `between` facets are skipped, never an error.
    pub fn compile(&self, state: &FilterState) -> CompiledQuery {
        let mut predicate = self.base_where.trim().to_string();

        if self.search_enabled
            && let Some(search) = self.search_clause(state.search_term())
        {
            predicate = if predicate.is_empty() {
                search
            } else {
                format!("({predicate}) AND ({search})")
            };
        }

        if let Some(filters) = self.filter_clause(state) {
            predicate = if predicate.is_empty() {
                filters
            } else {
                format!("({predicate}) AND ({filters})")
            };
        }

        CompiledQuery {
            predicate: normalize_predicate(&predicate),
            order_by: build_order_by(state.sort(), &self.sortable_fields),
        }
    }

    /// Builds the free-text search sub-predicate: an OR-chain of
    /// `field LIKE '%term%'` over the searchable fields.
    fn search_clause(&self, term: &str) -> Option<String> {
        let term = term.trim();
        if term.is_empty() || self.searchable_fields.is_empty() {
            return None;
        }
        let escaped = term.replace('\'', "\\'").replace('%', "\\%");
        let conditions: Vec<String> = self
            .searchable_fields
            .iter()
            .map(|field| format!("{field} LIKE '%{escaped}%'"))
            .collect();
        Some(conditions.join(" OR "))
    }

    /// Builds the AND-joined per-field filter sub-predicate.
    fn filter_clause(&self, state: &FilterState) -> Option<String> {
        let mut parts = Vec::new();

        for facet in state.facets() {
            match &facet.state {
                FilterFacetState::Picklist { selected } => {
                    if selected.is_empty() {
                        continue;
                    }
                    let values: Vec<String> = selected
                        .iter()
                        .map(|v| format!("'{}'", v.replace('\'', "\\'")))
                        .collect();
                    let values = values.join(", ");
                    if facet.data_type == DataType::MultiPicklist {
                        parts.push(format!("INCLUDES({}, ({values}))", facet.field_name));
                    } else {
                        parts.push(format!("{} IN ({values})", facet.field_name));
                    }
                }
                FilterFacetState::Date(f) => match f.mode {
                    FacetMode::On => {
                        if let Some(day) = f.on {
                            parts.push(format!(
                                "{} = {}",
                                facet.field_name,
                                date_literal(Some(day))
                            ));
                        }
                    }
                    FacetMode::Between => {
                        if let (Some(a), Some(b)) = (f.start, f.end) {
                            let (start, end) = if a <= b { (a, b) } else { (b, a) };
                            parts.push(format!(
                                "({field} >= {} AND {field} <= {})",
                                date_literal(Some(start)),
                                date_literal(Some(end)),
                                field = facet.field_name,
                            ));
                        }
                    }
                },
                FilterFacetState::DateTime(f) => match f.mode {
                    FacetMode::On => {
                        if let Some(day) = f.on {
                            let bounds = local_day_bounds(day, &self.timezone);
                            let (start, end) = match &bounds {
                                Some((s, e)) => {
                                    (instant_literal(Some(s)), instant_literal(Some(e)))
                                }
                                None => (
                                    instant_literal::<Tz>(None),
                                    instant_literal::<Tz>(None),
                                ),
                            };
                            parts.push(format!(
                                "({field} >= {start} AND {field} <= {end})",
                                field = facet.field_name,
                            ));
                        }
                    }
                    FacetMode::Between => {
                        if let (Some(a), Some(b)) = (&f.start, &f.end) {
                            let (start, end) = if a <= b { (a, b) } else { (b, a) };
                            parts.push(format!(
                                "({field} >= {} AND {field} <= {})",
                                instant_literal(Some(start)),
                                instant_literal(Some(end)),
                                field = facet.field_name,
                            ));
                        }
                    }
                },
            }
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" AND "))
        }
    }
}

/// Whitespace-normalizes a predicate so equality comparison against the
/// previously executed predicate is reliable.
///
/// Collapses runs of whitespace to a single space, trims, and removes the
/// space adjacent to parentheses. Purely lexical, never semantic.
pub fn normalize_predicate(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.replace("( ", "(").replace(" )", ")")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use chrono::Utc;

    use crate::columns::FacetConfig;
    use crate::columns::FacetKind;
    use crate::model::FieldDescriptor;
    use crate::model::PicklistOption;
    use crate::query::Direction;
    use crate::state::DateFacetPatch;

    fn schema() -> ObjectSchema {
        let mut schema = ObjectSchema::new();
        schema.add_field(FieldDescriptor::new("Name", DataType::Text));
        schema.add_field(FieldDescriptor::new("Industry", DataType::Picklist));
        schema.add_field(FieldDescriptor::new("Tags__c", DataType::MultiPicklist));
        schema.add_field(FieldDescriptor::new("CloseDate", DataType::Date));
        schema.add_field(FieldDescriptor::new("LastSeen", DataType::DateTime));
        schema.add_field(FieldDescriptor::new("AnnualRevenue", DataType::Currency));
        schema
    }

    fn facet_configs() -> Vec<FacetConfig> {
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
                field_name: "Tags__c".to_string(),
                label: "Tags".to_string(),
                data_type: DataType::MultiPicklist,
                kind: FacetKind::Picklist {
                    options: vec![PicklistOption::new("Hot", "Hot")],
                },
            },
            FacetConfig {
                field_name: "CloseDate".to_string(),
                label: "Close Date".to_string(),
                data_type: DataType::Date,
                kind: FacetKind::Date,
            },
            FacetConfig {
                field_name: "LastSeen".to_string(),
                label: "Last Seen".to_string(),
                data_type: DataType::DateTime,
                kind: FacetKind::DateTime,
            },
        ]
    }

    fn compiler(config: ListViewConfig) -> QueryCompiler<Utc> {
        let sortable: HashSet<String> = config
            .sortable_field_names()
            .into_iter()
            .collect();
        QueryCompiler::new(&schema(), &config, sortable).with_timezone(Utc)
    }

    fn state() -> FilterState {
        FilterState::new(&facet_configs(), 25)
    }

    #[test]
    fn test_empty_state_compiles_to_empty_predicate_and_default_order() {
        let compiler = compiler(
            ListViewConfig::new("Account").with_fields_to_display("Name,Industry"),
        );
        let compiled = compiler.compile(&state());
        assert_eq!(compiled.predicate, "");
        assert_eq!(compiled.order_by, "CreatedDate DESC");
    }

    #[test]
    fn test_sort_on_non_sortable_field_falls_back() {
        let compiler = compiler(
            ListViewConfig::new("Account")
                .with_fields_to_display("Name,Industry")
                .with_sortable_fields("Name"),
        );
        let mut state = state();
        state.set_sort("Industry", Direction::Asc);
        assert_eq!(compiler.compile(&state).order_by, "CreatedDate DESC");

        state.set_sort("Name", Direction::Desc);
        assert_eq!(compiler.compile(&state).order_by, "Name DESC");
    }

    #[test]
    fn test_picklist_filter() {
        let compiler = compiler(ListViewConfig::new("Account"));
        let mut state = state();
        state.set_picklist_selection("Industry", ["Tech", "Finance"]);
        assert_eq!(
            compiler.compile(&state).predicate,
            "Industry IN ('Tech', 'Finance')"
        );
    }

    #[test]
    fn test_multipicklist_uses_includes() {
        let compiler = compiler(ListViewConfig::new("Account"));
        let mut state = state();
        state.set_picklist_selection("Tags__c", ["Hot"]);
        assert_eq!(
            compiler.compile(&state).predicate,
            "INCLUDES(Tags__c, ('Hot'))"
        );
    }

    #[test]
    fn test_picklist_value_quote_escaping() {
        let compiler = compiler(ListViewConfig::new("Account"));
        let mut state = state();
        state.set_picklist_selection("Industry", ["O'Brien & Co"]);
        assert_eq!(
            compiler.compile(&state).predicate,
            "Industry IN ('O\\'Brien & Co')"
        );
    }

    #[test]
    fn test_reversed_date_range_is_swapped() {
        let compiler = compiler(ListViewConfig::new("Account"));
        let mut reversed = state();
        reversed.set_date_facet("CloseDate", DateFacetPatch::Mode(FacetMode::Between));
        reversed.set_date_facet(
            "CloseDate",
            DateFacetPatch::Start(Some("2024-02-01".parse().unwrap())),
        );
        reversed.set_date_facet(
            "CloseDate",
            DateFacetPatch::End(Some("2024-01-01".parse().unwrap())),
        );

        let mut forward = state();
        forward.set_date_facet("CloseDate", DateFacetPatch::Mode(FacetMode::Between));
        forward.set_date_facet(
            "CloseDate",
            DateFacetPatch::Start(Some("2024-01-01".parse().unwrap())),
        );
        forward.set_date_facet(
            "CloseDate",
            DateFacetPatch::End(Some("2024-02-01".parse().unwrap())),
        );

        let compiled = compiler.compile(&reversed);
        assert_eq!(
            compiled.predicate,
            "(CloseDate >= 2024-01-01 AND CloseDate <= 2024-02-01)"
        );
        // Output is identical whichever side the caller labeled "start".
        assert_eq!(compiled, compiler.compile(&forward));
    }

    #[test]
    fn test_date_on_mode() {
        let compiler = compiler(ListViewConfig::new("Account"));
        let mut state = state();
        state.set_date_facet(
            "CloseDate",
            DateFacetPatch::Day(Some("2024-03-15".parse().unwrap())),
        );
        assert_eq!(compiler.compile(&state).predicate, "CloseDate = 2024-03-15");
    }

    #[test]
    fn test_incomplete_between_is_omitted() {
        let compiler = compiler(ListViewConfig::new("Account"));
        let mut state = state();
        state.set_date_facet("CloseDate", DateFacetPatch::Mode(FacetMode::Between));
        state.set_date_facet(
            "CloseDate",
            DateFacetPatch::Start(Some("2024-01-01".parse().unwrap())),
        );
        assert!(state.is_apply_blocked());
        assert_eq!(compiler.compile(&state).predicate, "");
    }

    #[test]
    fn test_datetime_on_expands_local_day() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let compiler = compiler(ListViewConfig::new("Account")).with_timezone(tz);
        let mut state = state();
        state.set_date_facet(
            "LastSeen",
            DateFacetPatch::Day(Some("2024-02-01".parse().unwrap())),
        );
        assert_eq!(
            compiler.compile(&state).predicate,
            "(LastSeen >= 2024-01-31T22:00:00Z AND LastSeen <= 2024-02-01T21:59:59Z)"
        );
    }

    #[test]
    fn test_datetime_between_swaps_and_converts_to_utc() {
        let compiler = compiler(ListViewConfig::new("Account"));
        let mut state = state();
        state.set_date_facet("LastSeen", DateFacetPatch::Mode(FacetMode::Between));
        state.set_date_facet(
            "LastSeen",
            DateFacetPatch::InstantStart(Some("2024-02-01T12:00:00+02:00".parse().unwrap())),
        );
        state.set_date_facet(
            "LastSeen",
            DateFacetPatch::InstantEnd(Some("2024-01-01T00:00:00Z".parse().unwrap())),
        );
        assert_eq!(
            compiler.compile(&state).predicate,
            "(LastSeen >= 2024-01-01T00:00:00Z AND LastSeen <= 2024-02-01T10:00:00Z)"
        );
    }

    #[test]
    fn test_search_clause_escapes_quotes_and_percent() {
        let compiler = compiler(
            ListViewConfig::new("Account")
                .with_fields_to_display("Name,AnnualRevenue")
                .with_search(true),
        );
        let mut state = state();
        state.set_search_term("O'Brien");
        // AnnualRevenue is currency, not searchable; only Name matches.
        assert_eq!(
            compiler.compile(&state).predicate,
            "Name LIKE '%O\\'Brien%'"
        );

        state.set_search_term("50%");
        assert_eq!(compiler.compile(&state).predicate, "Name LIKE '%50\\%%'");
    }

    #[test]
    fn test_search_disabled_emits_nothing() {
        let compiler = compiler(ListViewConfig::new("Account").with_fields_to_display("Name"));
        let mut state = state();
        state.set_search_term("contoso");
        assert_eq!(compiler.compile(&state).predicate, "");
    }

    #[test]
    fn test_whitespace_only_term_emits_nothing() {
        let compiler = compiler(
            ListViewConfig::new("Account")
                .with_fields_to_display("Name")
                .with_search(true),
        );
        let mut state = state();
        state.set_search_term("   ");
        assert_eq!(compiler.compile(&state).predicate, "");
    }

    #[test]
    fn test_base_search_and_filters_compose_in_order() {
        let compiler = compiler(
            ListViewConfig::new("Account")
                .with_fields_to_display("Name,Industry")
                .with_where_clause("IsDeleted = false")
                .with_search(true),
        );
        let mut state = state();
        state.set_search_term("corp");
        state.set_picklist_selection("Industry", ["Tech"]);

        assert_eq!(
            compiler.compile(&state).predicate,
            "((IsDeleted = false) AND (Name LIKE '%corp%' OR Industry LIKE '%corp%')) \
             AND (Industry IN ('Tech'))"
        );
    }

    #[test]
    fn test_compile_is_pure_and_deterministic() {
        let compiler = compiler(
            ListViewConfig::new("Account")
                .with_fields_to_display("Name,Industry")
                .with_search(true),
        );
        let mut state = state();
        state.set_search_term("acme");
        state.set_picklist_selection("Industry", ["Tech", "Finance"]);

        let first = compiler.compile(&state);
        let second = compiler.compile(&state);
        assert_eq!(first, second);
    }

    #[test]
    fn test_normalize_predicate() {
        assert_eq!(
            normalize_predicate("  ( Name   = 'x' )   AND (  Y = 2 ) "),
            "(Name = 'x') AND (Y = 2)"
        );
        assert_eq!(normalize_predicate(""), "");
    }
}
