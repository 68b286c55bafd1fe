//! The list-view engine: fetch orchestration and render state
//!
//! [`ListView`] owns the reconciled query state and drives the fetch
//! lifecycle: it compiles the current filter state, asks the pagination
//! reconciler whether a count refetch is needed, runs the count and page
//! requests concurrently, and applies the results atomically. Debounced
//! triggers (search keystrokes, apply-filters clicks) arm a [`Debounce`]
//! that posts a [`FetchIntent`] on the intent channel; the host drains
//! intents and hands them back to [`ListView::handle_intent`].

mod debounce;
mod events;

pub use debounce::*;
pub use events::*;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use log::error;
use log::warn;
use tokio::sync::mpsc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use crate::columns::ColumnSpec;
use crate::columns::FacetConfig;
use crate::columns::derive_columns;
use crate::columns::derive_facet_configs;
use crate::config::ListViewConfig;
use crate::error::Error;
use crate::error::SchemaError;
use crate::model::ObjectSchema;
use crate::model::Record;
use crate::paging;
use crate::query::Direction;
use crate::query::QueryCompiler;
use crate::service::DataService;
use crate::state::DateFacetPatch;
use crate::state::FilterState;

/// Debounce interval for free-text search keystrokes.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Debounce interval for apply-filters clicks (absorbs double-clicks).
pub const APPLY_DEBOUNCE: Duration = Duration::from_millis(250);

/// Available page sizes offered to the user.
pub const PAGE_SIZE_OPTIONS: [u32; 4] = [10, 25, 50, 100];

/// A deferred fetch trigger produced by a debounce timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchIntent {
    /// The search term settled.
    Search,
    /// The apply-filters action settled.
    ApplyFilters,
}

/// The record list-view engine.
///
/// All mutation handlers are synchronous `&mut self` methods; fetching is
/// async and applies its result at a single resumption point. Each fetch
/// cycle is sequence-stamped so a superseded cycle never overwrites fresher
/// state.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use listview_lib::{DataService, ListView, ListViewConfig};
///
/// # async fn demo(service: Arc<dyn DataService>) {
/// let config = ListViewConfig::new("Account")
///     .with_fields_to_display("Name,Industry")
///     .with_filter_fields("Industry")
///     .with_search(true);
///
/// let mut view = ListView::new(config, service);
/// let mut events = view.take_events().unwrap();
/// view.initialize().await;
///
/// for record in view.records() {
///     println!("{:?}", record.get_string("Name"));
/// }
/// # }
/// ```
pub struct ListView {
    config: ListViewConfig,
    service: Arc<dyn DataService>,

    schema: Option<ObjectSchema>,
    columns: Vec<ColumnSpec>,
    facet_configs: Vec<FacetConfig>,
    sortable_fields: HashSet<String>,
    compiler: Option<QueryCompiler>,

    state: FilterState,

    records: Vec<Record>,
    total_records: u64,
    total_pages: u64,
    is_loading: bool,
    error: Option<String>,
    show_filter_panel: bool,

    /// Normalized predicate of the last successful fetch; `None` forces a
    /// recount on the next cycle.
    last_predicate: Option<String>,
    last_page_size: Option<u32>,

    /// Monotonic fetch-cycle stamp; only the newest cycle applies state.
    fetch_seq: u64,

    search_debounce: Debounce,
    apply_debounce: Debounce,

    events_tx: UnboundedSender<ListViewEvent>,
    events_rx: Option<UnboundedReceiver<ListViewEvent>>,
    intent_tx: UnboundedSender<FetchIntent>,
    intent_rx: Option<UnboundedReceiver<FetchIntent>>,
}

impl ListView {
    /// Creates an engine for the given configuration and data service.
    ///
    /// No fetching happens until [`initialize`](Self::initialize).
    pub fn new(config: ListViewConfig, service: Arc<dyn DataService>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        let page_size = config.page_size;

        Self {
            config,
            service,
            schema: None,
            columns: Vec::new(),
            facet_configs: Vec::new(),
            sortable_fields: HashSet::new(),
            compiler: None,
            state: FilterState::new(&[], page_size),
            records: Vec::new(),
            total_records: 0,
            total_pages: 1,
            is_loading: false,
            error: None,
            show_filter_panel: false,
            last_predicate: None,
            last_page_size: None,
            fetch_seq: 0,
            search_debounce: Debounce::new(),
            apply_debounce: Debounce::new(),
            events_tx,
            events_rx: Some(events_rx),
            intent_tx,
            intent_rx: Some(intent_rx),
        }
    }

    /// Takes the event receiver. Returns `None` after the first call.
    pub fn take_events(&mut self) -> Option<UnboundedReceiver<ListViewEvent>> {
        self.events_rx.take()
    }

    /// Takes the fetch-intent receiver. Returns `None` after the first call.
    ///
    /// The host drains this channel and passes each intent to
    /// [`handle_intent`](Self::handle_intent).
    pub fn take_intents(&mut self) -> Option<UnboundedReceiver<FetchIntent>> {
        self.intent_rx.take()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Loads schema and picklist metadata, derives columns and filter
    /// facets, and performs the first record load.
    ///
    /// Schema failure is fatal for this cycle: it surfaces a toast and
    /// leaves the view in a safe empty state. Picklist failure is not:
    /// filtering falls back to object-level values.
    pub async fn initialize(&mut self) {
        let object = self.config.object_api_name.clone();
        let service = Arc::clone(&self.service);

        let schema = match service.fetch_schema(&object).await {
            Ok(schema) => schema,
            Err(source) => {
                self.handle_error(
                    "Failed to load object information",
                    &Error::Schema(SchemaError::load(&object, source)),
                );
                return;
            }
        };

        let displayed = self.config.displayed_fields();
        let display_set: HashSet<&str> = displayed.iter().map(String::as_str).collect();
        self.sortable_fields = self
            .config
            .sortable_field_names()
            .into_iter()
            .filter(|f| display_set.contains(f.as_str()))
            .collect();

        self.columns = derive_columns(&schema, &displayed, &self.sortable_fields);

        let record_type_picklists = match &schema.default_record_type_id {
            Some(record_type_id) => {
                match service.fetch_picklist_values(&object, record_type_id).await {
                    Ok(values) => Some(values),
                    Err(e) => {
                        warn!("picklist values unavailable for {object}: {e}");
                        None
                    }
                }
            }
            None => None,
        };

        self.facet_configs = derive_facet_configs(
            &schema,
            record_type_picklists.as_ref(),
            &self.config.filter_field_names(),
            &displayed,
        );
        self.state = FilterState::new(&self.facet_configs, self.config.page_size);
        self.compiler = Some(QueryCompiler::new(
            &schema,
            &self.config,
            self.sortable_fields.clone(),
        ));
        self.schema = Some(schema);

        self.load_records().await;
    }

    /// Runs one fetch cycle against the current filter state.
    ///
    /// Safe to call repeatedly; a cycle that has been superseded by a newer
    /// one does not write state. On failure the view resets to a safe empty
    /// state and invalidates the predicate cache so the next attempt starts
    /// with a fresh recount.
    pub async fn load_records(&mut self) {
        let Some(compiled) = self.compiler.as_ref().map(|c| c.compile(&self.state)) else {
            return;
        };

        self.fetch_seq += 1;
        let seq = self.fetch_seq;
        self.is_loading = true;
        self.error = None;

        let plan = paging::reconcile(
            self.last_predicate.as_deref(),
            &compiled.predicate,
            self.last_page_size,
            self.state.page_size(),
        );
        if plan.reset_to_first_page {
            self.state.set_page(1);
        }

        debug!(
            "load cycle {seq}: predicate={:?} order_by={:?} count_refetch={}",
            compiled.predicate, compiled.order_by, plan.needs_count_refetch
        );

        let service = Arc::clone(&self.service);
        let object = self.config.object_api_name.clone();
        let fields = self.config.displayed_fields();
        let page_size = self.state.page_size();
        let offset = paging::offset(self.state.current_page(), page_size);

        let outcome = if plan.needs_count_refetch {
            let (count, page) = tokio::join!(
                service.fetch_record_count(&object, &compiled.predicate),
                service.fetch_record_page(
                    &object,
                    &fields,
                    &compiled.predicate,
                    page_size,
                    offset,
                    &compiled.order_by,
                ),
            );
            match (count, page) {
                (Ok(total), Ok(records)) => {
                    let total_pages = paging::total_pages(total, page_size);
                    let clamped = paging::clamp_page(self.state.current_page(), total_pages);
                    if clamped != self.state.current_page() {
                        // The result set shrank out from under the current
                        // page; never serve a stale body for it.
                        service
                            .fetch_record_page(
                                &object,
                                &fields,
                                &compiled.predicate,
                                page_size,
                                0,
                                &compiled.order_by,
                            )
                            .await
                            .map(|records| (Some((total, total_pages)), records, true))
                    } else {
                        Ok((Some((total, total_pages)), records, false))
                    }
                }
                (Err(e), _) | (_, Err(e)) => Err(e),
            }
        } else {
            service
                .fetch_record_page(
                    &object,
                    &fields,
                    &compiled.predicate,
                    page_size,
                    offset,
                    &compiled.order_by,
                )
                .await
                .map(|records| (None, records, false))
        };

        if seq != self.fetch_seq {
            debug!("load cycle {seq} superseded, discarding result");
            return;
        }

        match outcome {
            Ok((totals, records, page_was_clamped)) => {
                if let Some((total, total_pages)) = totals {
                    self.total_records = total;
                    self.total_pages = total_pages;
                }
                if page_was_clamped {
                    self.state.set_page(1);
                }
                self.records = records;
                self.last_predicate = Some(compiled.predicate);
                self.last_page_size = Some(page_size);
            }
            Err(e) => {
                self.handle_error("Failed to load records", &Error::Data(e));
            }
        }
        self.is_loading = false;
    }

    /// Handles a debounce-fired fetch intent.
    pub async fn handle_intent(&mut self, intent: FetchIntent) {
        match intent {
            FetchIntent::Search => {
                self.last_predicate = None;
            }
            FetchIntent::ApplyFilters => {
                self.last_predicate = None;
                self.state.set_page(1);
            }
        }
        self.load_records().await;
    }

    // =========================================================================
    // Search and filters
    // =========================================================================

    /// Records a search keystroke and (re-)arms the search debounce.
    ///
    /// The fetch itself fires through the intent channel once typing
    /// settles; every keystroke replaces the pending timer.
    pub fn handle_search_input(&mut self, term: impl Into<String>) {
        self.state.set_search_term(term);
        self.state.set_page(1);
        self.search_debounce
            .schedule(SEARCH_DEBOUNCE, self.intent_tx.clone(), FetchIntent::Search);
    }

    /// Replaces the selection of a picklist facet.
    pub fn set_picklist_selection<I, S>(&mut self, field_name: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state.set_picklist_selection(field_name, values);
    }

    /// Applies a patch to a date/datetime facet.
    pub fn set_date_facet(&mut self, field_name: &str, patch: DateFacetPatch) {
        self.state.set_date_facet(field_name, patch);
    }

    /// Requests execution of the current filters, debounced to absorb
    /// double-clicks. Ignored while the apply gate is blocked.
    pub fn apply_filters(&mut self) {
        if self.state.is_apply_blocked() {
            return;
        }
        self.show_filter_panel = false;
        self.apply_debounce.schedule(
            APPLY_DEBOUNCE,
            self.intent_tx.clone(),
            FetchIntent::ApplyFilters,
        );
    }

    /// Resets every facet to its cleared state. Facet configuration, sort,
    /// and page size are untouched; no fetch is triggered.
    pub fn clear_all_filters(&mut self) {
        self.state.clear_all_filters();
    }

    /// True while any `between` facet is incomplete; the host disables the
    /// apply action accordingly.
    pub fn is_apply_blocked(&self) -> bool {
        self.state.is_apply_blocked()
    }

    /// Shows or hides the filter panel.
    pub fn toggle_filter_panel(&mut self) {
        self.show_filter_panel = !self.show_filter_panel;
    }

    // =========================================================================
    // Sorting and pagination
    // =========================================================================

    /// Handles a column sort request. Non-sortable fields are rejected.
    pub async fn handle_sort(&mut self, field: &str, direction: Direction) {
        if !self.sortable_fields.contains(field) {
            return;
        }
        self.state.set_sort(field, direction);
        self.state.set_page(1);
        self.load_records().await;
    }

    /// Moves to the previous page, if any.
    pub async fn previous_page(&mut self) {
        if self.state.current_page() > 1 {
            self.state.set_page(self.state.current_page() - 1);
            self.load_records().await;
        }
    }

    /// Moves to the next page, if any.
    pub async fn next_page(&mut self) {
        if self.state.current_page() < self.total_pages {
            self.state.set_page(self.state.current_page() + 1);
            self.load_records().await;
        }
    }

    /// Jumps to the first page.
    pub async fn first_page(&mut self) {
        if self.state.current_page() != 1 {
            self.state.set_page(1);
            self.load_records().await;
        }
    }

    /// Jumps to the last page.
    pub async fn last_page(&mut self) {
        if self.state.current_page() != self.total_pages {
            self.state.set_page(self.total_pages);
            self.load_records().await;
        }
    }

    /// Jumps to an arbitrary page, clamped into `1..=total_pages`.
    pub async fn go_to_page(&mut self, page: u64) {
        let page = page.clamp(1, self.total_pages);
        if page != self.state.current_page() {
            self.state.set_page(page);
            self.load_records().await;
        }
    }

    /// Changes the page size. The current page is kept and re-clamped once
    /// the new total is known.
    pub async fn set_page_size(&mut self, page_size: u32) {
        if page_size == 0 || page_size == self.state.page_size() {
            return;
        }
        self.state.set_page_size(page_size);
        self.load_records().await;
    }

    // =========================================================================
    // Host-invocable actions
    // =========================================================================

    /// Forces a full reload: invalidates the cached predicate and refetches
    /// from page 1.
    pub async fn refresh(&mut self) {
        self.state.set_page(1);
        self.last_predicate = None;
        self.load_records().await;
    }

    /// Clears the search term and reloads from page 1.
    pub async fn clear_search(&mut self) {
        self.search_debounce.cancel();
        self.state.set_search_term("");
        self.state.set_page(1);
        self.last_predicate = None;
        self.load_records().await;
    }

    /// Emits a record-selected-for-view notification.
    pub fn view_record(&self, record_id: Uuid) {
        self.emit(ListViewEvent::RecordView { record_id });
    }

    /// Emits a record-selected-for-edit notification.
    pub fn edit_record(&self, record_id: Uuid) {
        self.emit(ListViewEvent::RecordEdit { record_id });
    }

    // =========================================================================
    // Render state
    // =========================================================================

    /// The current page of records.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// The derived column definitions.
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// The derived filter facet configurations.
    pub fn facet_configs(&self) -> &[FacetConfig] {
        &self.facet_configs
    }

    /// The current filter state.
    pub fn filter_state(&self) -> &FilterState {
        &self.state
    }

    /// Total matching records from the last count.
    pub fn total_records(&self) -> u64 {
        self.total_records
    }

    /// Total pages, at least 1.
    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// Current page, 1-based.
    pub fn current_page(&self) -> u64 {
        self.state.current_page()
    }

    /// True while a fetch cycle is in flight.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// The last surfaced error message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the filter panel is open.
    pub fn show_filter_panel(&self) -> bool {
        self.show_filter_panel
    }

    /// True when the current page has records.
    pub fn has_records(&self) -> bool {
        !self.records.is_empty()
    }

    /// Whether pagination controls are worth showing.
    pub fn show_pagination(&self) -> bool {
        self.total_pages > 1
    }

    /// True when there is no page before the current one.
    pub fn is_previous_disabled(&self) -> bool {
        self.state.current_page() <= 1
    }

    /// True when there is no page after the current one.
    pub fn is_next_disabled(&self) -> bool {
        self.state.current_page() >= self.total_pages
    }

    /// The title to display.
    pub fn display_title(&self) -> String {
        self.config.display_title()
    }

    /// Available page sizes.
    pub fn page_size_options(&self) -> &'static [u32] {
        &PAGE_SIZE_OPTIONS
    }

    /// Range summary for the current page, e.g. `"26-50 of 101"`.
    pub fn pagination_info(&self) -> String {
        let page_size = u64::from(self.state.page_size());
        let start = (self.state.current_page() - 1) * page_size + 1;
        let end = (self.state.current_page() * page_size).min(self.total_records);
        format!("{start}-{end} of {}", self.total_records)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn emit(&self, event: ListViewEvent) {
        let _ = self.events_tx.send(event);
    }

    /// Surfaces a failure and resets to a safe empty state so the next
    /// attempt starts clean.
    fn handle_error(&mut self, context: &str, err: &Error) {
        let message = format!("{context}: {}", err.user_message());
        error!("{message}");
        self.error = Some(message.clone());

        self.records.clear();
        self.total_records = 0;
        self.total_pages = 1;
        self.state.set_page(1);
        self.last_predicate = None;
        self.is_loading = false;

        self.emit(ListViewEvent::Toast(Toast::error(message)));
    }
}
