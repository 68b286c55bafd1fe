//! Host-facing configuration

use serde::Deserialize;
use serde::Serialize;

/// Default page size when the host does not set one.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Default displayed-field list.
pub const DEFAULT_FIELDS_TO_DISPLAY: &str = "Name,Type,Industry";

/// Default icon identifier.
pub const DEFAULT_ICON_NAME: &str = "standard:list_view";

/// Default background color.
pub const DEFAULT_BACKGROUND_COLOR: &str = "#FFFFFF";

/// Declarative configuration of one list-view instance.
///
/// Everything is externally settable; only the object API name is required.
/// Field lists are comma-separated strings, mirroring how the hosting surface
/// passes them in.
///
/// # Example
///
/// ```
/// use listview_lib::ListViewConfig;
///
/// let config = ListViewConfig::new("Account")
///     .with_fields_to_display("Name,Industry,AnnualRevenue")
///     .with_sortable_fields("Name,AnnualRevenue")
///     .with_filter_fields("Industry")
///     .with_search(true)
///     .with_page_size(50);
///
/// assert_eq!(config.displayed_fields(), ["Name", "Industry", "AnnualRevenue"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListViewConfig {
    /// API name of the object type to list (required).
    pub object_api_name: String,

    /// Component title; empty falls back to `"{object} Records"`.
    pub title: String,

    /// Icon identifier.
    pub icon_name: String,

    /// Background color of the hosting surface.
    pub background_color: String,

    /// Comma-separated list of fields to display, in column order.
    pub fields_to_display: String,

    /// Caller-supplied base predicate, passed through opaquely.
    pub where_clause: String,

    /// Records per page.
    pub page_size: u32,

    /// Whether the free-text search box is enabled.
    pub show_search: bool,

    /// Whether the table shows a row-number column.
    pub show_row_numbers: bool,

    /// Comma-separated list of sortable fields.
    pub sortable_fields: String,

    /// Comma-separated list of filterable fields.
    pub filter_fields: String,
}

impl ListViewConfig {
    /// Creates a configuration for the given object type with all defaults.
    pub fn new(object_api_name: impl Into<String>) -> Self {
        Self {
            object_api_name: object_api_name.into(),
            title: String::new(),
            icon_name: DEFAULT_ICON_NAME.to_string(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            fields_to_display: DEFAULT_FIELDS_TO_DISPLAY.to_string(),
            where_clause: String::new(),
            page_size: DEFAULT_PAGE_SIZE,
            show_search: false,
            show_row_numbers: false,
            sortable_fields: String::new(),
            filter_fields: String::new(),
        }
    }

    /// Sets the component title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the icon identifier.
    pub fn with_icon_name(mut self, icon_name: impl Into<String>) -> Self {
        self.icon_name = icon_name.into();
        self
    }

    /// Sets the background color.
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = color.into();
        self
    }

    /// Sets the comma-separated displayed-field list.
    pub fn with_fields_to_display(mut self, fields: impl Into<String>) -> Self {
        self.fields_to_display = fields.into();
        self
    }

    /// Sets the base where clause (opaque passthrough).
    pub fn with_where_clause(mut self, clause: impl Into<String>) -> Self {
        self.where_clause = clause.into();
        self
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Enables or disables the free-text search box.
    pub fn with_search(mut self, enabled: bool) -> Self {
        self.show_search = enabled;
        self
    }

    /// Enables or disables the row-number column.
    pub fn with_row_numbers(mut self, enabled: bool) -> Self {
        self.show_row_numbers = enabled;
        self
    }

    /// Sets the comma-separated sortable-field list.
    pub fn with_sortable_fields(mut self, fields: impl Into<String>) -> Self {
        self.sortable_fields = fields.into();
        self
    }

    /// Sets the comma-separated filterable-field list.
    pub fn with_filter_fields(mut self, fields: impl Into<String>) -> Self {
        self.filter_fields = fields.into();
        self
    }

    /// Returns the displayed fields in column order.
    pub fn displayed_fields(&self) -> Vec<String> {
        split_field_list(&self.fields_to_display)
    }

    /// Returns the configured sortable field names.
    pub fn sortable_field_names(&self) -> Vec<String> {
        split_field_list(&self.sortable_fields)
    }

    /// Returns the configured filterable field names.
    pub fn filter_field_names(&self) -> Vec<String> {
        split_field_list(&self.filter_fields)
    }

    /// Returns the title to display, falling back to `"{object} Records"`.
    pub fn display_title(&self) -> String {
        if self.title.trim().is_empty() {
            format!("{} Records", self.object_api_name)
        } else {
            self.title.clone()
        }
    }
}

/// Splits a comma-separated field list, trimming entries and dropping empty
/// segments.
pub fn split_field_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ListViewConfig::new("Account");
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.displayed_fields(), ["Name", "Type", "Industry"]);
        assert!(!config.show_search);
        assert_eq!(config.display_title(), "Account Records");
    }

    #[test]
    fn test_display_title_override() {
        let config = ListViewConfig::new("Account").with_title("Key Accounts");
        assert_eq!(config.display_title(), "Key Accounts");
    }

    #[test]
    fn test_split_field_list_trims_and_drops_empty() {
        assert_eq!(
            split_field_list(" Name , ,Industry,, CloseDate "),
            ["Name", "Industry", "CloseDate"]
        );
        assert!(split_field_list("").is_empty());
        assert!(split_field_list(" , ,").is_empty());
    }
}
