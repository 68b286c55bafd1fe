//! Filter facet state variants

use chrono::DateTime;
use chrono::FixedOffset;
use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

/// Whether a date/datetime facet matches an exact day or an inclusive range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FacetMode {
    /// Match a single day.
    #[default]
    On,
    /// Match an inclusive range.
    Between,
}

/// State of a calendar-date facet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateFacet {
    /// Current mode.
    pub mode: FacetMode,
    /// The single day for `On` mode.
    pub on: Option<NaiveDate>,
    /// Range start for `Between` mode.
    pub start: Option<NaiveDate>,
    /// Range end for `Between` mode.
    pub end: Option<NaiveDate>,
}

impl DateFacet {
    /// Returns `true` if this facet is in `Between` mode with exactly one
    /// side populated. Such a facet blocks apply and never compiles.
    pub fn is_incomplete_between(&self) -> bool {
        self.mode == FacetMode::Between && (self.start.is_some() != self.end.is_some())
    }
}

/// State of an instant (datetime) facet.
///
/// `On` mode holds a local calendar day which the compiler expands to the
/// inclusive instant range covering that day; `Between` mode holds raw
/// instants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeFacet {
    /// Current mode.
    pub mode: FacetMode,
    /// The local calendar day for `On` mode.
    pub on: Option<NaiveDate>,
    /// Range start instant for `Between` mode.
    pub start: Option<DateTime<FixedOffset>>,
    /// Range end instant for `Between` mode.
    pub end: Option<DateTime<FixedOffset>>,
}

impl DateTimeFacet {
    /// Returns `true` if this facet is in `Between` mode with exactly one
    /// side populated.
    pub fn is_incomplete_between(&self) -> bool {
        self.mode == FacetMode::Between && (self.start.is_some() != self.end.is_some())
    }
}

/// A single edit to a date/datetime facet.
///
/// Patches that do not apply to the facet's kind (an instant bound on a
/// plain date facet, say) are ignored rather than rejected, mirroring how
/// the filter panel writes whichever input changed.
#[derive(Debug, Clone, PartialEq)]
pub enum DateFacetPatch {
    /// Switch between `On` and `Between` mode.
    Mode(FacetMode),
    /// Set or clear the single day (`On` mode; also the local day of a
    /// datetime facet).
    Day(Option<NaiveDate>),
    /// Set or clear the date range start.
    Start(Option<NaiveDate>),
    /// Set or clear the date range end.
    End(Option<NaiveDate>),
    /// Set or clear the instant range start.
    InstantStart(Option<DateTime<FixedOffset>>),
    /// Set or clear the instant range end.
    InstantEnd(Option<DateTime<FixedOffset>>),
}

/// Per-field filter state, tagged by facet kind.
///
/// Constructed once from schema-derived facet configuration; only the values
/// inside are ever mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterFacetState {
    /// Selected option values, unique, in selection order.
    Picklist {
        /// The selected values.
        selected: Vec<String>,
    },
    /// Calendar-date facet.
    Date(DateFacet),
    /// Instant facet.
    DateTime(DateTimeFacet),
}

impl FilterFacetState {
    /// Returns the default (cleared) state for a picklist facet.
    pub fn empty_picklist() -> Self {
        FilterFacetState::Picklist {
            selected: Vec::new(),
        }
    }

    /// Returns `true` if the facet holds no selection or dates at all.
    pub fn is_empty(&self) -> bool {
        match self {
            FilterFacetState::Picklist { selected } => selected.is_empty(),
            FilterFacetState::Date(f) => f.on.is_none() && f.start.is_none() && f.end.is_none(),
            FilterFacetState::DateTime(f) => {
                f.on.is_none() && f.start.is_none() && f.end.is_none()
            }
        }
    }

    /// Resets the facet to its cleared state, preserving its kind.
    pub fn clear(&mut self) {
        match self {
            FilterFacetState::Picklist { selected } => selected.clear(),
            FilterFacetState::Date(f) => *f = DateFacet::default(),
            FilterFacetState::DateTime(f) => *f = DateTimeFacet::default(),
        }
    }

    /// Applies a patch to a date/datetime facet. Picklist facets and
    /// mismatched patch variants are ignored.
    pub fn apply_patch(&mut self, patch: DateFacetPatch) {
        match (self, patch) {
            (FilterFacetState::Date(f), DateFacetPatch::Mode(mode)) => f.mode = mode,
            (FilterFacetState::Date(f), DateFacetPatch::Day(day)) => f.on = day,
            (FilterFacetState::Date(f), DateFacetPatch::Start(day)) => f.start = day,
            (FilterFacetState::Date(f), DateFacetPatch::End(day)) => f.end = day,
            (FilterFacetState::DateTime(f), DateFacetPatch::Mode(mode)) => f.mode = mode,
            (FilterFacetState::DateTime(f), DateFacetPatch::Day(day)) => f.on = day,
            (FilterFacetState::DateTime(f), DateFacetPatch::InstantStart(at)) => f.start = at,
            (FilterFacetState::DateTime(f), DateFacetPatch::InstantEnd(at)) => f.end = at,
            _ => {}
        }
    }

    /// Returns `true` if the facet is an incomplete `between` range.
    pub fn is_incomplete_between(&self) -> bool {
        match self {
            FilterFacetState::Picklist { .. } => false,
            FilterFacetState::Date(f) => f.is_incomplete_between(),
            FilterFacetState::DateTime(f) => f.is_incomplete_between(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_incomplete_between_detection() {
        let mut facet = FilterFacetState::Date(DateFacet::default());
        assert!(!facet.is_incomplete_between());

        facet.apply_patch(DateFacetPatch::Mode(FacetMode::Between));
        facet.apply_patch(DateFacetPatch::Start(Some(day("2024-01-01"))));
        assert!(facet.is_incomplete_between());

        facet.apply_patch(DateFacetPatch::End(Some(day("2024-02-01"))));
        assert!(!facet.is_incomplete_between());
    }

    #[test]
    fn test_on_mode_never_incomplete() {
        let mut facet = FilterFacetState::Date(DateFacet::default());
        facet.apply_patch(DateFacetPatch::Day(Some(day("2024-01-01"))));
        assert!(!facet.is_incomplete_between());
    }

    #[test]
    fn test_mismatched_patch_is_ignored() {
        let mut facet = FilterFacetState::Date(DateFacet::default());
        facet.apply_patch(DateFacetPatch::InstantStart(Some(
            "2024-01-01T10:00:00Z".parse().unwrap(),
        )));
        assert!(facet.is_empty());
    }

    #[test]
    fn test_clear_preserves_kind() {
        let mut facet = FilterFacetState::DateTime(DateTimeFacet {
            mode: FacetMode::Between,
            on: None,
            start: Some("2024-01-01T10:00:00Z".parse().unwrap()),
            end: None,
        });
        facet.clear();
        assert!(matches!(facet, FilterFacetState::DateTime(_)));
        assert!(facet.is_empty());
        assert!(!facet.is_incomplete_between());
    }
}
