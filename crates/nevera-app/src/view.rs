// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! The inventory view engine: one pure pass from the fetched snapshot plus
//! the user's view controls to the ordered rows the inventory tab shows.
//! Recomputed wholesale on every parameter change; never incremental.

use std::cmp::Ordering;

use time::Date;

use crate::dates;
use crate::model::{FilterOption, InventoryRecord, ItemStatus, SortOption, ViewParameters};

/// Data-quality counters for one recomputation. Degraded records are dropped
/// from date-dependent stages or pushed to the end of a date sort, never
/// surfaced as an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewDiagnostics {
    /// Records whose `expiry_date` failed to parse where a stage needed it.
    pub degraded_expiry_dates: usize,
    /// Records whose `created_at` failed to parse during a created-at sort.
    pub degraded_created_stamps: usize,
    /// Range bounds that failed to parse and were treated as absent.
    pub ignored_range_bounds: usize,
    /// Both bounds parsed but start > end; the range stage was skipped.
    pub range_filter_skipped: bool,
}

impl ViewDiagnostics {
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewOutcome {
    pub rows: Vec<InventoryRecord>,
    pub diagnostics: ViewDiagnostics,
}

/// Computes the displayable inventory view.
///
/// `today` is the current local-civil date, injected so the expired split is
/// a pure function of its inputs. Stage order is fixed: status gate, text
/// search, date range, expired/unexpired, stable sort.
pub fn compute_view(
    records: &[InventoryRecord],
    params: &ViewParameters,
    today: Date,
) -> ViewOutcome {
    let mut diagnostics = ViewDiagnostics::default();

    let mut rows: Vec<InventoryRecord> = records
        .iter()
        .filter(|record| record.status == ItemStatus::Active)
        .cloned()
        .collect();

    if !params.search_text.is_empty() {
        let needle = params.search_text.to_lowercase();
        rows.retain(|record| record.name.to_lowercase().contains(&needle));
    }

    if let Some(range) = resolve_range(params, &mut diagnostics) {
        rows.retain(
            |record| match dates::parse_civil_date(&record.expiry_date) {
                Some(expiry) => range.contains(expiry),
                None => {
                    diagnostics.degraded_expiry_dates += 1;
                    false
                }
            },
        );
    }

    match params.filter {
        FilterOption::All => {}
        FilterOption::Expired => {
            retain_by_expiry(&mut rows, &mut diagnostics, |expiry| expiry < today);
        }
        FilterOption::Unexpired => {
            retain_by_expiry(&mut rows, &mut diagnostics, |expiry| expiry >= today);
        }
    }

    let rows = sorted_rows(rows, params.sort, &mut diagnostics);

    if diagnostics.degraded_expiry_dates > 0 || diagnostics.degraded_created_stamps > 0 {
        log::warn!(
            "inventory view degraded {} expiry date(s) and {} registration stamp(s)",
            diagnostics.degraded_expiry_dates,
            diagnostics.degraded_created_stamps,
        );
    }

    ViewOutcome { rows, diagnostics }
}

struct DateRange {
    start: Option<Date>,
    end: Option<Date>,
}

impl DateRange {
    fn contains(&self, expiry: Date) -> bool {
        // Bounds are inclusive; in the civil-date domain "through the end of
        // the end day" is exactly `expiry <= end`.
        self.start.is_none_or(|start| expiry >= start)
            && self.end.is_none_or(|end| expiry <= end)
    }
}

fn resolve_range(params: &ViewParameters, diagnostics: &mut ViewDiagnostics) -> Option<DateRange> {
    if !params.has_date_range() {
        return None;
    }

    let start = resolve_bound(params.date_range_start.as_deref(), "start", diagnostics);
    let end = resolve_bound(params.date_range_end.as_deref(), "end", diagnostics);
    if start.is_none() && end.is_none() {
        return None;
    }

    if let (Some(start), Some(end)) = (start, end)
        && start > end
    {
        // An inverted picker selection skips the stage outright rather than
        // silently swapping the bounds.
        log::warn!("expiry range start {start} is after end {end}; range filter skipped");
        diagnostics.range_filter_skipped = true;
        return None;
    }

    Some(DateRange { start, end })
}

fn resolve_bound(
    raw: Option<&str>,
    which: &str,
    diagnostics: &mut ViewDiagnostics,
) -> Option<Date> {
    let raw = raw?;
    match dates::parse_civil_date(raw) {
        Some(bound) => Some(bound),
        None => {
            log::warn!("ignoring unparseable range {which} bound {raw:?}");
            diagnostics.ignored_range_bounds += 1;
            None
        }
    }
}

fn retain_by_expiry(
    rows: &mut Vec<InventoryRecord>,
    diagnostics: &mut ViewDiagnostics,
    keep: impl Fn(Date) -> bool,
) {
    rows.retain(
        |record| match dates::parse_civil_date(&record.expiry_date) {
            Some(expiry) => keep(expiry),
            None => {
                diagnostics.degraded_expiry_dates += 1;
                false
            }
        },
    );
}

fn sorted_rows(
    rows: Vec<InventoryRecord>,
    sort: SortOption,
    diagnostics: &mut ViewDiagnostics,
) -> Vec<InventoryRecord> {
    match sort {
        SortOption::ExpiryAscending => sort_by_key_nulls_last(
            rows,
            |record| dates::parse_civil_date(&record.expiry_date),
            false,
            &mut diagnostics.degraded_expiry_dates,
        ),
        SortOption::CreatedAscending => sort_by_key_nulls_last(
            rows,
            |record| dates::parse_timestamp(&record.created_at),
            false,
            &mut diagnostics.degraded_created_stamps,
        ),
        SortOption::CreatedDescending => sort_by_key_nulls_last(
            rows,
            |record| dates::parse_timestamp(&record.created_at),
            true,
            &mut diagnostics.degraded_created_stamps,
        ),
        SortOption::NameAscending => {
            let mut rows = rows;
            rows.sort_by(|left, right| compare_names(&left.name, &right.name));
            rows
        }
    }
}

/// Decorate-sort-undecorate so each key parses once. Records without a key
/// sort after every keyed record regardless of direction; ties keep input
/// order (the sort is stable).
fn sort_by_key_nulls_last<K: Ord>(
    rows: Vec<InventoryRecord>,
    key: impl Fn(&InventoryRecord) -> Option<K>,
    descending: bool,
    degraded: &mut usize,
) -> Vec<InventoryRecord> {
    let mut keyed: Vec<(Option<K>, InventoryRecord)> =
        rows.into_iter().map(|row| (key(&row), row)).collect();
    *degraded += keyed.iter().filter(|(key, _)| key.is_none()).count();

    keyed.sort_by(|(left, _), (right, _)| match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(left), Some(right)) => {
            if descending {
                right.cmp(left)
            } else {
                left.cmp(right)
            }
        }
    });

    keyed.into_iter().map(|(_, row)| row).collect()
}

fn compare_names(left: &str, right: &str) -> Ordering {
    let folded = left.to_lowercase().cmp(&right.to_lowercase());
    if folded == Ordering::Equal {
        left.cmp(right)
    } else {
        folded
    }
}
