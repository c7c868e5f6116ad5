// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Explicit UI state for the two-tab screen. The frontend holds this in
//! ambient component state; here it is a struct dispatching commands into
//! events so the recompute-on-change flow is testable.

use time::Date;

use crate::candidates::{Pagination, dedupe_candidates, page_slice};
use crate::model::{FilterOption, InventoryRecord, ProductCandidate, SortOption, ViewParameters};
use crate::view::{ViewOutcome, compute_view};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveTab {
    Add,
    Inventory,
}

impl ActiveTab {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Inventory => "inventory",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub active_tab: ActiveTab,
    pub refrigerator_id: Option<String>,
    pub params: ViewParameters,
    /// Last fetched snapshot; replaced wholesale on every refresh.
    pub records: Vec<InventoryRecord>,
    /// Deduplicated search results for the add tab.
    pub candidates: Vec<ProductCandidate>,
    pub candidate_page: usize,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            active_tab: ActiveTab::Add,
            refrigerator_id: None,
            params: ViewParameters::default(),
            records: Vec::new(),
            candidates: Vec::new(),
            candidate_page: 1,
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    SwitchTab(ActiveTab),
    SelectRefrigerator(String),
    SetSearchText(String),
    SetFilter(FilterOption),
    SetSort(SortOption),
    SetDateRange {
        start: Option<String>,
        end: Option<String>,
    },
    ClearDateRange,
    NextCandidatePage,
    PrevCandidatePage,
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    TabChanged(ActiveTab),
    /// The inventory snapshot should be re-fetched from the backend.
    RefreshRequested,
    /// A view parameter changed; the view must be recomputed.
    ViewChanged,
    RefrigeratorChanged,
    PageChanged(usize),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::SwitchTab(tab) => {
                if tab == self.active_tab {
                    return Vec::new();
                }
                self.active_tab = tab;
                // Every tab change re-fetches; mutations elsewhere may have
                // changed the inventory since the last look.
                vec![AppEvent::TabChanged(tab), AppEvent::RefreshRequested]
            }
            AppCommand::SelectRefrigerator(id) => {
                let status = self.set_status(&format!("refrigerator {id}"));
                self.refrigerator_id = Some(id);
                vec![
                    AppEvent::RefrigeratorChanged,
                    AppEvent::RefreshRequested,
                    status,
                ]
            }
            AppCommand::SetSearchText(text) => {
                self.params.search_text = text;
                vec![AppEvent::ViewChanged]
            }
            AppCommand::SetFilter(filter) => {
                self.params.filter = filter;
                vec![AppEvent::ViewChanged]
            }
            AppCommand::SetSort(sort) => {
                self.params.sort = sort;
                vec![AppEvent::ViewChanged]
            }
            AppCommand::SetDateRange { start, end } => {
                self.params.date_range_start = start;
                self.params.date_range_end = end;
                vec![AppEvent::ViewChanged]
            }
            AppCommand::ClearDateRange => {
                self.params.date_range_start = None;
                self.params.date_range_end = None;
                let status = self.set_status("range cleared");
                vec![AppEvent::ViewChanged, status]
            }
            AppCommand::NextCandidatePage => self.turn_candidate_page(1),
            AppCommand::PrevCandidatePage => self.turn_candidate_page(-1),
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    /// Replaces the held inventory snapshot wholesale.
    ///
    /// Fetches carry no cancellation token, so whichever response resolves
    /// last wins here even if an older request finished after a newer one.
    pub fn apply_snapshot(&mut self, records: Vec<InventoryRecord>) {
        self.records = records;
    }

    /// Installs deduplicated search results and rewinds to the first page.
    /// Returns how many candidates survived deduplication.
    pub fn apply_search_results(&mut self, results: &[ProductCandidate]) -> usize {
        self.candidates = dedupe_candidates(results);
        self.candidate_page = 1;
        self.candidates.len()
    }

    pub fn clear_candidates(&mut self) {
        self.candidates.clear();
        self.candidate_page = 1;
    }

    /// The inventory rows to render, recomputed from the snapshot and the
    /// current parameters.
    pub fn visible_view(&self, today: Date) -> ViewOutcome {
        compute_view(&self.records, &self.params, today)
    }

    pub fn visible_candidates(&self) -> &[ProductCandidate] {
        page_slice(&self.candidates, self.candidate_page)
    }

    pub fn candidate_page_count(&self) -> usize {
        Pagination::new(self.candidates.len()).page_count()
    }

    fn turn_candidate_page(&mut self, delta: isize) -> Vec<AppEvent> {
        let pagination = Pagination::new(self.candidates.len());
        let current = pagination.clamp_page(self.candidate_page);
        let target = current.saturating_add_signed(delta);
        let next = pagination.clamp_page(target.max(1));
        if next == self.candidate_page {
            return Vec::new();
        }
        self.candidate_page = next;
        vec![AppEvent::PageChanged(next)]
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}
