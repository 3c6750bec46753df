use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::reports::filter::{filter_reports, FilterCriteria, SearchScope};
use crate::features::reports::models::{Report, ReportPriority, ReportStatus};
use crate::features::reports::paginator::{paginate, PaginationControls};
use crate::features::reports::renderer::{build_rows, ListView, ReportRenderer};
use crate::features::reports::stats::ReportStats;
use crate::features::reports::store::RecordStore;

/// Page-level owner of the Record Store and the filter/paginate/render pipeline.
///
/// Every filter change resets the page to 1. Reads go through a fresh
/// snapshot, so a store cleared from a logout hook shows up as empty.
pub struct ReportListController<R: ReportRenderer> {
    records: RecordStore,
    criteria: FilterCriteria,
    page: usize,
    /// 0 means a single unbounded page
    page_size: usize,
    empty_message: String,
    renderer: R,
}

impl<R: ReportRenderer> ReportListController<R> {
    pub fn new(renderer: R, page_size: usize, empty_message: impl Into<String>) -> Self {
        Self {
            records: RecordStore::new(),
            criteria: FilterCriteria::default(),
            page: 1,
            page_size,
            empty_message: empty_message.into(),
            renderer,
        }
    }

    pub fn with_search_scope(mut self, scope: SearchScope) -> Self {
        self.criteria.search_scope = scope;
        self
    }

    pub fn show_loading(&mut self) -> Result<()> {
        self.renderer.render(&ListView::Loading)
    }

    pub fn show_error(&mut self, message: impl Into<String>) -> Result<()> {
        self.renderer.render(&ListView::Error(message.into()))
    }

    /// Swap in a fresh snapshot and redraw, keeping the current page if it still exists.
    pub fn replace_records(&mut self, records: Vec<Report>) -> Result<()> {
        tracing::debug!("Record store replaced with {} reports", records.len());
        self.records.replace(records);
        self.redraw()
    }

    /// Drop the cached snapshot, e.g. on logout.
    pub fn clear_records(&mut self) {
        self.records.clear();
        self.page = 1;
        self.renderer.clear();
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) -> Result<()> {
        self.criteria = criteria;
        self.reset_and_redraw()
    }

    pub fn set_status_filter(&mut self, status: Option<ReportStatus>) -> Result<()> {
        self.criteria.status = status;
        self.reset_and_redraw()
    }

    pub fn set_category_filter(&mut self, category: Option<String>) -> Result<()> {
        self.criteria.category = category;
        self.reset_and_redraw()
    }

    pub fn set_priority_filter(&mut self, priority: Option<ReportPriority>) -> Result<()> {
        self.criteria.priority = priority;
        self.reset_and_redraw()
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) -> Result<()> {
        self.criteria.search_text = text.into();
        self.reset_and_redraw()
    }

    fn reset_and_redraw(&mut self) -> Result<()> {
        self.page = 1;
        self.redraw()
    }

    /// Move to `page`, clamped into the valid range.
    pub fn go_to_page(&mut self, page: usize) -> Result<()> {
        self.page = page;
        self.redraw()
    }

    pub fn next_page(&mut self) -> Result<()> {
        self.go_to_page(self.page.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> Result<()> {
        self.go_to_page(self.page.saturating_sub(1))
    }

    pub fn redraw(&mut self) -> Result<()> {
        let records = self.records.snapshot();
        let filtered = filter_reports(&records, &self.criteria);
        let page = paginate(&filtered, self.page_size, self.page);
        self.page = page.page;

        let view = if page.items.is_empty() {
            ListView::Empty {
                message: self.empty_message.clone(),
            }
        } else {
            ListView::Rows {
                rows: build_rows(page.items),
                pagination: PaginationControls::from(&page),
            }
        };

        self.renderer.render(&view)
    }

    /// Records on the current page after filtering.
    pub fn visible_page(&self) -> Vec<Report> {
        let records = self.records.snapshot();
        let filtered = filter_reports(&records, &self.criteria);
        paginate(&filtered, self.page_size, self.page)
            .items
            .iter()
            .map(|r| (*r).clone())
            .collect()
    }

    pub fn filtered_count(&self) -> usize {
        filter_reports(&self.records.snapshot(), &self.criteria).len()
    }

    pub fn pagination(&self) -> PaginationControls {
        let records = self.records.snapshot();
        let filtered = filter_reports(&records, &self.criteria);
        PaginationControls::from(&paginate(&filtered, self.page_size, self.page))
    }

    pub fn find(&self, report_id: &str) -> Result<Report> {
        self.records
            .snapshot()
            .iter()
            .find(|r| r.report_id == report_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", report_id)))
    }

    /// Tallies over the whole store, not just the filtered view.
    pub fn stats(&self) -> ReportStats {
        ReportStats::from_records(&self.records.snapshot())
    }

    pub fn records(&self) -> Arc<Vec<Report>> {
        self.records.snapshot()
    }

    /// Shared handle on the store, for hooks that must drop the cache.
    pub fn store(&self) -> RecordStore {
        self.records.clone()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
