use crate::domain::entities::dataset::{columns_of, StockRecord};
use crate::domain::entities::query::{FilterSet, SortConfig};
use crate::domain::pipeline::csv_export::{export_csv, ExportError};
use crate::domain::pipeline::filter::filter_records;
use crate::domain::pipeline::paginate::{PageLink, PageWindow};
use crate::domain::pipeline::sort::sort_records;

/// Dataset plus the active filters, sort and page, with the filtered/sorted view kept
/// in step. Every filter or sort change re-runs the full pipeline and returns to page 1.
#[derive(Debug, Clone)]
pub struct QuerySession {
    dataset: Vec<StockRecord>,
    filters: FilterSet,
    sort: Option<SortConfig>,
    view: Vec<StockRecord>,
    page: usize,
    page_size: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultPage {
    pub columns: Vec<String>,
    pub rows: Vec<StockRecord>,
    pub window: PageWindow,
    pub links: Vec<PageLink>,
    pub filtered_count: usize,
    pub total_count: usize,
}

impl QuerySession {
    pub fn new(page_size: usize) -> Self {
        Self {
            dataset: Vec::new(),
            filters: FilterSet::new(),
            sort: None,
            view: Vec::new(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// New dataset: filters and sort are cleared along with the page.
    pub fn load(&mut self, dataset: Vec<StockRecord>) {
        self.dataset = dataset;
        self.filters.clear();
        self.sort = None;
        self.refresh();
    }

    pub fn set_filter(&mut self, field: &str, value: &str) {
        self.filters.set(field, value);
        self.refresh();
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.refresh();
    }

    pub fn set_sort(&mut self, sort: Option<SortConfig>) {
        self.sort = sort;
        self.refresh();
    }

    pub fn toggle_sort(&mut self, key: &str) {
        let next = SortConfig::toggled(self.sort.as_ref(), key);
        self.set_sort(Some(next));
    }

    /// Saved-query replay: both halves applied before a single re-run.
    pub fn replay(&mut self, filters: FilterSet, sort: Option<SortConfig>) {
        self.filters = filters;
        self.sort = sort;
        self.refresh();
    }

    pub fn goto_page(&mut self, page: usize) {
        self.page = PageWindow::new(self.view.len(), self.page_size, page).current_page;
    }

    pub fn next_page(&mut self) {
        self.goto_page(self.page.saturating_add(1));
    }

    pub fn previous_page(&mut self) {
        self.goto_page(self.page.saturating_sub(1));
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn sort(&self) -> Option<&SortConfig> {
        self.sort.as_ref()
    }

    pub fn dataset(&self) -> &[StockRecord] {
        &self.dataset
    }

    pub fn view(&self) -> &[StockRecord] {
        &self.view
    }

    pub fn total_count(&self) -> usize {
        self.dataset.len()
    }

    pub fn filtered_count(&self) -> usize {
        self.view.len()
    }

    pub fn columns(&self) -> Vec<String> {
        columns_of(&self.dataset)
    }

    pub fn window(&self) -> PageWindow {
        PageWindow::new(self.view.len(), self.page_size, self.page)
    }

    pub fn current_page(&self) -> ResultPage {
        let window = self.window();
        ResultPage {
            columns: self.columns(),
            rows: window.slice(&self.view).to_vec(),
            links: window.links(),
            window,
            filtered_count: self.view.len(),
            total_count: self.dataset.len(),
        }
    }

    pub fn export(&self) -> Result<String, ExportError> {
        export_csv(&self.view)
    }

    fn refresh(&mut self) {
        let filtered = filter_records(&self.dataset, &self.filters);
        self.view = sort_records(&filtered, self.sort.as_ref());
        self.page = 1;
    }
}

impl Default for QuerySession {
    fn default() -> Self {
        Self::new(crate::domain::pipeline::paginate::PAGE_SIZE)
    }
}
