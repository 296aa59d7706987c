pub const PAGE_SIZE: usize = 20;
pub const PAGE_WINDOW_WIDTH: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page(usize),
    Ellipsis,
}

/// Current position in a paginated result. Pages are 1-based; `total_pages` is 0 for
/// an empty result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub current_page: usize,
    pub items_per_page: usize,
    pub total_pages: usize,
}

pub fn total_pages(len: usize, items_per_page: usize) -> usize {
    len.div_ceil(items_per_page.max(1))
}

/// Slice `[(page-1)*P, page*P)` clamped to the sequence bounds.
pub fn page_slice<T>(items: &[T], page: usize, items_per_page: usize) -> &[T] {
    let per_page = items_per_page.max(1);
    let start = page.saturating_sub(1).saturating_mul(per_page).min(items.len());
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

impl PageWindow {
    pub fn new(filtered_count: usize, items_per_page: usize, requested_page: usize) -> Self {
        let items_per_page = items_per_page.max(1);
        let total_pages = total_pages(filtered_count, items_per_page);
        Self {
            current_page: requested_page.clamp(1, total_pages.max(1)),
            items_per_page,
            total_pages,
        }
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        page_slice(items, self.current_page, self.items_per_page)
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Page-number controls: at most five numbers, then an ellipsis and the last
    /// page when the window stops short of it. Empty when there is nothing to page.
    pub fn links(&self) -> Vec<PageLink> {
        let total = self.total_pages;
        if total == 0 {
            return Vec::new();
        }

        let current = self.current_page;
        let (first, last) = if total <= PAGE_WINDOW_WIDTH {
            (1, total)
        } else if current <= 3 {
            (1, PAGE_WINDOW_WIDTH)
        } else if current >= total - 2 {
            (total - PAGE_WINDOW_WIDTH + 1, total)
        } else {
            (current - 2, current + 2)
        };

        let mut links: Vec<PageLink> = (first..=last).map(PageLink::Page).collect();
        if last < total {
            links.push(PageLink::Ellipsis);
            links.push(PageLink::Page(total));
        }
        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(links: &[PageLink]) -> Vec<Option<usize>> {
        links
            .iter()
            .map(|link| match link {
                PageLink::Page(page) => Some(*page),
                PageLink::Ellipsis => None,
            })
            .collect()
    }

    #[test]
    fn small_totals_show_every_page() {
        let window = PageWindow::new(90, 20, 2);
        assert_eq!(window.total_pages, 5);
        assert_eq!(
            pages(&window.links()),
            vec![Some(1), Some(2), Some(3), Some(4), Some(5)]
        );
    }

    #[test]
    fn window_start_middle_and_end() {
        let start = PageWindow::new(200, 20, 3);
        assert_eq!(
            pages(&start.links()),
            vec![Some(1), Some(2), Some(3), Some(4), Some(5), None, Some(10)]
        );

        let middle = PageWindow::new(200, 20, 6);
        assert_eq!(
            pages(&middle.links()),
            vec![Some(4), Some(5), Some(6), Some(7), Some(8), None, Some(10)]
        );

        let end = PageWindow::new(200, 20, 8);
        assert_eq!(
            pages(&end.links()),
            vec![Some(6), Some(7), Some(8), Some(9), Some(10)]
        );
    }

    #[test]
    fn window_touching_last_page_has_no_ellipsis() {
        let window = PageWindow::new(140, 20, 5);
        assert_eq!(window.total_pages, 7);
        assert_eq!(
            pages(&window.links()),
            vec![Some(3), Some(4), Some(5), Some(6), Some(7)]
        );
    }

    #[test]
    fn requested_page_is_clamped() {
        assert_eq!(PageWindow::new(45, 20, 9).current_page, 3);
        assert_eq!(PageWindow::new(45, 20, 0).current_page, 1);
        assert_eq!(PageWindow::new(0, 20, 4).current_page, 1);
    }

    #[test]
    fn empty_result_has_no_pages_and_no_links() {
        let window = PageWindow::new(0, 20, 1);
        assert_eq!(window.total_pages, 0);
        assert!(window.links().is_empty());
        assert!(!window.has_next());
        assert!(!window.has_previous());
        assert!(window.slice::<u8>(&[]).is_empty());
    }
}
