//! Pagination state for the services page.
//!
//! This component tracks the current page and page size over a list whose
//! length changes underneath it (items load, the filter narrows, records are
//! removed), and renders the "Page N/M" indicator. It does not hold the
//! items themselves; callers slice their own list with
//! [`Model::slice_bounds`].
//!
//! Pages are 1-indexed, matching what the indicator displays: page 1 is the
//! first page, and `page` is always within `[1, total_pages]`.

use crate::key::{self, KeyMap as KeyMapTrait};
use bubbletea_rs::{KeyMsg, Msg};
use crossterm::event::KeyCode;

/// Key bindings for page navigation.
#[derive(Debug, Clone)]
pub struct PaginatorKeyMap {
    /// Key binding for navigating to the previous page.
    pub prev_page: key::Binding,
    /// Key binding for navigating to the next page.
    pub next_page: key::Binding,
}

impl Default for PaginatorKeyMap {
    fn default() -> Self {
        Self {
            prev_page: key::Binding::new(vec![KeyCode::Left, KeyCode::Char('h'), KeyCode::PageUp])
                .with_help("←/h/pgup", "prev page"),
            next_page: key::Binding::new(vec![
                KeyCode::Right,
                KeyCode::Char('l'),
                KeyCode::PageDown,
            ])
            .with_help("→/l/pgdn", "next page"),
        }
    }
}

impl KeyMapTrait for PaginatorKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.prev_page, &self.next_page]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![vec![&self.prev_page, &self.next_page]]
    }
}

/// Pagination model: current page, page size, and derived page count.
///
/// # Examples
///
/// ```rust
/// use service_browser::paginator::Model;
///
/// let mut paginator = Model::new().with_limit(10).with_total_items(15);
/// assert_eq!(paginator.total_pages, 2);
/// assert_eq!(paginator.slice_bounds(15), (0, 10));
///
/// paginator.next_page();
/// assert_eq!(paginator.page, 2);
/// assert_eq!(paginator.slice_bounds(15), (10, 15));
///
/// paginator.next_page(); // already on the last page
/// assert_eq!(paginator.page, 2);
/// ```
#[derive(Debug, Clone)]
pub struct Model {
    /// The current page, 1-indexed.
    pub page: usize,
    /// The number of items per page. Always at least 1.
    pub limit: usize,
    /// The total number of pages. Always at least 1.
    pub total_pages: usize,
    /// Format string for the indicator; both `%d` occurrences are replaced,
    /// current page first.
    pub format: String,
    /// Key bindings.
    pub keymap: PaginatorKeyMap,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            total_pages: 1,
            format: "Page %d/%d".to_string(),
            keymap: PaginatorKeyMap::default(),
        }
    }
}

impl Model {
    /// Creates a paginator with default settings: page 1, 10 items per page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size (builder form). Values below 1 are clamped to 1.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// Sets the total item count and derives the page count (builder form).
    pub fn with_total_items(mut self, items: usize) -> Self {
        self.set_total_items(items);
        self
    }

    /// Changes the page size and returns to page 1.
    ///
    /// The reset is deliberate: page offsets under the old limit are
    /// meaningless under the new one, and carrying the old page number over
    /// could land past the end of the list.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit.max(1);
        self.page = 1;
    }

    /// Recomputes the page count for a new total item count and clamps the
    /// current page back into range.
    ///
    /// Call this whenever the underlying list's length changes (items
    /// loading, the filter narrowing, records being removed) so the page
    /// never points past the end.
    pub fn set_total_items(&mut self, items: usize) {
        self.total_pages = if items == 0 {
            1
        } else {
            items.div_ceil(self.limit)
        };
        if self.page > self.total_pages {
            self.page = self.total_pages;
        }
    }

    /// Returns the slice bounds `(start, end)` of the current page within a
    /// list of the given length, clamped to the list.
    pub fn slice_bounds(&self, length: usize) -> (usize, usize) {
        let start = ((self.page - 1) * self.limit).min(length);
        let end = (start + self.limit).min(length);
        (start, end)
    }

    /// Returns the number of items on the current page.
    pub fn items_on_page(&self, length: usize) -> usize {
        let (start, end) = self.slice_bounds(length);
        end - start
    }

    /// Advances to the next page; a no-op on the last page.
    pub fn next_page(&mut self) {
        if !self.on_last_page() {
            self.page += 1;
        }
    }

    /// Moves to the previous page; a no-op on the first page.
    pub fn prev_page(&mut self) {
        if !self.on_first_page() {
            self.page -= 1;
        }
    }

    /// Returns true if on the first page.
    pub fn on_first_page(&self) -> bool {
        self.page == 1
    }

    /// Returns true if on the last page.
    pub fn on_last_page(&self) -> bool {
        self.page == self.total_pages
    }

    /// Handles next/previous key bindings.
    pub fn update(&mut self, msg: &Msg) {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.keymap.next_page.matches(key_msg) {
                self.next_page();
            } else if self.keymap.prev_page.matches(key_msg) {
                self.prev_page();
            }
        }
    }

    /// Renders the page indicator, e.g. `Page 2/3`.
    pub fn view(&self) -> String {
        self.format
            .replacen("%d", &self.page.to_string(), 1)
            .replacen("%d", &self.total_pages.to_string(), 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_total_pages_rounds_up() {
        let p = Model::new().with_limit(10).with_total_items(15);
        assert_eq!(p.total_pages, 2);
        let p = Model::new().with_limit(10).with_total_items(20);
        assert_eq!(p.total_pages, 2);
        let p = Model::new().with_limit(10).with_total_items(21);
        assert_eq!(p.total_pages, 3);
    }

    #[test]
    fn test_empty_list_still_has_one_page() {
        let p = Model::new().with_limit(10).with_total_items(0);
        assert_eq!(p.total_pages, 1);
        assert_eq!(p.slice_bounds(0), (0, 0));
        assert_eq!(p.items_on_page(0), 0);
    }

    #[test]
    fn test_pages_partition_the_list_exactly() {
        let len = 47;
        let mut p = Model::new().with_limit(10).with_total_items(len);
        let mut covered = 0;
        for page in 1..=p.total_pages {
            p.page = page;
            let (start, end) = p.slice_bounds(len);
            assert_eq!(start, covered, "gap or overlap before page {page}");
            assert!(end - start <= p.limit);
            covered = end;
        }
        assert_eq!(covered, len, "pages dropped items");
    }

    #[test]
    fn test_next_then_prev_round_trips_on_interior_pages() {
        let mut p = Model::new().with_limit(5).with_total_items(50);
        p.page = 4;
        p.next_page();
        p.prev_page();
        assert_eq!(p.page, 4);
    }

    #[test]
    fn test_next_is_noop_on_last_page() {
        let mut p = Model::new().with_limit(10).with_total_items(15);
        p.page = 2;
        p.next_page();
        assert_eq!(p.page, 2);
    }

    #[test]
    fn test_prev_is_noop_on_first_page() {
        let mut p = Model::new().with_limit(10).with_total_items(15);
        p.prev_page();
        assert_eq!(p.page, 1);
    }

    #[test]
    fn test_set_limit_always_resets_to_page_one() {
        let mut p = Model::new().with_limit(10).with_total_items(100);
        p.page = 5;
        p.set_limit(25);
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, 25);
    }

    #[test]
    fn test_set_limit_clamps_to_one() {
        let mut p = Model::new();
        p.set_limit(0);
        assert_eq!(p.limit, 1);
    }

    #[test]
    fn test_shrinking_list_reclamps_page() {
        let mut p = Model::new().with_limit(10).with_total_items(50);
        p.page = 5;
        p.set_total_items(11);
        assert_eq!(p.total_pages, 2);
        assert_eq!(p.page, 2);
    }

    #[test]
    fn test_update_handles_navigation_keys() {
        let mut p = Model::new().with_limit(10).with_total_items(30);
        let next: Msg = Box::new(KeyMsg {
            key: KeyCode::Right,
            modifiers: KeyModifiers::NONE,
        });
        p.update(&next);
        assert_eq!(p.page, 2);

        let prev: Msg = Box::new(KeyMsg {
            key: KeyCode::Left,
            modifiers: KeyModifiers::NONE,
        });
        p.update(&prev);
        assert_eq!(p.page, 1);
    }

    #[test]
    fn test_view_renders_one_indexed_pages() {
        let mut p = Model::new().with_limit(10).with_total_items(15);
        assert_eq!(p.view(), "Page 1/2");
        p.next_page();
        assert_eq!(p.view(), "Page 2/2");
    }
}
