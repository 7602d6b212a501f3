//! Offset pagination for the order history
//!
//! The pager is driven by "load more" triggers. A trigger only yields a
//! request when nothing is in flight, the previous page was full and the
//! consumer has not been disposed, so a burst of triggers for the same
//! scroll position produces a single fetch.

use serde::Serialize;

/// Orders per history page.
pub const ORDERS_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub offset: usize,
    pub limit: usize,
}

#[derive(Debug, Clone)]
pub struct Pager<T> {
    items: Vec<T>,
    page_size: usize,
    has_more: bool,
    in_flight: Option<PageRequest>,
    disposed: bool,
    error: Option<String>,
}

impl<T> Pager<T> {
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            page_size: page_size.max(1),
            has_more: true,
            in_flight: None,
            disposed: false,
            error: None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Error from the first page, if it failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The initial request. Same guard as [`Pager::on_intersect`].
    pub fn start(&mut self) -> Option<PageRequest> {
        self.next_request()
    }

    /// A "load more" trigger fired.
    pub fn on_intersect(&mut self) -> Option<PageRequest> {
        self.next_request()
    }

    fn next_request(&mut self) -> Option<PageRequest> {
        if self.disposed || self.in_flight.is_some() || !self.has_more {
            return None;
        }
        let req = PageRequest {
            offset: self.items.len(),
            limit: self.page_size,
        };
        self.in_flight = Some(req);
        Some(req)
    }

    /// Records the outcome of the in-flight request. Responses arriving
    /// after [`Pager::dispose`] or without a matching request are dropped.
    pub fn complete(&mut self, result: Result<Vec<T>, String>) {
        let Some(req) = self.in_flight.take() else {
            return;
        };
        if self.disposed {
            return;
        }
        match result {
            Ok(page) => {
                self.has_more = page.len() >= self.page_size;
                self.items.extend(page);
            }
            Err(message) => {
                if req.offset == 0 {
                    self.error = Some(message);
                }
                self.has_more = false;
            }
        }
    }

    /// The consumer is gone; later completions become no-ops.
    pub fn dispose(&mut self) {
        self.disposed = true;
    }
}
