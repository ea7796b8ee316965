//! Forward-only cursor over the pages of a user's transaction history.
//!
//! Only one page is held at a time. The first request is unparameterized
//! (the server picks its default page); that page is handed out when the
//! cursor reaches its page number, so no page is ever requested twice.

use tracing::debug;

use crate::error::Result;
use crate::model::Page;

/// Something that can fetch one page of a user's transactions.
///
/// `page = None` asks for the server's default page.
pub trait PageFetcher {
    fn fetch_page(&self, user_id: i64, page: Option<u32>) -> Result<Page>;
}

impl<F: PageFetcher + ?Sized> PageFetcher for &F {
    fn fetch_page(&self, user_id: i64, page: Option<u32>) -> Result<Page> {
        (**self).fetch_page(user_id, page)
    }
}

impl<F: PageFetcher + ?Sized> PageFetcher for Box<F> {
    fn fetch_page(&self, user_id: i64, page: Option<u32>) -> Result<Page> {
        (**self).fetch_page(user_id, page)
    }
}

pub struct PagedTransactionSource<F> {
    fetcher: F,
    user_id: i64,
    /// Last page number handed out; 0 before the first advance
    current_page: u32,
    /// Page count as reported by the most recent response
    total_pages: u32,
    /// Fetched during initialization but not yet handed out
    pending: Option<Page>,
    pages_fetched: usize,
    done: bool,
}

impl<F: PageFetcher> PagedTransactionSource<F> {
    /// Issue the unparameterized first request and position the cursor
    /// before page 1.
    pub fn initialize(fetcher: F, user_id: i64) -> Result<Self> {
        let first = fetcher.fetch_page(user_id, None)?;
        debug!(
            user_id,
            page = first.page,
            total_pages = first.total_pages,
            total = first.total,
            "fetched initial page"
        );

        Ok(Self {
            fetcher,
            user_id,
            current_page: 0,
            total_pages: first.total_pages,
            pending: Some(first),
            pages_fetched: 1,
            done: false,
        })
    }

    pub fn has_next(&self) -> bool {
        !self.done && self.current_page < self.total_pages
    }

    /// Advance by one page. Returns `Ok(None)` once exhausted.
    pub fn get_next(&mut self) -> Result<Option<Page>> {
        if !self.has_next() {
            return Ok(None);
        }

        self.current_page += 1;

        let page = match self.pending.take() {
            Some(page) if page.page == self.current_page => page,
            _ => match self.fetcher.fetch_page(self.user_id, Some(self.current_page)) {
                Ok(page) => {
                    self.pages_fetched += 1;
                    debug!(
                        user_id = self.user_id,
                        page = page.page,
                        records = page.data.len(),
                        "fetched page"
                    );
                    page
                }
                Err(e) => {
                    self.done = true;
                    return Err(e);
                }
            },
        };

        self.total_pages = page.total_pages;
        Ok(Some(page))
    }

    /// Number of requests issued so far, including the initial one.
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }
}

impl<F: PageFetcher> Iterator for PagedTransactionSource<F> {
    type Item = Result<Page>;

    fn next(&mut self) -> Option<Self::Item> {
        self.get_next().transpose()
    }
}

impl<F: PageFetcher> std::iter::FusedIterator for PagedTransactionSource<F> {}
