use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fixed number of rows in one result window.
pub const PAGE_SIZE: u32 = 20;

/// `ceil(count / page_size)`; zero when nothing matched.
pub fn total_pages(total_items: i64, page_size: u32) -> u32 {
    if total_items <= 0 || page_size == 0 {
        return 0;
    }
    let page_size = i64::from(page_size);
    ((total_items + page_size - 1) / page_size) as u32
}

/// One window of search results together with its paging metadata.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage<T> {
    pub data: Vec<T>,
    pub count: i64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl<T> SearchPage<T> {
    pub fn new(data: Vec<T>, count: i64, page: u32) -> Self {
        Self {
            data,
            count,
            page,
            page_size: PAGE_SIZE,
            total_pages: total_pages(count, PAGE_SIZE),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> SearchPage<U> {
        SearchPage {
            data: self.data.into_iter().map(f).collect(),
            count: self.count,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }
}
