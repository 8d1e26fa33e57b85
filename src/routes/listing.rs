use serde::Deserialize;

use crate::domain::PageRequest;

/// `?status&page&limit` of the admin listings. Values are kept as text so
/// that anything unparsable falls back to the defaults instead of failing.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    status: Option<String>,
    page: Option<String>,
    limit: Option<String>,
}

impl ListQuery {
    /// An empty `status` means no filter.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref().filter(|status| !status.is_empty())
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::from_query(self.page.as_deref(), self.limit.as_deref())
    }
}
