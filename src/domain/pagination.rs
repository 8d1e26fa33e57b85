use serde::Serialize;

const DEFAULT_PAGE: u64 = 1;
const DEFAULT_LIMIT: u64 = 10;

/// One-indexed page selection taken from the `page` and `limit` query
/// parameters. Anything missing, non numeric or zero falls back to the
/// defaults; there is no upper bound on `limit`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
        PageRequest {
            page: coerce(page).unwrap_or(DEFAULT_PAGE),
            limit: coerce(limit).unwrap_or(DEFAULT_LIMIT),
        }
    }

    /// Number of matching records to skip.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

fn coerce(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| *value > 0)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_records: u64,
    pub records_on_page: u64,
}

impl Pagination {
    pub fn new(request: PageRequest, total_records: u64, records_on_page: usize) -> Self {
        Pagination {
            current_page: request.page,
            total_pages: if total_records == 0 {
                0
            } else {
                (total_records - 1) / request.limit + 1
            },
            total_records,
            records_on_page: records_on_page as u64,
        }
    }
}
