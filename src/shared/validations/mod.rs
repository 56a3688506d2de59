use crate::shared::PaginationParams;

pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const MAX_PAGE_LIMIT: u32 = 100;

pub fn validate_pagination(page: Option<u32>, limit: Option<u32>) -> PaginationParams {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT);
    PaginationParams { page, limit }
}
