//! HTTP route handlers, one module per resource.

pub mod bookings;
pub mod items;
pub mod requests;
pub mod users;

use actix_web::HttpResponse;

use lh_shared::types::pagination::PageParams;

use crate::handlers::error::bad_request;

/// Turn `?from=&size=` query values into checked pagination parameters.
/// `from` is a raw row offset; `size` must be positive.
pub(crate) fn page_params(
    from: Option<i64>,
    size: Option<i64>,
) -> Result<PageParams, HttpResponse> {
    let from = from.unwrap_or(0);
    let size = size.unwrap_or(10);
    if from < 0 {
        return Err(bad_request("'from' must not be negative"));
    }
    if size <= 0 {
        return Err(bad_request("'size' must be positive"));
    }
    Ok(PageParams::new(from as u32, size as u32))
}
