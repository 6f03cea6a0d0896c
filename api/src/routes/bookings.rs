//! Handlers for the `/bookings` endpoints.

use actix_web::{web, HttpResponse};

use lh_core::repositories::{
    BookingRepository, CommentRepository, ItemRepository, ItemRequestRepository, UserRepository,
};
use lh_core::services::BookingState;

use crate::app::AppState;
use crate::dto::booking::{ApprovalQuery, BookingListQuery, BookingResponse, CreateBookingRequest};
use crate::handlers::error::domain_error_response;
use crate::identity::SharerId;
use crate::routes::page_params;

/// `POST /bookings`
pub async fn create_booking<U, I, B, C, R>(
    state: web::Data<AppState<U, I, B, C, R>>,
    sharer: SharerId,
    body: web::Json<CreateBookingRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    I: ItemRepository + 'static,
    B: BookingRepository + 'static,
    C: CommentRepository + 'static,
    R: ItemRequestRepository + 'static,
{
    match state
        .booking_service
        .create(sharer.0, body.into_inner().into())
        .await
    {
        Ok(booking) => HttpResponse::Ok().json(BookingResponse::from(booking)),
        Err(error) => domain_error_response(&error),
    }
}

/// `GET /bookings/{id}`: visible to the booker and the item's owner only.
pub async fn get_booking<U, I, B, C, R>(
    state: web::Data<AppState<U, I, B, C, R>>,
    sharer: SharerId,
    path: web::Path<i64>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    I: ItemRepository + 'static,
    B: BookingRepository + 'static,
    C: CommentRepository + 'static,
    R: ItemRequestRepository + 'static,
{
    match state
        .booking_service
        .get_by_id(sharer.0, path.into_inner())
        .await
    {
        Ok(booking) => HttpResponse::Ok().json(BookingResponse::from(booking)),
        Err(error) => domain_error_response(&error),
    }
}

/// `GET /bookings?state=&from=&size=`: the caller's own bookings.
pub async fn get_bookings_by_booker<U, I, B, C, R>(
    state: web::Data<AppState<U, I, B, C, R>>,
    sharer: SharerId,
    query: web::Query<BookingListQuery>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    I: ItemRepository + 'static,
    B: BookingRepository + 'static,
    C: CommentRepository + 'static,
    R: ItemRequestRepository + 'static,
{
    let query = query.into_inner();
    let booking_state = match parse_state(query.state.as_deref()) {
        Ok(s) => s,
        Err(response) => return response,
    };
    let page = match page_params(query.from, query.size) {
        Ok(p) => p,
        Err(response) => return response,
    };

    match state
        .booking_service
        .list_by_booker(sharer.0, booking_state, page)
        .await
    {
        Ok(bookings) => HttpResponse::Ok().json(
            bookings
                .into_iter()
                .map(BookingResponse::from)
                .collect::<Vec<_>>(),
        ),
        Err(error) => domain_error_response(&error),
    }
}

/// `GET /bookings/owner?state=&from=&size=`: bookings of the caller's
/// items.
pub async fn get_bookings_by_owner<U, I, B, C, R>(
    state: web::Data<AppState<U, I, B, C, R>>,
    sharer: SharerId,
    query: web::Query<BookingListQuery>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    I: ItemRepository + 'static,
    B: BookingRepository + 'static,
    C: CommentRepository + 'static,
    R: ItemRequestRepository + 'static,
{
    let query = query.into_inner();
    let booking_state = match parse_state(query.state.as_deref()) {
        Ok(s) => s,
        Err(response) => return response,
    };
    let page = match page_params(query.from, query.size) {
        Ok(p) => p,
        Err(response) => return response,
    };

    match state
        .booking_service
        .list_by_owner(sharer.0, booking_state, page)
        .await
    {
        Ok(bookings) => HttpResponse::Ok().json(
            bookings
                .into_iter()
                .map(BookingResponse::from)
                .collect::<Vec<_>>(),
        ),
        Err(error) => domain_error_response(&error),
    }
}

/// `PATCH /bookings/{id}?approved=`: the owner's decision.
pub async fn set_approval<U, I, B, C, R>(
    state: web::Data<AppState<U, I, B, C, R>>,
    sharer: SharerId,
    path: web::Path<i64>,
    query: web::Query<ApprovalQuery>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    I: ItemRepository + 'static,
    B: BookingRepository + 'static,
    C: CommentRepository + 'static,
    R: ItemRequestRepository + 'static,
{
    match state
        .booking_service
        .set_approval(sharer.0, path.into_inner(), query.approved)
        .await
    {
        Ok(booking) => HttpResponse::Ok().json(BookingResponse::from(booking)),
        Err(error) => domain_error_response(&error),
    }
}

/// Parse the `state` query value, defaulting to ALL. Unknown values are
/// rejected before any store access.
fn parse_state(value: Option<&str>) -> Result<BookingState, HttpResponse> {
    value
        .unwrap_or("ALL")
        .parse::<BookingState>()
        .map_err(|error| domain_error_response(&error))
}
