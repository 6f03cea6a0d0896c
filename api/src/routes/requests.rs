//! Handlers for the `/requests` endpoints.

use actix_web::{web, HttpResponse};
use validator::Validate;

use lh_core::repositories::{
    BookingRepository, CommentRepository, ItemRepository, ItemRequestRepository, UserRepository,
};

use crate::app::AppState;
use crate::dto::item::PageQuery;
use crate::dto::request::{CreateItemRequestDto, ItemRequestResponse};
use crate::handlers::error::{domain_error_response, validation_error_response};
use crate::identity::SharerId;
use crate::routes::page_params;

/// `POST /requests`
pub async fn create_request<U, I, B, C, R>(
    state: web::Data<AppState<U, I, B, C, R>>,
    sharer: SharerId,
    body: web::Json<CreateItemRequestDto>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    I: ItemRepository + 'static,
    B: BookingRepository + 'static,
    C: CommentRepository + 'static,
    R: ItemRequestRepository + 'static,
{
    if let Err(errors) = body.validate() {
        return validation_error_response(&errors);
    }

    match state
        .request_service
        .create(sharer.0, body.into_inner().into())
        .await
    {
        Ok(request) => HttpResponse::Ok().json(ItemRequestResponse::from(request)),
        Err(error) => domain_error_response(&error),
    }
}

/// `GET /requests`: the caller's own requests, newest first.
pub async fn get_own_requests<U, I, B, C, R>(
    state: web::Data<AppState<U, I, B, C, R>>,
    sharer: SharerId,
) -> HttpResponse
where
    U: UserRepository + 'static,
    I: ItemRepository + 'static,
    B: BookingRepository + 'static,
    C: CommentRepository + 'static,
    R: ItemRequestRepository + 'static,
{
    match state.request_service.list_own(sharer.0).await {
        Ok(views) => HttpResponse::Ok().json(
            views
                .into_iter()
                .map(ItemRequestResponse::from)
                .collect::<Vec<_>>(),
        ),
        Err(error) => domain_error_response(&error),
    }
}

/// `GET /requests/all?from=&size=`: other users' requests.
pub async fn get_other_requests<U, I, B, C, R>(
    state: web::Data<AppState<U, I, B, C, R>>,
    sharer: SharerId,
    query: web::Query<PageQuery>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    I: ItemRepository + 'static,
    B: BookingRepository + 'static,
    C: CommentRepository + 'static,
    R: ItemRequestRepository + 'static,
{
    let page = match page_params(query.from, query.size) {
        Ok(p) => p,
        Err(response) => return response,
    };

    match state.request_service.list_from_others(sharer.0, page).await {
        Ok(views) => HttpResponse::Ok().json(
            views
                .into_iter()
                .map(ItemRequestResponse::from)
                .collect::<Vec<_>>(),
        ),
        Err(error) => domain_error_response(&error),
    }
}

/// `GET /requests/{id}`
pub async fn get_request<U, I, B, C, R>(
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
        .request_service
        .get_by_id(sharer.0, path.into_inner())
        .await
    {
        Ok(view) => HttpResponse::Ok().json(ItemRequestResponse::from(view)),
        Err(error) => domain_error_response(&error),
    }
}
