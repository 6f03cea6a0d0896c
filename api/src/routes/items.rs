//! Handlers for the `/items` endpoints.

use actix_web::{web, HttpResponse};
use validator::Validate;

use lh_core::domain::entities::comment::NewComment;
use lh_core::repositories::{
    BookingRepository, CommentRepository, ItemRepository, ItemRequestRepository, UserRepository,
};

use crate::app::AppState;
use crate::dto::item::{
    CommentResponse, CreateCommentRequest, CreateItemRequest, ItemDetailResponse, ItemResponse,
    PageQuery, SearchQuery, UpdateItemRequest,
};
use crate::handlers::error::{domain_error_response, validation_error_response};
use crate::identity::SharerId;
use crate::routes::page_params;

/// `POST /items`
pub async fn create_item<U, I, B, C, R>(
    state: web::Data<AppState<U, I, B, C, R>>,
    sharer: SharerId,
    body: web::Json<CreateItemRequest>,
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
        .item_service
        .create(sharer.0, body.into_inner().into())
        .await
    {
        Ok(item) => HttpResponse::Ok().json(ItemResponse::from(item)),
        Err(error) => domain_error_response(&error),
    }
}

/// `PATCH /items/{id}`: owner-only partial update.
pub async fn update_item<U, I, B, C, R>(
    state: web::Data<AppState<U, I, B, C, R>>,
    sharer: SharerId,
    path: web::Path<i64>,
    body: web::Json<UpdateItemRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    I: ItemRepository + 'static,
    B: BookingRepository + 'static,
    C: CommentRepository + 'static,
    R: ItemRequestRepository + 'static,
{
    match state
        .item_service
        .update(sharer.0, path.into_inner(), body.into_inner().into())
        .await
    {
        Ok(item) => HttpResponse::Ok().json(ItemResponse::from(item)),
        Err(error) => domain_error_response(&error),
    }
}

/// `GET /items/{id}`: detail view; booking info appears only for the
/// owner.
pub async fn get_item<U, I, B, C, R>(
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
        .item_service
        .get_by_id(path.into_inner(), sharer.0)
        .await
    {
        Ok(view) => HttpResponse::Ok().json(ItemDetailResponse::from(view)),
        Err(error) => domain_error_response(&error),
    }
}

/// `GET /items?from=&size=`: the caller's own items.
pub async fn get_items<U, I, B, C, R>(
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

    match state.item_service.list_by_owner(sharer.0, page).await {
        Ok(views) => HttpResponse::Ok().json(
            views
                .into_iter()
                .map(ItemDetailResponse::from)
                .collect::<Vec<_>>(),
        ),
        Err(error) => domain_error_response(&error),
    }
}

/// `GET /items/search?text=&from=&size=`
pub async fn search_items<U, I, B, C, R>(
    state: web::Data<AppState<U, I, B, C, R>>,
    query: web::Query<SearchQuery>,
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

    match state.item_service.search(&query.text, page).await {
        Ok(items) => HttpResponse::Ok().json(
            items
                .into_iter()
                .map(ItemResponse::from)
                .collect::<Vec<_>>(),
        ),
        Err(error) => domain_error_response(&error),
    }
}

/// `POST /items/{id}/comment`: allowed after a finished booking.
pub async fn add_comment<U, I, B, C, R>(
    state: web::Data<AppState<U, I, B, C, R>>,
    sharer: SharerId,
    path: web::Path<i64>,
    body: web::Json<CreateCommentRequest>,
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

    let new_comment = NewComment {
        text: body.into_inner().text,
        item_id: path.into_inner(),
    };

    match state.item_service.add_comment(sharer.0, new_comment).await {
        Ok(comment) => HttpResponse::Ok().json(CommentResponse::from(comment)),
        Err(error) => domain_error_response(&error),
    }
}
