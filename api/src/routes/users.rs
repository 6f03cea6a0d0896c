//! Handlers for the `/users` endpoints.

use actix_web::{web, HttpResponse};
use validator::Validate;

use lh_core::repositories::{
    BookingRepository, CommentRepository, ItemRepository, ItemRequestRepository, UserRepository,
};

use crate::app::AppState;
use crate::dto::user::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::handlers::error::{domain_error_response, validation_error_response};

/// `POST /users`
pub async fn create_user<U, I, B, C, R>(
    state: web::Data<AppState<U, I, B, C, R>>,
    body: web::Json<CreateUserRequest>,
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

    match state.user_service.create(body.into_inner().into()).await {
        Ok(user) => HttpResponse::Ok().json(UserResponse::from(user)),
        Err(error) => domain_error_response(&error),
    }
}

/// `GET /users`
pub async fn get_users<U, I, B, C, R>(state: web::Data<AppState<U, I, B, C, R>>) -> HttpResponse
where
    U: UserRepository + 'static,
    I: ItemRepository + 'static,
    B: BookingRepository + 'static,
    C: CommentRepository + 'static,
    R: ItemRequestRepository + 'static,
{
    match state.user_service.get_all().await {
        Ok(users) => HttpResponse::Ok().json(
            users
                .into_iter()
                .map(UserResponse::from)
                .collect::<Vec<_>>(),
        ),
        Err(error) => domain_error_response(&error),
    }
}

/// `GET /users/{id}`
pub async fn get_user<U, I, B, C, R>(
    state: web::Data<AppState<U, I, B, C, R>>,
    path: web::Path<i64>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    I: ItemRepository + 'static,
    B: BookingRepository + 'static,
    C: CommentRepository + 'static,
    R: ItemRequestRepository + 'static,
{
    match state.user_service.get_by_id(path.into_inner()).await {
        Ok(user) => HttpResponse::Ok().json(UserResponse::from(user)),
        Err(error) => domain_error_response(&error),
    }
}

/// `PATCH /users/{id}`
pub async fn update_user<U, I, B, C, R>(
    state: web::Data<AppState<U, I, B, C, R>>,
    path: web::Path<i64>,
    body: web::Json<UpdateUserRequest>,
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
        .user_service
        .update(path.into_inner(), body.into_inner().into())
        .await
    {
        Ok(user) => HttpResponse::Ok().json(UserResponse::from(user)),
        Err(error) => domain_error_response(&error),
    }
}

/// `DELETE /users/{id}`
pub async fn delete_user<U, I, B, C, R>(
    state: web::Data<AppState<U, I, B, C, R>>,
    path: web::Path<i64>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    I: ItemRepository + 'static,
    B: BookingRepository + 'static,
    C: CommentRepository + 'static,
    R: ItemRequestRepository + 'static,
{
    match state.user_service.delete(path.into_inner()).await {
        Ok(()) => HttpResponse::Ok().finish(),
        Err(error) => domain_error_response(&error),
    }
}
