//! Application state and factory
//!
//! This module holds the shared service state and the factory that builds
//! the Actix-web application, generic over the repository implementations
//! so the same route table serves the MySQL binary and the mock-backed
//! tests.

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpResponse};

use lh_core::repositories::{
    BookingRepository, CommentRepository, ItemRepository, ItemRequestRepository, UserRepository,
};
use lh_core::services::{BookingService, ItemService, RequestService, UserService};
use lh_shared::types::response::ErrorBody;

use crate::middleware::cors::create_cors;
use crate::routes;

/// Shared application state holding the service layer.
pub struct AppState<U, I, B, C, R>
where
    U: UserRepository,
    I: ItemRepository,
    B: BookingRepository,
    C: CommentRepository,
    R: ItemRequestRepository,
{
    pub user_service: Arc<UserService<U>>,
    pub item_service: Arc<ItemService<I, U, B, C, R>>,
    pub booking_service: Arc<BookingService<B, I, U>>,
    pub request_service: Arc<RequestService<R, U, I>>,
}

impl<U, I, B, C, R> AppState<U, I, B, C, R>
where
    U: UserRepository,
    I: ItemRepository,
    B: BookingRepository,
    C: CommentRepository,
    R: ItemRequestRepository,
{
    /// Wire the service layer from repository implementations.
    pub fn new(
        user_repository: Arc<U>,
        item_repository: Arc<I>,
        booking_repository: Arc<B>,
        comment_repository: Arc<C>,
        request_repository: Arc<R>,
    ) -> Self {
        Self {
            user_service: Arc::new(UserService::new(user_repository.clone())),
            item_service: Arc::new(ItemService::new(
                item_repository.clone(),
                user_repository.clone(),
                booking_repository.clone(),
                comment_repository,
                request_repository.clone(),
            )),
            booking_service: Arc::new(BookingService::new(
                booking_repository,
                item_repository.clone(),
                user_repository.clone(),
            )),
            request_service: Arc::new(RequestService::new(
                request_repository,
                user_repository,
                item_repository,
            )),
        }
    }
}

/// Create and configure the application with all routes and middleware.
pub fn create_app<U, I, B, C, R>(
    app_state: web::Data<AppState<U, I, B, C, R>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    I: ItemRepository + 'static,
    B: BookingRepository + 'static,
    C: CommentRepository + 'static,
    R: ItemRequestRepository + 'static,
{
    let cors = create_cors();

    App::new()
        .app_data(app_state)
        .wrap(Logger::default())
        .wrap(cors)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // User management
        .service(
            web::scope("/users")
                .route("", web::post().to(routes::users::create_user::<U, I, B, C, R>))
                .route("", web::get().to(routes::users::get_users::<U, I, B, C, R>))
                .route("/{id}", web::get().to(routes::users::get_user::<U, I, B, C, R>))
                .route(
                    "/{id}",
                    web::patch().to(routes::users::update_user::<U, I, B, C, R>),
                )
                .route(
                    "/{id}",
                    web::delete().to(routes::users::delete_user::<U, I, B, C, R>),
                ),
        )
        // Item listings, search and comments
        .service(
            web::scope("/items")
                .route("", web::post().to(routes::items::create_item::<U, I, B, C, R>))
                .route("", web::get().to(routes::items::get_items::<U, I, B, C, R>))
                .route(
                    "/search",
                    web::get().to(routes::items::search_items::<U, I, B, C, R>),
                )
                .route("/{id}", web::get().to(routes::items::get_item::<U, I, B, C, R>))
                .route(
                    "/{id}",
                    web::patch().to(routes::items::update_item::<U, I, B, C, R>),
                )
                .route(
                    "/{id}/comment",
                    web::post().to(routes::items::add_comment::<U, I, B, C, R>),
                ),
        )
        // Item requests (want-ads)
        .service(
            web::scope("/requests")
                .route(
                    "",
                    web::post().to(routes::requests::create_request::<U, I, B, C, R>),
                )
                .route(
                    "",
                    web::get().to(routes::requests::get_own_requests::<U, I, B, C, R>),
                )
                .route(
                    "/all",
                    web::get().to(routes::requests::get_other_requests::<U, I, B, C, R>),
                )
                .route(
                    "/{id}",
                    web::get().to(routes::requests::get_request::<U, I, B, C, R>),
                ),
        )
        // Booking lifecycle
        .service(
            web::scope("/bookings")
                .route(
                    "",
                    web::post().to(routes::bookings::create_booking::<U, I, B, C, R>),
                )
                .route(
                    "",
                    web::get().to(routes::bookings::get_bookings_by_booker::<U, I, B, C, R>),
                )
                .route(
                    "/owner",
                    web::get().to(routes::bookings::get_bookings_by_owner::<U, I, B, C, R>),
                )
                .route(
                    "/{id}",
                    web::get().to(routes::bookings::get_booking::<U, I, B, C, R>),
                )
                .route(
                    "/{id}",
                    web::patch().to(routes::bookings::set_approval::<U, I, B, C, R>),
                ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "lendhub-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorBody::new("the requested resource was not found"))
}
