// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::Role,
    models::{
        Coordinates, CreateFavoriteRequest, CreateInquiryRequest, CreatePropertyRequest,
        Favorite, ForgotPasswordRequest, Inquiry, InquiryStatus, Location, LoginRequest,
        Property, PropertyCondition, PropertyFeatures, PropertyImage, PropertyStatus,
        PropertyType, PublicUser, RegisterRequest, ResetPasswordRequest,
        UpdateInquiryStatusRequest, UpdatePropertyRequest,
    },
    state::AppState,
};

pub mod auth;
pub mod favorites;
pub mod health;
pub mod inquiries;
pub mod properties;
pub mod uploads;

/// Response carrying only an outcome message.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/auth/forgot-password", post(auth::forgot_password))
        .route("/auth/reset-password", post(auth::reset_password))
        .route(
            "/properties",
            get(properties::list_properties).post(properties::create_property),
        )
        .route("/properties/my", get(properties::my_properties))
        .route(
            "/properties/{id}",
            get(properties::get_property)
                .put(properties::update_property)
                .delete(properties::delete_property),
        )
        .route(
            "/favorites",
            get(favorites::list_favorites)
                .post(favorites::create_favorite)
                .delete(favorites::delete_favorite),
        )
        .route(
            "/favorites/check/{property_id}",
            get(favorites::check_favorite),
        )
        .route(
            "/inquiries",
            get(inquiries::list_inquiries).post(inquiries::create_inquiry),
        )
        .route("/inquiries/stats", get(inquiries::inquiry_stats))
        .route(
            "/inquiries/{id}",
            get(inquiries::get_inquiry)
                .patch(inquiries::update_inquiry_status)
                .delete(inquiries::delete_inquiry),
        )
        .route(
            "/upload",
            post(uploads::upload_media)
                .delete(uploads::delete_media)
                .layer(DefaultBodyLimit::max(uploads::UPLOAD_BODY_LIMIT)),
        );

    Router::new()
        .nest("/api", api_routes)
        .route("/media/{file_name}", get(uploads::serve_media))
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::register,
        auth::login,
        auth::logout,
        auth::me,
        auth::forgot_password,
        auth::reset_password,
        properties::list_properties,
        properties::create_property,
        properties::get_property,
        properties::update_property,
        properties::delete_property,
        properties::my_properties,
        favorites::list_favorites,
        favorites::create_favorite,
        favorites::delete_favorite,
        favorites::check_favorite,
        inquiries::create_inquiry,
        inquiries::list_inquiries,
        inquiries::get_inquiry,
        inquiries::update_inquiry_status,
        inquiries::delete_inquiry,
        inquiries::inquiry_stats,
        uploads::upload_media,
        uploads::delete_media,
        uploads::serve_media,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            PublicUser,
            Role,
            Property,
            PropertyType,
            PropertyStatus,
            PropertyCondition,
            Location,
            Coordinates,
            PropertyFeatures,
            PropertyImage,
            Favorite,
            Inquiry,
            InquiryStatus,
            RegisterRequest,
            LoginRequest,
            ForgotPasswordRequest,
            ResetPasswordRequest,
            CreatePropertyRequest,
            UpdatePropertyRequest,
            CreateFavoriteRequest,
            CreateInquiryRequest,
            UpdateInquiryStatusRequest,
            MessageResponse,
            auth::AuthData,
            auth::AuthResponse,
            properties::Pagination,
            properties::PropertyListResponse,
            properties::PropertyResponse,
            properties::OwnedPropertiesResponse,
            favorites::FavoriteWithProperty,
            favorites::FavoriteListResponse,
            favorites::FavoriteResponse,
            favorites::FavoriteStatus,
            favorites::FavoriteStatusResponse,
            inquiries::InquiryListData,
            inquiries::InquiryListResponse,
            inquiries::InquiryResponse,
            inquiries::InquiryStatistics,
            inquiries::InquiryStatsResponse,
            uploads::UploadData,
            uploads::UploadResponse,
            uploads::DeleteUploadRequest,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Auth", description = "Registration, login, and password reset"),
        (name = "Properties", description = "Listing search and management"),
        (name = "Favorites", description = "Saved listings"),
        (name = "Inquiries", description = "Lead capture and handling"),
        (name = "Uploads", description = "Listing photo storage"),
        (name = "Health", description = "Service health probes")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::storage::{DocumentStore, StoragePaths};
    use tempfile::TempDir;

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut storage = DocumentStore::new(StoragePaths::new(temp_dir.path()));
        storage.initialize().expect("Failed to initialize storage");

        let app = router(AppState::new(Config::default(), storage));
        // Ensure the router can be converted into a service without panicking.
        let _ = app.into_make_service();
    }
}
