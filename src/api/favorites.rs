// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Saved-listing endpoints. Every route is scoped to the authenticated user.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    auth::Auth,
    error::ApiError,
    models::{CreateFavoriteRequest, Favorite, Property},
    state::AppState,
    storage::{FavoriteRepository, PropertyRepository},
};

use super::MessageResponse;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Query parameters for removing a favorite.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFavoriteQuery {
    /// The listing to unfavorite.
    pub property_id: Option<String>,
}

/// A saved listing joined with its full property record.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteWithProperty {
    pub id: String,
    pub user_id: String,
    pub property: Property,
    pub created_at: DateTime<Utc>,
}

/// Favorite list response.
#[derive(Debug, Serialize, ToSchema)]
pub struct FavoriteListResponse {
    pub success: bool,
    pub data: Vec<FavoriteWithProperty>,
}

/// Single-favorite response.
#[derive(Debug, Serialize, ToSchema)]
pub struct FavoriteResponse {
    pub success: bool,
    pub data: Favorite,
    pub message: String,
}

/// Whether one listing is saved, and under which favorite ID.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteStatus {
    pub is_favorited: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite_id: Option<String>,
}

/// Favorite status response.
#[derive(Debug, Serialize, ToSchema)]
pub struct FavoriteStatusResponse {
    pub success: bool,
    pub data: FavoriteStatus,
}

// =============================================================================
// Handlers
// =============================================================================

/// List the authenticated user's saved listings, newest first.
///
/// Favorites whose listing has been deactivated are filtered out rather
/// than returned with a dangling reference.
#[utoipa::path(
    get,
    path = "/api/favorites",
    tag = "Favorites",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Saved listings", body = FavoriteListResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_favorites(
    Auth(principal): Auth,
    State(state): State<AppState>,
) -> Result<Json<FavoriteListResponse>, ApiError> {
    let favorite_repo = FavoriteRepository::new(&state.storage);
    let property_repo = PropertyRepository::new(&state.storage);

    let mut favorites = favorite_repo.list_by_user(&principal.user_id)?;
    favorites.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let mut data = Vec::new();
    for favorite in favorites {
        if let Ok(property) = property_repo.get(&favorite.property_id) {
            if property.is_active {
                data.push(FavoriteWithProperty {
                    id: favorite.id,
                    user_id: favorite.user_id,
                    property,
                    created_at: favorite.created_at,
                });
            }
        }
    }

    Ok(Json(FavoriteListResponse {
        success: true,
        data,
    }))
}

/// Save a listing to the authenticated user's favorites.
#[utoipa::path(
    post,
    path = "/api/favorites",
    tag = "Favorites",
    request_body = CreateFavoriteRequest,
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Listing saved", body = FavoriteResponse),
        (status = 400, description = "Missing property ID"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No active listing with this ID"),
        (status = 409, description = "Already saved")
    )
)]
pub async fn create_favorite(
    Auth(principal): Auth,
    State(state): State<AppState>,
    Json(request): Json<CreateFavoriteRequest>,
) -> Result<(StatusCode, Json<FavoriteResponse>), ApiError> {
    let property_id = request
        .property_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Property ID is required"))?;

    let property_repo = PropertyRepository::new(&state.storage);
    let property = property_repo.get(&property_id)?;
    if !property.is_active {
        return Err(ApiError::not_found("Property not found"));
    }

    let favorite_repo = FavoriteRepository::new(&state.storage);
    if favorite_repo
        .find_by_user_and_property(&principal.user_id, &property_id)?
        .is_some()
    {
        return Err(ApiError::conflict("Property already in favorites"));
    }

    let favorite = Favorite {
        id: Uuid::new_v4().to_string(),
        user_id: principal.user_id,
        property_id,
        created_at: Utc::now(),
    };
    favorite_repo.create(&favorite)?;

    Ok((
        StatusCode::CREATED,
        Json(FavoriteResponse {
            success: true,
            data: favorite,
            message: "Property added to favorites".to_string(),
        }),
    ))
}

/// Remove a listing from the authenticated user's favorites.
#[utoipa::path(
    delete,
    path = "/api/favorites",
    tag = "Favorites",
    params(DeleteFavoriteQuery),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Favorite removed", body = MessageResponse),
        (status = 400, description = "Missing property ID"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Listing was not saved")
    )
)]
pub async fn delete_favorite(
    Auth(principal): Auth,
    State(state): State<AppState>,
    Query(query): Query<DeleteFavoriteQuery>,
) -> Result<Json<MessageResponse>, ApiError> {
    let property_id = query
        .property_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Property ID is required"))?;

    let favorite_repo = FavoriteRepository::new(&state.storage);
    let favorite = favorite_repo
        .find_by_user_and_property(&principal.user_id, &property_id)?
        .ok_or_else(|| ApiError::not_found("Favorite not found"))?;

    favorite_repo.delete(&favorite.id)?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Property removed from favorites".to_string(),
    }))
}

/// Report whether the authenticated user has saved a listing.
#[utoipa::path(
    get,
    path = "/api/favorites/check/{property_id}",
    tag = "Favorites",
    params(("property_id" = String, Path, description = "Listing ID")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Favorite status", body = FavoriteStatusResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn check_favorite(
    Auth(principal): Auth,
    State(state): State<AppState>,
    Path(property_id): Path<String>,
) -> Result<Json<FavoriteStatusResponse>, ApiError> {
    let favorite_repo = FavoriteRepository::new(&state.storage);
    let found = favorite_repo.find_by_user_and_property(&principal.user_id, &property_id)?;

    Ok(Json(FavoriteStatusResponse {
        success: true,
        data: FavoriteStatus {
            is_favorited: found.is_some(),
            favorite_id: found.map(|f| f.id),
        },
    }))
}
