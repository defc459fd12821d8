// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Property listing endpoints: public search and detail plus agent-owned CRUD.

use std::cmp::Ordering;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    auth::{AgentOrAdmin, Auth},
    error::ApiError,
    models::{CreatePropertyRequest, Property, UpdatePropertyRequest},
    state::AppState,
    storage::{OwnershipEnforcer, PropertyRepository},
    validation::{validate_property, validate_property_update},
};

use super::MessageResponse;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Page size applied when the query names none.
const DEFAULT_PAGE_SIZE: u64 = 12;

/// Largest page a single request may ask for.
const MAX_PAGE_SIZE: u64 = 100;

/// Query parameters for the public listing search.
///
/// Filters are conjunctive. An unrecognized `type` or `status` value matches
/// no listing rather than failing the request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PropertyQuery {
    /// Kind filter: house, apartment, condo, townhouse, land, commercial.
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    /// Status filter: for-sale, for-rent, sold, rented.
    pub status: Option<String>,
    /// Lowest acceptable price.
    pub min_price: Option<f64>,
    /// Highest acceptable price.
    pub max_price: Option<f64>,
    /// Minimum number of bedrooms.
    pub bedrooms: Option<u32>,
    /// Minimum number of bathrooms.
    pub bathrooms: Option<f64>,
    /// City, matched as a case-insensitive substring.
    pub city: Option<String>,
    /// State, matched as a case-insensitive substring.
    pub state: Option<String>,
    /// Free-text needle over title, description, city and state.
    pub search: Option<String>,
    /// Only listings flagged for the featured carousel.
    pub is_featured: Option<bool>,
    /// Sort order: `-createdAt` (default), `createdAt`, `price`, `-price`.
    pub sort: Option<String>,
    /// 1-based page number.
    #[param(default = 1)]
    pub page: Option<u64>,
    /// Page size.
    #[param(default = 12, maximum = 100)]
    pub limit: Option<u64>,
}

/// Page descriptor accompanying every search result.
#[derive(Debug, Serialize, ToSchema)]
pub struct Pagination {
    /// Matching listings across all pages.
    pub total: u64,
    /// Current 1-based page.
    pub page: u64,
    /// Number of pages at this limit.
    pub pages: u64,
    /// Page size used.
    pub limit: u64,
}

/// Listing search response.
#[derive(Debug, Serialize, ToSchema)]
pub struct PropertyListResponse {
    pub success: bool,
    pub data: Vec<Property>,
    pub pagination: Pagination,
}

/// Single-listing response.
#[derive(Debug, Serialize, ToSchema)]
pub struct PropertyResponse {
    pub success: bool,
    pub data: Property,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// The authenticated agent's own listings, unpaginated.
#[derive(Debug, Serialize, ToSchema)]
pub struct OwnedPropertiesResponse {
    pub success: bool,
    pub data: Vec<Property>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Search active listings.
#[utoipa::path(
    get,
    path = "/api/properties",
    tag = "Properties",
    params(PropertyQuery),
    responses((status = 200, description = "Matching listings", body = PropertyListResponse))
)]
pub async fn list_properties(
    State(state): State<AppState>,
    Query(query): Query<PropertyQuery>,
) -> Result<Json<PropertyListResponse>, ApiError> {
    let repo = PropertyRepository::new(&state.storage);
    let mut listings = repo.list_active()?;

    if let Some(kind) = &query.property_type {
        listings.retain(|p| p.property_type.as_str() == kind);
    }
    if let Some(status) = &query.status {
        listings.retain(|p| p.status.as_str() == status);
    }
    if let Some(min) = query.min_price {
        listings.retain(|p| p.price >= min);
    }
    if let Some(max) = query.max_price {
        listings.retain(|p| p.price <= max);
    }
    if let Some(bedrooms) = query.bedrooms {
        listings.retain(|p| p.features.bedrooms >= bedrooms);
    }
    if let Some(bathrooms) = query.bathrooms {
        listings.retain(|p| p.features.bathrooms >= bathrooms);
    }
    if let Some(city) = &query.city {
        let needle = city.to_lowercase();
        listings.retain(|p| p.location.city.to_lowercase().contains(&needle));
    }
    if let Some(state_filter) = &query.state {
        let needle = state_filter.to_lowercase();
        listings.retain(|p| p.location.state.to_lowercase().contains(&needle));
    }
    if let Some(search) = &query.search {
        let needle = search.to_lowercase();
        listings.retain(|p| {
            p.title.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
                || p.location.city.to_lowercase().contains(&needle)
                || p.location.state.to_lowercase().contains(&needle)
        });
    }
    if let Some(featured) = query.is_featured {
        listings.retain(|p| p.is_featured == featured);
    }

    match query.sort.as_deref() {
        Some("createdAt") => listings.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        Some("price") => listings.sort_by(|a, b| {
            a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal)
        }),
        Some("-price") => listings.sort_by(|a, b| {
            b.price.partial_cmp(&a.price).unwrap_or(Ordering::Equal)
        }),
        // Newest first, also the fallback for unrecognized sort keys.
        _ => listings.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }

    let total = listings.len() as u64;
    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let page = query.page.unwrap_or(1).max(1);
    let pages = total.div_ceil(limit);

    let start = (page - 1).saturating_mul(limit);
    let data: Vec<Property> = listings
        .into_iter()
        .skip(start as usize)
        .take(limit as usize)
        .collect();

    Ok(Json(PropertyListResponse {
        success: true,
        data,
        pagination: Pagination {
            total,
            page,
            pages,
            limit,
        },
    }))
}

/// Create a listing owned by the authenticated agent.
#[utoipa::path(
    post,
    path = "/api/properties",
    tag = "Properties",
    request_body = CreatePropertyRequest,
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Listing created", body = PropertyResponse),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires the agent or admin role")
    )
)]
pub async fn create_property(
    AgentOrAdmin(principal): AgentOrAdmin,
    State(state): State<AppState>,
    Json(request): Json<CreatePropertyRequest>,
) -> Result<(StatusCode, Json<PropertyResponse>), ApiError> {
    validate_property(&request)?;

    let now = Utc::now();
    let property = Property {
        id: Uuid::new_v4().to_string(),
        title: request.title.trim().to_string(),
        description: request.description.trim().to_string(),
        property_type: request.property_type,
        status: request.status,
        condition: request.condition,
        price: request.price,
        location: request.location,
        features: request.features,
        images: request.images,
        amenities: request.amenities,
        // Ownership comes from the verified principal, never the body.
        agent_id: principal.user_id,
        views: 0,
        is_featured: request.is_featured,
        is_active: true,
        created_at: now,
        updated_at: now,
    };

    let repo = PropertyRepository::new(&state.storage);
    repo.create(&property)?;

    Ok((
        StatusCode::CREATED,
        Json(PropertyResponse {
            success: true,
            data: property,
            message: Some("Property created successfully".to_string()),
        }),
    ))
}

/// Fetch one active listing and count the view.
#[utoipa::path(
    get,
    path = "/api/properties/{id}",
    tag = "Properties",
    params(("id" = String, Path, description = "Listing ID")),
    responses(
        (status = 200, description = "The listing", body = PropertyResponse),
        (status = 404, description = "No active listing with this ID")
    )
)]
pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PropertyResponse>, ApiError> {
    let repo = PropertyRepository::new(&state.storage);

    let property = repo.get(&id)?;
    // Soft-deleted listings are indistinguishable from absent ones.
    if !property.is_active {
        return Err(ApiError::not_found("Property not found"));
    }

    let property = repo.increment_views(&id)?;

    Ok(Json(PropertyResponse {
        success: true,
        data: property,
        message: None,
    }))
}

/// Update a listing. Owner or admin only.
#[utoipa::path(
    put,
    path = "/api/properties/{id}",
    tag = "Properties",
    params(("id" = String, Path, description = "Listing ID")),
    request_body = UpdatePropertyRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Updated listing", body = PropertyResponse),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the listing owner"),
        (status = 404, description = "No listing with this ID")
    )
)]
pub async fn update_property(
    Auth(principal): Auth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdatePropertyRequest>,
) -> Result<Json<PropertyResponse>, ApiError> {
    validate_property_update(&request)?;

    let repo = PropertyRepository::new(&state.storage);
    let mut property = repo.get(&id)?;

    property
        .verify_ownership(&principal)
        .map_err(|_| ApiError::forbidden("Unauthorized to update this property"))?;

    if let Some(title) = request.title {
        property.title = title.trim().to_string();
    }
    if let Some(description) = request.description {
        property.description = description.trim().to_string();
    }
    if let Some(property_type) = request.property_type {
        property.property_type = property_type;
    }
    if let Some(status) = request.status {
        property.status = status;
    }
    if let Some(condition) = request.condition {
        property.condition = condition;
    }
    if let Some(price) = request.price {
        property.price = price;
    }
    if let Some(location) = request.location {
        property.location = location;
    }
    if let Some(features) = request.features {
        property.features = features;
    }
    if let Some(images) = request.images {
        property.images = images;
    }
    if let Some(amenities) = request.amenities {
        property.amenities = amenities;
    }
    if let Some(is_featured) = request.is_featured {
        property.is_featured = is_featured;
    }
    property.updated_at = Utc::now();

    repo.update(&property)?;

    Ok(Json(PropertyResponse {
        success: true,
        data: property,
        message: Some("Property updated successfully".to_string()),
    }))
}

/// Soft-delete a listing. Owner or admin only.
#[utoipa::path(
    delete,
    path = "/api/properties/{id}",
    tag = "Properties",
    params(("id" = String, Path, description = "Listing ID")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Listing deactivated", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the listing owner"),
        (status = 404, description = "No listing with this ID")
    )
)]
pub async fn delete_property(
    Auth(principal): Auth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let repo = PropertyRepository::new(&state.storage);
    let mut property = repo.get(&id)?;

    property
        .verify_ownership(&principal)
        .map_err(|_| ApiError::forbidden("Unauthorized to delete this property"))?;

    // Soft delete keeps favorites and inquiries pointing at a real record.
    property.is_active = false;
    property.updated_at = Utc::now();
    repo.update(&property)?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Property deleted successfully".to_string(),
    }))
}

/// The authenticated user's own listings, newest first, inactive included.
#[utoipa::path(
    get,
    path = "/api/properties/my",
    tag = "Properties",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Own listings", body = OwnedPropertiesResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn my_properties(
    Auth(principal): Auth,
    State(state): State<AppState>,
) -> Result<Json<OwnedPropertiesResponse>, ApiError> {
    let repo = PropertyRepository::new(&state.storage);
    let mut listings = repo.list_by_agent(&principal.user_id)?;
    listings.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(Json(OwnedPropertiesResponse {
        success: true,
        data: listings,
    }))
}
