// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Inquiry endpoints: lead capture, agent lead handling, and statistics.
//!
//! Submission is open to anonymous visitors. Everything after submission
//! is gated: listing agents work leads against their own properties, the
//! inquiry creator may withdraw it, and admins see everything.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    auth::{Auth, OptionalAuth, Role},
    error::ApiError,
    models::{CreateInquiryRequest, Inquiry, InquiryStatus, UpdateInquiryStatusRequest},
    state::AppState,
    storage::{InquiryRepository, OwnershipEnforcer, PropertyRepository, StorageError},
    validation::validate_inquiry,
};

use super::MessageResponse;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Query parameters for the inquiry list.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct InquiryListQuery {
    /// Restrict to one listing. Requires owning that listing or admin.
    pub property_id: Option<String>,
    /// Status filter: pending, contacted, closed.
    pub status: Option<String>,
}

/// Inquiry collection payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct InquiryListData {
    pub inquiries: Vec<Inquiry>,
    pub count: usize,
}

/// Inquiry list response.
#[derive(Debug, Serialize, ToSchema)]
pub struct InquiryListResponse {
    pub success: bool,
    pub data: InquiryListData,
}

/// Single-inquiry response.
#[derive(Debug, Serialize, ToSchema)]
pub struct InquiryResponse {
    pub success: bool,
    pub data: Inquiry,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Lead counts by handling state, plus activity over the last week.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InquiryStatistics {
    pub total: u64,
    pub pending: u64,
    pub contacted: u64,
    pub closed: u64,
    pub recent_count: u64,
}

/// Statistics response.
#[derive(Debug, Serialize, ToSchema)]
pub struct InquiryStatsResponse {
    pub success: bool,
    pub data: InquiryStatistics,
}

// =============================================================================
// Handlers
// =============================================================================

/// Submit an inquiry about a listing. Anonymous submissions are accepted;
/// a signed-in visitor gets linked to the lead.
#[utoipa::path(
    post,
    path = "/api/inquiries",
    tag = "Inquiries",
    request_body = CreateInquiryRequest,
    responses(
        (status = 201, description = "Inquiry recorded", body = InquiryResponse),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "No listing with this ID")
    )
)]
pub async fn create_inquiry(
    OptionalAuth(principal): OptionalAuth,
    State(state): State<AppState>,
    Json(request): Json<CreateInquiryRequest>,
) -> Result<(StatusCode, Json<InquiryResponse>), ApiError> {
    validate_inquiry(&request)?;

    let property_repo = PropertyRepository::new(&state.storage);
    if !property_repo.exists(&request.property_id) {
        return Err(ApiError::not_found("Property not found"));
    }

    let now = Utc::now();
    let inquiry = Inquiry {
        id: Uuid::new_v4().to_string(),
        property_id: request.property_id,
        user_id: principal.map(|p| p.user_id),
        name: request.name.trim().to_string(),
        email: request.email.trim().to_lowercase(),
        phone: request.phone.trim().to_string(),
        message: request.message.trim().to_string(),
        status: InquiryStatus::Pending,
        created_at: now,
        updated_at: now,
    };

    InquiryRepository::new(&state.storage).create(&inquiry)?;

    Ok((
        StatusCode::CREATED,
        Json(InquiryResponse {
            success: true,
            data: inquiry,
            message: Some("Inquiry submitted successfully".to_string()),
        }),
    ))
}

/// List inquiries visible to the authenticated user, newest first.
///
/// With `propertyId` the caller must own that listing (or be admin).
/// Without it the scope follows the role: users see inquiries they
/// submitted, agents see leads against their listings, admins see all.
#[utoipa::path(
    get,
    path = "/api/inquiries",
    tag = "Inquiries",
    params(InquiryListQuery),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Visible inquiries", body = InquiryListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the listing owner"),
        (status = 404, description = "No listing with this ID")
    )
)]
pub async fn list_inquiries(
    Auth(principal): Auth,
    State(state): State<AppState>,
    Query(query): Query<InquiryListQuery>,
) -> Result<Json<InquiryListResponse>, ApiError> {
    let property_repo = PropertyRepository::new(&state.storage);
    let inquiry_repo = InquiryRepository::new(&state.storage);

    let mut inquiries = if let Some(property_id) = query
        .property_id
        .as_deref()
        .filter(|id| !id.trim().is_empty())
    {
        let property = property_repo.get(property_id)?;
        property
            .verify_ownership(&principal)
            .map_err(|_| ApiError::forbidden("Unauthorized to view these inquiries"))?;
        inquiry_repo.list_by_property(property_id)?
    } else {
        match principal.role {
            Role::User => inquiry_repo.list_by_user(&principal.user_id)?,
            Role::Agent => {
                let property_ids: Vec<String> = property_repo
                    .list_by_agent(&principal.user_id)?
                    .into_iter()
                    .map(|p| p.id)
                    .collect();
                inquiry_repo.list_by_properties(&property_ids)?
            }
            Role::Admin => inquiry_repo.list_all()?,
        }
    };

    if let Some(status) = &query.status {
        inquiries.retain(|i| i.status.as_str() == status);
    }

    inquiries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let count = inquiries.len();

    Ok(Json(InquiryListResponse {
        success: true,
        data: InquiryListData { inquiries, count },
    }))
}

/// Fetch one inquiry. Listing owner or admin only.
#[utoipa::path(
    get,
    path = "/api/inquiries/{id}",
    tag = "Inquiries",
    params(("id" = String, Path, description = "Inquiry ID")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "The inquiry", body = InquiryResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the listing owner"),
        (status = 404, description = "No inquiry with this ID")
    )
)]
pub async fn get_inquiry(
    Auth(principal): Auth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<InquiryResponse>, ApiError> {
    let inquiry = InquiryRepository::new(&state.storage).get(&id)?;

    let property = PropertyRepository::new(&state.storage)
        .get(&inquiry.property_id)
        .map_err(|e| match e {
            StorageError::NotFound { .. } => ApiError::not_found("Associated property not found"),
            other => ApiError::from(other),
        })?;

    property
        .verify_ownership(&principal)
        .map_err(|_| ApiError::forbidden("Unauthorized to view this inquiry"))?;

    Ok(Json(InquiryResponse {
        success: true,
        data: inquiry,
        message: None,
    }))
}

/// Move an inquiry to a new handling state. Listing owner or admin only.
#[utoipa::path(
    patch,
    path = "/api/inquiries/{id}",
    tag = "Inquiries",
    params(("id" = String, Path, description = "Inquiry ID")),
    request_body = UpdateInquiryStatusRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Updated inquiry", body = InquiryResponse),
        (status = 400, description = "Unknown status value"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the listing owner"),
        (status = 404, description = "No inquiry with this ID")
    )
)]
pub async fn update_inquiry_status(
    Auth(principal): Auth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateInquiryStatusRequest>,
) -> Result<Json<InquiryResponse>, ApiError> {
    let status = InquiryStatus::from_str(&request.status)
        .ok_or_else(|| ApiError::bad_request("Invalid status value"))?;

    let inquiry_repo = InquiryRepository::new(&state.storage);
    let mut inquiry = inquiry_repo.get(&id)?;

    let property = PropertyRepository::new(&state.storage)
        .get(&inquiry.property_id)
        .map_err(|e| match e {
            StorageError::NotFound { .. } => ApiError::not_found("Associated property not found"),
            other => ApiError::from(other),
        })?;

    property
        .verify_ownership(&principal)
        .map_err(|_| ApiError::forbidden("Unauthorized to update this inquiry"))?;

    inquiry.status = status;
    inquiry.updated_at = Utc::now();
    inquiry_repo.update(&inquiry)?;

    Ok(Json(InquiryResponse {
        success: true,
        data: inquiry,
        message: Some("Inquiry status updated successfully".to_string()),
    }))
}

/// Delete an inquiry. Its creator or an admin only.
#[utoipa::path(
    delete,
    path = "/api/inquiries/{id}",
    tag = "Inquiries",
    params(("id" = String, Path, description = "Inquiry ID")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Inquiry deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the creator"),
        (status = 404, description = "No inquiry with this ID")
    )
)]
pub async fn delete_inquiry(
    Auth(principal): Auth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let inquiry_repo = InquiryRepository::new(&state.storage);
    let inquiry = inquiry_repo.get(&id)?;

    // Anonymous inquiries have no creator, so only an admin can remove them.
    let is_creator = inquiry.user_id.as_deref() == Some(principal.user_id.as_str());
    if !principal.is_admin() && !is_creator {
        return Err(ApiError::forbidden("Unauthorized to delete this inquiry"));
    }

    inquiry_repo.delete(&id)?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Inquiry deleted successfully".to_string(),
    }))
}

/// Lead statistics for the agent dashboard. Agents see their own
/// listings' numbers; admins see the whole book.
#[utoipa::path(
    get,
    path = "/api/inquiries/stats",
    tag = "Inquiries",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Lead statistics", body = InquiryStatsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Requires the agent or admin role")
    )
)]
pub async fn inquiry_stats(
    Auth(principal): Auth,
    State(state): State<AppState>,
) -> Result<Json<InquiryStatsResponse>, ApiError> {
    if principal.role == Role::User {
        return Err(ApiError::forbidden("Unauthorized to view statistics"));
    }

    let inquiry_repo = InquiryRepository::new(&state.storage);
    let inquiries = match principal.role {
        Role::Admin => inquiry_repo.list_all()?,
        _ => {
            let property_ids: Vec<String> = PropertyRepository::new(&state.storage)
                .list_by_agent(&principal.user_id)?
                .into_iter()
                .map(|p| p.id)
                .collect();
            inquiry_repo.list_by_properties(&property_ids)?
        }
    };

    let seven_days_ago = Utc::now() - Duration::days(7);
    let count_status =
        |s: InquiryStatus| inquiries.iter().filter(|i| i.status == s).count() as u64;

    Ok(Json(InquiryStatsResponse {
        success: true,
        data: InquiryStatistics {
            total: inquiries.len() as u64,
            pending: count_status(InquiryStatus::Pending),
            contacted: count_status(InquiryStatus::Contacted),
            closed: count_status(InquiryStatus::Closed),
            recent_count: inquiries
                .iter()
                .filter(|i| i.created_at >= seven_days_ago)
                .count() as u64,
        },
    }))
}
