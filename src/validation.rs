// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Request-body validation.
//!
//! Handlers call these before touching storage; the first failing rule
//! becomes a 400 with a field-specific message. Enum-valued fields are
//! already constrained by their types, so the checks here cover lengths,
//! ranges, and formats.

use crate::error::ApiError;
use crate::models::{
    CreateInquiryRequest, CreatePropertyRequest, Location, LoginRequest, PropertyFeatures,
    RegisterRequest, ResetPasswordRequest, UpdatePropertyRequest,
};

/// Structural email check: one `@`, non-empty local part, dotted domain.
pub fn is_valid_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

fn require_email(email: &str) -> Result<(), ApiError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(ApiError::bad_request("Invalid email address"))
    }
}

fn require_password(password: &str) -> Result<(), ApiError> {
    if password.chars().count() < 6 {
        return Err(ApiError::bad_request(
            "Password must be at least 6 characters",
        ));
    }
    Ok(())
}

pub fn validate_register(req: &RegisterRequest) -> Result<(), ApiError> {
    let name_len = req.name.trim().chars().count();
    if name_len < 2 {
        return Err(ApiError::bad_request("Name must be at least 2 characters"));
    }
    if name_len > 50 {
        return Err(ApiError::bad_request("Name cannot exceed 50 characters"));
    }
    require_email(&req.email)?;
    require_password(&req.password)?;
    // Admin accounts are provisioned, never self-registered.
    if req.role == Some(crate::auth::Role::Admin) {
        return Err(ApiError::bad_request("Role must be user or agent"));
    }
    Ok(())
}

pub fn validate_login(req: &LoginRequest) -> Result<(), ApiError> {
    require_email(&req.email)?;
    require_password(&req.password)?;
    Ok(())
}

pub fn validate_forgot_password_email(email: &str) -> Result<(), ApiError> {
    require_email(email).map_err(|_| ApiError::bad_request("Invalid email format."))
}

pub fn validate_reset_password(req: &ResetPasswordRequest) -> Result<(), ApiError> {
    require_email(&req.email)?;
    if req.token.is_empty() {
        return Err(ApiError::bad_request("Reset token is required"));
    }
    require_password(&req.password)?;
    Ok(())
}

fn validate_title(title: &str) -> Result<(), ApiError> {
    let len = title.trim().chars().count();
    if len < 10 {
        return Err(ApiError::bad_request("Title must be at least 10 characters"));
    }
    if len > 200 {
        return Err(ApiError::bad_request("Title cannot exceed 200 characters"));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), ApiError> {
    if description.trim().chars().count() < 20 {
        return Err(ApiError::bad_request(
            "Description must be at least 20 characters",
        ));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), ApiError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ApiError::bad_request("Price cannot be negative"));
    }
    Ok(())
}

fn validate_location(location: &Location) -> Result<(), ApiError> {
    if location.address.trim().chars().count() < 5 {
        return Err(ApiError::bad_request("Address is required"));
    }
    if location.city.trim().chars().count() < 2 {
        return Err(ApiError::bad_request("City is required"));
    }
    if location.state.trim().chars().count() < 2 {
        return Err(ApiError::bad_request("State is required"));
    }
    if location.zip_code.trim().chars().count() < 3 {
        return Err(ApiError::bad_request("Zip code is required"));
    }
    Ok(())
}

fn validate_features(features: &PropertyFeatures) -> Result<(), ApiError> {
    if !features.bathrooms.is_finite() || features.bathrooms < 0.0 {
        return Err(ApiError::bad_request("Bathrooms cannot be negative"));
    }
    if let Some(lot_size) = features.lot_size {
        if !lot_size.is_finite() || lot_size < 0.0 {
            return Err(ApiError::bad_request("Lot size cannot be negative"));
        }
    }
    Ok(())
}

pub fn validate_property(req: &CreatePropertyRequest) -> Result<(), ApiError> {
    validate_title(&req.title)?;
    validate_description(&req.description)?;
    validate_price(req.price)?;
    validate_location(&req.location)?;
    validate_features(&req.features)?;
    if req.images.is_empty() {
        return Err(ApiError::bad_request("At least one image is required"));
    }
    Ok(())
}

/// Validate only the fields a partial update supplies.
pub fn validate_property_update(req: &UpdatePropertyRequest) -> Result<(), ApiError> {
    if let Some(title) = &req.title {
        validate_title(title)?;
    }
    if let Some(description) = &req.description {
        validate_description(description)?;
    }
    if let Some(price) = req.price {
        validate_price(price)?;
    }
    if let Some(location) = &req.location {
        validate_location(location)?;
    }
    if let Some(features) = &req.features {
        validate_features(features)?;
    }
    if let Some(images) = &req.images {
        if images.is_empty() {
            return Err(ApiError::bad_request("At least one image is required"));
        }
    }
    Ok(())
}

pub fn validate_inquiry(req: &CreateInquiryRequest) -> Result<(), ApiError> {
    if req.property_id.is_empty() {
        return Err(ApiError::bad_request("Property ID is required"));
    }
    if req.name.trim().chars().count() < 2 {
        return Err(ApiError::bad_request("Name must be at least 2 characters"));
    }
    require_email(&req.email)?;
    if req.phone.trim().chars().count() < 10 {
        return Err(ApiError::bad_request(
            "Phone number must be at least 10 characters",
        ));
    }
    if req.message.trim().chars().count() < 10 {
        return Err(ApiError::bad_request(
            "Message must be at least 10 characters",
        ));
    }
    Ok(())
}
