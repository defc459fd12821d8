// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Domain Data Models
//!
//! This module defines the persisted entities and shared vocabulary of the
//! listing service. All API-facing types derive `Serialize`, `Deserialize`,
//! and `ToSchema` for automatic JSON handling and OpenAPI documentation.
//!
//! JSON wire names are camelCase to match what the web client already
//! consumes (`agentId`, `isActive`, `createdAt`, ...).
//!
//! ## Model Categories
//!
//! - **Users**: accounts with hashed credentials and a [`Role`]
//! - **Properties**: listings with location, features, and images
//! - **Favorites**: per-user saved listings, unique per (user, property)
//! - **Inquiries**: lead-capture messages against a listing

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::Role;

// =============================================================================
// User Models
// =============================================================================

/// A stored user account.
///
/// The password is held only as an argon2 hash. The reset fields hold a
/// SHA-256 digest of the last issued password-reset token and its expiry;
/// both are cleared when the reset completes.
///
/// Never serialize this type into a response; use [`PublicUser`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier for this account.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Login email, unique across accounts.
    pub email: String,
    /// Argon2 hash of the password (PHC string format).
    pub password_hash: String,
    /// Authorization role.
    pub role: Role,
    /// Contact phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Profile image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// SHA-256 hex digest of the outstanding reset token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_reset_token: Option<String>,
    /// When the outstanding reset token stops being accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_reset_expires: Option<DateTime<Utc>>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last modified.
    pub updated_at: DateTime<Utc>,
}

/// The response projection of a user: everything except credentials and
/// reset state.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    /// Unique identifier for this account.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Authorization role.
    pub role: Role,
    /// Contact phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Profile image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last modified.
    pub updated_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            phone: user.phone,
            avatar: user.avatar,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        user.clone().into()
    }
}

// =============================================================================
// Property Models
// =============================================================================

/// Kind of property being listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    House,
    Apartment,
    Condo,
    Townhouse,
    Land,
    Commercial,
}

impl PropertyType {
    /// Wire name of this kind, as it appears in query filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::House => "house",
            PropertyType::Apartment => "apartment",
            PropertyType::Condo => "condo",
            PropertyType::Townhouse => "townhouse",
            PropertyType::Land => "land",
            PropertyType::Commercial => "commercial",
        }
    }
}

/// Market status of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyStatus {
    ForSale,
    ForRent,
    Sold,
    Rented,
}

impl PropertyStatus {
    /// Wire name of this status, as it appears in query filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyStatus::ForSale => "for-sale",
            PropertyStatus::ForRent => "for-rent",
            PropertyStatus::Sold => "sold",
            PropertyStatus::Rented => "rented",
        }
    }
}

impl Default for PropertyStatus {
    fn default() -> Self {
        PropertyStatus::ForSale
    }
}

/// Physical condition of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyCondition {
    New,
    Excellent,
    Good,
    Fair,
    NeedsRenovation,
}

impl Default for PropertyCondition {
    fn default() -> Self {
        PropertyCondition::Good
    }
}

/// Geographic coordinates for map display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Where a property is located.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Street address.
    pub address: String,
    /// City name.
    pub city: String,
    /// State or region.
    pub state: String,
    /// Country, defaulting to "USA".
    #[serde(default = "default_country")]
    pub country: String,
    /// Postal code.
    pub zip_code: String,
    /// Optional map coordinates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

fn default_country() -> String {
    "USA".to_string()
}

/// Physical characteristics of a property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyFeatures {
    /// Number of bedrooms (0 = studio).
    pub bedrooms: u32,
    /// Number of bathrooms; half baths count as 0.5.
    pub bathrooms: f64,
    /// Interior area in square feet.
    pub square_feet: u64,
    /// Lot area in acres.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lot_size: Option<f64>,
    /// Year of construction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_built: Option<i32>,
    /// Number of parking spots.
    #[serde(default)]
    pub parking: u32,
    /// Has a garage.
    #[serde(default)]
    pub garage: bool,
    /// Has a pool.
    #[serde(default)]
    pub pool: bool,
    /// Has a garden.
    #[serde(default)]
    pub garden: bool,
    /// Has a balcony.
    #[serde(default)]
    pub balcony: bool,
    /// Offered furnished.
    #[serde(default)]
    pub furnished: bool,
}

/// A stored listing photo, pointing into the media area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyImage {
    /// URL the client loads the image from.
    pub url: String,
    /// Asset identifier in the media store.
    pub asset_id: String,
}

/// A property listing.
///
/// Listings are soft-deleted: removal flips `is_active` instead of erasing
/// the record, so favorites and inquiries keep a valid reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Unique identifier for this listing.
    pub id: String,
    /// Listing headline (10 to 200 characters).
    pub title: String,
    /// Full description (at least 20 characters).
    pub description: String,
    /// Kind of property.
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    /// Market status.
    #[serde(default)]
    pub status: PropertyStatus,
    /// Physical condition.
    #[serde(default)]
    pub condition: PropertyCondition,
    /// Asking price or monthly rent, in whole currency units.
    pub price: f64,
    /// Where the property is.
    pub location: Location,
    /// Physical characteristics.
    pub features: PropertyFeatures,
    /// Listing photos. At least one is required to publish.
    pub images: Vec<PropertyImage>,
    /// Amenity labels ("Garage", "Pool", "Pet Friendly", ...).
    #[serde(default)]
    pub amenities: Vec<String>,
    /// Account that owns this listing.
    pub agent_id: String,
    /// Detail-page view counter.
    #[serde(default)]
    pub views: u64,
    /// Shown in the featured carousel.
    #[serde(default)]
    pub is_featured: bool,
    /// False once soft-deleted; inactive listings leave public queries.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// When the listing was created.
    pub created_at: DateTime<Utc>,
    /// When the listing was last modified.
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

// =============================================================================
// Favorite Models
// =============================================================================

/// A saved listing. Each (user, property) pair exists at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    /// Unique identifier for this favorite.
    pub id: String,
    /// Account that saved the listing.
    pub user_id: String,
    /// The saved listing.
    pub property_id: String,
    /// When the listing was saved.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Inquiry Models
// =============================================================================

/// Lead-handling state of an inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    Pending,
    Contacted,
    Closed,
}

impl InquiryStatus {
    /// Parse a status from its wire form.
    pub fn from_str(s: &str) -> Option<InquiryStatus> {
        match s {
            "pending" => Some(InquiryStatus::Pending),
            "contacted" => Some(InquiryStatus::Contacted),
            "closed" => Some(InquiryStatus::Closed),
            _ => None,
        }
    }

    /// Wire name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryStatus::Pending => "pending",
            InquiryStatus::Contacted => "contacted",
            InquiryStatus::Closed => "closed",
        }
    }
}

impl Default for InquiryStatus {
    fn default() -> Self {
        InquiryStatus::Pending
    }
}

/// A lead captured against a listing.
///
/// Anonymous visitors can submit inquiries, so `user_id` is optional; the
/// contact fields are always required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    /// Unique identifier for this inquiry.
    pub id: String,
    /// Listing the inquiry is about.
    pub property_id: String,
    /// Submitting account, when the visitor was signed in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Contact name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Message body (at least 10 characters).
    pub message: String,
    /// Lead-handling state.
    #[serde(default)]
    pub status: InquiryStatus,
    /// When the inquiry was submitted.
    pub created_at: DateTime<Utc>,
    /// When the inquiry was last modified.
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Request Models
// =============================================================================

/// Request to create an account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Display name (2 to 50 characters).
    pub name: String,
    /// Login email.
    pub email: String,
    /// Password (at least 6 characters).
    pub password: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Requested role; only `user` and `agent` are self-assignable.
    #[serde(default)]
    pub role: Option<Role>,
}

/// Request to sign in.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Password.
    pub password: String,
}

/// Request to start a password reset.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ForgotPasswordRequest {
    /// Email of the account to reset.
    pub email: String,
}

/// Request to complete a password reset.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResetPasswordRequest {
    /// Email of the account being reset.
    pub email: String,
    /// The reset token from the emailed link.
    pub token: String,
    /// New password (at least 6 characters).
    pub password: String,
}

/// Request to create a listing. The owning agent comes from the
/// authenticated principal, never from the body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyRequest {
    /// Listing headline (10 to 200 characters).
    pub title: String,
    /// Full description (at least 20 characters).
    pub description: String,
    /// Kind of property.
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    /// Market status; defaults to for-sale.
    #[serde(default)]
    pub status: PropertyStatus,
    /// Physical condition; defaults to good.
    #[serde(default)]
    pub condition: PropertyCondition,
    /// Asking price or monthly rent.
    pub price: f64,
    /// Where the property is.
    pub location: Location,
    /// Physical characteristics.
    pub features: PropertyFeatures,
    /// Listing photos (at least one).
    pub images: Vec<PropertyImage>,
    /// Amenity labels.
    #[serde(default)]
    pub amenities: Vec<String>,
    /// Shown in the featured carousel.
    #[serde(default)]
    pub is_featured: bool,
}

/// Partial update of a listing. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePropertyRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<PropertyType>,
    pub status: Option<PropertyStatus>,
    pub condition: Option<PropertyCondition>,
    pub price: Option<f64>,
    pub location: Option<Location>,
    pub features: Option<PropertyFeatures>,
    pub images: Option<Vec<PropertyImage>>,
    pub amenities: Option<Vec<String>>,
    pub is_featured: Option<bool>,
}

/// Request to save a listing to favorites.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFavoriteRequest {
    /// The listing to save. Required; optional here so its absence can
    /// answer 400 instead of a deserialization error.
    #[serde(default)]
    pub property_id: Option<String>,
}

/// Request to submit an inquiry about a listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInquiryRequest {
    /// Listing the inquiry is about.
    pub property_id: String,
    /// Contact name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Message body (at least 10 characters).
    pub message: String,
}

/// Request to move an inquiry to a new lead-handling state.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateInquiryStatusRequest {
    /// The new state; one of `pending`, `contacted`, `closed`. Kept as a
    /// string so an unknown value answers a plain 400 rather than a body
    /// rejection.
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: "u1".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$hash".to_string(),
            role: Role::Agent,
            phone: Some("555-0100".to_string()),
            avatar: None,
            password_reset_token: Some("digest".to_string()),
            password_reset_expires: Some(Utc::now()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn public_user_drops_credentials_and_reset_state() {
        let user = sample_user();
        let public = PublicUser::from(&user);

        let json = serde_json::to_value(&public).unwrap();
        assert_eq!(json["id"], "u1");
        assert_eq!(json["role"], "agent");
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("passwordResetToken").is_none());
        assert!(json.get("passwordResetExpires").is_none());
    }

    #[test]
    fn property_wire_format_matches_client_expectations() {
        let property = Property {
            id: "p1".to_string(),
            title: "Spacious family home".to_string(),
            description: "A lovely place with room for everyone.".to_string(),
            property_type: PropertyType::House,
            status: PropertyStatus::ForSale,
            condition: PropertyCondition::Good,
            price: 450000.0,
            location: Location {
                address: "1 Main St".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                country: "USA".to_string(),
                zip_code: "62701".to_string(),
                coordinates: None,
            },
            features: PropertyFeatures {
                bedrooms: 3,
                bathrooms: 2.5,
                square_feet: 2100,
                lot_size: None,
                year_built: Some(1998),
                parking: 2,
                garage: true,
                pool: false,
                garden: true,
                balcony: false,
                furnished: false,
            },
            images: vec![PropertyImage {
                url: "/media/a1.jpg".to_string(),
                asset_id: "a1".to_string(),
            }],
            amenities: vec!["Garage".to_string()],
            agent_id: "u1".to_string(),
            views: 0,
            is_featured: false,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&property).unwrap();
        assert_eq!(json["type"], "house");
        assert_eq!(json["status"], "for-sale");
        assert_eq!(json["condition"], "good");
        assert_eq!(json["agentId"], "u1");
        assert_eq!(json["isActive"], true);
        assert_eq!(json["location"]["zipCode"], "62701");
        assert_eq!(json["features"]["squareFeet"], 2100);
        assert_eq!(json["images"][0]["assetId"], "a1");
    }

    #[test]
    fn property_defaults_apply_on_deserialize() {
        let json = r#"{
            "id": "p1",
            "title": "Spacious family home",
            "description": "A lovely place with room for everyone.",
            "type": "condo",
            "price": 100000,
            "location": {"address": "1 Main St", "city": "A", "state": "B", "zipCode": "1"},
            "features": {"bedrooms": 1, "bathrooms": 1, "squareFeet": 500},
            "images": [],
            "agentId": "u1",
            "createdAt": "2026-01-01T00:00:00Z",
            "updatedAt": "2026-01-01T00:00:00Z"
        }"#;

        let property: Property = serde_json::from_str(json).unwrap();
        assert_eq!(property.status, PropertyStatus::ForSale);
        assert_eq!(property.condition, PropertyCondition::Good);
        assert_eq!(property.location.country, "USA");
        assert!(property.is_active);
        assert_eq!(property.views, 0);
        assert!(!property.is_featured);
    }

    #[test]
    fn inquiry_status_defaults_to_pending() {
        assert_eq!(InquiryStatus::default(), InquiryStatus::Pending);
        let parsed: InquiryStatus = serde_json::from_str("\"contacted\"").unwrap();
        assert_eq!(parsed, InquiryStatus::Contacted);
    }

    #[test]
    fn inquiry_status_parses_wire_values_only() {
        assert_eq!(InquiryStatus::from_str("pending"), Some(InquiryStatus::Pending));
        assert_eq!(InquiryStatus::from_str("closed"), Some(InquiryStatus::Closed));
        assert_eq!(InquiryStatus::from_str("archived"), None);
        assert_eq!(InquiryStatus::from_str("Pending"), None);
    }
}
