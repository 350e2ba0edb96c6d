//! Visit model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    pagination::Sortable,
};

/// Visit record as persisted
///
/// A non-null `deleted_at` marks the row as soft-deleted: retained in storage
/// but excluded from every default query.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Visit {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Sortable for Visit {
    // The fillable attribute set
    const SORTABLE_COLUMNS: &'static [&'static str] = &["name", "email", "latitude", "longitude"];

    fn sort_alias(name: &str) -> Option<&'static str> {
        match name {
            "created" => Some("created_at"),
            "updated" => Some("updated_at"),
            _ => None,
        }
    }
}

/// Create visit request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateVisit {
    /// Visit name (required, at most 50 characters)
    #[validate(length(max = 50, message = "Name must not exceed 50 characters"))]
    pub name: Option<String>,
    /// Contact email (optional, unique among live visits)
    #[validate(
        email(message = "Email must be a valid email address"),
        length(max = 50, message = "Email must not exceed 50 characters")
    )]
    pub email: Option<String>,
    /// Latitude (required)
    pub latitude: Option<f64>,
    /// Longitude (required)
    pub longitude: Option<f64>,
}

/// A fully validated visit ready for insertion
#[derive(Debug, Clone)]
pub struct NewVisit {
    pub name: String,
    pub email: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl CreateVisit {
    /// Run field rules and required-field checks, yielding insertable values.
    pub fn into_new_visit(self) -> AppResult<NewVisit> {
        self.validate()?;

        let name = self.name.ok_or_else(|| required("name"))?;
        let latitude = self.latitude.ok_or_else(|| required("latitude"))?;
        let longitude = self.longitude.ok_or_else(|| required("longitude"))?;

        Ok(NewVisit {
            name,
            email: self.email,
            latitude,
            longitude,
        })
    }
}

/// Update visit request; restricted to the same fillable set as create,
/// every field optional
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateVisit {
    #[validate(length(max = 50, message = "Name must not exceed 50 characters"))]
    pub name: Option<String>,
    #[validate(
        email(message = "Email must be a valid email address"),
        length(max = 50, message = "Email must not exceed 50 characters")
    )]
    pub email: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// External-facing visit projection
#[derive(Debug, Serialize, ToSchema)]
pub struct VisitResource {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Visit> for VisitResource {
    fn from(visit: Visit) -> Self {
        Self {
            id: visit.id,
            name: visit.name,
            email: visit.email,
            latitude: visit.latitude,
            longitude: visit.longitude,
        }
    }
}

fn required(field: &str) -> AppError {
    AppError::Validation {
        field: field.to_string(),
        message: format!("The {} field is required", field),
    }
}
