//! Visits service: orchestration between validation, repository and shaping

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::visit::{CreateVisit, UpdateVisit, Visit, VisitResource},
    pagination::{Page, PageParams},
    repository::Repository,
};

#[derive(Clone)]
pub struct VisitsService {
    repository: Repository,
}

impl VisitsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List visits as a shaped page
    pub async fn list(&self, params: &PageParams) -> AppResult<Page<VisitResource>> {
        let (visits, total) = self.repository.visits.search(params).await?;
        let page = Page::new(visits, total, params.per_page);
        Ok(page.map(VisitResource::from))
    }

    /// Get a single visit by ID
    pub async fn get(&self, id: i32) -> AppResult<VisitResource> {
        let visit = self.repository.visits.get_by_id(id).await?;
        Ok(VisitResource::from(visit))
    }

    /// Validate and create a visit
    pub async fn create(&self, payload: CreateVisit) -> AppResult<VisitResource> {
        let new_visit = payload.into_new_visit()?;

        if let Some(ref email) = new_visit.email {
            if self.repository.visits.email_exists(email, None).await? {
                return Err(unique_email());
            }
        }

        let created = self.repository.visits.create(&new_visit).await?;
        tracing::info!(visit_id = created.id, "Visit created");
        Ok(VisitResource::from(created))
    }

    /// Validate and update a visit; only the fillable fields are accepted
    pub async fn update(&self, id: i32, changes: UpdateVisit) -> AppResult<VisitResource> {
        changes.validate()?;

        // Route binding: the lookup failure maps to 404, not a generic 500
        let existing: Visit = self.repository.visits.get_by_id(id).await?;

        if let Some(ref email) = changes.email {
            if self
                .repository
                .visits
                .email_exists(email, Some(existing.id))
                .await?
            {
                return Err(unique_email());
            }
        }

        let updated = self.repository.visits.update(existing.id, &changes).await?;
        Ok(VisitResource::from(updated))
    }

    /// Soft-delete a visit, returning whether a row was marked
    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        let existing = self.repository.visits.get_by_id(id).await?;
        let deleted = self.repository.visits.soft_delete(existing.id).await?;
        tracing::info!(visit_id = id, deleted, "Visit soft-deleted");
        Ok(deleted)
    }
}

fn unique_email() -> AppError {
    AppError::Validation {
        field: "email".to_string(),
        message: "Email is already taken".to_string(),
    }
}
