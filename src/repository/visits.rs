//! Visits repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::visit::{NewVisit, UpdateVisit, Visit},
    pagination::{PageParams, Sortable},
};

#[derive(Clone)]
pub struct VisitsRepository {
    pool: Pool<Postgres>,
}

impl VisitsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Search visits with free-text filter, sorting and pagination.
    ///
    /// Returns the page of rows plus the total count of matching rows before
    /// paging. Soft-deleted rows are always excluded.
    pub async fn search(&self, params: &PageParams) -> AppResult<(Vec<Visit>, i64)> {
        let mut conditions = vec!["deleted_at IS NULL".to_string()];
        let mut bind: Option<String> = None;

        if let Some(ref q) = params.q {
            bind = Some(format!("%{}%", q.to_lowercase()));
            conditions.push("LOWER(name) LIKE $1".to_string());
        }

        let where_clause = format!("WHERE {}", conditions.join(" AND "));

        // Count matching rows before paging
        let count_query = format!("SELECT COUNT(*) FROM visits {}", where_clause);
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(ref pattern) = bind {
            count_builder = count_builder.bind(pattern);
        }
        let total = count_builder.fetch_one(&self.pool).await?;

        // Resolved sort fields come from static declarations, never from the
        // raw request, so interpolation is safe. Unresolved fields leave the
        // store's natural order in place.
        let order_clause = match Visit::resolve_sort(params.sort.as_deref()) {
            Some(column) => format!("ORDER BY {} {}", column, params.order.as_sql()),
            None => String::new(),
        };

        let select_query = format!(
            "SELECT * FROM visits {} {} LIMIT {} OFFSET {}",
            where_clause,
            order_clause,
            params.per_page,
            params.offset()
        );

        let mut select_builder = sqlx::query_as::<_, Visit>(&select_query);
        if let Some(ref pattern) = bind {
            select_builder = select_builder.bind(pattern);
        }
        let visits = select_builder.fetch_all(&self.pool).await?;

        Ok((visits, total))
    }

    /// Get a live visit by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Visit> {
        sqlx::query_as::<_, Visit>(
            "SELECT * FROM visits WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Route not found".to_string()))
    }

    /// Check whether a live visit already uses this email
    pub async fn email_exists(&self, email: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM visits WHERE LOWER(email) = LOWER($1) AND deleted_at IS NULL AND id != $2)",
            )
            .bind(email)
            .bind(id)
            .fetch_one(&self.pool)
            .await?
        } else {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM visits WHERE LOWER(email) = LOWER($1) AND deleted_at IS NULL)",
            )
            .bind(email)
            .fetch_one(&self.pool)
            .await?
        };
        Ok(exists)
    }

    /// Insert a new visit inside a transaction.
    ///
    /// Committed only on full success; any failure rolls back and leaves no
    /// visible row.
    pub async fn create(&self, visit: &NewVisit) -> AppResult<Visit> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Visit>(
            r#"
            INSERT INTO visits (name, email, latitude, longitude, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(&visit.name)
        .bind(&visit.email)
        .bind(visit.latitude)
        .bind(visit.longitude)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(created)
    }

    /// Apply the provided subset of fillable fields to a live visit
    pub async fn update(&self, id: i32, changes: &UpdateVisit) -> AppResult<Visit> {
        sqlx::query_as::<_, Visit>(
            r#"
            UPDATE visits SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                latitude = COALESCE($4, latitude),
                longitude = COALESCE($5, longitude),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.email)
        .bind(changes.latitude)
        .bind(changes.longitude)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Route not found".to_string()))
    }

    /// Soft-delete a visit; deleting an already-deleted row affects nothing
    pub async fn soft_delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE visits SET deleted_at = NOW(), updated_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
