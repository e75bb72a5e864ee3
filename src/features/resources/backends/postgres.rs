use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::core::error::{AppError, Result};
use crate::features::resources::backends::ResourceBackend;
use crate::features::resources::models::{NewResource, Resource, ResourceFilter, ResourceRow};

const RESOURCE_COLUMNS: &str = r#"id, name, "type", address, description, contact, email, website, hours, services, eligibility, languages, latitude, longitude, created_at"#;

/// Resource store backed by the `resources` table in Postgres
pub struct PgResourceBackend {
    pool: PgPool,
}

impl PgResourceBackend {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escape LIKE metacharacters so the search term is matched literally
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &ResourceFilter) {
    qb.push(" WHERE TRUE");

    if let Some(resource_type) = filter.resource_type {
        qb.push(r#" AND "type" = "#)
            .push_bind(resource_type.as_str().to_string());
    }

    if let Some(search) = filter.search.as_deref() {
        let pattern = format!("%{}%", escape_like(search));
        qb.push(" AND (name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR address ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

fn push_values(qb: &mut QueryBuilder<'_, Postgres>, resources: &[NewResource]) {
    qb.push_values(resources, |mut row, r| {
        row.push_bind(r.name.clone())
            .push_bind(r.resource_type.as_str().to_string())
            .push_bind(r.address.clone())
            .push_bind(r.description.clone())
            .push_bind(r.contact.clone())
            .push_bind(r.email.clone())
            .push_bind(r.website.clone())
            .push_bind(r.hours.clone())
            .push_bind(r.services.clone())
            .push_bind(r.eligibility.clone())
            .push_bind(r.languages.clone())
            .push_bind(r.latitude)
            .push_bind(r.longitude);
    });
}

fn insert_builder<'a>(resources: &[NewResource]) -> QueryBuilder<'a, Postgres> {
    let mut qb = QueryBuilder::new(
        r#"INSERT INTO resources (name, "type", address, description, contact, email, website, hours, services, eligibility, languages, latitude, longitude) "#,
    );
    push_values(&mut qb, resources);
    qb
}

#[async_trait]
impl ResourceBackend for PgResourceBackend {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn list(&self, filter: &ResourceFilter) -> Result<Vec<Resource>> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM resources",
            RESOURCE_COLUMNS
        ));
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY created_at DESC");

        let rows = qb
            .build_query_as::<ResourceRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list resources: {:?}", e);
                AppError::Database(e)
            })?;

        rows.into_iter().map(Resource::try_from).collect()
    }

    async fn insert(&self, resource: &NewResource) -> Result<Resource> {
        let mut qb = insert_builder(std::slice::from_ref(resource));
        qb.push(" RETURNING ").push(RESOURCE_COLUMNS);

        let row = qb
            .build_query_as::<ResourceRow>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert resource: {:?}", e);
                AppError::Database(e)
            })?;

        row.try_into()
    }

    async fn insert_many(&self, resources: &[NewResource]) -> Result<u64> {
        if resources.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        let result = insert_builder(resources)
            .build()
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert resource batch: {:?}", e);
                AppError::Database(e)
            })?;
        tx.commit().await?;

        Ok(result.rows_affected())
    }

    async fn has_any(&self) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM resources)")
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }
}
