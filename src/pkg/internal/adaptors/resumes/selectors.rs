use sqlx::PgConnection;

use crate::{pkg::internal::adaptors::resumes::spec::ResumeEntry, prelude::Result};

pub struct ResumeSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> ResumeSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        ResumeSelector { pool }
    }

    pub async fn get_by_id(&mut self, id: i32) -> Result<Option<ResumeEntry>> {
        let row = sqlx::query_as::<_, ResumeEntry>(
            "SELECT id, name, email, phone, tags, filename, original_filename, file_type, uploaded_at
             FROM resumes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    /// Newest first. `search` does a case-insensitive substring match over
    /// name, email and individual tag values; `tag` filters on an exact tag.
    pub async fn list(
        &mut self,
        search: Option<&str>,
        tag: Option<&str>,
    ) -> Result<Vec<ResumeEntry>> {
        let rows = sqlx::query_as::<_, ResumeEntry>(
            r#"
            SELECT id, name, email, phone, tags, filename, original_filename, file_type, uploaded_at
            FROM resumes
            WHERE ($1::text IS NULL
                   OR name ILIKE '%' || $1 || '%'
                   OR email ILIKE '%' || $1 || '%'
                   OR EXISTS (SELECT 1 FROM unnest(tags) AS t WHERE t ILIKE '%' || $1 || '%'))
              AND ($2::text IS NULL OR $2 = ANY(tags))
            ORDER BY uploaded_at DESC
            "#,
        )
        .bind(search)
        .bind(tag)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn distinct_tags(&mut self) -> Result<Vec<String>> {
        let tags = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT t FROM resumes, unnest(tags) AS t WHERE btrim(t) <> '' ORDER BY t",
        )
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(tags)
    }
}
