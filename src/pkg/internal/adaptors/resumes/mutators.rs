use sqlx::PgConnection;

use crate::{pkg::internal::adaptors::resumes::spec::ResumeEntry, prelude::Result};

pub struct CreateResumeData {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub tags: Vec<String>,
    pub filename: String,
    pub original_filename: String,
    pub file_type: String,
}

pub struct ResumeMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> ResumeMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        ResumeMutator { pool }
    }

    pub async fn create(&mut self, resume: CreateResumeData) -> Result<ResumeEntry> {
        let row = sqlx::query_as::<_, ResumeEntry>(
            r#"
            INSERT INTO resumes (name, email, phone, tags, filename, original_filename, file_type)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, email, phone, tags, filename, original_filename, file_type, uploaded_at
            "#,
        )
        .bind(&resume.name)
        .bind(&resume.email)
        .bind(&resume.phone)
        .bind(&resume.tags)
        .bind(&resume.filename)
        .bind(&resume.original_filename)
        .bind(&resume.file_type)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(&mut self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(id)
            .execute(&mut *self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
