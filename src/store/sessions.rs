/**
 * Session Store
 *
 * Database operations for live session documents. The store owns the
 * SQLite pool and exposes the lifecycle transitions as conditional
 * updates, so invalid transitions surface as typed errors instead of
 * lost writes. The understood counter and the participant set rely on
 * database-level atomicity rather than process locks.
 */

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::model::{LiveSession, Material};

/// Fields supplied when scheduling a new session
#[derive(Debug, Clone)]
pub struct NewSession {
    pub teacher_id: String,
    pub org_id: String,
    pub course_id: Option<String>,
    pub session_title: String,
    pub short_description: String,
    pub session_heading: String,
    pub scheduled_date: DateTime<Utc>,
    pub scheduled_time: String,
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: String,
    teacher_id: String,
    org_id: String,
    course_id: Option<String>,
    session_title: String,
    short_description: String,
    session_heading: String,
    scheduled_date: DateTime<Utc>,
    scheduled_time: String,
    is_active: bool,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    current_slide_index: i64,
    understood_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

const SESSION_COLUMNS: &str = r#"
    session_id, teacher_id, org_id, course_id,
    session_title, short_description, session_heading,
    scheduled_date, scheduled_time,
    is_active, started_at, ended_at,
    current_slide_index, understood_count,
    created_at, updated_at
"#;

/// Persistent store for live session documents
#[derive(Clone)]
pub struct SessionStore {
    pool: SqlitePool,
}

impl SessionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Schedule a new session
    ///
    /// The session starts out inactive with an empty participant set,
    /// no materials, slide index 0, and understood count 0.
    ///
    /// # Returns
    /// The created session document with its generated id
    pub async fn create(&self, fields: NewSession) -> Result<LiveSession, ApiError> {
        let session_id = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO live_sessions (
                session_id, teacher_id, org_id, course_id,
                session_title, short_description, session_heading,
                scheduled_date, scheduled_time,
                is_active, current_slide_index, understood_count,
                created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 0, 0, 0, ?, ?)
            "#,
        )
        .bind(&session_id)
        .bind(&fields.teacher_id)
        .bind(&fields.org_id)
        .bind(&fields.course_id)
        .bind(&fields.session_title)
        .bind(&fields.short_description)
        .bind(&fields.session_heading)
        .bind(fields.scheduled_date)
        .bind(&fields.scheduled_time)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(LiveSession {
            session_id,
            teacher_id: fields.teacher_id,
            org_id: fields.org_id,
            course_id: fields.course_id,
            session_title: fields.session_title,
            short_description: fields.short_description,
            session_heading: fields.session_heading,
            scheduled_date: fields.scheduled_date,
            scheduled_time: fields.scheduled_time,
            is_active: false,
            started_at: None,
            ended_at: None,
            current_slide_index: 0,
            participants: Vec::new(),
            understood_count: 0,
            materials: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Fetch a session document by id, including participants and materials
    ///
    /// # Errors
    /// `NotFound` if no session with this id exists
    pub async fn get(&self, session_id: &str) -> Result<LiveSession, ApiError> {
        let row = sqlx::query_as::<_, SessionRow>(&format!(
            "SELECT {SESSION_COLUMNS} FROM live_sessions WHERE session_id = ?"
        ))
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Session not found"))?;

        self.hydrate(row).await
    }

    /// List a teacher's sessions, newest first
    pub async fn list_by_teacher(&self, teacher_id: &str) -> Result<Vec<LiveSession>, ApiError> {
        let rows = sqlx::query_as::<_, SessionRow>(&format!(
            "SELECT {SESSION_COLUMNS} FROM live_sessions WHERE teacher_id = ? ORDER BY created_at DESC"
        ))
        .bind(teacher_id)
        .fetch_all(&self.pool)
        .await?;

        self.hydrate_all(rows).await
    }

    /// List the currently active sessions visible to an org, newest first
    pub async fn list_active_by_org(&self, org_id: &str) -> Result<Vec<LiveSession>, ApiError> {
        let rows = sqlx::query_as::<_, SessionRow>(&format!(
            "SELECT {SESSION_COLUMNS} FROM live_sessions WHERE org_id = ? AND is_active = 1 ORDER BY created_at DESC"
        ))
        .bind(org_id)
        .fetch_all(&self.pool)
        .await?;

        self.hydrate_all(rows).await
    }

    /// List an org's sessions regardless of state, newest first, bounded
    pub async fn list_by_org(&self, org_id: &str, limit: i64) -> Result<Vec<LiveSession>, ApiError> {
        let rows = sqlx::query_as::<_, SessionRow>(&format!(
            "SELECT {SESSION_COLUMNS} FROM live_sessions WHERE org_id = ? ORDER BY created_at DESC LIMIT ?"
        ))
        .bind(org_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        self.hydrate_all(rows).await
    }

    /// Mark a session active and stamp `started_at`
    ///
    /// The transition is a conditional update, so two concurrent starts
    /// cannot both succeed.
    ///
    /// # Errors
    /// `NotFound` if the session does not exist,
    /// `InvalidState` if it is already active
    pub async fn start(&self, session_id: &str) -> Result<(), ApiError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE live_sessions
            SET is_active = 1, started_at = ?, updated_at = ?
            WHERE session_id = ? AND is_active = 0
            "#,
        )
        .bind(now)
        .bind(now)
        .bind(session_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            if self.exists(session_id).await? {
                return Err(ApiError::invalid_state("Session already active"));
            }
            return Err(ApiError::not_found("Session not found"));
        }
        Ok(())
    }

    /// Mark a session ended and stamp `ended_at`
    ///
    /// # Errors
    /// `NotFound` if the session does not exist,
    /// `InvalidState` if it is not currently active
    pub async fn end(&self, session_id: &str) -> Result<(), ApiError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE live_sessions
            SET is_active = 0, ended_at = ?, updated_at = ?
            WHERE session_id = ? AND is_active = 1
            "#,
        )
        .bind(now)
        .bind(now)
        .bind(session_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            if self.exists(session_id).await? {
                return Err(ApiError::invalid_state("Session not active"));
            }
            return Err(ApiError::not_found("Session not found"));
        }
        Ok(())
    }

    /// Add a student to the participant set
    ///
    /// Idempotent: re-joining does not duplicate the entry. Returns the
    /// persisted participant count after the write.
    pub async fn add_participant(
        &self,
        session_id: &str,
        student_id: &str,
    ) -> Result<i64, ApiError> {
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO session_participants (session_id, student_id, joined_at)
            VALUES (?, ?, ?)
            ON CONFLICT (session_id, student_id) DO NOTHING
            "#,
        )
        .bind(session_id)
        .bind(student_id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        sqlx::query("UPDATE live_sessions SET updated_at = ? WHERE session_id = ?")
            .bind(now)
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        self.participant_count(session_id).await
    }

    /// Count of students who have joined a session
    pub async fn participant_count(&self, session_id: &str) -> Result<i64, ApiError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM session_participants WHERE session_id = ?",
        )
        .bind(session_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Set the current slide index
    ///
    /// Activity and ownership checks belong to the caller; the store
    /// applies the field update unconditionally.
    pub async fn set_current_slide(&self, session_id: &str, index: i64) -> Result<(), ApiError> {
        let result = sqlx::query(
            "UPDATE live_sessions SET current_slide_index = ?, updated_at = ? WHERE session_id = ?",
        )
        .bind(index)
        .bind(Utc::now())
        .bind(session_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("Session not found"));
        }
        Ok(())
    }

    /// Atomically increment the understood counter
    ///
    /// The read-modify-write happens inside the database, so concurrent
    /// increments from different connections all land.
    ///
    /// # Returns
    /// The new persisted count
    pub async fn increment_understood(&self, session_id: &str) -> Result<i64, ApiError> {
        let count: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE live_sessions
            SET understood_count = understood_count + 1, updated_at = ?
            WHERE session_id = ?
            RETURNING understood_count
            "#,
        )
        .bind(Utc::now())
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        count.ok_or_else(|| ApiError::not_found("Session not found"))
    }

    /// Append a material descriptor to a session
    pub async fn add_material(
        &self,
        session_id: &str,
        material: &Material,
    ) -> Result<(), ApiError> {
        sqlx::query(
            r#"
            INSERT INTO session_materials (session_id, file_name, url, upload_time, size)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(session_id)
        .bind(&material.file_name)
        .bind(&material.url)
        .bind(material.upload_time)
        .bind(material.size)
        .execute(&self.pool)
        .await?;

        sqlx::query("UPDATE live_sessions SET updated_at = ? WHERE session_id = ?")
            .bind(Utc::now())
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Materials attached to a session, in upload order
    pub async fn materials(&self, session_id: &str) -> Result<Vec<Material>, ApiError> {
        #[derive(sqlx::FromRow)]
        struct MaterialRow {
            file_name: String,
            url: String,
            upload_time: DateTime<Utc>,
            size: i64,
        }

        let rows = sqlx::query_as::<_, MaterialRow>(
            r#"
            SELECT file_name, url, upload_time, size
            FROM session_materials
            WHERE session_id = ?
            ORDER BY material_id ASC
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| Material {
                file_name: row.file_name,
                url: row.url,
                upload_time: row.upload_time,
                size: row.size,
            })
            .collect())
    }

    async fn exists(&self, session_id: &str) -> Result<bool, ApiError> {
        let found: Option<i64> =
            sqlx::query_scalar("SELECT 1 FROM live_sessions WHERE session_id = ?")
                .bind(session_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(found.is_some())
    }

    async fn participants(&self, session_id: &str) -> Result<Vec<String>, ApiError> {
        let ids: Vec<String> = sqlx::query_scalar(
            "SELECT student_id FROM session_participants WHERE session_id = ? ORDER BY joined_at ASC",
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    async fn hydrate(&self, row: SessionRow) -> Result<LiveSession, ApiError> {
        let participants = self.participants(&row.session_id).await?;
        let materials = self.materials(&row.session_id).await?;

        Ok(LiveSession {
            session_id: row.session_id,
            teacher_id: row.teacher_id,
            org_id: row.org_id,
            course_id: row.course_id,
            session_title: row.session_title,
            short_description: row.short_description,
            session_heading: row.session_heading,
            scheduled_date: row.scheduled_date,
            scheduled_time: row.scheduled_time,
            is_active: row.is_active,
            started_at: row.started_at,
            ended_at: row.ended_at,
            current_slide_index: row.current_slide_index,
            participants,
            understood_count: row.understood_count,
            materials,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    async fn hydrate_all(&self, rows: Vec<SessionRow>) -> Result<Vec<LiveSession>, ApiError> {
        let mut sessions = Vec::with_capacity(rows.len());
        for row in rows {
            sessions.push(self.hydrate(row).await?);
        }
        Ok(sessions)
    }
}
