use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::{
    DisplayName, EmailAddress, NewUser, Role, User, UserId, UserRepository, UserUpdate, Username,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

pub(super) const USER_COLUMNS: &str =
    "id, username, display_name, email, role, is_active, created_at";

#[derive(Debug, FromRow)]
pub(super) struct UserRow {
    id: i64,
    username: String,
    display_name: String,
    email: Option<String>,
    role: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::new(row.id)?,
            username: Username::new(row.username)?,
            display_name: DisplayName::new(row.display_name)?,
            email: row.email.map(EmailAddress::new).transpose()?,
            role: row.role.parse::<Role>()?,
            is_active: row.is_active,
            created_at: row.created_at,
        })
    }
}

#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> DomainResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {USER_COLUMNS} FROM users WHERE id IN ("));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(i64::from(*id));
        }
        separated.push_unseparated(") ORDER BY id");

        let rows = builder
            .build_query_as::<UserRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(User::try_from).collect()
    }
}

pub(super) async fn count_users(conn: &mut SqliteConnection) -> DomainResult<u64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(conn)
        .await
        .map_err(map_sqlx)?;
    Ok(u64::try_from(count).unwrap_or_default())
}

pub(super) async fn load_user(conn: &mut SqliteConnection, id: UserId) -> DomainResult<Option<User>> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
    ))
    .bind(i64::from(id))
    .fetch_optional(conn)
    .await
    .map_err(map_sqlx)?;

    row.map(User::try_from).transpose()
}

pub(super) async fn insert_user(conn: &mut SqliteConnection, new_user: NewUser) -> DomainResult<User> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "INSERT INTO users (username, display_name, email, role, is_active, created_at) \
         VALUES (?, ?, ?, ?, ?, ?) RETURNING {USER_COLUMNS}"
    ))
    .bind(new_user.username.as_str())
    .bind(new_user.display_name.as_str())
    .bind(new_user.email.as_ref().map(|e| e.as_str()))
    .bind(new_user.role.as_str())
    .bind(new_user.is_active)
    .bind(new_user.created_at)
    .fetch_one(conn)
    .await
    .map_err(map_sqlx)?;

    User::try_from(row)
}

pub(super) async fn update_user(conn: &mut SqliteConnection, update: UserUpdate) -> DomainResult<User> {
    if update.is_empty() {
        return load_user(conn, update.id)
            .await?
            .ok_or_else(|| DomainError::NotFound("user not found".into()));
    }

    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE users SET ");
    let mut separated = builder.separated(", ");
    if let Some(display_name) = &update.display_name {
        separated.push("display_name = ");
        separated.push_bind_unseparated(display_name.as_str().to_string());
    }
    if let Some(email) = &update.email {
        separated.push("email = ");
        separated.push_bind_unseparated(email.as_str().to_string());
    }
    if let Some(role) = update.role {
        separated.push("role = ");
        separated.push_bind_unseparated(role.as_str());
    }
    if let Some(is_active) = update.is_active {
        separated.push("is_active = ");
        separated.push_bind_unseparated(is_active);
    }
    builder.push(" WHERE id = ");
    builder.push_bind(i64::from(update.id));
    builder.push(format!(" RETURNING {USER_COLUMNS}"));

    let row = builder
        .build_query_as::<UserRow>()
        .fetch_optional(conn)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound("user not found".into()))?;

    User::try_from(row)
}

pub(super) async fn delete_user(conn: &mut SqliteConnection, id: UserId) -> DomainResult<()> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(i64::from(id))
        .execute(conn)
        .await
        .map_err(map_sqlx)?;

    if result.rows_affected() == 0 {
        return Err(DomainError::NotFound("user not found".into()));
    }
    Ok(())
}
