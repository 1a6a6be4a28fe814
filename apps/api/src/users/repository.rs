use sqlx::PgPool;

use crate::models::user::{UserRole, UserRow};

pub async fn create_user(pool: &PgPool, email: &str, role: UserRole) -> Result<UserRow, sqlx::Error> {
    sqlx::query_as::<_, UserRow>(
        "INSERT INTO users (email, role) VALUES ($1, $2) RETURNING *",
    )
    .bind(email)
    .bind(role.as_str())
    .fetch_one(pool)
    .await
}

pub async fn get_user(pool: &PgPool, user_id: i64) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}
