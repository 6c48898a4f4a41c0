use crate::models::User;
use crate::store::Db;
use crate::utils::error::AppError;

/// Maps a display name to a stable user record, creating it on first sight.
/// The upsert leans on the unique constraint on `users.name`, so concurrent
/// first bookings by a new name converge on a single row.
pub async fn resolve(db: &Db, name: &str) -> Result<User, AppError> {
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (name) VALUES ($1)
         ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
         RETURNING id, name, created_at",
    )
    .bind(name)
    .fetch_one(&db.pool)
    .await?;

    Ok(user)
}
