//! Admin Repository

use super::{RepoError, RepoResult};
use shared::models::{Admin, AdminCreate, AdminUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, email, password, role, created_at";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Admin>> {
    let sql = format!("SELECT {COLUMNS} FROM admin ORDER BY created_at, id");
    let admins = sqlx::query_as::<_, Admin>(&sql).fetch_all(pool).await?;
    Ok(admins)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Admin>> {
    let sql = format!("SELECT {COLUMNS} FROM admin WHERE id = ?");
    let admin = sqlx::query_as::<_, Admin>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(admin)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<Admin>> {
    let sql = format!("SELECT {COLUMNS} FROM admin WHERE email = ? LIMIT 1");
    let admin = sqlx::query_as::<_, Admin>(&sql)
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(admin)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admin")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Duplicate-email guard shared by create and update.
async fn verify_email_free(
    pool: &SqlitePool,
    email: &str,
    exclude_id: Option<i64>,
) -> RepoResult<()> {
    if let Some(existing) = find_by_email(pool, email).await?
        && exclude_id != Some(existing.id)
    {
        return Err(RepoError::Duplicate("El dato ya esta en uso".into()));
    }
    Ok(())
}

/// Create an admin. `password_hash` must already be argon2-hashed; this
/// layer never sees plaintext.
pub async fn create(pool: &SqlitePool, data: &AdminCreate, password_hash: &str) -> RepoResult<Admin> {
    if data.email.trim().is_empty() || !data.email.contains('@') {
        return Err(RepoError::Validation("a valid email is required".into()));
    }
    verify_email_free(pool, &data.email, None).await?;

    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO admin (id, name, email, password, role, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.email)
    .bind(password_hash)
    .bind(data.role.as_deref().unwrap_or("Admin"))
    .bind(now_millis())
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create admin".into()))
}

/// Partial update; `password_hash` is the re-hash of the new password if
/// one was supplied.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: &AdminUpdate,
    password_hash: Option<&str>,
) -> RepoResult<Admin> {
    if let Some(email) = &data.email {
        verify_email_free(pool, email, Some(id)).await?;
    }

    let rows = sqlx::query(
        "UPDATE admin SET name = COALESCE(?1, name), email = COALESCE(?2, email), \
         password = COALESCE(?3, password) WHERE id = ?4",
    )
    .bind(&data.name)
    .bind(&data.email)
    .bind(password_hash)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Admin {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Admin {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM admin WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Admin {id} not found")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::query(
            "CREATE TABLE admin (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL DEFAULT '',
                email TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL,
                role TEXT NOT NULL DEFAULT 'Admin',
                created_at INTEGER NOT NULL DEFAULT 0
            )",
        )
        .execute(&pool)
        .await
        .unwrap();
        pool
    }

    fn sample(email: &str) -> AdminCreate {
        AdminCreate {
            name: "Ana".into(),
            email: email.into(),
            password: "secret".into(),
            role: None,
        }
    }

    #[tokio::test]
    async fn create_defaults_role_to_admin() {
        let pool = test_pool().await;
        let admin = create(&pool, &sample("ana@tienda.co"), "hash").await.unwrap();
        assert_eq!(admin.role, "Admin");
        assert_eq!(admin.password, "hash");
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let pool = test_pool().await;
        create(&pool, &sample("ana@tienda.co"), "hash").await.unwrap();
        let err = create(&pool, &sample("ana@tienda.co"), "hash2")
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn update_rejects_taken_email_but_allows_own() {
        let pool = test_pool().await;
        let ana = create(&pool, &sample("ana@tienda.co"), "hash").await.unwrap();
        create(&pool, &sample("eva@tienda.co"), "hash").await.unwrap();

        // Re-submitting your own email is fine
        let same = AdminUpdate {
            name: Some("Ana María".into()),
            email: Some("ana@tienda.co".into()),
            password: None,
        };
        let updated = update(&pool, ana.id, &same, None).await.unwrap();
        assert_eq!(updated.name, "Ana María");

        // Taking someone else's is not
        let taken = AdminUpdate {
            name: None,
            email: Some("eva@tienda.co".into()),
            password: None,
        };
        let err = update(&pool, ana.id, &taken, None).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn update_without_password_keeps_old_hash() {
        let pool = test_pool().await;
        let ana = create(&pool, &sample("ana@tienda.co"), "hash").await.unwrap();
        let updated = update(
            &pool,
            ana.id,
            &AdminUpdate {
                name: Some("Ana".into()),
                email: None,
                password: None,
            },
            None,
        )
        .await
        .unwrap();
        assert_eq!(updated.password, "hash");
    }

    #[tokio::test]
    async fn delete_unknown_admin_is_not_found() {
        let pool = test_pool().await;
        let err = delete(&pool, 99).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn invalid_email_is_rejected() {
        let pool = test_pool().await;
        let err = create(&pool, &sample("not-an-email"), "hash")
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }
}
