use sea_orm::{DatabaseConnection, EntityTrait};

use models::users;

use crate::errors::ServiceError;

/// Create a user account; only the nickname matters to this system.
pub async fn create_user(
    db: &DatabaseConnection,
    nickname: &str,
    email: Option<&str>,
) -> Result<users::Model, ServiceError> {
    let created = users::create(db, nickname, email).await?;
    Ok(created)
}

/// Get a user by id.
pub async fn get_user(db: &DatabaseConnection, user_id: i64) -> Result<Option<users::Model>, ServiceError> {
    let found = users::Entity::find_by_id(user_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn user_create_and_get() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;

        let u = create_user(&db, "trailhead", Some("t@example.com")).await?;
        let found = get_user(&db, u.user_id).await?.unwrap();
        assert_eq!(found.nickname, "trailhead");

        let err = create_user(&db, "", None).await.unwrap_err();
        assert!(matches!(err, ServiceError::Model(_)));

        users::Entity::delete_by_id(u.user_id).exec(&db).await?;
        Ok(())
    }
}
