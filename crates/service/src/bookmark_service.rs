//! Campsite bookmarks, keeping `camping_summary.bookmark_cnt` in step with the
//! bookmark rows under the same transactional discipline reviews use.

use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{info, warn};

use models::{bookmark, camping_summary};

use crate::errors::ServiceError;

pub async fn create_bookmark(
    db: &DatabaseConnection,
    user_id: i64,
    camp_id: i64,
) -> Result<bookmark::Model, ServiceError> {
    let txn = db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;

    if bookmark::find_by_user_and_camp(&txn, user_id, camp_id).await?.is_some() {
        return Err(ServiceError::AlreadyExists("campsite already bookmarked".into()));
    }

    let saved = bookmark::create(&txn, user_id, camp_id).await?;
    camping_summary::increment_bookmark_cnt(&txn, camp_id).await?;

    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(user_id, camp_id, "bookmark created");
    Ok(saved)
}

pub async fn delete_bookmark(db: &DatabaseConnection, user_id: i64, camp_id: i64) -> Result<(), ServiceError> {
    let txn = db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;

    let found = bookmark::find_by_user_and_camp(&txn, user_id, camp_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("bookmark"))?;

    bookmark::delete_by_id(&txn, found.bookmark_id).await?;
    let touched = camping_summary::decrement_bookmark_cnt(&txn, camp_id).await?;
    if touched == 0 {
        warn!(camp_id, "bookmark count already zero on delete");
    }

    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(user_id, camp_id, "bookmark deleted");
    Ok(())
}

pub async fn list_bookmarks(db: &DatabaseConnection, user_id: i64) -> Result<Vec<bookmark::Model>, ServiceError> {
    let rows = bookmark::list_by_user(db, user_id).await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fresh_id, get_db};

    #[tokio::test]
    async fn bookmark_lifecycle_maintains_count() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let (camp_id, user_id) = (fresh_id(), fresh_id());

        let saved = create_bookmark(&db, user_id, camp_id).await?;
        assert_eq!(saved.camp_id, camp_id);

        // summary created with review_cnt untouched
        let summary = camping_summary::find_by_camp(&db, camp_id).await?.unwrap();
        assert_eq!((summary.review_cnt, summary.bookmark_cnt), (0, 1));

        let err = create_bookmark(&db, user_id, camp_id).await.unwrap_err();
        assert!(matches!(err, ServiceError::AlreadyExists(_)));

        let listed = list_bookmarks(&db, user_id).await?;
        assert_eq!(listed.len(), 1);

        delete_bookmark(&db, user_id, camp_id).await?;
        let summary = camping_summary::find_by_camp(&db, camp_id).await?.unwrap();
        assert_eq!(summary.bookmark_cnt, 0);

        let err = delete_bookmark(&db, user_id, camp_id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }
}
