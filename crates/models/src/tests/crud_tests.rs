use crate::db::connect;
use crate::{bookmark, camping_summary, my_review, rating_summary, review, users};
use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::{DatabaseConnection, EntityTrait};

/// Setup test database with migrations
async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = connect().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

// ids derived from the clock plus a counter so parallel test runs do not collide
fn fresh_id() -> i64 {
    use std::sync::atomic::{AtomicI64, Ordering};
    static NEXT: AtomicI64 = AtomicI64::new(0);
    chrono::Utc::now().timestamp_micros() + NEXT.fetch_add(1, Ordering::Relaxed)
}

#[tokio::test]
async fn test_review_crud() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let camp_id = fresh_id();
    let user_id = fresh_id();

    let created = review::create(&db, camp_id, user_id, "Lovely pitch by the river", 4, None).await?;
    assert_eq!(created.camp_id, camp_id);
    assert_eq!(created.rating, 4);
    assert!(created.modified_at.is_none());

    let found = review::find_by_id(&db, created.review_id).await?;
    assert!(found.is_some());

    assert!(review::exists_by_user_and_camp(&db, user_id, camp_id).await?);
    assert!(!review::exists_by_user_and_camp(&db, user_id, camp_id + 1).await?);

    review::delete_by_id(&db, created.review_id).await?;
    assert!(review::find_by_id(&db, created.review_id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_review_rejects_invalid_input() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    assert!(review::create(&db, fresh_id(), fresh_id(), "ok", 0, None).await.is_err());
    assert!(review::create(&db, fresh_id(), fresh_id(), "   ", 3, None).await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_my_review_index() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let db = setup_test_db().await?;
    let user_id = fresh_id();

    // first add creates the row
    let m = my_review::add_review(&db, user_id, 100).await?;
    assert_eq!(m.review_cnt, 1);
    assert_eq!(my_review::review_ids(&m), vec![100]);

    let m = my_review::add_review(&db, user_id, 200).await?;
    assert_eq!(m.review_cnt, 2);
    assert_eq!(my_review::review_ids(&m), vec![100, 200]);

    // adding the same id again is idempotent
    let m = my_review::add_review(&db, user_id, 200).await?;
    assert_eq!(m.review_cnt, 2);

    my_review::remove_review(&db, user_id, 100).await?;
    let m = my_review::find_by_user(&db, user_id).await?.unwrap();
    assert_eq!(m.review_cnt, 1);
    assert_eq!(my_review::review_ids(&m), vec![200]);

    // removing for an unknown user is a no-op
    my_review::remove_review(&db, user_id + 1, 200).await?;

    my_review::Entity::delete_by_id(user_id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_rating_summary_buckets() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let db = setup_test_db().await?;
    let camp_id = fresh_id();

    // first increment creates the histogram row
    rating_summary::increment_bucket(&db, camp_id, 4).await?;
    rating_summary::increment_bucket(&db, camp_id, 4).await?;
    rating_summary::increment_bucket(&db, camp_id, 2).await?;

    let m = rating_summary::find_by_camp(&db, camp_id).await?.unwrap();
    assert_eq!(m.rating4_cnt, 2);
    assert_eq!(m.rating2_cnt, 1);
    assert_eq!(rating_summary::total(&m), 3);

    let touched = rating_summary::decrement_bucket(&db, camp_id, 4).await?;
    assert_eq!(touched, 1);

    // decrementing an empty bucket touches nothing
    let touched = rating_summary::decrement_bucket(&db, camp_id, 5).await?;
    assert_eq!(touched, 0);

    // missing row touches nothing
    let touched = rating_summary::decrement_bucket(&db, camp_id + 1, 3).await?;
    assert_eq!(touched, 0);

    rating_summary::Entity::delete_by_id(camp_id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_camping_summary_counts() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let db = setup_test_db().await?;
    let camp_id = fresh_id();

    camping_summary::increment_review_cnt(&db, camp_id).await?;
    let m = camping_summary::find_by_camp(&db, camp_id).await?.unwrap();
    assert_eq!((m.review_cnt, m.bookmark_cnt), (1, 0));

    camping_summary::increment_bookmark_cnt(&db, camp_id).await?;
    camping_summary::increment_review_cnt(&db, camp_id).await?;
    let m = camping_summary::find_by_camp(&db, camp_id).await?.unwrap();
    assert_eq!((m.review_cnt, m.bookmark_cnt), (2, 1));

    assert_eq!(camping_summary::decrement_review_cnt(&db, camp_id).await?, 1);
    assert_eq!(camping_summary::decrement_bookmark_cnt(&db, camp_id).await?, 1);
    assert_eq!(camping_summary::decrement_bookmark_cnt(&db, camp_id).await?, 0);

    // first bookmark on an unseen campsite creates (0, 1)
    let camp2 = fresh_id();
    camping_summary::increment_bookmark_cnt(&db, camp2).await?;
    let m = camping_summary::find_by_camp(&db, camp2).await?.unwrap();
    assert_eq!((m.review_cnt, m.bookmark_cnt), (0, 1));

    camping_summary::Entity::delete_by_id(camp_id).exec(&db).await?;
    camping_summary::Entity::delete_by_id(camp2).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_users_and_bookmarks() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let u = users::create(&db, "river_rat", Some("rr@example.com")).await?;
    let nickname = users::find_nickname_by_user_id(&db, u.user_id).await?;
    assert_eq!(nickname.as_deref(), Some("river_rat"));
    assert!(users::find_nickname_by_user_id(&db, u.user_id + 1_000_000).await?.is_none());

    let camp_id = fresh_id();
    let b = bookmark::create(&db, u.user_id, camp_id).await?;
    let found = bookmark::find_by_user_and_camp(&db, u.user_id, camp_id).await?;
    assert_eq!(found.map(|f| f.bookmark_id), Some(b.bookmark_id));

    let listed = bookmark::list_by_user(&db, u.user_id).await?;
    assert_eq!(listed.len(), 1);

    bookmark::delete_by_id(&db, b.bookmark_id).await?;
    assert!(bookmark::find_by_user_and_camp(&db, u.user_id, camp_id).await?.is_none());

    users::Entity::delete_by_id(u.user_id).exec(&db).await?;
    Ok(())
}
