//! Per-user index of authored review ids, created lazily on first review.
use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "my_review")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,
    pub review_cnt: i32,
    pub review_ids: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Decode the JSON id array; malformed entries are dropped.
pub fn review_ids(model: &Model) -> Vec<i64> {
    model
        .review_ids
        .as_array()
        .map(|a| a.iter().filter_map(|v| v.as_i64()).collect())
        .unwrap_or_default()
}

pub async fn find_by_user<C: ConnectionTrait>(db: &C, user_id: i64) -> Result<Option<Model>, ModelError> {
    Entity::find_by_id(user_id)
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

/// Append a review id to the user's index, creating the row on first review.
pub async fn add_review<C: ConnectionTrait>(
    db: &C,
    user_id: i64,
    review_id: i64,
) -> Result<Model, ModelError> {
    match find_by_user(db, user_id).await? {
        Some(existing) => {
            let mut ids = review_ids(&existing);
            if !ids.contains(&review_id) {
                ids.push(review_id);
            }
            let mut am: ActiveModel = existing.into();
            am.review_cnt = Set(ids.len() as i32);
            am.review_ids = Set(serde_json::json!(ids));
            am.update(db).await.map_err(|e| ModelError::Db(e.to_string()))
        }
        None => {
            let am = ActiveModel {
                user_id: Set(user_id),
                review_cnt: Set(1),
                review_ids: Set(serde_json::json!([review_id])),
            };
            am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
        }
    }
}

/// Drop a review id from the user's index. A missing row is a no-op: the
/// review being deleted proves the index should have existed, but deletion
/// must still converge.
pub async fn remove_review<C: ConnectionTrait>(
    db: &C,
    user_id: i64,
    review_id: i64,
) -> Result<(), ModelError> {
    let Some(existing) = find_by_user(db, user_id).await? else {
        return Ok(());
    };
    let mut ids = review_ids(&existing);
    ids.retain(|id| *id != review_id);
    let mut am: ActiveModel = existing.into();
    am.review_cnt = Set(ids.len() as i32);
    am.review_ids = Set(serde_json::json!(ids));
    am.update(db).await.map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(())
}
