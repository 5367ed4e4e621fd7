use chrono::Utc;
use sea_orm::{entity::prelude::*, ActiveValue::NotSet, ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookmark")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub bookmark_id: i64,
    pub user_id: i64,
    pub camp_id: i64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(db: &C, user_id: i64, camp_id: i64) -> Result<Model, ModelError> {
    let am = ActiveModel {
        bookmark_id: NotSet,
        user_id: Set(user_id),
        camp_id: Set(camp_id),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn find_by_user_and_camp<C: ConnectionTrait>(
    db: &C,
    user_id: i64,
    camp_id: i64,
) -> Result<Option<Model>, ModelError> {
    use sea_orm::{ColumnTrait, QueryFilter};
    Entity::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::CampId.eq(camp_id))
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn delete_by_id<C: ConnectionTrait>(db: &C, bookmark_id: i64) -> Result<(), ModelError> {
    Entity::delete_by_id(bookmark_id)
        .exec(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(())
}

pub async fn list_by_user<C: ConnectionTrait>(db: &C, user_id: i64) -> Result<Vec<Model>, ModelError> {
    use sea_orm::{ColumnTrait, QueryFilter};
    Entity::find()
        .filter(Column::UserId.eq(user_id))
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}
