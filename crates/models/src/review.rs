use chrono::Utc;
use sea_orm::{entity::prelude::*, ActiveValue::NotSet, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "review")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub review_id: i64,
    pub camp_id: i64,
    pub user_id: i64,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub rating: i32,
    pub image_url: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub modified_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_rating(rating: i32) -> Result<(), ModelError> {
    if !(1..=5).contains(&rating) {
        return Err(ModelError::Validation("rating must be between 1 and 5".into()));
    }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    camp_id: i64,
    user_id: i64,
    content: &str,
    rating: i32,
    image_url: Option<&str>,
) -> Result<Model, ModelError> {
    validate_rating(rating)?;
    if content.trim().is_empty() {
        return Err(ModelError::Validation("content required".into()));
    }
    let am = ActiveModel {
        review_id: NotSet,
        camp_id: Set(camp_id),
        user_id: Set(user_id),
        content: Set(content.to_string()),
        rating: Set(rating),
        image_url: Set(image_url.map(|s| s.to_string())),
        created_at: Set(Utc::now().into()),
        modified_at: Set(None),
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, review_id: i64) -> Result<Option<Model>, ModelError> {
    Entity::find_by_id(review_id)
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn exists_by_user_and_camp<C: ConnectionTrait>(
    db: &C,
    user_id: i64,
    camp_id: i64,
) -> Result<bool, ModelError> {
    use sea_orm::{ColumnTrait, PaginatorTrait, QueryFilter};
    let n = Entity::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::CampId.eq(camp_id))
        .count(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(n > 0)
}

pub async fn delete_by_id<C: ConnectionTrait>(db: &C, review_id: i64) -> Result<(), ModelError> {
    Entity::delete_by_id(review_id)
        .exec(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_rating;

    #[test]
    fn rating_bounds() {
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
        for r in 1..=5 {
            assert!(validate_rating(r).is_ok());
        }
    }
}
