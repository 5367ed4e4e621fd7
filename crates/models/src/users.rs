use chrono::Utc;
use sea_orm::{entity::prelude::*, ActiveValue::NotSet, ConnectionTrait, QuerySelect, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub user_id: i64,
    pub nickname: String,
    pub email: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_nickname(nickname: &str) -> Result<(), ModelError> {
    if nickname.trim().is_empty() {
        return Err(ModelError::Validation("nickname required".into()));
    }
    if nickname.chars().count() > 64 {
        return Err(ModelError::Validation("nickname too long".into()));
    }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    nickname: &str,
    email: Option<&str>,
) -> Result<Model, ModelError> {
    validate_nickname(nickname)?;
    if let Some(email) = email {
        if !email.contains('@') {
            return Err(ModelError::Validation("invalid email".into()));
        }
    }
    let am = ActiveModel {
        user_id: NotSet,
        nickname: Set(nickname.to_string()),
        email: Set(email.map(|s| s.to_string())),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

/// Nickname lookup used for review enrichment; `None` when the account is gone.
pub async fn find_nickname_by_user_id<C: ConnectionTrait>(
    db: &C,
    user_id: i64,
) -> Result<Option<String>, ModelError> {
    let nickname = Entity::find_by_id(user_id)
        .select_only()
        .column(Column::Nickname)
        .into_tuple::<String>()
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(nickname)
}

#[cfg(test)]
mod tests {
    use super::validate_nickname;

    #[test]
    fn nickname_must_not_be_blank() {
        assert!(validate_nickname("  ").is_err());
        assert!(validate_nickname("camper").is_ok());
    }
}
