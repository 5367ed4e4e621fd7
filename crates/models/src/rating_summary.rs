//! Per-campsite histogram of review ratings.
//!
//! Buckets move only through single-statement relative updates so concurrent
//! writers serialize on the row lock instead of losing updates.
use sea_orm::sea_query::Expr;
use sea_orm::{entity::prelude::*, ColumnTrait, ConnectionTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::review::validate_rating;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rating_summary")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub camp_id: i64,
    pub rating1_cnt: i32,
    pub rating2_cnt: i32,
    pub rating3_cnt: i32,
    pub rating4_cnt: i32,
    pub rating5_cnt: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn bucket_column(rating: i32) -> Result<Column, ModelError> {
    validate_rating(rating)?;
    Ok(match rating {
        1 => Column::Rating1Cnt,
        2 => Column::Rating2Cnt,
        3 => Column::Rating3Cnt,
        4 => Column::Rating4Cnt,
        _ => Column::Rating5Cnt,
    })
}

/// Sum of all buckets; equals the number of active reviews for the campsite.
pub fn total(model: &Model) -> i64 {
    [
        model.rating1_cnt,
        model.rating2_cnt,
        model.rating3_cnt,
        model.rating4_cnt,
        model.rating5_cnt,
    ]
    .iter()
    .map(|c| *c as i64)
    .sum()
}

pub async fn find_by_camp<C: ConnectionTrait>(db: &C, camp_id: i64) -> Result<Option<Model>, ModelError> {
    Entity::find_by_id(camp_id)
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

/// Bump the bucket for `rating`; inserts the histogram row on the campsite's
/// first review.
pub async fn increment_bucket<C: ConnectionTrait>(
    db: &C,
    camp_id: i64,
    rating: i32,
) -> Result<(), ModelError> {
    let col = bucket_column(rating)?;
    let res = Entity::update_many()
        .col_expr(col, Expr::col(col).add(1))
        .filter(Column::CampId.eq(camp_id))
        .exec(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        let mut counts = [0i32; 5];
        counts[(rating - 1) as usize] = 1;
        let am = ActiveModel {
            camp_id: Set(camp_id),
            rating1_cnt: Set(counts[0]),
            rating2_cnt: Set(counts[1]),
            rating3_cnt: Set(counts[2]),
            rating4_cnt: Set(counts[3]),
            rating5_cnt: Set(counts[4]),
        };
        am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))?;
    }
    Ok(())
}

/// Drop the bucket for `rating`. Returns the number of rows touched; zero
/// means the histogram row is missing or the bucket is already empty, which
/// the caller treats as an invariant violation.
pub async fn decrement_bucket<C: ConnectionTrait>(
    db: &C,
    camp_id: i64,
    rating: i32,
) -> Result<u64, ModelError> {
    let col = bucket_column(rating)?;
    let res = Entity::update_many()
        .col_expr(col, Expr::col(col).sub(1))
        .filter(Column::CampId.eq(camp_id))
        .filter(col.gt(0))
        .exec(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_column_rejects_out_of_range() {
        assert!(bucket_column(0).is_err());
        assert!(bucket_column(6).is_err());
        assert!(bucket_column(3).is_ok());
    }

    #[test]
    fn total_sums_buckets() {
        let m = Model {
            camp_id: 1,
            rating1_cnt: 1,
            rating2_cnt: 0,
            rating3_cnt: 2,
            rating4_cnt: 0,
            rating5_cnt: 4,
        };
        assert_eq!(total(&m), 7);
    }
}
