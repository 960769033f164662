//! Query operations for SeaOrmStorage
//!
//! This module contains all read-only database operations.

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use super::SeaOrmStorage;
use super::converters::model_to_record;
use crate::errors::Result;
use crate::storage::LinkRecord;

use migration::entities::{link, link_visit};

/// 按追加顺序加载某链接的全部访问记录
async fn load_visits<C: ConnectionTrait>(
    db: &C,
    id: &str,
) -> Result<Vec<link_visit::Model>> {
    let visits = link_visit::Entity::find()
        .filter(link_visit::Column::ShortCode.eq(id))
        .order_by_asc(link_visit::Column::Id)
        .all(db)
        .await?;
    Ok(visits)
}

impl SeaOrmStorage {
    pub async fn get(&self, id: &str) -> Result<Option<LinkRecord>> {
        let Some(model) = link::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let visits = load_visits(&self.db, id).await?;
        Ok(Some(model_to_record(model, visits)))
    }
}
