//! Read-only link queries

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

use super::converters::model_to_link;
use super::{SeaOrmStorage, retry};
use crate::errors::Result;
use crate::storage::Link;

use migration::entities::{link, profile};

impl SeaOrmStorage {
    /// owner 的链接，按 position 升序
    pub async fn list_links(&self, owner_id: &str, only_active: bool) -> Result<Vec<Link>> {
        let db = &self.db;
        let models = retry::with_retry(
            &format!("list_links({})", owner_id),
            self.retry_config,
            || async {
                let mut query = link::Entity::find().filter(link::Column::OwnerId.eq(owner_id));
                if only_active {
                    query = query.filter(link::Column::IsActive.eq(true));
                }
                query
                    .order_by_asc(link::Column::Position)
                    .order_by_asc(link::Column::CreatedAt)
                    .all(db)
                    .await
            },
        )
        .await?;

        Ok(models.into_iter().map(model_to_link).collect())
    }

    /// 按 (id, owner) 读取单条链接
    pub async fn get_link(&self, owner_id: &str, link_id: &str) -> Result<Option<Link>> {
        let db = &self.db;
        let model = retry::with_retry(
            &format!("get_link({})", link_id),
            self.retry_config,
            || async { find_owned(db, owner_id, link_id).await },
        )
        .await?;

        Ok(model.map(model_to_link))
    }
}

pub(super) async fn find_owned<C: ConnectionTrait>(
    db: &C,
    owner_id: &str,
    link_id: &str,
) -> std::result::Result<Option<link::Model>, sea_orm::DbErr> {
    link::Entity::find()
        .filter(link::Column::Id.eq(link_id))
        .filter(link::Column::OwnerId.eq(owner_id))
        .one(db)
        .await
}

/// owner 当前的全部链接 id
pub(super) async fn owner_link_ids<C: ConnectionTrait>(
    db: &C,
    owner_id: &str,
) -> std::result::Result<Vec<String>, sea_orm::DbErr> {
    link::Entity::find()
        .select_only()
        .column(link::Column::Id)
        .filter(link::Column::OwnerId.eq(owner_id))
        .into_tuple::<String>()
        .all(db)
        .await
}

/// owner 当前最大的 position
pub(super) async fn max_position<C: ConnectionTrait>(
    db: &C,
    owner_id: &str,
) -> std::result::Result<Option<i32>, sea_orm::DbErr> {
    let max = link::Entity::find()
        .select_only()
        .column_as(link::Column::Position.max(), "max_position")
        .filter(link::Column::OwnerId.eq(owner_id))
        .into_tuple::<Option<i32>>()
        .one(db)
        .await?;

    Ok(max.flatten())
}

/// 在事务内锁定 owner 的 profile 行，串行化同一 owner 的链接写入
///
/// SQLite 不支持行锁，该语句退化为普通查询，由单写者保证串行。
pub(super) async fn lock_owner<C: ConnectionTrait>(
    db: &C,
    owner_id: &str,
) -> std::result::Result<(), sea_orm::DbErr> {
    profile::Entity::find_by_id(owner_id)
        .lock_exclusive()
        .one(db)
        .await?;
    Ok(())
}
