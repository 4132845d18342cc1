//! Profile 读写

use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QuerySelect, SqlErr, TransactionTrait,
};
use tracing::info;

use super::SeaOrmStorage;
use super::converters::model_to_profile;
use super::retry;
use crate::errors::{LinkbioError, Result};
use crate::storage::{Profile, ProfileRecord};

use migration::entities::profile;

enum SaveOutcome {
    Saved,
    HandleTaken,
}

impl SeaOrmStorage {
    /// 以 owner_id 为键的幂等 upsert
    ///
    /// 在同一事务内先锁定 handle 当前持有者与调用者自身的行，
    /// handle 被其他 owner 占用时返回 `HandleTaken`，不写入任何数据。
    /// 并发抢占同一个新 handle 时由唯一约束兜底，同样返回 `HandleTaken`。
    pub async fn upsert_profile(&self, record: &ProfileRecord) -> Result<Profile> {
        let db = &self.db;
        let now = Utc::now();

        let result = retry::with_retry(
            &format!("upsert_profile({})", record.owner_id),
            self.retry_config,
            || async {
                let txn = db.begin().await?;

                let holder = profile::Entity::find()
                    .filter(profile::Column::Handle.eq(record.handle.as_str()))
                    .lock_exclusive()
                    .one(&txn)
                    .await?;
                if let Some(holder) = holder
                    && holder.owner_id != record.owner_id
                {
                    txn.rollback().await?;
                    return Ok(SaveOutcome::HandleTaken);
                }

                let existing = profile::Entity::find_by_id(record.owner_id.as_str())
                    .lock_exclusive()
                    .one(&txn)
                    .await?;

                match existing {
                    Some(_) => {
                        // MySQL 对未变化的行报告 0 行受影响，这里不检查 rows_affected
                        profile::Entity::update_many()
                            .set(profile::ActiveModel {
                                handle: Set(record.handle.clone()),
                                display_name: Set(record.display_name.clone()),
                                bio: Set(record.bio.clone()),
                                avatar_url: Set(record.avatar_url.clone()),
                                theme: Set(record.theme.clone()),
                                updated_at: Set(now),
                                ..Default::default()
                            })
                            .filter(profile::Column::OwnerId.eq(record.owner_id.as_str()))
                            .exec(&txn)
                            .await?;
                    }
                    None => {
                        let model = profile::ActiveModel {
                            owner_id: Set(record.owner_id.clone()),
                            handle: Set(record.handle.clone()),
                            display_name: Set(record.display_name.clone()),
                            bio: Set(record.bio.clone()),
                            avatar_url: Set(record.avatar_url.clone()),
                            theme: Set(record.theme.clone()),
                            created_at: Set(now),
                            updated_at: Set(now),
                        };
                        profile::Entity::insert(model)
                            .exec_without_returning(&txn)
                            .await?;
                    }
                }

                txn.commit().await?;
                Ok(SaveOutcome::Saved)
            },
        )
        .await;

        let handle_taken = || {
            LinkbioError::handle_taken(format!("Handle '{}' is already taken", record.handle))
        };

        match result {
            Ok(SaveOutcome::Saved) => {}
            Ok(SaveOutcome::HandleTaken) => return Err(handle_taken()),
            Err(e) => {
                return Err(match e.sql_err() {
                    Some(SqlErr::UniqueConstraintViolation(_)) => handle_taken(),
                    _ => LinkbioError::store_unavailable(format!("Failed to save profile: {}", e)),
                });
            }
        }

        info!(
            "Profile saved: owner={}, handle={}",
            record.owner_id, record.handle
        );

        self.get_profile(&record.owner_id).await?.ok_or_else(|| {
            LinkbioError::store_unavailable("Profile vanished right after being saved")
        })
    }

    pub async fn get_profile(&self, owner_id: &str) -> Result<Option<Profile>> {
        let db = &self.db;
        let model = retry::with_retry(
            &format!("get_profile({})", owner_id),
            self.retry_config,
            || async { profile::Entity::find_by_id(owner_id).one(db).await },
        )
        .await?;

        Ok(model.map(model_to_profile))
    }

    pub async fn get_profile_by_handle(&self, handle: &str) -> Result<Option<Profile>> {
        let db = &self.db;
        let model = retry::with_retry(
            &format!("get_profile_by_handle({})", handle),
            self.retry_config,
            || async {
                profile::Entity::find()
                    .filter(profile::Column::Handle.eq(handle))
                    .one(db)
                    .await
            },
        )
        .await?;

        Ok(model.map(model_to_profile))
    }

    pub async fn profile_exists(&self, owner_id: &str) -> Result<bool> {
        let db = &self.db;
        let count = retry::with_retry(
            &format!("profile_exists({})", owner_id),
            self.retry_config,
            || async {
                profile::Entity::find()
                    .filter(profile::Column::OwnerId.eq(owner_id))
                    .count(db)
                    .await
            },
        )
        .await?;

        Ok(count > 0)
    }
}
