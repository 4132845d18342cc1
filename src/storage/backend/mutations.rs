//! Link write operations
//!
//! Every statement carries `owner_id` in its WHERE clause, so the
//! ownership check and the write happen atomically.

use std::collections::HashSet;

use chrono::Utc;
use sea_orm::sea_query::{CaseStatement, Expr, Query};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, ExprTrait,
    QueryFilter, TransactionTrait,
};
use tracing::{debug, info};

use super::converters::model_to_link;
use super::query::{find_owned, lock_owner, max_position, owner_link_ids};
use super::{SeaOrmStorage, retry};
use crate::errors::{LinkbioError, Result};
use crate::storage::{Link, LinkChanges, NewLink, ReorderOutcome};

use migration::entities::link;

impl SeaOrmStorage {
    /// 追加到末尾：position = max + 1，空列表时为 0
    ///
    /// 先锁定 owner 的 profile 行，读取最大值与插入在同一事务中完成，
    /// 并发创建不会得到相同的 position。
    pub async fn insert_link(&self, new_link: &NewLink) -> Result<Link> {
        let db = &self.db;

        let model = retry::with_retry(
            &format!("insert_link({})", new_link.owner_id),
            self.retry_config,
            || async {
                let txn = db.begin().await?;
                lock_owner(&txn, &new_link.owner_id).await?;
                let position = max_position(&txn, &new_link.owner_id)
                    .await?
                    .map_or(0, |max| max + 1);
                let now = Utc::now();

                let model = link::ActiveModel {
                    id: Set(new_link.id.clone()),
                    owner_id: Set(new_link.owner_id.clone()),
                    title: Set(new_link.title.clone()),
                    url: Set(new_link.url.clone()),
                    description: Set(new_link.description.clone()),
                    icon: Set(new_link.icon.clone()),
                    position: Set(position),
                    is_active: Set(true),
                    click_count: Set(0),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(&txn)
                .await?;

                txn.commit().await?;
                Ok(model)
            },
        )
        .await?;

        info!(
            "Link created: id={}, owner={}, position={}",
            model.id, model.owner_id, model.position
        );
        Ok(model_to_link(model))
    }

    /// 局部更新，返回更新后的链接
    pub async fn update_link(
        &self,
        owner_id: &str,
        link_id: &str,
        changes: &LinkChanges,
    ) -> Result<Link> {
        let db = &self.db;

        let model = retry::with_retry(
            &format!("update_link({})", link_id),
            self.retry_config,
            || async {
                let mut update = link::Entity::update_many()
                    .col_expr(link::Column::UpdatedAt, Expr::val(Utc::now()).into())
                    .filter(link::Column::Id.eq(link_id))
                    .filter(link::Column::OwnerId.eq(owner_id));

                if let Some(title) = &changes.title {
                    update = update.col_expr(link::Column::Title, Expr::val(title.clone()).into());
                }
                if let Some(url) = &changes.url {
                    update = update.col_expr(link::Column::Url, Expr::val(url.clone()).into());
                }
                if let Some(description) = &changes.description {
                    update = update.col_expr(
                        link::Column::Description,
                        Expr::val(description.clone()).into(),
                    );
                }
                if let Some(icon) = &changes.icon {
                    update = update.col_expr(link::Column::Icon, Expr::val(icon.clone()).into());
                }

                let txn = db.begin().await?;
                let result = update.exec(&txn).await?;
                if result.rows_affected == 0 {
                    txn.rollback().await?;
                    return Ok(None);
                }
                let model = find_owned(&txn, owner_id, link_id).await?;
                txn.commit().await?;
                Ok(model)
            },
        )
        .await?;

        let model = model.ok_or_else(|| not_found(link_id))?;
        info!("Link updated: id={}, owner={}", link_id, owner_id);
        Ok(model_to_link(model))
    }

    pub async fn delete_link(&self, owner_id: &str, link_id: &str) -> Result<()> {
        let db = &self.db;

        let result = retry::with_retry(
            &format!("delete_link({})", link_id),
            self.retry_config,
            || async {
                link::Entity::delete_many()
                    .filter(link::Column::Id.eq(link_id))
                    .filter(link::Column::OwnerId.eq(owner_id))
                    .exec(db)
                    .await
            },
        )
        .await?;

        if result.rows_affected == 0 {
            return Err(not_found(link_id));
        }

        info!("Link deleted: id={}, owner={}", link_id, owner_id);
        Ok(())
    }

    /// 切换可见性，position 与 click_count 不变
    pub async fn set_link_active(&self, owner_id: &str, link_id: &str, active: bool) -> Result<()> {
        let db = &self.db;

        let result = retry::with_retry(
            &format!("set_link_active({})", link_id),
            self.retry_config,
            || async {
                link::Entity::update_many()
                    .col_expr(link::Column::IsActive, Expr::val(active).into())
                    .col_expr(link::Column::UpdatedAt, Expr::val(Utc::now()).into())
                    .filter(link::Column::Id.eq(link_id))
                    .filter(link::Column::OwnerId.eq(owner_id))
                    .exec(db)
                    .await
            },
        )
        .await?;

        if result.rows_affected == 0 {
            return Err(not_found(link_id));
        }

        info!(
            "Link visibility changed: id={}, owner={}, active={}",
            link_id, owner_id, active
        );
        Ok(())
    }

    /// 按给定顺序重写全部 position
    ///
    /// 在一个事务内锁定 owner、读取当前 id 集合并校验，随后用单条
    /// `UPDATE ... SET position = CASE id WHEN ... END` 写入所有位置。
    /// 校验失败时不做任何写入并返回 `ReorderOutcome::Mismatch`。
    pub async fn reorder_links(
        &self,
        owner_id: &str,
        ordered_ids: &[String],
    ) -> Result<ReorderOutcome> {
        let db = &self.db;

        let outcome = retry::with_retry(
            &format!("reorder_links({})", owner_id),
            self.retry_config,
            || async {
                let txn = db.begin().await?;
                lock_owner(&txn, owner_id).await?;
                let current = owner_link_ids(&txn, owner_id).await?;

                if let Some(reason) = order_mismatch(&current, ordered_ids) {
                    txn.rollback().await?;
                    return Ok(ReorderOutcome::Mismatch(reason));
                }

                if !ordered_ids.is_empty() {
                    let mut case_stmt = CaseStatement::new();
                    for (index, id) in ordered_ids.iter().enumerate() {
                        case_stmt = case_stmt.case(
                            Expr::col(link::Column::Id).eq(Expr::val(id.as_str())),
                            Expr::val(index as i32),
                        );
                    }
                    case_stmt = case_stmt.finally(Expr::col(link::Column::Position));

                    let stmt = Query::update()
                        .table(link::Entity)
                        .value(link::Column::Position, case_stmt)
                        .value(link::Column::UpdatedAt, Expr::val(Utc::now()))
                        .and_where(Expr::col(link::Column::OwnerId).eq(owner_id))
                        .and_where(Expr::col(link::Column::Id).is_in(ordered_ids.iter().cloned()))
                        .to_owned();

                    txn.execute(&stmt).await?;
                }

                txn.commit().await?;
                Ok(ReorderOutcome::Applied)
            },
        )
        .await?;

        match &outcome {
            ReorderOutcome::Applied => info!(
                "Links reordered: owner={}, count={}",
                owner_id,
                ordered_ids.len()
            ),
            ReorderOutcome::Mismatch(reason) => {
                debug!("Reorder rejected for owner {}: {}", owner_id, reason)
            }
        }
        Ok(outcome)
    }
}

fn not_found(link_id: &str) -> LinkbioError {
    LinkbioError::not_found_or_forbidden(format!("Link not found: {}", link_id))
}

/// 校验请求的顺序是否恰好是当前 id 集合的一个排列
fn order_mismatch(current: &[String], requested: &[String]) -> Option<String> {
    let mut seen = HashSet::with_capacity(requested.len());
    for id in requested {
        if !seen.insert(id.as_str()) {
            return Some(format!("Duplicate link id in order: {}", id));
        }
    }

    let current_set: HashSet<&str> = current.iter().map(String::as_str).collect();
    if let Some(unknown) = requested.iter().find(|id| !current_set.contains(id.as_str())) {
        return Some(format!("Unknown link id in order: {}", unknown));
    }
    if let Some(missing) = current.iter().find(|id| !seen.contains(id.as_str())) {
        return Some(format!("Link id missing from order: {}", missing));
    }

    None
}
