//! 初始表结构
//!
//! - profiles: 每个 owner 一行，handle 全局唯一
//! - links: owner 的有序链接列表
//! - analytics_events: 只追加的访问/点击事件

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Profiles::OwnerId)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Profiles::Handle)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Profiles::DisplayName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Profiles::Bio).text().null())
                    .col(ColumnDef::new(Profiles::AvatarUrl).text().null())
                    .col(
                        ColumnDef::new(Profiles::Theme)
                            .string_len(32)
                            .not_null()
                            .default("default"),
                    )
                    .col(
                        ColumnDef::new(Profiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Profiles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Links::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Links::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Links::OwnerId).string_len(64).not_null())
                    .col(ColumnDef::new(Links::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Links::Url).text().not_null())
                    .col(ColumnDef::new(Links::Description).text().null())
                    .col(ColumnDef::new(Links::Icon).string_len(64).null())
                    .col(ColumnDef::new(Links::Position).integer().not_null())
                    .col(
                        ColumnDef::new(Links::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Links::ClickCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Links::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Links::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_links_owner")
                            .from(Links::Table, Links::OwnerId)
                            .to(Profiles::Table, Profiles::OwnerId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 列表按 position 排序读取
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_links_owner_position")
                    .table(Links::Table)
                    .col(Links::OwnerId)
                    .col(Links::Position)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AnalyticsEvents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AnalyticsEvents::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AnalyticsEvents::OwnerId)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AnalyticsEvents::EventType)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(AnalyticsEvents::LinkId).string_len(36).null())
                    .col(
                        ColumnDef::new(AnalyticsEvents::IpAddress)
                            .string_len(45)
                            .null(),
                    )
                    .col(ColumnDef::new(AnalyticsEvents::UserAgent).text().null())
                    .col(ColumnDef::new(AnalyticsEvents::Referrer).text().null())
                    .col(
                        ColumnDef::new(AnalyticsEvents::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_analytics_events_owner")
                            .from(AnalyticsEvents::Table, AnalyticsEvents::OwnerId)
                            .to(Profiles::Table, Profiles::OwnerId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 时间窗口查询
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_analytics_events_owner_time")
                    .table(AnalyticsEvents::Table)
                    .col(AnalyticsEvents::OwnerId)
                    .col(AnalyticsEvents::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // 按类型计数
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_analytics_events_owner_type")
                    .table(AnalyticsEvents::Table)
                    .col(AnalyticsEvents::OwnerId)
                    .col(AnalyticsEvents::EventType)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_analytics_events_owner_type")
                    .table(AnalyticsEvents::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_analytics_events_owner_time")
                    .table(AnalyticsEvents::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(AnalyticsEvents::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_links_owner_position")
                    .table(Links::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Links::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Profiles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Profiles {
    #[sea_orm(iden = "profiles")]
    Table,
    OwnerId,
    Handle,
    DisplayName,
    Bio,
    AvatarUrl,
    Theme,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Links {
    #[sea_orm(iden = "links")]
    Table,
    Id,
    OwnerId,
    Title,
    Url,
    Description,
    Icon,
    Position,
    IsActive,
    ClickCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AnalyticsEvents {
    #[sea_orm(iden = "analytics_events")]
    Table,
    Id,
    OwnerId,
    EventType,
    LinkId,
    IpAddress,
    UserAgent,
    Referrer,
    CreatedAt,
}
