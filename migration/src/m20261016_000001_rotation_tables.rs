//! 轮播表迁移
//!
//! 创建参考表 banners / slots / groups 以及计数表 rotations。
//! rotations 上的 (banner_id, slot_id, group_id) 唯一索引保证每个三元组最多一行，
//! 重新挂载 banner 时复用原有行（计数不丢失）。

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        create_reference_table(manager, Banners::Table, Banners::Id, Banners::Description).await?;
        create_reference_table(manager, Slots::Table, Slots::Id, Slots::Description).await?;
        create_reference_table(manager, Groups::Table, Groups::Id, Groups::Description).await?;

        // 创建 rotations 表
        manager
            .create_table(
                Table::create()
                    .table(Rotations::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Rotations::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Rotations::BannerId).uuid().not_null())
                    .col(ColumnDef::new(Rotations::SlotId).uuid().not_null())
                    .col(ColumnDef::new(Rotations::GroupId).uuid().not_null())
                    .col(
                        ColumnDef::new(Rotations::Shows)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Rotations::Clicks)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Rotations::DeactivatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 三元组唯一索引（激活操作依赖它实现幂等插入）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_rotations_triple")
                    .table(Rotations::Table)
                    .col(Rotations::BannerId)
                    .col(Rotations::SlotId)
                    .col(Rotations::GroupId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // choose 路径按 slot + group 查询
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_rotations_slot_group")
                    .table(Rotations::Table)
                    .col(Rotations::SlotId)
                    .col(Rotations::GroupId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_rotations_slot_group")
                    .table(Rotations::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_rotations_triple")
                    .table(Rotations::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Rotations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Groups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Slots::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Banners::Table).to_owned())
            .await
    }
}

async fn create_reference_table<T, C, D>(
    manager: &SchemaManager<'_>,
    table: T,
    id: C,
    description: D,
) -> Result<(), DbErr>
where
    T: IntoIden + 'static,
    C: IntoIden + 'static,
    D: IntoIden + 'static,
{
    manager
        .create_table(
            Table::create()
                .table(table)
                .if_not_exists()
                .col(ColumnDef::new(id).uuid().not_null().primary_key())
                .col(ColumnDef::new(description).text().not_null())
                .to_owned(),
        )
        .await
}

#[derive(DeriveIden)]
enum Banners {
    Table,
    Id,
    Description,
}

#[derive(DeriveIden)]
enum Slots {
    Table,
    Id,
    Description,
}

#[derive(DeriveIden)]
enum Groups {
    Table,
    Id,
    Description,
}

#[derive(DeriveIden)]
enum Rotations {
    Table,
    Id,
    BannerId,
    SlotId,
    GroupId,
    Shows,
    Clicks,
    DeactivatedAt,
}
