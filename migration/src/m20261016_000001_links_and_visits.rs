//! links / link_visits 表迁移
//!
//! - links: 短链接主表，short_code 为主键
//! - link_visits: 访问记录，只追加不修改，按自增 id 排序即为访问顺序

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseBackend;
use sea_orm_migration::sea_orm::sea_query::{IntoIden, TableCreateStatement};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();

        manager.create_table(links_table(backend)).await?;
        manager.create_table(link_visits_table(backend)).await?;

        // 单链接访问记录查询
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_link_visits_short_code")
                    .table(LinkVisits::Table)
                    .col(LinkVisits::ShortCode)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_link_visits_short_code")
                    .table(LinkVisits::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(LinkVisits::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Links::Table).to_owned())
            .await
    }
}

/// short_code 列定义
///
/// 短码区分大小写；MySQL/MariaDB 默认排序规则不区分大小写，需显式指定二进制排序。
fn short_code_column<T: IntoIden>(backend: DatabaseBackend, column: T) -> ColumnDef {
    let mut def = ColumnDef::new(column);
    def.string_len(64).not_null();
    if backend == DatabaseBackend::MySql {
        def.extra("COLLATE utf8mb4_bin");
    }
    def
}

fn links_table(backend: DatabaseBackend) -> TableCreateStatement {
    Table::create()
        .table(Links::Table)
        .if_not_exists()
        .col(short_code_column(backend, Links::ShortCode).primary_key())
        .col(ColumnDef::new(Links::Destination).text().not_null())
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
        .to_owned()
}

fn link_visits_table(backend: DatabaseBackend) -> TableCreateStatement {
    Table::create()
        .table(LinkVisits::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(LinkVisits::Id)
                .big_integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(&mut short_code_column(backend, LinkVisits::ShortCode))
        .col(
            ColumnDef::new(LinkVisits::Timestamp)
                .big_integer()
                .not_null(),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_link_visits_short_code")
                .from(LinkVisits::Table, LinkVisits::ShortCode)
                .to(Links::Table, Links::ShortCode)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[derive(DeriveIden)]
enum Links {
    Table,
    ShortCode,
    Destination,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum LinkVisits {
    Table,
    Id,
    ShortCode,
    Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm_migration::sea_orm::sea_query::{MysqlQueryBuilder, SqliteQueryBuilder};

    #[test]
    fn test_short_code_is_binary_on_mysql() {
        let links = links_table(DatabaseBackend::MySql).to_string(MysqlQueryBuilder);
        let visits = link_visits_table(DatabaseBackend::MySql).to_string(MysqlQueryBuilder);

        assert!(links.contains("COLLATE utf8mb4_bin"), "{}", links);
        assert!(visits.contains("COLLATE utf8mb4_bin"), "{}", visits);
    }

    #[test]
    fn test_no_collation_clause_on_sqlite() {
        let links = links_table(DatabaseBackend::Sqlite).to_string(SqliteQueryBuilder);
        let visits = link_visits_table(DatabaseBackend::Sqlite).to_string(SqliteQueryBuilder);

        assert!(!links.contains("COLLATE"), "{}", links);
        assert!(!visits.contains("COLLATE"), "{}", visits);
    }
}
