use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Blogs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Blogs::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Blogs::Title).string().not_null())
                    .col(ColumnDef::new(Blogs::Content).text().not_null())
                    .col(ColumnDef::new(Blogs::Author).string().not_null())
                    .col(ColumnDef::new(Blogs::Image).string().null())
                    .col(
                        ColumnDef::new(Blogs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Blogs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_blogs_created_at")
                    .table(Blogs::Table)
                    .col(Blogs::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Work::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Work::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Work::Title).string().not_null())
                    .col(ColumnDef::new(Work::Category).string().not_null())
                    .col(ColumnDef::new(Work::Image).string().null())
                    .col(ColumnDef::new(Work::Client).string().not_null())
                    .col(ColumnDef::new(Work::Year).string().null())
                    .col(
                        ColumnDef::new(Work::Date)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Work::Description).text().not_null())
                    .col(ColumnDef::new(Work::Content).text().not_null())
                    .col(ColumnDef::new(Work::Author).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_work_date")
                    .table(Work::Table)
                    .col(Work::Date)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Work::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Blogs::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Blogs {
    Table,
    Id,
    Title,
    Content,
    Author,
    Image,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Work {
    Table,
    Id,
    Title,
    Category,
    Image,
    Client,
    Year,
    Date,
    Description,
    Content,
    Author,
}
