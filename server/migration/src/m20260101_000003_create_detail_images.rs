use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DetailImages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DetailImages::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DetailImages::GirlId).integer().not_null())
                    .col(ColumnDef::new(DetailImages::Data).binary().not_null())
                    .col(
                        ColumnDef::new(DetailImages::ImageOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(DetailImages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(DetailImages::Table, DetailImages::GirlId)
                            .to(Girls::Table, Girls::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_detail_images_girl_id_order")
                    .table(DetailImages::Table)
                    .col(DetailImages::GirlId)
                    .col(DetailImages::ImageOrder)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DetailImages::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum DetailImages {
    Table,
    Id,
    GirlId,
    Data,
    ImageOrder,
    CreatedAt,
}

#[derive(Iden)]
enum Girls {
    Table,
    Id,
}
