use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Girls::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Girls::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Girls::Name).string().not_null())
                    .col(ColumnDef::new(Girls::Area).string())
                    .col(ColumnDef::new(Girls::Price).string())
                    .col(
                        ColumnDef::new(Girls::Rating)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Girls::ImgUrl)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Girls::Image).binary())
                    .col(ColumnDef::new(Girls::Zalo).string())
                    .col(ColumnDef::new(Girls::Phone).string())
                    .col(ColumnDef::new(Girls::Description).text())
                    .col(
                        ColumnDef::new(Girls::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Girls::IsPinned)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Girls::DisplayOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Girls::Info)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'{}'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(Girls::Images)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(Girls::Viewed)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Girls::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Girls::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_girls_display_order_created_at")
                    .table(Girls::Table)
                    .col((Girls::DisplayOrder, IndexOrder::Desc))
                    .col((Girls::CreatedAt, IndexOrder::Desc))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Girls::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Girls {
    Table,
    Id,
    Name,
    Area,
    Price,
    Rating,
    ImgUrl,
    Image,
    Zalo,
    Phone,
    Description,
    IsActive,
    IsPinned,
    DisplayOrder,
    Info,
    Images,
    Viewed,
    CreatedAt,
    UpdatedAt,
}
