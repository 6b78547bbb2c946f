use sea_orm::entity::prelude::*;

/// Supplementary listing image, stored inline and ordered by `image_order`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "detail_images")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub girl_id: i32,
    #[sea_orm(column_type = "VarBinary(StringLen::None)")]
    pub data: Vec<u8>,
    pub image_order: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::girls::Entity",
        from = "Column::GirlId",
        to = "super::girls::Column::Id",
        on_delete = "Cascade"
    )]
    Girl,
}

impl Related<super::girls::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Girl.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
