use sea_orm::entity::prelude::*;

/// Catalog listing record.
///
/// `image` is the legacy inline blob; `img_url` supersedes it but both are
/// kept live (the image-resolution precedence decides which one a reader
/// sees). `images` is the legacy JSON array, superseded by `detail_images`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "girls")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub area: Option<String>,
    /// Free text, formatted client-side.
    pub price: Option<String>,
    pub rating: f64,
    pub img_url: String,
    #[sea_orm(column_type = "VarBinary(StringLen::None)", nullable)]
    pub image: Option<Vec<u8>>,
    pub zalo: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    /// Legacy; superseded by `display_order`.
    pub is_pinned: bool,
    /// Higher sorts first; ties broken by `created_at` desc.
    pub display_order: i32,
    pub info: Json,
    pub images: Json,
    pub viewed: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::detail_images::Entity")]
    DetailImages,
    #[sea_orm(has_many = "super::reviews::Entity")]
    Reviews,
}

impl Related<super::detail_images::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DetailImages.def()
    }
}

impl Related<super::reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
