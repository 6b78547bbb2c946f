use sea_orm::entity::prelude::*;

/// A user's rating + comment on a listing. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub girl_id: i32,
    pub rating: i16,
    pub comment: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::girls::Entity",
        from = "Column::GirlId",
        to = "super::girls::Column::Id",
        on_delete = "Cascade"
    )]
    Girl,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::girls::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Girl.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
