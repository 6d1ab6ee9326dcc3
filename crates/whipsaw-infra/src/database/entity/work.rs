//! Work item entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use whipsaw_core::domain::WorkItem;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "work")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub image: Option<String>,
    pub client: String,
    pub year: Option<String>,
    pub date: DateTimeWithTimeZone,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub author: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for WorkItem {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            category: model.category,
            image: model.image,
            client: model.client,
            year: model.year,
            date: model.date.into(),
            description: model.description,
            content: model.content,
            author: model.author,
        }
    }
}

impl From<WorkItem> for ActiveModel {
    fn from(item: WorkItem) -> Self {
        Self {
            id: Set(item.id),
            title: Set(item.title),
            category: Set(item.category),
            image: Set(item.image),
            client: Set(item.client),
            year: Set(item.year),
            date: Set(item.date.into()),
            description: Set(item.description),
            content: Set(item.content),
            author: Set(item.author),
        }
    }
}
