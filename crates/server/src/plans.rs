//! Plan documents: one serialized `Planner` per access code.
//!
//! Handlers never keep a planner in memory. A write loads the document,
//! applies one mutation and stores it back inside a single DB transaction.

use chrono::Utc;
use engine::Planner;
use sea_orm::{
    ActiveValue, DatabaseConnection, TransactionTrait, entity::prelude::*, sea_query::OnConflict,
};

use crate::ServerError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "plans")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub access_code: String,
    #[sea_orm(column_type = "Text")]
    pub document: String,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::access::Entity",
        from = "Column::AccessCode",
        to = "crate::access::Column::Code",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    AccessCode,
}

impl Related<crate::access::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccessCode.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Load the plan of `access_code`; a code without a document starts from an
/// empty plan with the default time budget.
pub async fn load<C: ConnectionTrait>(db: &C, access_code: &str) -> Result<Planner, ServerError> {
    match Entity::find_by_id(access_code.to_string()).one(db).await? {
        Some(model) => Ok(Planner::from_document(&model.document)?),
        None => Ok(Planner::default()),
    }
}

pub async fn save<C: ConnectionTrait>(
    db: &C,
    access_code: &str,
    planner: &Planner,
) -> Result<(), ServerError> {
    let model = ActiveModel {
        access_code: ActiveValue::Set(access_code.to_string()),
        document: ActiveValue::Set(planner.to_document()?),
        updated_at: ActiveValue::Set(Utc::now()),
    };
    Entity::insert(model)
        .on_conflict(
            OnConflict::column(Column::AccessCode)
                .update_columns([Column::Document, Column::UpdatedAt])
                .to_owned(),
        )
        .exec(db)
        .await?;
    Ok(())
}

/// Run `apply` against the stored plan and persist the result.
///
/// Nothing is written when `apply` fails.
pub async fn update_plan<T>(
    db: &DatabaseConnection,
    access_code: &str,
    apply: impl FnOnce(&mut Planner) -> Result<T, ServerError>,
) -> Result<T, ServerError> {
    let db_tx = db.begin().await?;
    let mut planner = load(&db_tx, access_code).await?;
    let value = apply(&mut planner)?;
    save(&db_tx, access_code, &planner).await?;
    db_tx.commit().await?;
    Ok(value)
}
