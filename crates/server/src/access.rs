//! Counted-usage access codes.
//!
//! Every API route requires a known code with uses left. Generating a report
//! consumes one use; everything else only checks the code.

use chrono::Utc;
use sea_orm::{ActiveValue, entity::prelude::*, sea_query::Expr};

use crate::ServerError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "access_codes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: String,
    pub remaining_uses: i64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_exhausted(&self) -> bool {
        self.remaining_uses <= 0
    }
}

/// Look up a code, whether or not it has uses left.
pub async fn find<C: ConnectionTrait>(db: &C, code: &str) -> Result<Option<Model>, DbErr> {
    Entity::find_by_id(code.to_string()).one(db).await
}

/// Create a code with `uses` uses.
pub async fn issue<C: ConnectionTrait>(db: &C, code: &str, uses: i64) -> Result<Model, DbErr> {
    let model = ActiveModel {
        code: ActiveValue::Set(code.to_string()),
        remaining_uses: ActiveValue::Set(uses),
        created_at: ActiveValue::Set(Utc::now()),
    };
    model.insert(db).await
}

/// Take one use from `code` and return the uses left.
pub async fn consume<C: ConnectionTrait>(db: &C, code: &str) -> Result<i64, ServerError> {
    let result = Entity::update_many()
        .col_expr(
            Column::RemainingUses,
            Expr::col(Column::RemainingUses).sub(1),
        )
        .filter(Column::Code.eq(code))
        .filter(Column::RemainingUses.gt(0))
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        return Err(ServerError::Forbidden(
            "access code has no uses left".to_string(),
        ));
    }

    let remaining = find(db, code)
        .await?
        .map(|model| model.remaining_uses)
        .unwrap_or_default();
    tracing::info!(remaining, "access code use consumed");
    Ok(remaining)
}
