//! The `entries` table: one Markdown note per row.

use chrono::{Duration, Utc};
use sea_orm::{
    entity::prelude::*,
    sea_query::{Expr, Func, LikeExpr},
    ActiveModelTrait, Condition, DatabaseConnection, PaginatorTrait, QueryOrder, QuerySelect, QueryTrait,
    Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub description: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_description(description: &str) -> Result<(), ModelError> {
    if description.is_empty() {
        return Err(ModelError::Validation("description required".into()));
    }
    Ok(())
}

pub fn validate_content(content: &str) -> Result<(), ModelError> {
    if content.is_empty() {
        return Err(ModelError::Validation("content required".into()));
    }
    Ok(())
}

/// Escape LIKE wildcards so user input only ever matches literally.
fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Case-insensitive substring match on description or content.
/// An empty query has no condition.
pub fn search_condition(query: &str) -> Option<Condition> {
    if query.is_empty() {
        return None;
    }
    let pattern = format!("%{}%", escape_like(&query.to_lowercase()));
    Some(
        Condition::any()
            .add(Expr::expr(Func::lower(Expr::col(Column::Description))).like(LikeExpr::new(pattern.clone()).escape('\\')))
            .add(Expr::expr(Func::lower(Expr::col(Column::Content))).like(LikeExpr::new(pattern).escape('\\'))),
    )
}

/// Rows matched by `query`; shared by [`search`] and [`count`].
pub fn matching(query: &str) -> Select<Entity> {
    Entity::find().apply_if(search_condition(query), |select, cond| select.filter(cond))
}

/// Current time, nudged past `previous` so that successive edits always move
/// `updated_at` forward even on a coarse or stepped-back clock.
pub fn now_after(previous: DateTimeWithTimeZone) -> DateTimeWithTimeZone {
    let now: DateTimeWithTimeZone = Utc::now().into();
    if now > previous { now } else { previous + Duration::microseconds(1) }
}

pub async fn exists_with_description<C: ConnectionTrait>(
    db: &C,
    description: &str,
    excluding_id: Option<i32>,
) -> Result<bool, ModelError> {
    let mut finder = Entity::find().filter(Column::Description.eq(description));
    if let Some(id) = excluding_id {
        finder = finder.filter(Column::Id.ne(id));
    }
    Ok(finder.count(db).await? > 0)
}

pub async fn recent<C: ConnectionTrait>(db: &C, limit: u64) -> Result<Vec<Model>, ModelError> {
    search(db, "", 0, limit).await
}

pub async fn search<C: ConnectionTrait>(
    db: &C,
    query: &str,
    offset: u64,
    limit: u64,
) -> Result<Vec<Model>, ModelError> {
    let rows = matching(query)
        .order_by_desc(Column::UpdatedAt)
        .order_by_desc(Column::Id)
        .offset(offset)
        .limit(limit)
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn count<C: ConnectionTrait>(db: &C, query: &str) -> Result<u64, ModelError> {
    Ok(matching(query).count(db).await?)
}

pub async fn find<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    description: &str,
    content: &str,
    created_at: DateTimeWithTimeZone,
    updated_at: DateTimeWithTimeZone,
) -> Result<Model, ModelError> {
    validate_description(description)?;
    validate_content(content)?;

    let am = ActiveModel {
        description: Set(description.to_string()),
        content: Set(content.to_string()),
        created_at: Set(created_at),
        updated_at: Set(updated_at.max(created_at)),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

/// Overwrite description and content and bump `updated_at`.
/// Returns `Ok(None)` when no row has this id.
pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    description: &str,
    content: &str,
) -> Result<Option<Model>, ModelError> {
    validate_description(description)?;
    validate_content(content)?;

    let txn = db.begin().await?;
    let Some(existing) = Entity::find_by_id(id).one(&txn).await? else {
        txn.rollback().await?;
        return Ok(None);
    };
    let updated_at = now_after(existing.updated_at);
    let mut am: ActiveModel = existing.into();
    am.description = Set(description.to_string());
    am.content = Set(content.to_string());
    am.updated_at = Set(updated_at);
    let updated = am.update(&txn).await?;
    txn.commit().await?;
    Ok(Some(updated))
}

/// Delete a row; returns true if one was removed.
pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
