//! The module contains the `Expense` type, one dated expense row.
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// A single recorded expense.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i32,
    pub date: String,
    pub category: String,
    pub amount: f64,
    pub payment_method: String,
    pub note: String,
}

impl From<Model> for Expense {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            date: model.date,
            category: model.category,
            amount: model.amount,
            payment_method: model.payment_method,
            note: model.note,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub date: String,
    pub category: String,
    #[sea_orm(column_type = "Double")]
    pub amount: f64,
    pub payment_method: String,
    pub note: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Active model for a not-yet-inserted expense; the id comes from the
/// database.
pub(crate) fn new_row(
    date: &str,
    category: &str,
    amount: f64,
    payment_method: &str,
    note: &str,
) -> ActiveModel {
    ActiveModel {
        id: ActiveValue::NotSet,
        date: ActiveValue::Set(date.to_string()),
        category: ActiveValue::Set(category.to_string()),
        amount: ActiveValue::Set(amount),
        payment_method: ActiveValue::Set(payment_method.to_string()),
        note: ActiveValue::Set(note.to_string()),
    }
}
