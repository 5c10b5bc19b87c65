//! Storage and reporting core for the expense tracker.
//!
//! The [`Ledger`] owns the database connection and exposes every operation
//! the HTTP layer needs: expense CRUD, budget upserts, the aggregate reports
//! behind the dashboard charts, and the CSV export.

use sea_orm::{
    ActiveValue, EntityTrait, QueryFilter, Statement,
    sea_query::{Expr, OnConflict},
    prelude::*,
};
use serde::Serialize;

pub use error::LedgerError;
pub use expense::Expense;

mod category_budget;
mod error;
mod expense;
pub mod month;
mod monthly_budget;

type ResultLedger<T> = Result<T, LedgerError>;

/// One budget-vs-actual report line.
///
/// The report is driven by every category that has ever appeared in an
/// expense, outer-joined against the month's caps and spend: a category with
/// a cap but no spend this month shows `spent` 0, and one with spend but no
/// cap shows `budget` 0.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BudgetLine {
    pub category: String,
    pub spent: f64,
    pub budget: f64,
}

#[derive(Clone, Debug)]
pub struct Ledger {
    database: DatabaseConnection,
}

impl Ledger {
    /// Return a builder for `Ledger`.
    pub fn builder() -> LedgerBuilder {
        LedgerBuilder::default()
    }

    /// Insert one expense row and return its database-assigned id.
    ///
    /// No field is validated; caller-supplied strings and numbers pass
    /// through as-is.
    pub async fn add_expense(
        &self,
        date: &str,
        category: &str,
        amount: f64,
        payment_method: &str,
        note: &str,
    ) -> ResultLedger<i32> {
        let row = expense::new_row(date, category, amount, payment_method, note);
        let result = expense::Entity::insert(row).exec(&self.database).await?;
        Ok(result.last_insert_id)
    }

    /// All expenses whose date falls in the given month, in storage order.
    ///
    /// The match is `substr(date, 1, 7) = month`; a malformed month key
    /// matches nothing.
    pub async fn expenses_for_month(&self, month: &str) -> ResultLedger<Vec<Expense>> {
        let models = expense::Entity::find()
            .filter(Expr::cust_with_values("substr(date, 1, 7) = ?", [month]))
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Expense::from).collect())
    }

    /// Delete an expense by id. Deleting an absent id is not an error.
    pub async fn delete_expense(&self, id: i32) -> ResultLedger<()> {
        expense::Entity::delete_by_id(id)
            .exec(&self.database)
            .await?;
        Ok(())
    }

    /// Upsert the income for a month, replacing any prior value.
    pub async fn set_monthly_income(&self, month: &str, income: f64) -> ResultLedger<()> {
        let row = monthly_budget::ActiveModel {
            month: ActiveValue::Set(month.to_string()),
            income: ActiveValue::Set(income),
        };
        monthly_budget::Entity::insert(row)
            .on_conflict(
                OnConflict::column(monthly_budget::Column::Month)
                    .update_column(monthly_budget::Column::Income)
                    .to_owned(),
            )
            .exec(&self.database)
            .await?;
        Ok(())
    }

    /// Upsert category caps for a month.
    ///
    /// Each pair lands in its `(month, category)` slot; pairs whose category
    /// is empty after trimming are skipped silently.
    pub async fn set_category_budgets(
        &self,
        month: &str,
        pairs: &[(String, f64)],
    ) -> ResultLedger<()> {
        for (category, amount) in pairs {
            if category.trim().is_empty() {
                continue;
            }
            let row = category_budget::ActiveModel {
                id: ActiveValue::NotSet,
                month: ActiveValue::Set(month.to_string()),
                category: ActiveValue::Set(category.clone()),
                amount: ActiveValue::Set(*amount),
            };
            category_budget::Entity::insert(row)
                .on_conflict(
                    OnConflict::columns([
                        category_budget::Column::Month,
                        category_budget::Column::Category,
                    ])
                    .update_column(category_budget::Column::Amount)
                    .to_owned(),
                )
                .exec(&self.database)
                .await?;
        }
        Ok(())
    }

    /// Stored income for a month, 0 when none was ever set.
    pub async fn monthly_income(&self, month: &str) -> ResultLedger<f64> {
        let row = monthly_budget::Entity::find_by_id(month.to_string())
            .one(&self.database)
            .await?;
        Ok(row.map(|m| m.income).unwrap_or(0.0))
    }

    /// Category caps stored for a month.
    pub async fn category_budgets_for_month(
        &self,
        month: &str,
    ) -> ResultLedger<Vec<(String, f64)>> {
        let rows = category_budget::Entity::find()
            .filter(category_budget::Column::Month.eq(month))
            .all(&self.database)
            .await?;
        Ok(rows.into_iter().map(|m| (m.category, m.amount)).collect())
    }

    /// Sum of all expense amounts matching the month, 0 when empty.
    pub async fn total_spend(&self, month: &str) -> ResultLedger<f64> {
        let stmt = Statement::from_sql_and_values(
            self.database.get_database_backend(),
            "SELECT COALESCE(SUM(amount), 0.0) AS total \
             FROM expenses \
             WHERE substr(date, 1, 7) = ?",
            [month.into()],
        );
        match self.database.query_one(stmt).await? {
            Some(row) => Ok(row.try_get("", "total")?),
            None => Ok(0.0),
        }
    }

    /// Income minus total spend for the month. May be negative.
    pub async fn savings(&self, month: &str) -> ResultLedger<f64> {
        let income = self.monthly_income(month).await?;
        let total = self.total_spend(month).await?;
        Ok(income - total)
    }

    /// Budget-vs-actual rows for the month.
    ///
    /// Driven by `SELECT DISTINCT category FROM expenses` and left-joined on
    /// both sides, so the outer-join semantics described on [`BudgetLine`]
    /// hold.
    pub async fn budget_overview(&self, month: &str) -> ResultLedger<Vec<BudgetLine>> {
        let stmt = Statement::from_sql_and_values(
            self.database.get_database_backend(),
            "SELECT x.category AS category, \
                    IFNULL(SUM(e.amount), 0.0) AS spent, \
                    IFNULL(c.amount, 0.0) AS budget \
             FROM (SELECT DISTINCT category FROM expenses) x \
             LEFT JOIN category_budgets c \
                    ON c.category = x.category AND c.month = ? \
             LEFT JOIN expenses e \
                    ON e.category = x.category AND substr(e.date, 1, 7) = ? \
             GROUP BY x.category",
            [month.into(), month.into()],
        );
        let rows = self.database.query_all(stmt).await?;
        rows.into_iter()
            .map(|row| {
                Ok(BudgetLine {
                    category: row.try_get("", "category")?,
                    spent: row.try_get("", "spent")?,
                    budget: row.try_get("", "budget")?,
                })
            })
            .collect()
    }

    /// Spend grouped by category for the month.
    pub async fn spend_by_category(&self, month: &str) -> ResultLedger<Vec<(String, f64)>> {
        let stmt = Statement::from_sql_and_values(
            self.database.get_database_backend(),
            "SELECT category AS label, SUM(amount) AS total \
             FROM expenses \
             WHERE substr(date, 1, 7) = ? \
             GROUP BY category",
            [month.into()],
        );
        self.labeled_totals(stmt).await
    }

    /// Spend grouped by day for the month, ascending by date.
    pub async fn spend_by_day(&self, month: &str) -> ResultLedger<Vec<(String, f64)>> {
        let stmt = Statement::from_sql_and_values(
            self.database.get_database_backend(),
            "SELECT date AS label, SUM(amount) AS total \
             FROM expenses \
             WHERE substr(date, 1, 7) = ? \
             GROUP BY date \
             ORDER BY date",
            [month.into()],
        );
        self.labeled_totals(stmt).await
    }

    /// Spend grouped by payment method for the month.
    pub async fn spend_by_payment_method(&self, month: &str) -> ResultLedger<Vec<(String, f64)>> {
        let stmt = Statement::from_sql_and_values(
            self.database.get_database_backend(),
            "SELECT payment_method AS label, SUM(amount) AS total \
             FROM expenses \
             WHERE substr(date, 1, 7) = ? \
             GROUP BY payment_method",
            [month.into()],
        );
        self.labeled_totals(stmt).await
    }

    /// Spend grouped by month across all history, ascending. Never scoped
    /// to a selected month.
    pub async fn spend_by_month(&self) -> ResultLedger<Vec<(String, f64)>> {
        let stmt = Statement::from_string(
            self.database.get_database_backend(),
            "SELECT substr(date, 1, 7) AS label, SUM(amount) AS total \
             FROM expenses \
             GROUP BY label \
             ORDER BY label",
        );
        self.labeled_totals(stmt).await
    }

    /// Serialize one month's expenses to CSV bytes.
    ///
    /// Fixed header row, then one record per expense in storage order. An
    /// empty month yields the header row alone.
    pub async fn export_csv(&self, month: &str) -> ResultLedger<Vec<u8>> {
        let expenses = self.expenses_for_month(month).await?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(["ID", "Date", "Category", "Amount", "Payment Method", "Note"])
            .map_err(|err| LedgerError::Export(err.to_string()))?;
        for expense in &expenses {
            writer
                .write_record([
                    expense.id.to_string(),
                    expense.date.clone(),
                    expense.category.clone(),
                    expense.amount.to_string(),
                    expense.payment_method.clone(),
                    expense.note.clone(),
                ])
                .map_err(|err| LedgerError::Export(err.to_string()))?;
        }
        writer
            .into_inner()
            .map_err(|err| LedgerError::Export(err.to_string()))
    }

    async fn labeled_totals(&self, stmt: Statement) -> ResultLedger<Vec<(String, f64)>> {
        let rows = self.database.query_all(stmt).await?;
        rows.into_iter()
            .map(|row| Ok((row.try_get("", "label")?, row.try_get("", "total")?)))
            .collect()
    }
}

/// Builder for [`Ledger`].
#[derive(Default)]
pub struct LedgerBuilder {
    database: DatabaseConnection,
}

impl LedgerBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> LedgerBuilder {
        self.database = db;
        self
    }

    /// Construct `Ledger`
    pub fn build(self) -> Ledger {
        Ledger {
            database: self.database,
        }
    }
}
