//! Initial schema migration - creates all tables from scratch.
//!
//! The complete schema for Spesa:
//!
//! - `expenses`: individual dated expense rows
//! - `monthly_budgets`: one income value per month
//! - `category_budgets`: per-category caps, unique per `(month, category)`

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Expenses {
    Table,
    Id,
    Date,
    Category,
    Amount,
    PaymentMethod,
    Note,
}

#[derive(Iden)]
enum MonthlyBudgets {
    Table,
    Month,
    Income,
}

#[derive(Iden)]
enum CategoryBudgets {
    Table,
    Id,
    Month,
    Category,
    Amount,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Expenses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Expenses::Date).string().not_null())
                    .col(ColumnDef::new(Expenses::Category).string().not_null())
                    .col(ColumnDef::new(Expenses::Amount).double().not_null())
                    .col(ColumnDef::new(Expenses::PaymentMethod).string().not_null())
                    .col(ColumnDef::new(Expenses::Note).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MonthlyBudgets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MonthlyBudgets::Month)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MonthlyBudgets::Income).double().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CategoryBudgets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CategoryBudgets::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CategoryBudgets::Month).string().not_null())
                    .col(ColumnDef::new(CategoryBudgets::Category).string().not_null())
                    .col(ColumnDef::new(CategoryBudgets::Amount).double().not_null())
                    .to_owned(),
            )
            .await?;

        // Upserts key on this slot.
        manager
            .create_index(
                Index::create()
                    .name("idx-category_budgets-month-category-unique")
                    .table(CategoryBudgets::Table)
                    .col(CategoryBudgets::Month)
                    .col(CategoryBudgets::Category)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CategoryBudgets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MonthlyBudgets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await
    }
}
