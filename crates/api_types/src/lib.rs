//! Shared request/response types for the HTTP surface.

use serde::{Deserialize, Serialize};

pub mod expense {
    use super::*;

    /// Form payload for `POST /expenses`.
    ///
    /// `amount` is typed, so a non-numeric submission is rejected by the
    /// form extractor before the handler runs.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub date: String,
        pub category: String,
        pub amount: f64,
        pub payment_method: String,
        pub note: String,
    }
}

pub mod budget {
    use super::*;

    fn zero() -> f64 {
        0.0
    }

    /// Form payload for `POST /budgets`.
    ///
    /// The category rows arrive as repeated `category[]` / `amount[]` keys,
    /// zipped positionally. Amounts stay raw strings here: an empty cell
    /// coerces to 0 at the server layer; a missing income defaults to 0
    /// during deserialization.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct BudgetForm {
        #[serde(default = "zero")]
        pub income: f64,
        #[serde(default, rename = "category[]")]
        pub categories: Vec<String>,
        #[serde(default, rename = "amount[]")]
        pub amounts: Vec<String>,
    }
}
