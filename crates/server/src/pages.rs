//! Server-rendered HTML pages.
//!
//! The pages are deliberately plain: tables and forms around the data the
//! ledger supplies, with the chart feeds left to the JSON API. Free-text
//! fields are escaped before interpolation.

use engine::{BudgetLine, Expense};
use std::fmt::Write;

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, month: &str, body: &str) -> String {
    let month = escape(month);
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><meta charset=\"utf-8\"><title>{title} - Spesa</title></head>\n\
         <body>\n\
         <nav>\n\
         <a href=\"/dashboard?month={month}\">Dashboard</a> |\n\
         <a href=\"/expenses?month={month}\">Expenses</a> |\n\
         <a href=\"/budgets?month={month}\">Budgets</a> |\n\
         <a href=\"/export?month={month}\">Export CSV</a>\n\
         </nav>\n\
         <form method=\"get\">\n\
         <label>Month <input name=\"month\" value=\"{month}\"></label>\n\
         <button type=\"submit\">Go</button>\n\
         </form>\n\
         <h1>{title}</h1>\n\
         {body}\n\
         </body>\n\
         </html>\n"
    )
}

pub(crate) fn dashboard(
    month: &str,
    income: f64,
    total: f64,
    savings: f64,
    overview: &[BudgetLine],
) -> String {
    let mut body = String::new();
    let _ = write!(
        body,
        "<p>Month: {}</p>\n\
         <p>Income: {income}</p>\n\
         <p>Total expenses: {total}</p>\n\
         <p>Savings: {savings}</p>\n\
         <h2>Budget vs actual</h2>\n\
         <table>\n\
         <tr><th>Category</th><th>Spent</th><th>Budget</th></tr>\n",
        escape(month)
    );
    for line in overview {
        let _ = write!(
            body,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&line.category),
            line.spent,
            line.budget
        );
    }
    body.push_str("</table>\n");
    layout("Dashboard", month, &body)
}

pub(crate) fn expenses(month: &str, expenses: &[Expense]) -> String {
    let escaped_month = escape(month);
    let mut body = format!(
        "<form method=\"post\" action=\"/expenses?month={escaped_month}\">\n\
         <input type=\"date\" name=\"date\" required>\n\
         <input name=\"category\" placeholder=\"Category\">\n\
         <input name=\"amount\" placeholder=\"Amount\">\n\
         <input name=\"payment_method\" placeholder=\"Payment method\">\n\
         <input name=\"note\" placeholder=\"Note\">\n\
         <button type=\"submit\">Add</button>\n\
         </form>\n\
         <table>\n\
         <tr><th>Date</th><th>Category</th><th>Amount</th>\
         <th>Payment method</th><th>Note</th><th></th></tr>\n"
    );
    for expense in expenses {
        let _ = write!(
            body,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td><form method=\"post\" action=\"/expenses/delete/{}?month={escaped_month}\">\
             <button type=\"submit\">Delete</button></form></td></tr>\n",
            escape(&expense.date),
            escape(&expense.category),
            expense.amount,
            escape(&expense.payment_method),
            escape(&expense.note),
            expense.id
        );
    }
    body.push_str("</table>\n");
    layout("Expenses", month, &body)
}

pub(crate) fn budgets(month: &str, income: f64, budgets: &[(String, f64)]) -> String {
    let escaped_month = escape(month);
    let mut body = format!(
        "<form method=\"post\" action=\"/budgets?month={escaped_month}\">\n\
         <label>Income <input name=\"income\" value=\"{income}\"></label>\n"
    );
    for (category, amount) in budgets {
        let _ = write!(
            body,
            "<div><input name=\"category[]\" value=\"{}\">\
             <input name=\"amount[]\" value=\"{}\"></div>\n",
            escape(category),
            amount
        );
    }
    body.push_str(
        "<div><input name=\"category[]\" placeholder=\"New category\">\
         <input name=\"amount[]\" placeholder=\"Amount\"></div>\n\
         <button type=\"submit\">Save</button>\n\
         </form>\n",
    );
    layout("Budgets", month, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_text_is_escaped() {
        let expenses = vec![Expense {
            id: 1,
            date: "2024-01-05".to_string(),
            category: "<script>".to_string(),
            amount: 20.0,
            payment_method: "Cash".to_string(),
            note: "a & b".to_string(),
        }];
        let html = super::expenses("2024-01", &expenses);
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a &amp; b"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn dashboard_lists_budget_lines() {
        let overview = vec![BudgetLine {
            category: "Food".to_string(),
            spent: 25.5,
            budget: 100.0,
        }];
        let html = dashboard("2024-01", 1000.0, 25.5, 974.5, &overview);
        assert!(html.contains("974.5"));
        assert!(html.contains("Food"));
    }
}
