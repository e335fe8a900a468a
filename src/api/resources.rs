//! Resource endpoints: expenses, budgets, savings goals, account, reports.
//!
//! All of these require authentication; a 401 from any of them is routed
//! through the session controller's interceptor by the caller.

use crate::error::ApiError;
use crate::models::{
    Account, Budget, BudgetUpdate, CategoryExpense, Expense, ExpenseUpdate, MonthlyReport,
    NewBudget, NewExpense, NewSavingsGoal, SavingsGoal,
};
use crate::traits::HttpClient;

use super::client::ApiClient;

impl<C: HttpClient> ApiClient<C> {
    /// GET /expenses
    pub async fn list_expenses(&self) -> Result<Vec<Expense>, ApiError> {
        self.get_json("/expenses").await
    }

    /// POST /expenses
    pub async fn create_expense(&self, expense: &NewExpense) -> Result<Expense, ApiError> {
        self.post_json("/expenses", expense, true).await
    }

    /// PUT /expenses/{id}
    pub async fn update_expense(
        &self,
        id: &str,
        update: &ExpenseUpdate,
    ) -> Result<Expense, ApiError> {
        self.put_json(&format!("/expenses/{}", id), update).await
    }

    /// DELETE /expenses/{id}
    pub async fn delete_expense(&self, id: &str) -> Result<(), ApiError> {
        self.delete_json(&format!("/expenses/{}", id)).await
    }

    /// GET /budgets
    pub async fn list_budgets(&self) -> Result<Vec<Budget>, ApiError> {
        self.get_json("/budgets").await
    }

    /// POST /budgets
    pub async fn create_budget(&self, budget: &NewBudget) -> Result<Budget, ApiError> {
        self.post_json("/budgets", budget, true).await
    }

    /// PUT /budgets/{id}
    pub async fn update_budget(&self, id: &str, update: &BudgetUpdate) -> Result<Budget, ApiError> {
        self.put_json(&format!("/budgets/{}", id), update).await
    }

    /// DELETE /budgets/{id}
    pub async fn delete_budget(&self, id: &str) -> Result<(), ApiError> {
        self.delete_json(&format!("/budgets/{}", id)).await
    }

    /// GET /savings
    pub async fn list_savings_goals(&self) -> Result<Vec<SavingsGoal>, ApiError> {
        self.get_json("/savings").await
    }

    /// POST /savings
    pub async fn create_savings_goal(&self, goal: &NewSavingsGoal) -> Result<SavingsGoal, ApiError> {
        self.post_json("/savings", goal, true).await
    }

    /// DELETE /savings/{id}
    pub async fn delete_savings_goal(&self, id: &str) -> Result<(), ApiError> {
        self.delete_json(&format!("/savings/{}", id)).await
    }

    /// GET /account
    pub async fn get_account(&self) -> Result<Account, ApiError> {
        self.get_json("/account").await
    }

    /// POST /account/deposit
    pub async fn deposit(&self, amount: f64) -> Result<Account, ApiError> {
        self.post_json("/account/deposit", &serde_json::json!({ "amount": amount }), true)
            .await
    }

    /// GET /reports/monthly
    pub async fn monthly_report(&self) -> Result<Vec<MonthlyReport>, ApiError> {
        self.get_json("/reports/monthly").await
    }

    /// GET /reports/categories
    pub async fn category_breakdown(&self) -> Result<Vec<CategoryExpense>, ApiError> {
        self.get_json("/reports/categories").await
    }
}
