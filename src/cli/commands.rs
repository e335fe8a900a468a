//! CLI command handlers.
//!
//! Each handler maps a parsed command onto the session controller and the
//! API client, passing the route it operates from so session-loss handling
//! knows whether the user was on an entry screen. Every authenticated call
//! goes through the 401 interceptor.

use color_eyre::eyre::eyre;
use color_eyre::Result;

use crate::cli::args::VERSION;
use crate::models::{LoginRequest, NewExpense, RegisterRequest};
use crate::session::{GuardDecision, RouteContext, RouteGuard, SessionController};
use crate::traits::HttpClient;

/// Handle the `version` command.
pub fn handle_version() {
    println!("fintrack {}", VERSION);
}

/// Handle the `help` command.
pub fn handle_help() {
    println!("fintrack - personal finance tracker");
    println!();
    println!("Usage: fintrack <command> [args]");
    println!();
    println!("Commands:");
    println!("  login <email>                        Log in (password prompted)");
    println!("  register <name> <email>              Create an account (password prompted)");
    println!("  logout                               Log out and clear the stored session");
    println!("  status                               Show the current session state");
    println!("  expenses [list]                      List expenses");
    println!("  expenses add <amount> <cat> <desc>   Record an expense");
    println!("  budgets                              List budgets");
    println!("  savings [list]                       List savings goals");
    println!("  savings deposit <amount>             Deposit into the savings account");
    println!("  report                               Monthly report and category breakdown");
    println!("  version                              Show version information");
}

/// Handle the `login` command.
pub async fn handle_login<C: HttpClient>(
    controller: &SessionController<C>,
    email: String,
) -> Result<()> {
    let password = rpassword::prompt_password("Password: ")?;
    controller
        .login(LoginRequest { email, password })
        .await
        .map_err(|e| eyre!(e.user_message().to_string()))?;

    if let Some(user) = controller.store().snapshot().user {
        println!("Logged in as {} <{}>", user.name, user.email);
    }
    Ok(())
}

/// Handle the `register` command.
pub async fn handle_register<C: HttpClient>(
    controller: &SessionController<C>,
    name: String,
    email: String,
) -> Result<()> {
    let password = rpassword::prompt_password("Password: ")?;
    let confirm = rpassword::prompt_password("Confirm password: ")?;
    if password != confirm {
        return Err(eyre!("Passwords do not match"));
    }

    controller
        .register(RegisterRequest {
            name,
            email,
            password,
        })
        .await
        .map_err(|e| eyre!(e.user_message().to_string()))?;

    if let Some(user) = controller.store().snapshot().user {
        println!("Account created for {} <{}>", user.name, user.email);
    }
    Ok(())
}

/// Handle the `logout` command. Always succeeds locally.
pub async fn handle_logout<C: HttpClient>(controller: &SessionController<C>) -> Result<()> {
    controller.logout().await;
    Ok(())
}

/// Handle the `status` command.
pub async fn handle_status<C: HttpClient>(controller: &SessionController<C>) -> Result<()> {
    let state = controller.store().snapshot();
    match (state.is_authenticated, state.user) {
        (true, Some(user)) => println!("Logged in as {} <{}>", user.name, user.email),
        (true, None) => println!("Logged in"),
        _ => println!("Not logged in"),
    }
    Ok(())
}

/// Handle the `expenses` command.
pub async fn handle_expenses<C: HttpClient>(controller: &SessionController<C>) -> Result<()> {
    let route = RouteContext::new("/expenses");
    require_session(controller)?;

    let expenses = controller
        .intercept(controller.api().list_expenses().await, &route)
        .await
        .map_err(|e| eyre!(e.user_message().to_string()))?;

    if expenses.is_empty() {
        println!("No expenses recorded");
        return Ok(());
    }
    for expense in expenses {
        println!(
            "{}  {:>10.2}  {:<12}  {}",
            expense.date, expense.amount, expense.category, expense.description
        );
    }
    Ok(())
}

/// Handle the `expenses add` command.
pub async fn handle_add_expense<C: HttpClient>(
    controller: &SessionController<C>,
    amount: f64,
    category: String,
    description: String,
) -> Result<()> {
    let route = RouteContext::new("/expenses");
    require_session(controller)?;

    let expense = NewExpense {
        amount,
        category,
        description,
        date: chrono::Local::now().date_naive(),
    };
    let created = controller
        .intercept(controller.api().create_expense(&expense).await, &route)
        .await
        .map_err(|e| eyre!(e.user_message().to_string()))?;

    println!(
        "Recorded {:.2} in {} ({})",
        created.amount, created.category, created.description
    );
    Ok(())
}

/// Handle the `budgets` command.
pub async fn handle_budgets<C: HttpClient>(controller: &SessionController<C>) -> Result<()> {
    let route = RouteContext::new("/budgets");
    require_session(controller)?;

    let budgets = controller
        .intercept(controller.api().list_budgets().await, &route)
        .await
        .map_err(|e| eyre!(e.user_message().to_string()))?;

    if budgets.is_empty() {
        println!("No budgets configured");
        return Ok(());
    }
    for budget in budgets {
        println!(
            "{:<12}  {:>10.2} / {:>10.2}",
            budget.category, budget.spent, budget.limit
        );
    }
    Ok(())
}

/// Handle the `savings` command.
pub async fn handle_savings<C: HttpClient>(controller: &SessionController<C>) -> Result<()> {
    let route = RouteContext::new("/savings");
    require_session(controller)?;

    let account = controller
        .intercept(controller.api().get_account().await, &route)
        .await
        .map_err(|e| eyre!(e.user_message().to_string()))?;
    println!(
        "Balance: {:.2}  Saved: {:.2}",
        account.balance, account.saved
    );

    let goals = controller
        .intercept(controller.api().list_savings_goals().await, &route)
        .await
        .map_err(|e| eyre!(e.user_message().to_string()))?;
    for goal in goals {
        println!(
            "{:>10.2} by {}  {}",
            goal.target_amount, goal.due_date, goal.description
        );
    }
    Ok(())
}

/// Handle the `savings deposit` command.
pub async fn handle_deposit<C: HttpClient>(
    controller: &SessionController<C>,
    amount: f64,
) -> Result<()> {
    let route = RouteContext::new("/savings");
    require_session(controller)?;

    let account = controller
        .intercept(controller.api().deposit(amount).await, &route)
        .await
        .map_err(|e| eyre!(e.user_message().to_string()))?;

    println!(
        "Deposited {:.2}. Balance: {:.2}  Saved: {:.2}",
        amount, account.balance, account.saved
    );
    Ok(())
}

/// Handle the `report` command.
pub async fn handle_report<C: HttpClient>(controller: &SessionController<C>) -> Result<()> {
    let route = RouteContext::new("/reports");
    require_session(controller)?;

    let monthly = controller
        .intercept(controller.api().monthly_report().await, &route)
        .await
        .map_err(|e| eyre!(e.user_message().to_string()))?;
    println!("Month      Income    Expenses     Savings");
    for row in monthly {
        println!(
            "{:<8} {:>9.2} {:>11.2} {:>11.2}",
            row.month, row.income, row.expenses, row.savings
        );
    }

    let categories = controller
        .intercept(controller.api().category_breakdown().await, &route)
        .await
        .map_err(|e| eyre!(e.user_message().to_string()))?;
    if !categories.is_empty() {
        println!();
        println!("By category:");
        for row in categories {
            println!(
                "{:<12} {:>9.2}  {:>5.1}%  ({} items)",
                row.category, row.amount, row.percentage, row.count
            );
        }
    }
    Ok(())
}

/// Gate an authenticated command on the route guard.
fn require_session<C: HttpClient>(controller: &SessionController<C>) -> Result<()> {
    let mut guard = RouteGuard::new(controller.notifications().clone());
    match guard.evaluate(controller.store()) {
        GuardDecision::Render | GuardDecision::Loading => Ok(()),
        GuardDecision::RedirectToLogin => Err(eyre!("Please login first: fintrack login <email>")),
    }
}
