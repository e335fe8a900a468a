//! Command-line argument parsing.
//!
//! Parsing is deliberately manual: the surface is a handful of positional
//! commands and anything unrecognized falls back to help.

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Log in with an email; the password is prompted interactively
    Login { email: String },
    /// Register a new account; the password is prompted interactively
    Register { name: String, email: String },
    /// Log out and clear the stored session
    Logout,
    /// Show the current session state (default)
    Status,
    /// List expenses
    Expenses,
    /// Record a new expense
    AddExpense {
        amount: f64,
        category: String,
        description: String,
    },
    /// List budgets
    Budgets,
    /// List savings goals
    Savings,
    /// Deposit into the savings account
    Deposit { amount: f64 },
    /// Show the monthly report and category breakdown
    Report,
    /// Show version information
    Version,
    /// Show usage
    Help,
}

/// Parse command-line arguments and return the command to execute.
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let args: Vec<String> = args.skip(1).collect();

    let Some(command) = args.first() else {
        return CliCommand::Status;
    };

    match command.as_str() {
        "--version" | "-V" | "version" => CliCommand::Version,
        "--help" | "-h" | "help" => CliCommand::Help,
        "login" => match args.get(1) {
            Some(email) => CliCommand::Login {
                email: email.clone(),
            },
            None => CliCommand::Help,
        },
        "register" => match (args.get(1), args.get(2)) {
            (Some(name), Some(email)) => CliCommand::Register {
                name: name.clone(),
                email: email.clone(),
            },
            _ => CliCommand::Help,
        },
        "logout" => CliCommand::Logout,
        "status" => CliCommand::Status,
        "expenses" => match args.get(1).map(String::as_str) {
            None | Some("list") => CliCommand::Expenses,
            Some("add") => parse_add_expense(&args[2..]),
            _ => CliCommand::Help,
        },
        "budgets" => CliCommand::Budgets,
        "savings" => match args.get(1).map(String::as_str) {
            None | Some("list") => CliCommand::Savings,
            Some("deposit") => match args.get(2).and_then(|a| a.parse().ok()) {
                Some(amount) => CliCommand::Deposit { amount },
                None => CliCommand::Help,
            },
            _ => CliCommand::Help,
        },
        "report" => CliCommand::Report,
        _ => CliCommand::Help,
    }
}

fn parse_add_expense(rest: &[String]) -> CliCommand {
    let (Some(amount), Some(category), Some(description)) =
        (rest.first(), rest.get(1), rest.get(2))
    else {
        return CliCommand::Help;
    };
    match amount.parse::<f64>() {
        Ok(amount) if amount > 0.0 => CliCommand::AddExpense {
            amount,
            category: category.clone(),
            description: description.clone(),
        },
        _ => CliCommand::Help,
    }
}
