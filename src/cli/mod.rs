//! Command-line interface.
//!
//! Parsing lives in [`args`], handlers in [`commands`]. The dispatcher maps
//! a parsed command onto a handler against an already-built controller.

pub mod args;
pub mod commands;

pub use args::{parse_args, CliCommand, VERSION};

use color_eyre::Result;

use crate::session::SessionController;
use crate::traits::HttpClient;

/// Run a parsed CLI command to completion.
pub async fn run_command<C: HttpClient>(
    controller: &SessionController<C>,
    command: CliCommand,
) -> Result<()> {
    match command {
        CliCommand::Version => {
            commands::handle_version();
            Ok(())
        }
        CliCommand::Help => {
            commands::handle_help();
            Ok(())
        }
        CliCommand::Login { email } => commands::handle_login(controller, email).await,
        CliCommand::Register { name, email } => {
            commands::handle_register(controller, name, email).await
        }
        CliCommand::Logout => commands::handle_logout(controller).await,
        CliCommand::Status => commands::handle_status(controller).await,
        CliCommand::Expenses => commands::handle_expenses(controller).await,
        CliCommand::AddExpense {
            amount,
            category,
            description,
        } => commands::handle_add_expense(controller, amount, category, description).await,
        CliCommand::Budgets => commands::handle_budgets(controller).await,
        CliCommand::Savings => commands::handle_savings(controller).await,
        CliCommand::Deposit { amount } => commands::handle_deposit(controller, amount).await,
        CliCommand::Report => commands::handle_report(controller).await,
    }
}
