use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use payoff::cli::{
    handle_account_command, handle_budget_command, handle_pay_command, handle_plan_command,
    handle_transaction_command, handle_transfers_command, AccountCommands, BudgetCommands,
    PlanCommands, TransactionCommands, TransferCommands,
};
use payoff::config::{paths::PayoffPaths, settings::Settings};
use payoff::error::PayoffError;
use payoff::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "payoff",
    version,
    about = "Debt payoff planning and credit-card payment automation for envelope budgets",
    long_about = "payoff-cli plans your way out of debt: it snapshots your credit card \
                  balances into a snowball or avalanche payoff plan, detects credit-card \
                  payments as they are recorded, moves the matching envelope money to the \
                  card's payment category, and tracks progress from your transactions."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Account management commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Envelope budget commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Transaction commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Payoff plan commands
    #[command(subcommand)]
    Plan(PlanCommands),

    /// Record a credit-card payment (both legs plus the budget transfer)
    Pay {
        /// Payment amount (e.g., "250.00")
        amount: String,
        /// Checking account to pay from
        #[arg(short, long)]
        from: String,
        /// Destination card (matched from the description when omitted)
        #[arg(short, long)]
        card: Option<String>,
        /// Spending budget to debit
        #[arg(short, long)]
        budget: String,
        /// Payment date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Description for both legs
        #[arg(short = 'D', long)]
        description: Option<String>,
    },

    /// Budget transfer ledger commands
    #[command(subcommand)]
    Transfers(TransferCommands),

    /// Initialize data files and starter budgets
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = PayoffPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    let result = match cli.command {
        Some(Commands::Account(cmd)) => handle_account_command(&storage, cmd),
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, cmd),
        Some(Commands::Transaction(cmd)) => handle_transaction_command(&storage, &settings, cmd),
        Some(Commands::Plan(cmd)) => handle_plan_command(&storage, &settings, cmd),
        Some(Commands::Pay {
            amount,
            from,
            card,
            budget,
            date,
            description,
        }) => handle_pay_command(
            &storage,
            &amount,
            &from,
            card.as_deref(),
            &budget,
            date.as_deref(),
            description,
        ),
        Some(Commands::Transfers(cmd)) => handle_transfers_command(&storage, cmd),
        Some(Commands::Init) => {
            println!("Initializing payoff-cli at: {}", paths.data_dir().display());
            initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Starter budgets have been created:");
            for name in payoff::storage::init::STARTER_BUDGETS {
                println!("  - {}", name);
            }
            println!();
            println!("Add accounts with 'payoff account add', then generate a plan");
            println!("with 'payoff plan generate'.");
            Ok(())
        }
        Some(Commands::Config) => {
            println!("payoff-cli Configuration");
            println!("========================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!();
            println!("Settings:");
            println!("  Default strategy:   {}", settings.default_strategy);
            println!("  Automation enabled: {}", settings.automation_enabled);
            println!("  Currency symbol:    {}", settings.currency_symbol);
            Ok(())
        }
        None => {
            println!("payoff - debt payoff planning for envelope budgets");
            println!();
            println!("Run 'payoff --help' for usage information.");
            println!("Run 'payoff init' to set up a new data directory.");
            Ok(())
        }
    };

    // Validation and business-rule failures carry actionable messages;
    // storage/infra failures get a generic message with the detail logged.
    if let Err(err) = result {
        match &err {
            PayoffError::Storage(_) | PayoffError::Io(_) | PayoffError::Json(_) => {
                tracing::error!("{}", err);
                anyhow::bail!("Something went wrong while saving your data. Please try again.");
            }
            _ => return Err(err.into()),
        }
    }

    Ok(())
}
