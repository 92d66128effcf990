//! Service layer for payoff-cli
//!
//! The service layer provides business logic on top of the storage layer:
//! the payment classifier, the transfer engine, the payoff plan generator,
//! the progress tracker, and the plan lifecycle, plus the account, budget,
//! transaction, and import services the CLI drives them with.

pub mod account;
pub mod budget;
pub mod classifier;
pub mod import;
pub mod payoff;
pub mod plan;
pub mod progress;
pub mod transaction;
pub mod transfer_engine;

pub use account::AccountService;
pub use budget::{BudgetService, BudgetSummary};
pub use classifier::{is_credit_card_inflow, KeywordClassifier, PaymentClassifier};
pub use import::{ColumnMapping, CsvImporter, ImportSummary};
pub use payoff::{generate_plan, MAX_SIMULATION_MONTHS};
pub use plan::PlanService;
pub use progress::{MonthlyPaymentBucket, ProgressTracker};
pub use transaction::{AddOutcome, CreateTransactionInput, TransactionService};
pub use transfer_engine::{
    CardLeg, CheckingLeg, CreditCardTransfer, CreditCardTransferService, AUTOMATION_REASON,
};
