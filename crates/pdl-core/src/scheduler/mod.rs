//! Orchestration core: job queue, worker pool, error budget, cancellation.
//!
//! Data flow: [`Dispatcher`] admits jobs to the [`JobQueue`]; each [`Worker`]
//! pulls jobs and hands them to the [`JobRunner`], which talks to the
//! transport and persister. Terminal outcomes flow back to the dispatcher's
//! accounting loop, which charges the [`ErrorBudget`] and may fire the
//! batch's cancellation signal.

mod budget;
mod dispatcher;
mod queue;
mod report;
mod runner;
mod worker;

pub use budget::{BudgetState, ErrorBudget};
pub use dispatcher::Dispatcher;
pub use queue::{Job, JobQueue};
pub use report::{BatchResult, JobReport, TargetFailure};
pub use runner::JobRunner;
pub use worker::{Worker, WorkerState, WorkerStats};
