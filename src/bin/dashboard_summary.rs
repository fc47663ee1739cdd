use std::{path::Path, process::exit};

use clap::Parser;

use career_finance_dashboard::{
    AppState, Error, SqliteStorage, date::format_optional_iso_date, job::StatusFilter, setup_logging,
    transaction::TransactionType,
};

/// Print the budget summary and job applications for a user.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the SQLite database.
    #[arg(long)]
    db_path: String,

    /// The email of the user to log in as.
    #[arg(long)]
    email: String,

    /// The user's password.
    #[arg(long)]
    password: String,

    /// Only list jobs with this status: all, applied, interviewing, offer or rejected.
    #[arg(long, default_value = "all")]
    status: StatusFilter,

    /// The log level used when `RUST_LOG` is not set.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    setup_logging(&args.log_level);

    let db_path = Path::new(&args.db_path);
    if !db_path.is_file() {
        eprintln!("File does not exist at {db_path:#?}!");
        exit(1);
    }

    if let Err(error) = run(&args).await {
        eprintln!("{error}");
        exit(1);
    }
}

async fn run(args: &Args) -> Result<(), Error> {
    let storage = SqliteStorage::open(&args.db_path)?;
    let mut state = AppState::new(storage);

    let session = state.log_in(&args.email, &args.password).await?;
    println!("Logged in as {}", session.email);
    state.set_status_filter(args.status)?;

    let summary = state.budget_summary();
    println!();
    println!("Total Income:   ${:.2}", summary.total_income);
    println!("Total Expenses: ${:.2}", summary.total_expenses);
    println!("Balance:        ${:.2}", summary.balance);

    let categories = state.expenses_by_category();
    if !categories.is_empty() {
        println!();
        println!("Expenses by Category");
        for category in categories {
            println!("  {:<16}${:.2}", category.name, category.value);
        }
    }

    println!();
    println!("Recent Transactions");
    if state.transactions().is_empty() {
        println!("  No transactions yet.");
    }
    for transaction in state.transactions() {
        let sign = match transaction.kind {
            TransactionType::Income => '+',
            TransactionType::Expense => '-',
        };
        println!(
            "  {:<10} {:<24} {:<16} {}${}",
            format_optional_iso_date(transaction.date),
            transaction.description,
            transaction.category,
            sign,
            transaction.amount
        );
    }

    let counts = state.job_status_counts();
    println!();
    println!(
        "Applied: {}  Interviewing: {}  Offers: {}  Rejected: {}",
        counts.applied, counts.interviewing, counts.offer, counts.rejected
    );

    println!();
    println!("Job Applications ({})", state.status_filter());
    let jobs = state.filtered_jobs();
    if jobs.is_empty() {
        println!("  {}", state.status_filter().empty_list_message());
    }
    for job in jobs {
        println!(
            "  {:<10} {:<20} {:<28} {}",
            format_optional_iso_date(job.date_applied),
            job.company,
            job.position,
            job.status.label()
        );
        if !job.notes.is_empty() {
            println!("      {}", job.notes);
        }
    }

    Ok(())
}
