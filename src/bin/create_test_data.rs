use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;

use career_finance_dashboard::{
    AppState, SqliteStorage, setup_logging,
    job::{JobForm, JobStatus},
    transaction::{Category, TransactionForm, TransactionType},
};

/// A utility for creating a store with a test user, transactions and job applications.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// The email of the test user.
    #[arg(long, default_value = "test@example.com")]
    email: String,

    /// The password of the test user.
    #[arg(long, default_value = "test")]
    password: String,

    /// The log level used when `RUST_LOG` is not set.
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Create and populate a store for manual testing.
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    setup_logging(&args.log_level);

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'dashboard.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'dashboard.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating store at {output_path:#?}");
    let storage = SqliteStorage::open(output_path)?;
    let mut state = AppState::new(storage);

    println!("Creating test user {}...", args.email);
    state.sign_up(&args.email, &args.password).await?;

    println!("Creating transactions...");
    for form in sample_transactions() {
        state.create_transaction(&form).await?;
    }

    println!("Creating job applications...");
    for form in sample_jobs() {
        state.create_job(&form).await?;
    }

    println!("Success!");

    Ok(())
}

fn sample_transactions() -> Vec<TransactionForm> {
    [
        (TransactionType::Income, "4200", Category::Salary, "Monthly pay"),
        (TransactionType::Expense, "1450", Category::Housing, "Rent"),
        (TransactionType::Expense, "212.37", Category::Food, "Groceries"),
        (TransactionType::Expense, "64.50", Category::Transportation, "Bus pass"),
        (TransactionType::Expense, "120", Category::Utilities, "Power bill"),
        (TransactionType::Expense, "35", Category::Entertainment, "Cinema"),
        (TransactionType::Expense, "48.20", Category::Food, "Takeaways"),
    ]
    .into_iter()
    .map(|(kind, amount, category, description)| TransactionForm {
        kind,
        amount: amount.to_owned(),
        category,
        description: description.to_owned(),
        ..TransactionForm::default()
    })
    .collect()
}

fn sample_jobs() -> Vec<JobForm> {
    [
        ("Acme Corp", "Backend Engineer", JobStatus::Applied, ""),
        ("Globex", "Data Analyst", JobStatus::Applied, ""),
        (
            "Initech",
            "Software Developer",
            JobStatus::Interviewing,
            "Technical interview next Tuesday",
        ),
        ("Hooli", "Site Reliability Engineer", JobStatus::Offer, "Reply by Friday"),
        ("Umbrella", "QA Engineer", JobStatus::Rejected, ""),
    ]
    .into_iter()
    .map(|(company, position, status, notes)| JobForm {
        company: company.to_owned(),
        position: position.to_owned(),
        status,
        notes: notes.to_owned(),
        ..JobForm::default()
    })
    .collect()
}
