//! Implements a struct that holds the state of one interactive session.
//!
//! The presentation layer owns one [AppState] and forwards each user intent
//! to it. Intents run one at a time; each either completes or returns an
//! error without changing the state.

use crate::{
    Error,
    aggregation::{
        self, BudgetSummary, CategoryTotal, JobStatusCounts, budget_summary, job_status_counts,
    },
    auth,
    id::RecordId,
    job::{Job, JobForm, StatusFilter},
    record_store::RecordStore,
    storage::Storage,
    transaction::{Transaction, TransactionForm},
    user::Session,
};

/// The logged-in user and their loaded collections.
#[derive(Debug, Clone)]
struct ActiveSession<S> {
    session: Session,
    transactions: RecordStore<Transaction, S>,
    jobs: RecordStore<Job, S>,
    status_filter: StatusFilter,
}

impl<S: Storage + Clone> ActiveSession<S> {
    async fn load(storage: &S, session: Session) -> Result<Self, Error> {
        let transactions = RecordStore::load(storage.clone(), &session.id).await?;
        let jobs = RecordStore::load(storage.clone(), &session.id).await?;

        Ok(Self {
            session,
            transactions,
            jobs,
            status_filter: StatusFilter::default(),
        })
    }
}

/// The state of the dashboard: the storage handle and, once a user has
/// logged in, their session and collections.
#[derive(Debug, Clone)]
pub struct AppState<S> {
    storage: S,
    active: Option<ActiveSession<S>>,
}

impl<S: Storage + Clone> AppState<S> {
    /// Create a logged-out state that reads and writes through `storage`.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            active: None,
        }
    }

    /// Register a new account, log in as that user and load their collections.
    ///
    /// # Errors
    ///
    /// See [auth::sign_up]. On error the current state is left unchanged.
    pub async fn sign_up(&mut self, email: &str, password: &str) -> Result<&Session, Error> {
        let session = auth::sign_up(&self.storage, email, password).await?;

        self.activate(session).await
    }

    /// Log in as an existing user and load their collections.
    ///
    /// # Errors
    ///
    /// See [auth::log_in]. On error the current state is left unchanged.
    pub async fn log_in(&mut self, email: &str, password: &str) -> Result<&Session, Error> {
        let session = auth::log_in(&self.storage, email, password).await?;

        self.activate(session).await
    }

    async fn activate(&mut self, session: Session) -> Result<&Session, Error> {
        let active = ActiveSession::load(&self.storage, session).await?;
        tracing::debug!(
            "Loaded {} transactions and {} jobs for user {}",
            active.transactions.records().len(),
            active.jobs.records().len(),
            active.session.id
        );

        Ok(&self.active.insert(active).session)
    }

    /// Forget the session and the loaded collections. Storage is not touched.
    pub fn log_out(&mut self) {
        if let Some(active) = self.active.take() {
            tracing::info!("User {} logged out", active.session.id);
        }
    }

    /// The logged-in user, if any.
    pub fn session(&self) -> Option<&Session> {
        self.active.as_ref().map(|active| &active.session)
    }

    /// The logged-in user's transactions in insertion order, empty when logged out.
    pub fn transactions(&self) -> &[Transaction] {
        self.active
            .as_ref()
            .map(|active| active.transactions.records())
            .unwrap_or_default()
    }

    /// The logged-in user's jobs in insertion order, empty when logged out.
    pub fn jobs(&self) -> &[Job] {
        self.active
            .as_ref()
            .map(|active| active.jobs.records())
            .unwrap_or_default()
    }

    /// Validate `form` and add it as a new transaction.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotLoggedIn] without a session, [Error::Validation] if
    /// the form is invalid, or a storage error if the collection could not be saved.
    pub async fn create_transaction(
        &mut self,
        form: &TransactionForm,
    ) -> Result<Transaction, Error> {
        let active = self.active_mut()?;
        let fields = form.validate()?;

        active.transactions.create(fields).await
    }

    /// Validate `form` and replace the transaction with the ID `id`.
    ///
    /// Returns `None` if there is no such transaction.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotLoggedIn] without a session, [Error::Validation] if
    /// the form is invalid, or a storage error if the collection could not be saved.
    pub async fn update_transaction(
        &mut self,
        id: &RecordId,
        form: &TransactionForm,
    ) -> Result<Option<Transaction>, Error> {
        let active = self.active_mut()?;
        let fields = form.validate()?;

        active.transactions.update(id, fields).await
    }

    /// Delete the transaction with the ID `id`, if it exists.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotLoggedIn] without a session or a storage error if
    /// the collection could not be saved.
    pub async fn delete_transaction(&mut self, id: &RecordId) -> Result<(), Error> {
        self.active_mut()?.transactions.delete(id).await
    }

    /// Validate `form` and add it as a new job.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotLoggedIn] without a session, [Error::Validation] if
    /// the form is invalid, or a storage error if the collection could not be saved.
    pub async fn create_job(&mut self, form: &JobForm) -> Result<Job, Error> {
        let active = self.active_mut()?;
        let fields = form.validate()?;

        active.jobs.create(fields).await
    }

    /// Validate `form` and replace the job with the ID `id`.
    ///
    /// Returns `None` if there is no such job.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotLoggedIn] without a session, [Error::Validation] if
    /// the form is invalid, or a storage error if the collection could not be saved.
    pub async fn update_job(
        &mut self,
        id: &RecordId,
        form: &JobForm,
    ) -> Result<Option<Job>, Error> {
        let active = self.active_mut()?;
        let fields = form.validate()?;

        active.jobs.update(id, fields).await
    }

    /// Delete the job with the ID `id`, if it exists.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotLoggedIn] without a session or a storage error if
    /// the collection could not be saved.
    pub async fn delete_job(&mut self, id: &RecordId) -> Result<(), Error> {
        self.active_mut()?.jobs.delete(id).await
    }

    /// Choose which jobs [AppState::filtered_jobs] returns.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotLoggedIn] without a session.
    pub fn set_status_filter(&mut self, filter: StatusFilter) -> Result<(), Error> {
        self.active_mut()?.status_filter = filter;

        Ok(())
    }

    /// The current job filter. Defaults to showing every job.
    pub fn status_filter(&self) -> StatusFilter {
        self.active
            .as_ref()
            .map_or(StatusFilter::default(), |active| active.status_filter)
    }

    /// Income, expense and balance totals for the current transactions.
    pub fn budget_summary(&self) -> BudgetSummary {
        budget_summary(self.transactions())
    }

    /// Expense totals per category for the current transactions.
    pub fn expenses_by_category(&self) -> Vec<CategoryTotal> {
        aggregation::expenses_by_category(self.transactions())
    }

    /// The number of current jobs with each status.
    pub fn job_status_counts(&self) -> JobStatusCounts {
        job_status_counts(self.jobs())
    }

    /// The current jobs that pass the status filter.
    pub fn filtered_jobs(&self) -> Vec<&Job> {
        aggregation::filter_jobs(self.jobs(), self.status_filter())
    }

    fn active_mut(&mut self) -> Result<&mut ActiveSession<S>, Error> {
        self.active.as_mut().ok_or(Error::NotLoggedIn)
    }
}
