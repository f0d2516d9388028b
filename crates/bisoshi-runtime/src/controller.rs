//! Remote mutation flow for one entity list.
//!
//! A [`ListController`] owns a [`ListView`] and drives it from backend
//! responses. Every request takes a ticket carrying a generation number;
//! completions are applied only while they are still current:
//!
//! - a list response is dropped when a newer list request was issued after
//!   it, or when a mutation issued after it has already been committed
//! - every completion is dropped once the controller is detached
//!
//! A failure stays the view's error until the same action succeeds or is
//! issued again; completions of other requests leave it in place.
//!
//! The `begin_*`/`complete_*` pairs are the synchronous core; the async
//! methods (`refresh`, `submit`, `delete`, `retry`) issue the request and
//! complete it in one call.

use crate::{Error, Result};
use bisoshi_api::{ApiClient, Transport};
use bisoshi_engine::{ListView, TableState};
use bisoshi_types::{FormInput, RecordId, Resource, Row};
use log::{debug, warn};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// What a failed request was doing, so it can be repeated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryAction {
    Refresh,
    Submit,
    Delete(RecordId),
}

/// Recoverable failure shown in place of the view body.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewError {
    pub error: bisoshi_api::Error,
    pub retry: RetryAction,
}

impl ViewError {
    /// No token, or the backend refused it.
    pub fn is_unauthenticated(&self) -> bool {
        self.error.is_auth()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Error(ViewError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(RecordId),
}

/// Drawer form being edited.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState<I> {
    pub mode: FormMode,
    pub values: I,
    token: u64,
}

/// How a completion was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Failed,
    Stale,
    Detached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListTicket {
    generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitTicket<I> {
    generation: u64,
    form: u64,
    mode: FormMode,
    input: I,
}

impl<I> SubmitTicket<I> {
    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn input(&self) -> &I {
        &self.input
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTicket {
    generation: u64,
    id: RecordId,
}

impl DeleteTicket {
    pub fn id(&self) -> &RecordId {
        &self.id
    }
}

/// Flips a controller into the detached state from outside.
#[derive(Debug, Clone)]
pub struct DetachHandle(Arc<AtomicBool>);

impl DetachHandle {
    pub fn detach(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

pub struct ListController<R: Resource, T> {
    api: ApiClient<T>,
    view: ListView<R::Row>,
    state: RequestState,
    form: Option<FormState<R::Input>>,
    forms_opened: u64,
    issued: u64,
    latest_list: u64,
    committed: u64,
    in_flight: BTreeSet<u64>,
    detached: Arc<AtomicBool>,
}

impl<R: Resource, T: Transport> ListController<R, T> {
    pub fn new(api: ApiClient<T>, table: TableState) -> Self {
        Self {
            api,
            view: ListView::new(table),
            state: RequestState::Idle,
            form: None,
            forms_opened: 0,
            issued: 0,
            latest_list: 0,
            committed: 0,
            in_flight: BTreeSet::new(),
            detached: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn view(&self) -> &ListView<R::Row> {
        &self.view
    }

    /// Filter, sort, paging and selection input.
    pub fn view_mut(&mut self) -> &mut ListView<R::Row> {
        &mut self.view
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn error(&self) -> Option<&ViewError> {
        match &self.state {
            RequestState::Error(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, RequestState::Loading)
    }

    pub fn form(&self) -> Option<&FormState<R::Input>> {
        self.form.as_ref()
    }

    pub fn api(&self) -> &ApiClient<T> {
        &self.api
    }

    // -- lifecycle ----------------------------------------------------------

    pub fn detach_handle(&self) -> DetachHandle {
        DetachHandle(Arc::clone(&self.detached))
    }

    /// Stop applying completions; the view keeps its last state.
    pub fn detach(&self) {
        self.detached.store(true, Ordering::SeqCst);
    }

    pub fn is_detached(&self) -> bool {
        self.detached.load(Ordering::SeqCst)
    }

    fn issue(&mut self, action: &RetryAction) -> u64 {
        self.issued += 1;
        self.in_flight.insert(self.issued);
        if !self.error_outlives(action) {
            self.state = RequestState::Loading;
        }
        self.issued
    }

    /// True when an error is recorded for an action other than `action`.
    fn error_outlives(&self, action: &RetryAction) -> bool {
        self.error().is_some_and(|err| &err.retry != action)
    }

    /// Settle `generation` and decide whether its result may be applied.
    fn settle(&mut self, generation: u64, current: bool) -> Option<Completion> {
        if self.is_detached() {
            debug!("[{}] completion #{} after detach ignored", R::spec().kind, generation);
            return Some(Completion::Detached);
        }
        self.in_flight.remove(&generation);
        if !current {
            warn!("[{}] stale response #{} discarded", R::spec().kind, generation);
            if self.in_flight.is_empty() && self.is_loading() {
                self.state = RequestState::Idle;
            }
            return Some(Completion::Stale);
        }
        None
    }

    fn succeed(&mut self, action: &RetryAction) -> Completion {
        if self.error_outlives(action) {
            return Completion::Applied;
        }
        self.state = if self.in_flight.is_empty() {
            RequestState::Idle
        } else {
            RequestState::Loading
        };
        Completion::Applied
    }

    fn fail(&mut self, error: bisoshi_api::Error, retry: RetryAction) -> Completion {
        warn!("[{}] request failed: {}", R::spec().kind, error);
        self.state = RequestState::Error(ViewError { error, retry });
        Completion::Failed
    }

    // -- list -----------------------------------------------------------------

    pub fn begin_refresh(&mut self) -> ListTicket {
        let generation = self.issue(&RetryAction::Refresh);
        self.latest_list = generation;
        ListTicket { generation }
    }

    /// Success replaces the collection; failure keeps the previous rows.
    pub fn complete_refresh(
        &mut self,
        ticket: ListTicket,
        result: bisoshi_api::Result<Vec<R::Row>>,
    ) -> Completion {
        let generation = ticket.generation;
        let current = generation == self.latest_list && generation > self.committed;
        if let Some(outcome) = self.settle(generation, current) {
            return outcome;
        }
        match result {
            Ok(rows) => {
                debug!("[{}] loaded {} rows", R::spec().kind, rows.len());
                self.committed = generation;
                self.view.replace(rows);
                self.succeed(&RetryAction::Refresh)
            }
            Err(err) => self.fail(err, RetryAction::Refresh),
        }
    }

    pub async fn refresh(&mut self) -> Completion {
        let ticket = self.begin_refresh();
        let result = self.api.list::<R>().await;
        self.complete_refresh(ticket, result)
    }

    // -- form -----------------------------------------------------------------

    pub fn open_create(&mut self) {
        self.form = Some(FormState {
            mode: FormMode::Create,
            values: R::Input::default(),
            token: self.next_form_token(),
        });
    }

    /// Pre-fill the form from the row with `id`.
    pub fn open_edit(&mut self, id: &RecordId) -> Result<()> {
        let row = self
            .view
            .find(id)
            .ok_or_else(|| Error::NotFound(format!("{} '{}'", R::spec().kind, id)))?;
        let values = R::input_from(row);
        self.form = Some(FormState {
            mode: FormMode::Edit(id.clone()),
            values,
            token: self.next_form_token(),
        });
        Ok(())
    }

    /// Each opened form gets its own token; a submit only closes its own form.
    fn next_form_token(&mut self) -> u64 {
        self.forms_opened += 1;
        self.forms_opened
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    pub fn set_form_field(&mut self, name: &str, raw: &str) -> Result<()> {
        let form = self
            .form
            .as_mut()
            .ok_or_else(|| Error::InvalidOperation("no form is open".into()))?;
        form.values.set_field(name, raw)?;
        Ok(())
    }

    // -- create / update ----------------------------------------------------------

    pub fn begin_submit(&mut self) -> Result<SubmitTicket<R::Input>> {
        let form = self
            .form
            .as_ref()
            .ok_or_else(|| Error::InvalidOperation("no form is open".into()))?;
        let form_token = form.token;
        let mode = form.mode.clone();
        let input = form.values.clone();
        Ok(SubmitTicket {
            generation: self.issue(&RetryAction::Submit),
            form: form_token,
            mode,
            input,
        })
    }

    /// Success splices the returned row in and closes the form. Failure
    /// leaves both the collection and the form untouched.
    pub fn complete_submit(
        &mut self,
        ticket: SubmitTicket<R::Input>,
        result: bisoshi_api::Result<R::Row>,
    ) -> Completion {
        if let Some(outcome) = self.settle(ticket.generation, true) {
            return outcome;
        }
        let row = match result {
            Ok(row) => row,
            Err(err) => return self.fail(err, RetryAction::Submit),
        };

        // A newer list may already contain the row.
        let id = match &ticket.mode {
            FormMode::Create => row.row_id(),
            FormMode::Edit(id) => id.clone(),
        };
        if !self.view.replace_by_id(&id, row.clone()) {
            if let FormMode::Edit(_) = ticket.mode {
                warn!("[{}] updated row {} was not loaded", R::spec().kind, id);
            }
            self.view.append(row);
        }
        self.committed = self.committed.max(ticket.generation);
        if self.form.as_ref().is_some_and(|f| f.token == ticket.form) {
            self.form = None;
        }
        self.succeed(&RetryAction::Submit)
    }

    pub async fn submit(&mut self) -> Result<Completion> {
        let ticket = self.begin_submit()?;
        let result = match ticket.mode() {
            FormMode::Create => self.api.create::<R>(ticket.input()).await,
            FormMode::Edit(id) => self.api.update::<R>(id, ticket.input()).await,
        };
        Ok(self.complete_submit(ticket, result))
    }

    // -- delete -------------------------------------------------------------------

    pub fn begin_delete(&mut self, id: RecordId) -> DeleteTicket {
        DeleteTicket {
            generation: self.issue(&RetryAction::Delete(id.clone())),
            id,
        }
    }

    pub fn complete_delete(
        &mut self,
        ticket: DeleteTicket,
        result: bisoshi_api::Result<()>,
    ) -> Completion {
        if let Some(outcome) = self.settle(ticket.generation, true) {
            return outcome;
        }
        if let Err(err) = result {
            return self.fail(err, RetryAction::Delete(ticket.id));
        }
        if !self.view.remove(&ticket.id) {
            debug!("[{}] deleted row {} was not loaded", R::spec().kind, ticket.id);
        }
        self.committed = self.committed.max(ticket.generation);
        self.succeed(&RetryAction::Delete(ticket.id))
    }

    /// Delete, then reload when the resource asks for it.
    pub async fn delete(&mut self, id: &RecordId) -> Completion {
        let ticket = self.begin_delete(id.clone());
        let result = self.api.delete::<R>(id).await;
        let outcome = self.complete_delete(ticket, result);
        if outcome == Completion::Applied && R::spec().refetch_after_delete {
            return self.refresh().await;
        }
        outcome
    }

    // -- retry --------------------------------------------------------------------

    /// Repeat the failed request. `None` when there is nothing to retry.
    pub async fn retry(&mut self) -> Result<Option<Completion>> {
        let Some(action) = self.error().map(|e| e.retry.clone()) else {
            return Ok(None);
        };
        let outcome = match action {
            RetryAction::Refresh => self.refresh().await,
            RetryAction::Submit => self.submit().await?,
            RetryAction::Delete(id) => self.delete(&id).await,
        };
        Ok(Some(outcome))
    }

    /// Ids of the rows currently selected, in collection order.
    pub fn selected_ids(&self) -> Vec<RecordId> {
        self.view
            .selected_rows()
            .into_iter()
            .map(|row| row.row_id())
            .collect()
    }
}
