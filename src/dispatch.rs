//! State-transition engine.
//!
//! [`Dispatcher::dispatch`] receives every [`Change`] the store produces and
//! runs the side effects registered for its path. FSM paths are checked
//! against their edge tables first; `failed` handlers branch on the state
//! the machine came from.

use tracing::{debug, error};

use crate::error::TransitionError;
use crate::fsm::{LoadState, PollingState, StateMachine, ValidationState};
use crate::i18n::Localizer;
use crate::store::{Change, Store};

/// Tone of a feedback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Success,
    Error,
}

/// A localized message shown under the URL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: String,
}

/// Draws the application. Called only by the dispatcher.
pub trait Renderer {
    fn render_feeds(&mut self, store: &Store);
    fn render_posts(&mut self, store: &Store);
    fn render_modal(&mut self, store: &Store);
    /// Mark the URL input as valid or invalid.
    fn render_input(&mut self, valid: bool);
    fn render_feedback(&mut self, feedback: Feedback);
    fn clear_feedback(&mut self);
    /// Make the URL input read-only while a submission is loading.
    fn lock_input(&mut self, locked: bool);
}

pub struct Dispatcher<R, L> {
    renderer: R,
    localizer: L,
}

impl<R: Renderer, L: Localizer> Dispatcher<R, L> {
    pub fn new(renderer: R, localizer: L) -> Self {
        Self {
            renderer,
            localizer,
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Run the side effects for one change.
    pub fn dispatch(&mut self, store: &Store, change: &Change) -> Result<(), TransitionError> {
        debug!(path = change.path(), ?change, "state changed");

        let result = match *change {
            Change::Validation { previous, current } => self.on_validation(previous, current),
            Change::Loading { previous, current } => self.on_loading(store, previous, current),
            Change::Polling { previous, current } => self.on_polling(store, previous, current),
            Change::ViewedPosts { .. } => {
                self.renderer.render_posts(store);
                Ok(())
            }
            Change::ModalPost { .. } => {
                self.renderer.render_modal(store);
                Ok(())
            }
            Change::Feeds | Change::Posts { .. } => Ok(()),
        };

        if let Err(e) = &result {
            error!(error = %e, "unreachable state transition");
        }
        result
    }

    fn error_feedback(&mut self, key: &str) {
        let message = self.localizer.translate(key);
        self.renderer.render_feedback(Feedback {
            kind: FeedbackKind::Error,
            message,
        });
    }

    fn on_validation(
        &mut self,
        previous: Option<ValidationState>,
        current: ValidationState,
    ) -> Result<(), TransitionError> {
        ValidationState::check(previous, current)?;

        match current {
            ValidationState::ValidatingForm | ValidationState::ValidatingUniqueness => {}
            ValidationState::Passed => {
                self.renderer.render_input(true);
                self.renderer.clear_feedback();
            }
            ValidationState::Failed => {
                self.renderer.render_input(false);
                let key = match previous {
                    Some(ValidationState::ValidatingForm) => "errorMessages.invalidUrl",
                    Some(ValidationState::ValidatingUniqueness) => {
                        "errorMessages.urlAlreadyAdded"
                    }
                    // `check` only lets `failed` follow a validating state.
                    _ => unreachable!("validation failed from {previous:?}"),
                };
                self.error_feedback(key);
            }
        }
        Ok(())
    }

    fn on_loading(
        &mut self,
        store: &Store,
        previous: Option<LoadState>,
        current: LoadState,
    ) -> Result<(), TransitionError> {
        LoadState::check(previous, current)?;

        match current {
            LoadState::Requesting => self.renderer.lock_input(true),
            LoadState::Parsing => {}
            LoadState::Finished => {
                let message = self.localizer.translate("successMessage");
                self.renderer.render_feedback(Feedback {
                    kind: FeedbackKind::Success,
                    message,
                });
                self.renderer.render_feeds(store);
                self.renderer.render_posts(store);
                self.renderer.lock_input(false);
            }
            LoadState::Failed => {
                let key = match previous {
                    Some(LoadState::Requesting) => "errorMessages.networkError",
                    Some(LoadState::Parsing) => "errorMessages.parsingError",
                    _ => unreachable!("loading failed from {previous:?}"),
                };
                self.error_feedback(key);
                self.renderer.lock_input(false);
            }
        }
        Ok(())
    }

    fn on_polling(
        &mut self,
        store: &Store,
        previous: PollingState,
        current: PollingState,
    ) -> Result<(), TransitionError> {
        PollingState::check(Some(previous), current)?;

        if current == PollingState::Updated {
            self.renderer.render_posts(store);
        }
        Ok(())
    }
}
