//! Event dispatcher
//!
//! Takes one inbound event for one chat, runs it through commands, the export
//! gate and the chat's form session, and sends whatever the outcome calls
//! for. Callers must not run two events for the same chat at once; the
//! [`ChatRouter`](crate::router::ChatRouter) guarantees that.

use std::sync::Arc;

use signup_core::texts::{self, STEP_MESSAGES};
use signup_core::{ButtonTag, ChatId, Keyboard};
use signup_session::SessionStore;
use signup_state::{FormEvent, FormStep, Session, StepOutcome};
use signup_storage::{ExportRenderer, RegistrationRepository};

use crate::event::{InboundEvent, InboundPayload, EXPORT_COMMAND, START_COMMAND};
use crate::export_gate::{ExportGate, GateAttempt};
use crate::logging::TranscriptLog;
use crate::messenger::Messenger;

/// Transcript stand-in for text typed while the export gate is raised.
pub const REDACTED_PASSWORD: &str = "<password attempt>";

pub struct Dispatcher {
    sessions: Arc<dyn SessionStore>,
    repository: Arc<dyn RegistrationRepository>,
    messenger: Arc<dyn Messenger>,
    renderer: Arc<dyn ExportRenderer>,
    gate: ExportGate,
    transcript: Arc<TranscriptLog>,
}

impl Dispatcher {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        repository: Arc<dyn RegistrationRepository>,
        messenger: Arc<dyn Messenger>,
        renderer: Arc<dyn ExportRenderer>,
        gate: ExportGate,
    ) -> Self {
        Self {
            sessions,
            repository,
            messenger,
            renderer,
            gate,
            transcript: Arc::new(TranscriptLog::disabled()),
        }
    }

    pub fn with_transcript(mut self, transcript: Arc<TranscriptLog>) -> Self {
        self.transcript = transcript;
        self
    }

    pub fn gate(&self) -> &ExportGate {
        &self.gate
    }

    /// Process one event to completion.
    pub async fn handle(&self, event: InboundEvent) {
        let InboundEvent {
            chat_id,
            sender,
            payload,
        } = event;

        match payload {
            InboundPayload::Text(text) => {
                let text = text.trim();
                self.log_inbound_text(chat_id, sender.as_deref(), text);
                self.handle_text(chat_id, sender, text).await;
            }
            InboundPayload::Button {
                data,
                callback_id,
                message_id,
            } => {
                self.handle_button(chat_id, sender, &data).await;
                self.finish_button(chat_id, callback_id, message_id).await;
            }
        }
    }

    async fn handle_text(&self, chat_id: ChatId, sender: Option<String>, text: &str) {
        if text == START_COMMAND {
            self.restart(chat_id).await;
            return;
        }

        if text == EXPORT_COMMAND {
            self.gate.raise(chat_id);
            tracing::info!(%chat_id, "export requested, waiting for password");
            self.say(chat_id, texts::ASK_PASSWORD).await;
            return;
        }

        if self.gate.is_raised(chat_id) {
            self.try_password(chat_id, text).await;
            return;
        }

        self.run_form(chat_id, sender, FormEvent::text(text)).await;
    }

    /// Password attempts never reach the transcript in clear.
    fn log_inbound_text(&self, chat_id: ChatId, sender: Option<&str>, text: &str) {
        let is_command = text == START_COMMAND || text == EXPORT_COMMAND;
        if self.gate.is_raised(chat_id) && !is_command {
            self.transcript.log_user(chat_id, sender, REDACTED_PASSWORD);
        } else {
            self.transcript.log_user(chat_id, sender, text);
        }
    }

    async fn handle_button(&self, chat_id: ChatId, sender: Option<String>, data: &str) {
        let Some(tag) = ButtonTag::parse(data) else {
            tracing::debug!(%chat_id, data, "dropping unknown button tag");
            return;
        };
        self.run_form(chat_id, sender, FormEvent::Button(tag)).await;
    }

    async fn run_form(&self, chat_id: ChatId, sender: Option<String>, event: FormEvent) {
        let Some(mut session) = self.sessions.get(chat_id).await else {
            tracing::info!(%chat_id, "first contact, opening session");
            self.open_session(chat_id).await;
            return;
        };

        let kind = event.kind();
        let outcome = session.handle_event(event);
        tracing::debug!(
            %chat_id,
            kind,
            step = session.step().number(),
            outcome = outcome_name(&outcome),
            "form event handled"
        );

        match outcome {
            StepOutcome::Advanced { to, ack, .. } => {
                self.save_session(session).await;
                self.say(chat_id, ack).await;
                self.prompt(chat_id, to).await;
            }
            StepOutcome::ReadyForReview { summary } => {
                self.save_session(session).await;
                self.say_with(chat_id, &summary, Some(&Keyboard::confirmation()))
                    .await;
            }
            StepOutcome::Rejected { step, error } => {
                self.say(chat_id, &texts::validation_error(&error)).await;
                self.prompt(chat_id, step).await;
            }
            StepOutcome::ButtonRequired { step } => {
                self.prompt(chat_id, step).await;
            }
            StepOutcome::ConfirmRequested(mut registration) => {
                registration.submitter_handle = sender;
                match self.repository.save(registration).await {
                    Ok(saved) => {
                        tracing::info!(%chat_id, id = saved.id, "registration saved");
                        if let Err(error) = session.mark_registered() {
                            tracing::warn!(%chat_id, "{}", error);
                        }
                        self.save_session(session).await;
                        self.say(chat_id, texts::REGISTERED).await;
                    }
                    Err(error) => {
                        tracing::error!(%chat_id, "Failed to save registration: {}", error);
                        self.say(chat_id, texts::SAVE_FAILED).await;
                    }
                }
            }
            StepOutcome::Cancelled => {
                self.sessions.delete(chat_id).await;
                self.sessions.create(chat_id).await;
                self.say(chat_id, texts::CANCELLED).await;
                self.say(chat_id, STEP_MESSAGES[1]).await;
            }
            StepOutcome::AlreadyRegistered => {
                self.say(chat_id, texts::ALREADY_REGISTERED).await;
            }
            StepOutcome::Unexpected { step } => {
                tracing::warn!(%chat_id, step = step.number(), "unexpected input");
                self.say(chat_id, texts::RESTART_REQUIRED).await;
            }
            StepOutcome::Ignored { .. } => {}
        }
    }

    async fn restart(&self, chat_id: ChatId) {
        if self.sessions.delete(chat_id).await {
            tracing::info!(%chat_id, "restarting form");
        }
        self.open_session(chat_id).await;
    }

    async fn open_session(&self, chat_id: ChatId) {
        self.sessions.create(chat_id).await;
        self.say(chat_id, texts::WELCOME).await;
        self.prompt(chat_id, FormStep::AwaitingFullName).await;
    }

    async fn save_session(&self, session: Session) {
        let chat_id = session.chat_id();
        if let Err(error) = self.sessions.update(session).await {
            tracing::warn!(%chat_id, "Failed to store session: {}", error);
        }
    }

    async fn try_password(&self, chat_id: ChatId, password: &str) {
        match self.gate.attempt(chat_id, password) {
            GateAttempt::Granted => {
                tracing::info!(%chat_id, "export password accepted");
                self.export(chat_id).await;
            }
            GateAttempt::Denied => {
                tracing::warn!(%chat_id, "wrong export password");
                self.say(chat_id, texts::WRONG_PASSWORD).await;
            }
            GateAttempt::NotRaised => {}
        }
    }

    async fn export(&self, chat_id: ChatId) {
        let registrations = match self.repository.list_all().await {
            Ok(registrations) => registrations,
            Err(error) => {
                tracing::error!(%chat_id, "Failed to list registrations: {}", error);
                self.say(chat_id, texts::EXPORT_FETCH_FAILED).await;
                return;
            }
        };

        let bytes = match self.renderer.render(&registrations) {
            Ok(bytes) => bytes,
            Err(error) => {
                tracing::error!(%chat_id, "Failed to render export: {}", error);
                self.say(chat_id, texts::EXPORT_RENDER_FAILED).await;
                return;
            }
        };

        self.say(chat_id, &texts::export_record_count(registrations.len()))
            .await;
        match self
            .messenger
            .send_document(chat_id, self.renderer.file_name(), bytes)
            .await
        {
            Ok(()) => self.say(chat_id, texts::EXPORT_SENT).await,
            Err(error) => tracing::error!(%chat_id, "Failed to send export file: {}", error),
        }
    }

    async fn finish_button(
        &self,
        chat_id: ChatId,
        callback_id: Option<String>,
        message_id: Option<i64>,
    ) {
        if let Some(callback_id) = callback_id {
            if let Err(error) = self.messenger.acknowledge_button(&callback_id).await {
                tracing::debug!(%chat_id, "Failed to acknowledge button: {}", error);
            }
        }
        if let Some(message_id) = message_id {
            if let Err(error) = self.messenger.delete_message(chat_id, message_id).await {
                tracing::debug!(%chat_id, "Failed to delete keyboard message: {}", error);
            }
        }
    }

    async fn prompt(&self, chat_id: ChatId, step: FormStep) {
        self.say_with(chat_id, step.prompt(), step.keyboard().as_ref())
            .await;
    }

    async fn say(&self, chat_id: ChatId, text: &str) {
        self.say_with(chat_id, text, None).await;
    }

    async fn say_with(&self, chat_id: ChatId, text: &str, keyboard: Option<&Keyboard>) {
        if let Err(error) = self.messenger.send_text(chat_id, text, keyboard).await {
            tracing::warn!(%chat_id, "Failed to send message: {}", error);
        }
        self.transcript.log_bot(chat_id, text);
    }
}

fn outcome_name(outcome: &StepOutcome) -> &'static str {
    match outcome {
        StepOutcome::Advanced { .. } => "advanced",
        StepOutcome::ReadyForReview { .. } => "ready_for_review",
        StepOutcome::Rejected { .. } => "rejected",
        StepOutcome::ButtonRequired { .. } => "button_required",
        StepOutcome::ConfirmRequested(_) => "confirm_requested",
        StepOutcome::Cancelled => "cancelled",
        StepOutcome::AlreadyRegistered => "already_registered",
        StepOutcome::Unexpected { .. } => "unexpected",
        StepOutcome::Ignored { .. } => "ignored",
    }
}
