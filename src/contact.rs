//! Contact form state and submission.
//!
//! The form holds six free-text fields. Name, email, and message are
//! required; that check happens before dispatch and is the only validation
//! (no email or phone format checks, the backend owns those).
//!
//! Submission is split in two so the in-flight state is observable:
//!
//! 1. [`ContactForm::begin_submit`] checks the required fields, marks the
//!    form as submitting, and hands back a snapshot to send.
//! 2. [`ContactForm::finish_submit`] records the result: on success the form
//!    is cleared and a success toast is queued; on failure the fields stay
//!    as typed and an error toast is queued.
//!
//! While a submission is in flight a second `begin_submit` is refused, which
//! is what disabling the submit button does on the page.
//! [`ContactForm::submit`] runs both halves around one
//! [`ContactEndpoint`] call. There is no retry and no idempotency key.

use crate::api::ApiError;
use crate::i18n::{Locale, Translations};
use serde::{Deserialize, Serialize};

/// Values accepted for `service_interest`, besides the empty "none chosen".
pub const SERVICE_OPTIONS: [&str; 4] = ["beans", "development", "export", "other"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Company,
    Email,
    Phone,
    ServiceInterest,
    Message,
}

impl ContactField {
    pub const REQUIRED: [ContactField; 3] =
        [ContactField::Name, ContactField::Email, ContactField::Message];

    /// Translation key for the field label.
    pub fn label_key(self) -> &'static str {
        match self {
            ContactField::Name => "contact.name",
            ContactField::Company => "contact.company",
            ContactField::Email => "contact.email",
            ContactField::Phone => "contact.phone",
            ContactField::ServiceInterest => "contact.service",
            ContactField::Message => "contact.message",
        }
    }
}

/// The body posted to `/api/contact`. Empty strings mean "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub service_interest: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Company => &self.company,
            ContactField::Email => &self.email,
            ContactField::Phone => &self.phone,
            ContactField::ServiceInterest => &self.service_interest,
            ContactField::Message => &self.message,
        }
    }

    fn slot(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::Name => &mut self.name,
            ContactField::Company => &mut self.company,
            ContactField::Email => &mut self.email,
            ContactField::Phone => &mut self.phone,
            ContactField::ServiceInterest => &mut self.service_interest,
            ContactField::Message => &mut self.message,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Anything that accepts a contact submission.
pub trait ContactEndpoint {
    fn submit_contact(&self, submission: &ContactSubmission) -> Result<(), ApiError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient message shown to the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

/// Queue of transient notifications, newest last.
#[derive(Debug, Clone, Default)]
pub struct Toaster {
    notifications: Vec<Notification>,
}

impl Toaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>) {
        self.notifications.push(Notification {
            kind,
            message: message.into(),
        });
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Remove and return everything queued so far.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn count(&self, kind: NotificationKind) -> usize {
        self.notifications.iter().filter(|n| n.kind == kind).count()
    }
}

/// Why a submission did not go out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitBlocked {
    InFlight,
    MissingRequired(Vec<ContactField>),
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Sent,
    Failed(ApiError),
    Blocked(SubmitBlocked),
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    fields: ContactSubmission,
    submitting: bool,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fields(fields: ContactSubmission) -> Self {
        Self {
            fields,
            submitting: false,
        }
    }

    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        *self.fields.slot(field) = value.into();
    }

    pub fn fields(&self) -> &ContactSubmission {
        &self.fields
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Required fields that are empty or whitespace only.
    pub fn missing_required(&self) -> Vec<ContactField> {
        ContactField::REQUIRED
            .into_iter()
            .filter(|f| self.fields.get(*f).trim().is_empty())
            .collect()
    }

    /// Label for the submit button in its current state.
    pub fn submit_label<'a>(&self, translations: &'a Translations, locale: Locale) -> &'a str {
        let key = if self.submitting {
            "contact.sending"
        } else {
            "contact.submit"
        };
        translations.resolve(locale, key)
    }

    /// Start a submission and return the snapshot to send.
    pub fn begin_submit(&mut self) -> Result<ContactSubmission, SubmitBlocked> {
        if self.submitting {
            return Err(SubmitBlocked::InFlight);
        }
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(SubmitBlocked::MissingRequired(missing));
        }
        self.submitting = true;
        Ok(self.fields.clone())
    }

    /// Record the result of the submission started by `begin_submit`.
    pub fn finish_submit(
        &mut self,
        result: Result<(), ApiError>,
        translations: &Translations,
        locale: Locale,
        toaster: &mut Toaster,
    ) -> SubmitOutcome {
        self.submitting = false;
        match result {
            Ok(()) => {
                toaster.push(
                    NotificationKind::Success,
                    translations.resolve(locale, "contact.success"),
                );
                self.fields = ContactSubmission::default();
                SubmitOutcome::Sent
            }
            Err(err) => {
                tracing::error!(%err, "error sending message");
                toaster.push(
                    NotificationKind::Error,
                    translations.resolve(locale, "contact.error"),
                );
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Send the form through `endpoint` once.
    pub fn submit(
        &mut self,
        endpoint: &dyn ContactEndpoint,
        translations: &Translations,
        locale: Locale,
        toaster: &mut Toaster,
    ) -> SubmitOutcome {
        let snapshot = match self.begin_submit() {
            Ok(snapshot) => snapshot,
            Err(blocked) => return SubmitOutcome::Blocked(blocked),
        };
        let result = endpoint.submit_contact(&snapshot);
        self.finish_submit(result, translations, locale, toaster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{RecordingEndpoint, filled_form};

    #[test]
    fn success_clears_fields_and_toasts_once() {
        let t = Translations::builtin();
        let endpoint = RecordingEndpoint::ok();
        let mut form = filled_form();
        let mut toaster = Toaster::new();

        let outcome = form.submit(&endpoint, &t, Locale::Es, &mut toaster);

        assert!(matches!(outcome, SubmitOutcome::Sent));
        assert!(form.fields().is_empty());
        assert!(!form.is_submitting());
        assert_eq!(toaster.notifications().len(), 1);
        assert_eq!(
            toaster.notifications()[0],
            Notification {
                kind: NotificationKind::Success,
                message: "Mensaje enviado correctamente".into(),
            }
        );
        assert_eq!(endpoint.calls(), 1);
    }

    #[test]
    fn failure_keeps_fields_and_toasts_error() {
        let t = Translations::builtin();
        let endpoint = RecordingEndpoint::status(500);
        let mut form = filled_form();
        let before = form.fields().clone();
        let mut toaster = Toaster::new();

        let outcome = form.submit(&endpoint, &t, Locale::En, &mut toaster);

        assert!(matches!(outcome, SubmitOutcome::Failed(ApiError::Status(500))));
        assert_eq!(form.fields(), &before);
        assert!(!form.is_submitting());
        assert_eq!(toaster.count(NotificationKind::Error), 1);
        assert_eq!(toaster.count(NotificationKind::Success), 0);
        assert_eq!(toaster.notifications()[0].message, "Error sending message");
    }

    #[test]
    fn failed_form_can_be_resubmitted() {
        let t = Translations::builtin();
        let mut form = filled_form();
        let mut toaster = Toaster::new();

        form.submit(&RecordingEndpoint::status(502), &t, Locale::Es, &mut toaster);
        let outcome = form.submit(&RecordingEndpoint::ok(), &t, Locale::Es, &mut toaster);

        assert!(matches!(outcome, SubmitOutcome::Sent));
        assert_eq!(toaster.count(NotificationKind::Error), 1);
        assert_eq!(toaster.count(NotificationKind::Success), 1);
    }

    #[test]
    fn missing_required_fields_send_nothing() {
        let t = Translations::builtin();
        let endpoint = RecordingEndpoint::ok();
        let mut form = ContactForm::new();
        form.set(ContactField::Email, "buyer@example.com");
        form.set(ContactField::Message, "   ");
        let mut toaster = Toaster::new();

        let outcome = form.submit(&endpoint, &t, Locale::Es, &mut toaster);

        match outcome {
            SubmitOutcome::Blocked(SubmitBlocked::MissingRequired(fields)) => {
                assert_eq!(fields, vec![ContactField::Name, ContactField::Message]);
            }
            other => panic!("expected missing fields, got {other:?}"),
        }
        assert_eq!(endpoint.calls(), 0);
        assert!(toaster.notifications().is_empty());
    }

    #[test]
    fn optional_fields_may_be_empty() {
        let mut form = ContactForm::new();
        form.set(ContactField::Name, "Ana");
        form.set(ContactField::Email, "not-an-email");
        form.set(ContactField::Message, "Hola");
        assert!(form.missing_required().is_empty());
    }

    #[test]
    fn second_begin_while_in_flight_is_refused() {
        let mut form = filled_form();
        let snapshot = form.begin_submit().unwrap();
        assert_eq!(&snapshot, form.fields());
        assert!(form.is_submitting());
        assert_eq!(form.begin_submit(), Err(SubmitBlocked::InFlight));
    }

    #[test]
    fn submit_label_tracks_in_flight_state() {
        let t = Translations::builtin();
        let mut form = filled_form();
        assert_eq!(form.submit_label(&t, Locale::En), "Send Message");
        form.begin_submit().unwrap();
        assert_eq!(form.submit_label(&t, Locale::En), "Sending...");

        let mut toaster = Toaster::new();
        form.finish_submit(Ok(()), &t, Locale::En, &mut toaster);
        assert_eq!(form.submit_label(&t, Locale::Es), "Enviar Mensaje");
    }

    #[test]
    fn endpoint_receives_all_six_fields() {
        let t = Translations::builtin();
        let endpoint = RecordingEndpoint::ok();
        let mut form = filled_form();
        let expected = form.fields().clone();
        form.submit(&endpoint, &t, Locale::Es, &mut Toaster::new());
        assert_eq!(endpoint.last(), Some(expected));
    }

    #[test]
    fn toaster_drain_empties_queue() {
        let mut toaster = Toaster::new();
        toaster.push(NotificationKind::Success, "ok");
        assert_eq!(toaster.drain().len(), 1);
        assert!(toaster.notifications().is_empty());
    }
}
