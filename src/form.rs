//! Contact form rules and the simulated submission round trip.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::time::Duration;

const NAME_MIN_CHARS: usize = 2;
const MESSAGE_MIN_CHARS: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
    Privacy,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Email,
        Field::Subject,
        Field::Message,
        Field::Privacy,
    ];

    /// The input's `name` attribute.
    pub fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
            Self::Privacy => "privacy",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Subject => "Subject",
            Self::Message => "Message",
            Self::Privacy => "Privacy",
        }
    }

    pub fn required(self) -> bool {
        !matches!(self, Self::Subject)
    }

    pub fn error_id(self) -> String {
        format!("{}-error", self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Checked(bool),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldError {
    Required(Field),
    InvalidEmail,
    NameTooShort,
    MessageTooShort,
    PrivacyNotAccepted,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required(field) => write!(f, "{} is required", field.label()),
            Self::InvalidEmail => f.write_str("Please enter a valid email address"),
            Self::NameTooShort => write!(f, "Name must be at least {NAME_MIN_CHARS} characters long"),
            Self::MessageTooShort => {
                write!(f, "Message must be at least {MESSAGE_MIN_CHARS} characters long")
            }
            Self::PrivacyNotAccepted => {
                f.write_str("You must agree to the Privacy Policy and Terms of Service")
            }
        }
    }
}

/// `local@domain.tld`: no whitespace, exactly one `@`, and a `.` inside the
/// domain with text on both sides of it.
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(index, c)| c == '.' && index > 0 && index + 1 < domain.len())
}

pub fn validate_field(field: Field, value: FieldValue<'_>) -> Result<(), FieldError> {
    let text = match value {
        FieldValue::Checked(checked) => {
            return if field == Field::Privacy && !checked {
                Err(FieldError::PrivacyNotAccepted)
            } else {
                Ok(())
            };
        }
        FieldValue::Text(raw) => raw.trim(),
    };

    if text.is_empty() {
        return if field.required() {
            Err(FieldError::Required(field))
        } else {
            Ok(())
        };
    }

    match field {
        Field::Email if !is_valid_email(text) => Err(FieldError::InvalidEmail),
        Field::Name if text.chars().count() < NAME_MIN_CHARS => Err(FieldError::NameTooShort),
        Field::Message if text.chars().count() < MESSAGE_MIN_CHARS => Err(FieldError::MessageTooShort),
        _ => Ok(()),
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub privacy: bool,
}

impl ContactDraft {
    pub fn value(&self, field: Field) -> FieldValue<'_> {
        match field {
            Field::Name => FieldValue::Text(&self.name),
            Field::Email => FieldValue::Text(&self.email),
            Field::Subject => FieldValue::Text(&self.subject),
            Field::Message => FieldValue::Text(&self.message),
            Field::Privacy => FieldValue::Checked(self.privacy),
        }
    }

    fn set(&mut self, field: Field, input: FieldInput) {
        match (field, input) {
            (Field::Privacy, FieldInput::Checked(checked)) => self.privacy = checked,
            (Field::Name, FieldInput::Text(text)) => self.name = text,
            (Field::Email, FieldInput::Text(text)) => self.email = text,
            (Field::Subject, FieldInput::Text(text)) => self.subject = text,
            (Field::Message, FieldInput::Text(text)) => self.message = text,
            _ => {}
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldInput {
    Text(String),
    Checked(bool),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitError {
    Undelivered,
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undelivered => f.write_str("Your message could not be sent. Please try again."),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Sending,
    Delivered,
    Failed(SubmitError),
}

impl SubmitPhase {
    pub fn is_sending(&self) -> bool {
        matches!(self, Self::Sending)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormAction {
    Input(Field, FieldInput),
    Blur(Field),
    Submit,
    Phase(SubmitPhase),
}

/// Everything the contact form renders from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormModel {
    pub draft: ContactDraft,
    pub errors: BTreeMap<Field, FieldError>,
    pub phase: SubmitPhase,
}

impl FormModel {
    pub fn apply(mut self, action: FormAction) -> Self {
        match action {
            FormAction::Input(field, input) => {
                self.draft.set(field, input);
                self.errors.remove(&field);
            }
            FormAction::Blur(field) => self.check(field),
            FormAction::Submit => {
                if self.phase.is_sending() {
                    return self;
                }
                for field in Field::ALL {
                    self.check(field);
                }
                if self.errors.is_empty() {
                    self.phase = SubmitPhase::Sending;
                }
            }
            FormAction::Phase(phase) => {
                if phase == SubmitPhase::Delivered {
                    self.draft = ContactDraft::default();
                    self.errors.clear();
                }
                self.phase = phase;
            }
        }
        self
    }

    pub fn error(&self, field: Field) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    fn check(&mut self, field: Field) {
        match validate_field(field, self.draft.value(field)) {
            Ok(()) => {
                self.errors.remove(&field);
            }
            Err(error) => {
                self.errors.insert(field, error);
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmitTimings {
    pub delivery: Duration,
    pub status_hide: Duration,
}

/// Stand-in for the network round trip: always succeeds after `delay`.
pub async fn simulate_delivery<W, Fut>(wait: &mut W, delay: Duration) -> Result<(), SubmitError>
where
    W: FnMut(Duration) -> Fut,
    Fut: Future<Output = ()>,
{
    wait(delay).await;
    Ok(())
}

/// Runs the phases after a valid submit: delivery, then the status panel, then
/// back to idle once the panel has been shown for `status_hide`.
pub async fn run_submission<W, Fut, P>(timings: SubmitTimings, mut wait: W, mut on_phase: P)
where
    W: FnMut(Duration) -> Fut,
    Fut: Future<Output = ()>,
    P: FnMut(SubmitPhase),
{
    let phase = match simulate_delivery(&mut wait, timings.delivery).await {
        Ok(()) => SubmitPhase::Delivered,
        Err(error) => SubmitPhase::Failed(error),
    };
    on_phase(phase);

    wait(timings.status_hide).await;
    on_phase(SubmitPhase::Idle);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, Instant};

    fn text(field: Field, value: &str) -> FormAction {
        FormAction::Input(field, FieldInput::Text(value.to_string()))
    }

    fn filled() -> FormModel {
        [
            text(Field::Name, "Ada"),
            text(Field::Email, "ada@example.com"),
            text(Field::Message, "Hello there, nice portfolio."),
            FormAction::Input(Field::Privacy, FieldInput::Checked(true)),
        ]
        .into_iter()
        .fold(FormModel::default(), FormModel::apply)
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("a@@b.co"));
        assert!(!is_valid_email("a@b.c@d.co"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@.co"));
        assert!(!is_valid_email("a@b."));
    }

    #[test]
    fn required_fields_reject_blank_input() {
        assert_eq!(
            validate_field(Field::Email, FieldValue::Text("   ")),
            Err(FieldError::Required(Field::Email))
        );
        assert_eq!(
            validate_field(Field::Email, FieldValue::Text("a@b")),
            Err(FieldError::InvalidEmail)
        );
        assert_eq!(validate_field(Field::Subject, FieldValue::Text("")), Ok(()));
        assert_eq!(
            FieldError::Required(Field::Name).to_string(),
            "Name is required"
        );
    }

    #[test]
    fn length_rules_count_trimmed_characters() {
        assert_eq!(
            validate_field(Field::Name, FieldValue::Text(" A ")),
            Err(FieldError::NameTooShort)
        );
        assert_eq!(validate_field(Field::Name, FieldValue::Text("Al")), Ok(()));
        assert_eq!(
            validate_field(Field::Message, FieldValue::Text("  too short ")),
            Err(FieldError::MessageTooShort)
        );
        assert_eq!(validate_field(Field::Message, FieldValue::Text("éééééééééé")), Ok(()));
        assert_eq!(
            FieldError::MessageTooShort.to_string(),
            "Message must be at least 10 characters long"
        );
    }

    #[test]
    fn privacy_must_be_checked() {
        assert_eq!(
            validate_field(Field::Privacy, FieldValue::Checked(false)),
            Err(FieldError::PrivacyNotAccepted)
        );
        assert_eq!(validate_field(Field::Privacy, FieldValue::Checked(true)), Ok(()));
    }

    #[test]
    fn blur_sets_error_and_input_clears_it() {
        let model = FormModel::default()
            .apply(text(Field::Name, "A"))
            .apply(FormAction::Blur(Field::Name));
        assert_eq!(model.error(Field::Name), Some(&FieldError::NameTooShort));
        assert_eq!(model.error(Field::Email), None, "blur only checks one field");

        let model = model.apply(text(Field::Name, "Ab"));
        assert_eq!(model.error(Field::Name), None);
    }

    #[test]
    fn invalid_submit_reports_every_failing_field_and_stays_idle() {
        let model = FormModel::default().apply(FormAction::Submit);

        assert_eq!(model.phase, SubmitPhase::Idle);
        assert_eq!(
            model.errors.keys().copied().collect::<Vec<_>>(),
            vec![Field::Name, Field::Email, Field::Message, Field::Privacy]
        );
    }

    #[test]
    fn valid_submit_sends_then_delivery_clears_form() {
        let model = filled().apply(FormAction::Submit);
        assert_eq!(model.phase, SubmitPhase::Sending);
        assert!(model.errors.is_empty());

        let resubmitted = model.clone().apply(FormAction::Submit);
        assert_eq!(resubmitted, model, "submit is ignored while sending");

        let model = model.apply(FormAction::Phase(SubmitPhase::Delivered));
        assert_eq!(model.draft, ContactDraft::default());
        assert_eq!(model.phase, SubmitPhase::Delivered);
    }

    #[test]
    fn failed_delivery_keeps_the_draft() {
        let model = filled()
            .apply(FormAction::Submit)
            .apply(FormAction::Phase(SubmitPhase::Failed(SubmitError::Undelivered)));

        assert_eq!(model.draft.name, "Ada");
        assert_eq!(
            model.phase,
            SubmitPhase::Failed(SubmitError::Undelivered)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn submission_shows_status_then_hides_it() {
        let started = Instant::now();
        let mut phases = Vec::new();

        run_submission(
            SubmitTimings {
                delivery: Duration::from_millis(2_000),
                status_hide: Duration::from_secs(5),
            },
            sleep,
            |phase| phases.push((started.elapsed().as_millis(), phase)),
        )
        .await;

        assert_eq!(
            phases,
            vec![(2_000, SubmitPhase::Delivered), (7_000, SubmitPhase::Idle)]
        );
    }
}
