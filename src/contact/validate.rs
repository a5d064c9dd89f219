use super::mailer::Message;

/// A rejected field with its user-facing reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

fn err(field: &'static str, message: &'static str) -> FieldError {
    FieldError { field, message }
}

/// Runs every field rule and reports all failures at once.
pub fn validate(message: &Message) -> Vec<FieldError> {
    let mut errors = Vec::new();

    let name = message.name.trim();
    if name.is_empty() {
        errors.push(err("name", "Name is required"));
    } else if name.chars().count() < 2 {
        errors.push(err("name", "Name must be at least 2 characters"));
    } else if !name.chars().all(|c| c.is_alphabetic() || c == ' ') {
        errors.push(err("name", "Name should only contain letters and spaces"));
    }

    let email = message.email.trim();
    if email.is_empty() {
        errors.push(err("email", "Email is required"));
    } else if !is_plausible_email(email) {
        errors.push(err("email", "Please enter a valid email address"));
    }

    let subject = message.subject.trim();
    if subject.is_empty() {
        errors.push(err("subject", "Subject is required"));
    } else if subject.chars().count() < 5 {
        errors.push(err("subject", "Subject must be at least 5 characters"));
    }

    let body = message.body.trim();
    if body.is_empty() {
        errors.push(err("message", "Message is required"));
    } else if body.chars().count() < 10 {
        errors.push(err("message", "Message must be at least 10 characters"));
    } else if body.chars().count() > 1000 {
        errors.push(err("message", "Message must be less than 1000 characters"));
    }

    errors
}

/// Single '@' with a non-empty, dotted domain. Not an RFC parser.
fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.split('.').count() >= 2
        && domain.split('.').all(|segment| !segment.is_empty())
}
