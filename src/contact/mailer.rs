use thiserror::Error;
use tracing::warn;

/// A composed contact message, ready for a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum SendError {
    #[error("provider rejected the message: {0}")]
    Rejected(String),
    #[error("provider unreachable: {0}")]
    Unreachable(String),
}

/// External collaborator seam. Implementations own all provider glue;
/// the chain only sees success or failure.
pub trait EmailProvider {
    fn name(&self) -> &str;
    fn send(&self, message: &Message) -> Result<(), SendError>;
}

/// Where in the chain a message ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStage {
    Primary,
    Fallback,
    /// Both providers failed; the composed message was handed to the
    /// user's own mail client as a mailto link.
    MailClient { mailto: String },
}

pub struct DeliveryChain<P1, P2> {
    primary: P1,
    fallback: P2,
    /// Address the mailto handoff is composed against.
    contact_address: String,
}

impl<P1: EmailProvider, P2: EmailProvider> DeliveryChain<P1, P2> {
    pub fn new(primary: P1, fallback: P2, contact_address: impl Into<String>) -> Self {
        Self {
            primary,
            fallback,
            contact_address: contact_address.into(),
        }
    }

    /// Tries primary, then fallback, then composes the mailto handoff.
    /// Each stage's failure is logged and triggers the next; the final
    /// handoff leaves the user a manual path even with every provider
    /// down.
    pub fn deliver(&self, message: &Message) -> DeliveryStage {
        match self.primary.send(message) {
            Ok(()) => return DeliveryStage::Primary,
            Err(e) => warn!(provider = self.primary.name(), "primary send failed: {e}"),
        }
        match self.fallback.send(message) {
            Ok(()) => return DeliveryStage::Fallback,
            Err(e) => warn!(provider = self.fallback.name(), "fallback send failed: {e}"),
        }
        DeliveryStage::MailClient {
            mailto: compose_mailto(&self.contact_address, message),
        }
    }
}

/// Percent-encodes the subject and composed body into a mailto URL.
pub fn compose_mailto(address: &str, message: &Message) -> String {
    let body = format!(
        "Name: {}\nEmail: {}\n\nMessage:\n{}",
        message.name, message.email, message.body
    );
    format!(
        "mailto:{}?subject={}&body={}",
        address,
        urlencoding::encode(&message.subject),
        urlencoding::encode(&body)
    )
}
