//! Contact form core: validation, sliding-window rate limiting, and
//! the provider fallback delivery chain. No rendering and no provider
//! glue live here; providers sit behind the `EmailProvider` seam.

pub mod form;
pub mod mailer;
pub mod rate_limit;
pub mod validate;

pub use form::{ContactForm, SubmissionOutcome};
pub use mailer::{DeliveryChain, DeliveryStage, EmailProvider, Message, SendError};
pub use rate_limit::RateLimiter;
pub use validate::{validate, FieldError};
