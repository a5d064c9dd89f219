use crate::clock::Clock;
use crate::storage::KeyValueStore;

use super::mailer::{DeliveryChain, DeliveryStage, EmailProvider, Message};
use super::rate_limit::RateLimiter;
use super::validate::{validate, FieldError};

/// Outcome of a submission attempt, in evaluation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Invalid(Vec<FieldError>),
    /// Too many submissions in the current window; the suggested action
    /// is to retry once the window has moved on.
    RateLimited,
    Delivered(DeliveryStage),
}

/// Validation, then the rate-limit check, then the delivery chain.
/// Accepted submissions are recorded against the window. The
/// mail-client handoff counts as delivered so the user keeps a manual
/// path.
pub struct ContactForm<S: KeyValueStore, C: Clock, P1, P2> {
    limiter: RateLimiter<S>,
    chain: DeliveryChain<P1, P2>,
    clock: C,
}

impl<S, C, P1, P2> ContactForm<S, C, P1, P2>
where
    S: KeyValueStore,
    C: Clock,
    P1: EmailProvider,
    P2: EmailProvider,
{
    pub fn new(limiter: RateLimiter<S>, chain: DeliveryChain<P1, P2>, clock: C) -> Self {
        Self {
            limiter,
            chain,
            clock,
        }
    }

    pub fn submit(&mut self, message: &Message) -> SubmissionOutcome {
        let errors = validate(message);
        if !errors.is_empty() {
            return SubmissionOutcome::Invalid(errors);
        }

        if !self.limiter.allow(self.clock.now_ms()) {
            return SubmissionOutcome::RateLimited;
        }

        let stage = self.chain.deliver(message);
        self.limiter.record(self.clock.now_ms());
        SubmissionOutcome::Delivered(stage)
    }
}
