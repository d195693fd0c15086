/*!
Flow state management for enrollment and login.

Every finish call walks the same progression. Transitions that skip a step
are reported as internal errors instead of being silently ignored.
*/

use std::fmt;

use crate::core::challenge::Purpose;
use crate::core::error::{Error, Result};

/// Progress of a single finish call
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FlowState {
    /// Response received, nothing checked yet
    Started,
    /// The challenge was consumed
    ChallengeConsumed,
    /// Both signatures verified
    Verified,
    /// Credential stored or identity authenticated
    Completed,
    /// The flow failed
    Rejected,
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowState::Started => write!(f, "Started"),
            FlowState::ChallengeConsumed => write!(f, "ChallengeConsumed"),
            FlowState::Verified => write!(f, "Verified"),
            FlowState::Completed => write!(f, "Completed"),
            FlowState::Rejected => write!(f, "Rejected"),
        }
    }
}

/// State machine for one enrollment or login attempt
#[derive(Debug, Clone, Copy)]
pub struct Flow {
    state: FlowState,
    purpose: Purpose,
}

impl Flow {
    /// Start a flow
    pub fn new(purpose: Purpose) -> Self {
        Self {
            state: FlowState::Started,
            purpose,
        }
    }

    /// Get the current state
    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Get the purpose
    pub fn purpose(&self) -> Purpose {
        self.purpose
    }

    /// Whether the flow has finished, successfully or not
    pub fn is_terminal(&self) -> bool {
        matches!(self.state, FlowState::Completed | FlowState::Rejected)
    }

    /// Record that the challenge was consumed
    pub fn transition_to_challenge_consumed(&mut self) -> Result<()> {
        self.advance(FlowState::Started, FlowState::ChallengeConsumed)
    }

    /// Record that both signatures verified
    pub fn transition_to_verified(&mut self) -> Result<()> {
        self.advance(FlowState::ChallengeConsumed, FlowState::Verified)
    }

    /// Record success
    pub fn transition_to_completed(&mut self) -> Result<()> {
        self.advance(FlowState::Verified, FlowState::Completed)
    }

    /// Record failure; a completed flow stays completed
    pub fn reject(&mut self) {
        if self.state != FlowState::Completed {
            self.state = FlowState::Rejected;
        }
    }

    fn advance(&mut self, from: FlowState, to: FlowState) -> Result<()> {
        if self.state != from {
            return Err(Error::Internal(format!(
                "{} flow cannot move from {} to {}",
                self.purpose, self.state, to
            )));
        }
        self.state = to;
        Ok(())
    }
}
