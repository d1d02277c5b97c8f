// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use eval_cycle_domain::DomainError;

/// Errors that can occur during wizard state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// A step number outside the range 1..=5 was supplied.
    InvalidStepNumber(u8),
    /// A jump targeted a step outside the editable range 1..=4.
    InvalidJumpTarget(u8),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::InvalidStepNumber(number) => {
                write!(f, "Invalid step number: {number}. Must be between 1 and 5")
            }
            Self::InvalidJumpTarget(number) => {
                write!(f, "Invalid jump target: {number}. Must be between 1 and 4")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
