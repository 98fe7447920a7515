//! The wizard's step machine.
//!
//! The controller owns only the position; the form record lives in
//! [`super::EstimateForm`] and is passed in by reference whenever a
//! transition needs to consult the validation gate.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Step;
use super::validation::{ValidationError, validate_step};
use crate::models::WizardState;

/// Index reported once the last step has been completed.
pub const COMPLETED_INDEX: u8 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    At(Step),
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// What a click on the step indicator is allowed to do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorPolicy {
    /// Jump anywhere without consulting the gate.
    #[default]
    Free,
    /// Forward jumps require every step before the target to pass.
    Gated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Moved { from: Step, to: Step },
    /// The gate refused; the position is unchanged.
    Blocked(ValidationError),
    /// Summary was confirmed. The caller submits the quote.
    Completed,
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct WizardController {
    position: Position,
    direction: Direction,
    policy: IndicatorPolicy,
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new(IndicatorPolicy::default())
    }
}

impl WizardController {
    pub fn new(policy: IndicatorPolicy) -> Self {
        Self {
            position: Position::At(Step::FIRST),
            direction: Direction::Forward,
            policy,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn current_step(&self) -> Option<Step> {
        match self.position {
            Position::At(step) => Some(step),
            Position::Completed => None,
        }
    }

    /// One-based step index, or [`COMPLETED_INDEX`].
    pub fn index(&self) -> u8 {
        self.current_step().map_or(COMPLETED_INDEX, Step::index)
    }

    pub fn is_completed(&self) -> bool {
        self.position == Position::Completed
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn policy(&self) -> IndicatorPolicy {
        self.policy
    }

    /// "Continue": gate the current step, then move forward.
    pub fn advance(
        &mut self,
        state: &WizardState,
    ) -> Transition {
        let Position::At(current) = self.position else {
            return Transition::Unchanged;
        };

        if let Err(err) = validate_step(current, state) {
            debug!(step = %current, error = %err, "advance blocked");
            return Transition::Blocked(err);
        }

        self.direction = Direction::Forward;
        match current.next() {
            Some(next) => self.move_to(current, next),
            None => {
                debug!("wizard completed");
                self.position = Position::Completed;
                Transition::Completed
            }
        }
    }

    /// "Back": never gated.
    pub fn retreat(&mut self) -> Transition {
        let Position::At(current) = self.position else {
            return Transition::Unchanged;
        };
        match current.previous() {
            Some(previous) => {
                self.direction = Direction::Backward;
                self.move_to(current, previous)
            }
            None => Transition::Unchanged,
        }
    }

    /// Step indicator click.
    pub fn jump_to(
        &mut self,
        target: Step,
        state: &WizardState,
    ) -> Transition {
        let Position::At(current) = self.position else {
            return Transition::Unchanged;
        };
        if target == current {
            return Transition::Unchanged;
        }

        if target > current && self.policy == IndicatorPolicy::Gated {
            let blocked = Step::ALL
                .into_iter()
                .take_while(|step| *step < target)
                .find_map(|step| validate_step(step, state).err());
            if let Some(err) = blocked {
                debug!(target = %target, error = %err, "indicator jump blocked");
                return Transition::Blocked(err);
            }
        }

        self.direction = if target > current {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.move_to(current, target)
    }

    /// Returns from the completed position to Summary so a failed
    /// submission can be retried. `false` when not completed.
    pub fn reopen(&mut self) -> bool {
        if !self.is_completed() {
            return false;
        }
        self.position = Position::At(Step::LAST);
        self.direction = Direction::Backward;
        true
    }

    /// Back to the first step, keeping the policy.
    pub fn reset(&mut self) {
        *self = Self::new(self.policy);
    }

    fn move_to(
        &mut self,
        from: Step,
        to: Step,
    ) -> Transition {
        self.position = Position::At(to);
        Transition::Moved { from, to }
    }
}
