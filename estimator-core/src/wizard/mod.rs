//! The six-step estimate wizard: steps, validation gate, room counts, the
//! step controller and the form store.

pub mod controller;
pub mod form;
pub mod rooms;
pub mod step;
pub mod validation;

pub use controller::{
    COMPLETED_INDEX, Direction, IndicatorPolicy, Position, Transition, WizardController,
};
pub use form::{EstimateForm, WizardDraft, WizardUpdate};
pub use rooms::{RoomCounts, RoomKind, summarize_rooms};
pub use step::Step;
pub use validation::{ValidationError, validate_all, validate_step};
