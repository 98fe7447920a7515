use serde::{Deserialize, Serialize};

use super::rooms::{RoomCounts, RoomKind};
use crate::calculations::{RateTable, derive_cost_from_input};
use crate::models::{CompanyContext, HomeType, Package, Scope, UserDetailField, WizardState};

/// A single edit made by a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardUpdate {
    SetScope(Scope),
    SetHomeType(HomeType),
    SetCarpetArea(String),
    IncrementRoom(RoomKind),
    DecrementRoom(RoomKind),
    SetPackage(Package),
    SetUserDetail(UserDetailField, String),
}

/// Owner of the [`WizardState`].
///
/// Steps read the state through [`EstimateForm::state`] and change it only
/// by sending a [`WizardUpdate`] to [`EstimateForm::apply`]. The estimated
/// cost is re-derived whenever the carpet area, the package or the rate
/// table changes.
#[derive(Debug, Clone)]
pub struct EstimateForm {
    state: WizardState,
    rooms: RoomCounts,
    rates: RateTable,
    company: Option<(String, String)>,
}

impl EstimateForm {
    pub fn new(
        context: Option<&CompanyContext>,
        rates: RateTable,
    ) -> Self {
        let mut form = Self {
            state: WizardState::for_company(context),
            rooms: RoomCounts::default(),
            rates,
            company: context.map(|c| (c.company_id.clone(), c.company_name.clone())),
        };
        form.state.rooms = form.rooms.labels();
        form
    }

    /// Resumes from a saved draft. The stored cost is discarded and derived
    /// again from the current rates.
    pub fn restore(
        draft: WizardDraft,
        rates: RateTable,
    ) -> Self {
        let company = draft
            .state
            .company_id
            .clone()
            .zip(draft.state.company_name.clone());
        let mut rooms = draft
            .room_counts
            .unwrap_or_else(|| RoomCounts::from_labels(&draft.state.rooms));
        rooms.clamp_to(RoomCounts::limits_for(draft.state.home_type));
        let mut form = Self {
            state: draft.state,
            rooms,
            rates,
            company,
        };
        form.state.rooms = form.rooms.labels();
        form.recompute_cost();
        form
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn room_counts(&self) -> &RoomCounts {
        &self.rooms
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Applies an update. Returns `false` when it changed nothing (a room
    /// counter already at its bound).
    pub fn apply(
        &mut self,
        update: WizardUpdate,
    ) -> bool {
        match update {
            WizardUpdate::SetScope(scope) => self.state.scope = Some(scope),
            WizardUpdate::SetHomeType(home_type) => {
                self.state.home_type = Some(home_type);
                self.rooms.apply_home_type(home_type);
                self.state.rooms = self.rooms.labels();
            }
            WizardUpdate::SetCarpetArea(area) => {
                self.state.carpet_area = area;
                self.recompute_cost();
            }
            WizardUpdate::IncrementRoom(kind) => {
                let limits = RoomCounts::limits_for(self.state.home_type);
                if !self.rooms.increment(kind, limits) {
                    return false;
                }
                self.state.rooms = self.rooms.labels();
            }
            WizardUpdate::DecrementRoom(kind) => {
                if !self.rooms.decrement(kind) {
                    return false;
                }
                self.state.rooms = self.rooms.labels();
            }
            WizardUpdate::SetPackage(package) => {
                self.state.package = Some(package);
                self.recompute_cost();
            }
            WizardUpdate::SetUserDetail(field, value) => self.state.user_details.set(field, value),
        }
        true
    }

    pub fn set_rates(
        &mut self,
        rates: RateTable,
    ) {
        self.rates = rates;
        self.recompute_cost();
    }

    /// Back to an empty form, keeping the company the wizard was opened
    /// from and the current rates.
    pub fn reset(&mut self) {
        self.state = WizardState {
            company_id: self.company.as_ref().map(|(id, _)| id.clone()),
            company_name: self.company.as_ref().map(|(_, name)| name.clone()),
            ..Default::default()
        };
        self.rooms = RoomCounts::default();
        self.state.rooms = self.rooms.labels();
    }

    pub fn draft(&self) -> WizardDraft {
        WizardDraft {
            state: self.state.clone(),
            room_counts: Some(self.rooms),
        }
    }

    fn recompute_cost(&mut self) {
        self.state.estimated_cost =
            derive_cost_from_input(&self.state.carpet_area, self.state.package, &self.rates);
    }
}

/// Serializable snapshot of an unfinished wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardDraft {
    #[serde(flatten)]
    pub state: WizardState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_counts: Option<RoomCounts>,
}
