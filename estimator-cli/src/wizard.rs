//! Drives an [`EstimatorSession`] from the terminal.
//!
//! Each step first collects its own input, then offers the navigation menu
//! (continue, back, jump, save, quit). Esc inside a step skips straight to
//! navigation. Confirming the Summary step submits the quote.

use anyhow::Result;
use estimator_core::EstimatorSession;
use estimator_core::calculations::package_comparison;
use estimator_core::models::{HomeType, Package, Scope, UserDetailField};
use estimator_core::services::QuoteGateway;
use estimator_core::wizard::{RoomCounts, RoomKind, Step, Transition, WizardDraft, WizardUpdate};
use tracing::{info, warn};

use crate::prompter::Prompter;
use crate::views::{
    build_status_bar, comparison_line, hints, package_card, package_option_label, progress_label,
    step_indicator, summary_text,
};

/// How a wizard run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Quit { submitted: usize },
    /// The user left mid-way and asked to keep their answers.
    SavedDraft { draft: WizardDraft, submitted: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NavAction {
    Continue,
    Back,
    Jump,
    SaveDraft,
    Quit,
}

impl NavAction {
    fn label(
        self,
        step: Step,
    ) -> &'static str {
        match self {
            Self::Continue if step == Step::LAST => "Submit quote",
            Self::Continue => "Continue",
            Self::Back => "Back",
            Self::Jump => "Go to step…",
            Self::SaveDraft => "Save draft and quit",
            Self::Quit => "Quit",
        }
    }

    fn available(step: Step) -> Vec<NavAction> {
        let mut actions = vec![Self::Continue];
        if step != Step::FIRST {
            actions.push(Self::Back);
        }
        actions.extend([Self::Jump, Self::SaveDraft, Self::Quit]);
        actions
    }
}

pub struct WizardDriver<'a, P: Prompter> {
    prompter: &'a mut P,
    gateway: &'a dyn QuoteGateway,
    submitted: usize,
}

impl<'a, P: Prompter> WizardDriver<'a, P> {
    pub fn new(
        prompter: &'a mut P,
        gateway: &'a dyn QuoteGateway,
    ) -> Self {
        Self {
            prompter,
            gateway,
            submitted: 0,
        }
    }

    /// Runs until the user quits. The session must already be started.
    pub async fn run(
        mut self,
        session: &mut EstimatorSession,
    ) -> Result<Outcome> {
        loop {
            let Some(step) = session.current_step() else {
                if !self.submit(session).await? {
                    return Ok(Outcome::Quit {
                        submitted: self.submitted,
                    });
                }
                continue;
            };

            self.render_header(session, step);
            self.edit_step(session, step)?;

            let actions = NavAction::available(step);
            let labels: Vec<String> = actions.iter().map(|a| a.label(step).to_string()).collect();
            self.prompter.show(&build_status_bar(&hints::NAVIGATION));
            let action = match self.prompter.select("What next?", &labels, 0)? {
                Some(index) => actions[index],
                None if step == Step::FIRST => continue,
                None => NavAction::Back,
            };

            match action {
                NavAction::Continue => self.report(session.advance()),
                NavAction::Back => self.report(session.retreat()),
                NavAction::Jump => {
                    if let Some(target) = self.pick_step(step)? {
                        self.report(session.jump_to(target));
                    }
                }
                NavAction::SaveDraft => {
                    return Ok(Outcome::SavedDraft {
                        draft: session.draft(),
                        submitted: self.submitted,
                    });
                }
                NavAction::Quit => {
                    return Ok(Outcome::Quit {
                        submitted: self.submitted,
                    });
                }
            }
        }
    }

    fn render_header(
        &mut self,
        session: &EstimatorSession,
        step: Step,
    ) {
        self.prompter.show("");
        self.prompter.show(&step_indicator(session.controller()));
        self.prompter.show(&progress_label(step));
        if let Some(banner) = session.banner() {
            self.prompter.show(&format!("⚠ {banner}"));
        }
    }

    fn report(
        &mut self,
        transition: Transition,
    ) {
        match transition {
            Transition::Blocked(err) => self.prompter.show(&format!("⚠ {err}")),
            Transition::Unchanged => self.prompter.show("Already there."),
            Transition::Moved { .. } | Transition::Completed => {}
        }
    }

    fn pick_step(
        &mut self,
        current: Step,
    ) -> Result<Option<Step>> {
        let labels: Vec<String> = Step::ALL.iter().map(Step::to_string).collect();
        let choice = self
            .prompter
            .select("Go to step", &labels, usize::from(current.index() - 1))?;
        Ok(choice.map(|index| Step::ALL[index]))
    }

    fn edit_step(
        &mut self,
        session: &mut EstimatorSession,
        step: Step,
    ) -> Result<()> {
        self.prompter.show(&build_status_bar(&hints::STEP));
        match step {
            Step::Scope => self.edit_scope(session),
            Step::HomeType => self.edit_home_type(session),
            Step::RoomSelection => self.edit_rooms(session),
            Step::PackageSelection => self.edit_package(session),
            Step::UserDetails => self.edit_user_details(session),
            Step::Summary => {
                let state = session.state();
                self.prompter.show(&summary_text(state));
                let costs = package_comparison(&state.carpet_area, session.form().rates());
                self.prompter.show(&comparison_line(&costs));
                Ok(())
            }
        }
    }

    fn edit_scope(
        &mut self,
        session: &mut EstimatorSession,
    ) -> Result<()> {
        let labels: Vec<String> = Scope::ALL.iter().map(|s| s.label().to_string()).collect();
        let current = session
            .state()
            .scope
            .and_then(|s| Scope::ALL.iter().position(|x| *x == s))
            .unwrap_or(0);
        if let Some(index) = self
            .prompter
            .select("What would you like to do?", &labels, current)?
        {
            session.apply(WizardUpdate::SetScope(Scope::ALL[index]));
        }
        Ok(())
    }

    fn edit_home_type(
        &mut self,
        session: &mut EstimatorSession,
    ) -> Result<()> {
        let choices: Vec<HomeType> = HomeType::STANDARD
            .into_iter()
            .chain(HomeType::OTHER)
            .collect();
        let labels: Vec<String> = choices.iter().map(HomeType::to_string).collect();
        let current = session
            .state()
            .home_type
            .and_then(|h| choices.iter().position(|x| *x == h))
            .unwrap_or(0);

        let Some(index) = self.prompter.select("Home type", &labels, current)? else {
            return Ok(());
        };
        session.apply(WizardUpdate::SetHomeType(choices[index]));

        let area = self
            .prompter
            .input("Carpet area (sq. ft.)", &session.state().carpet_area)?;
        session.apply(WizardUpdate::SetCarpetArea(area.trim().to_string()));
        Ok(())
    }

    fn edit_rooms(
        &mut self,
        session: &mut EstimatorSession,
    ) -> Result<()> {
        loop {
            let counts = *session.form().room_counts();
            let limits = RoomCounts::limits_for(session.state().home_type);
            let mut labels: Vec<String> = RoomKind::ALL
                .iter()
                .map(|kind| {
                    let count = counts.get(*kind);
                    match *kind {
                        RoomKind::Bedroom => format!("{kind}: {count} (max {})", limits.bedrooms),
                        RoomKind::Bathroom => format!("{kind}: {count} (max {})", limits.bathrooms),
                        _ => format!("{kind}: {count}"),
                    }
                })
                .collect();
            labels.push("Done".to_string());

            let Some(index) = self.prompter.select("Rooms to design", &labels, 0)? else {
                return Ok(());
            };
            let Some(kind) = RoomKind::ALL.get(index).copied() else {
                return Ok(());
            };

            let changes = ["Add one".to_string(), "Remove one".to_string()];
            match self.prompter.select(kind.name(), &changes, 0)? {
                Some(0) => {
                    if !session.apply(WizardUpdate::IncrementRoom(kind)) {
                        self.prompter
                            .show(&format!("{kind} is already at the maximum for this home."));
                    }
                }
                Some(_) => {
                    if !session.apply(WizardUpdate::DecrementRoom(kind)) {
                        self.prompter.show(&format!("No {kind} left to remove."));
                    }
                }
                None => {}
            }
        }
    }

    fn edit_package(
        &mut self,
        session: &mut EstimatorSession,
    ) -> Result<()> {
        let costs = package_comparison(&session.state().carpet_area, session.form().rates());
        let labels: Vec<String> = costs
            .iter()
            .map(|(package, cost)| package_option_label(*package, *cost))
            .collect();
        let current = session
            .state()
            .package
            .and_then(|p| Package::ALL.iter().position(|x| *x == p))
            .unwrap_or(0);

        if let Some(index) = self.prompter.select("Package", &labels, current)? {
            let package = costs[index].0;
            session.apply(WizardUpdate::SetPackage(package));
            self.prompter.show(&package_card(package));
        }
        Ok(())
    }

    fn edit_user_details(
        &mut self,
        session: &mut EstimatorSession,
    ) -> Result<()> {
        for field in UserDetailField::ALL {
            let current = session.state().user_details.get(field).to_string();
            let value = self.prompter.input(field.label(), &current)?;
            session.apply(WizardUpdate::SetUserDetail(field, value.trim().to_string()));
        }
        Ok(())
    }

    /// Submits the completed wizard. Returns `false` when the user chose to
    /// stop after a successful submission.
    async fn submit(
        &mut self,
        session: &mut EstimatorSession,
    ) -> Result<bool> {
        self.prompter.show("Submitting your quote…");
        match session.submit(self.gateway).await {
            Ok(confirmation) => {
                self.submitted += 1;
                info!(submitted = self.submitted, "quote submitted");
                self.prompter.show(&format!("✓ {}", confirmation.message));
                session.acknowledge().await;

                let again = ["Start a new estimate".to_string(), "Quit".to_string()];
                Ok(self.prompter.select("Anything else?", &again, 0)? == Some(0))
            }
            Err(e) => {
                // The session keeps the message as its banner and reopens Summary.
                warn!(error = %e, retryable = e.is_retryable(), "quote submission failed");
                Ok(true)
            }
        }
    }
}
