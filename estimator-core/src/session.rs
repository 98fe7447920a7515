//! One customer's pass through the estimator.
//!
//! [`EstimatorSession`] ties the step controller, the form store and the
//! active rate table together, and runs the two asynchronous moments of a
//! session: loading company pricing at the start and submitting the quote
//! at the end. It is driven through `&mut self`, so transitions and
//! submissions can never overlap.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::calculations::{RateTable, resolve_rates};
use crate::models::{CompanyContext, Confirmation, WizardState};
use crate::services::{PricingSource, QuoteGateway, load_rate_table};
use crate::submission::{SubmissionError, submit};
use crate::wizard::{
    EstimateForm, IndicatorPolicy, Step, Transition, WizardController, WizardDraft, WizardUpdate,
};

/// Tunables for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionOptions {
    pub indicator_policy: IndicatorPolicy,
    /// How long the confirmation stays up before the form resets.
    #[serde(with = "duration_secs")]
    pub ack_delay: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            indicator_policy: IndicatorPolicy::Free,
            ack_delay: Duration::from_secs(3),
        }
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        d: &Duration,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(d)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// Company pricing has not been loaded yet.
    LoadingPrices,
    Editing,
    /// The quote was accepted; waiting for the acknowledgement to elapse.
    Confirmed(Confirmation),
}

pub struct EstimatorSession {
    controller: WizardController,
    form: EstimateForm,
    context: Option<CompanyContext>,
    options: SessionOptions,
    status: SessionStatus,
    banner: Option<String>,
}

impl EstimatorSession {
    pub fn new(
        context: Option<CompanyContext>,
        options: SessionOptions,
    ) -> Self {
        let form = EstimateForm::new(context.as_ref(), RateTable::defaults());
        Self {
            controller: WizardController::new(options.indicator_policy),
            form,
            context,
            options,
            status: SessionStatus::LoadingPrices,
            banner: None,
        }
    }

    /// Picks up a saved draft at the first step.
    pub fn resume(
        draft: WizardDraft,
        context: Option<CompanyContext>,
        options: SessionOptions,
    ) -> Self {
        let mut session = Self::new(context, options);
        session.form = EstimateForm::restore(draft, RateTable::defaults());
        session
    }

    /// Loads pricing once and applies the company's own rates on top.
    pub async fn start(
        &mut self,
        source: &dyn PricingSource,
    ) -> RateTable {
        let aggregate = load_rate_table(source).await;
        let rates = resolve_rates(self.context.as_ref(), &aggregate);
        self.form.set_rates(rates);
        self.status = SessionStatus::Editing;
        debug!(?rates, "session rates resolved");
        rates
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == SessionStatus::LoadingPrices
    }

    pub fn state(&self) -> &WizardState {
        self.form.state()
    }

    pub fn form(&self) -> &EstimateForm {
        &self.form
    }

    pub fn controller(&self) -> &WizardController {
        &self.controller
    }

    pub fn current_step(&self) -> Option<Step> {
        self.controller.current_step()
    }

    pub fn company(&self) -> Option<&CompanyContext> {
        self.context.as_ref()
    }

    /// Last submission failure, until dismissed or superseded.
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    pub fn apply(
        &mut self,
        update: WizardUpdate,
    ) -> bool {
        self.form.apply(update)
    }

    pub fn advance(&mut self) -> Transition {
        self.controller.advance(self.form.state())
    }

    pub fn retreat(&mut self) -> Transition {
        self.controller.retreat()
    }

    pub fn jump_to(
        &mut self,
        target: Step,
    ) -> Transition {
        self.controller.jump_to(target, self.form.state())
    }

    /// Sends the quote after the Summary step was confirmed.
    ///
    /// Refused unless the controller has just completed and no earlier
    /// submission of this form succeeded. A failure keeps the state, stores
    /// the message as the banner and reopens the Summary step for a retry.
    pub async fn submit(
        &mut self,
        gateway: &dyn QuoteGateway,
    ) -> Result<Confirmation, SubmissionError> {
        if !self.controller.is_completed() || matches!(self.status, SessionStatus::Confirmed(_)) {
            return Err(SubmissionError::NotCompleted);
        }

        self.banner = None;
        match submit(gateway, self.form.state()).await {
            Ok(confirmation) => {
                self.status = SessionStatus::Confirmed(confirmation.clone());
                Ok(confirmation)
            }
            Err(e) => {
                self.banner = Some(e.to_string());
                self.controller.reopen();
                Err(e)
            }
        }
    }

    /// Waits out the acknowledgement delay after a confirmed submission and
    /// starts over with an empty form. No-op otherwise.
    pub async fn acknowledge(&mut self) {
        if !matches!(self.status, SessionStatus::Confirmed(_)) {
            return;
        }
        tokio::time::sleep(self.options.ack_delay).await;
        self.reset();
    }

    /// Clears the form and returns to the first step. Rates are kept.
    pub fn reset(&mut self) {
        self.form.reset();
        self.controller.reset();
        self.banner = None;
        if !self.is_loading() {
            self.status = SessionStatus::Editing;
        }
        info!("estimator reset");
    }

    pub fn draft(&self) -> WizardDraft {
        self.form.draft()
    }
}
