use estimator_core::wizard::{Step, WizardController};

/// One-line progress marker: finished steps are ticked, the current one is
/// bracketed with its title.
///
/// ```text
/// ✓1 › ✓2 › [3. Rooms] › 4 › 5 › 6
/// ```
pub fn step_indicator(controller: &WizardController) -> String {
    let current = controller.current_step();
    Step::ALL
        .iter()
        .map(|step| match current {
            Some(at) if *step == at => format!("[{step}]"),
            Some(at) if *step > at => step.index().to_string(),
            _ => format!("✓{}", step.index()),
        })
        .collect::<Vec<_>>()
        .join(" › ")
}

/// `Step 3 of 6: Rooms`
pub fn progress_label(step: Step) -> String {
    format!("Step {} of {}: {}", step.index(), Step::ALL.len(), step.title())
}
