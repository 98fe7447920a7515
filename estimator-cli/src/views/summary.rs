use std::fmt::Write;

use estimator_core::calculations::format_indian_grouping;
use estimator_core::models::{Package, UserDetailField, WizardState};
use estimator_core::wizard::summarize_rooms;

/// `₹5,00,000`
pub fn format_rupees(amount: i64) -> String {
    format!("₹{}", format_indian_grouping(amount))
}

/// Menu label for a package with its cost at the entered area.
pub fn package_option_label(
    package: Package,
    cost: i64,
) -> String {
    if cost > 0 {
        format!("{:<8} {:>12}", package.as_str(), format_rupees(cost))
    } else {
        package.as_str().to_string()
    }
}

/// Package name followed by its feature list.
pub fn package_card(package: Package) -> String {
    let mut card = format!("{} package includes:", package.as_str());
    for feature in package.features() {
        card.push_str("\n  • ");
        card.push_str(feature);
    }
    card
}

/// The same area priced at every tier, on one line.
pub fn comparison_line(costs: &[(Package, i64)]) -> String {
    let tiers: Vec<String> = costs
        .iter()
        .map(|(package, cost)| format!("{} {}", package.as_str(), format_rupees(*cost)))
        .collect();
    format!("Compare: {}", tiers.join(" │ "))
}

/// `Bedroom × 2` per kind, in kind order.
pub fn room_lines<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    summarize_rooms(labels)
        .into_iter()
        .map(|(kind, count)| format!("{kind} × {count}"))
        .collect()
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() { "-" } else { value }
}

/// The review shown on the last step.
pub fn summary_text(state: &WizardState) -> String {
    let mut out = String::new();

    if let Some(company) = &state.company_name {
        let _ = writeln!(out, "Quote for {company}");
        out.push('\n');
    }

    let scope = state.scope.map(|s| s.label()).unwrap_or("-");
    let home_type = state
        .home_type
        .map(|h| h.to_string())
        .unwrap_or_else(|| "-".to_string());
    let package = state.package.map(|p| p.as_str()).unwrap_or("-");
    let area = if state.carpet_area.trim().is_empty() {
        "-".to_string()
    } else {
        format!("{} sq. ft.", state.carpet_area.trim())
    };

    let _ = writeln!(out, "{:<13}{scope}", "Scope:");
    let _ = writeln!(out, "{:<13}{home_type}", "Home type:");
    let _ = writeln!(out, "{:<13}{area}", "Carpet area:");

    let rooms = room_lines(&state.rooms);
    if rooms.is_empty() {
        let _ = writeln!(out, "{:<13}-", "Rooms:");
    } else {
        let _ = writeln!(out, "{:<13}{}", "Rooms:", rooms.join(", "));
    }
    let _ = writeln!(out, "{:<13}{package}", "Package:");

    out.push('\n');
    for field in UserDetailField::ALL {
        let label = format!("{}:", field.label());
        let _ = writeln!(out, "{label:<13}{}", or_dash(state.user_details.get(field)));
    }

    out.push('\n');
    let _ = write!(out, "Estimated cost: {}", format_rupees(state.estimated_cost));
    out
}

#[cfg(test)]
mod tests {
    use estimator_core::models::{HomeType, Scope, UserDetails};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn rupees_use_indian_grouping() {
        assert_eq!(format_rupees(1_500_000), "₹15,00,000");
        assert_eq!(format_rupees(0), "₹0");
    }

    #[test]
    fn option_label_omits_zero_cost() {
        assert_eq!(package_option_label(Package::Luxury, 0), "Luxury");
        assert_eq!(
            package_option_label(Package::Basic, 150_000),
            "Basic       ₹1,50,000"
        );
    }

    #[test]
    fn card_lists_every_feature() {
        let card = package_card(Package::Premium);

        assert!(card.starts_with("Premium package includes:"));
        assert_eq!(card.lines().count(), 1 + Package::Premium.features().len());
    }

    #[test]
    fn comparison_lists_all_tiers() {
        let costs = [
            (Package::Basic, 150_000),
            (Package::Premium, 500_000),
            (Package::Luxury, 1_500_000),
        ];

        assert_eq!(
            comparison_line(&costs),
            "Compare: Basic ₹1,50,000 │ Premium ₹5,00,000 │ Luxury ₹15,00,000"
        );
    }

    #[test]
    fn rooms_are_grouped_by_kind() {
        let labels = ["Living Room", "Kitchen", "Bedroom 1", "Bedroom 2"];

        assert_eq!(
            room_lines(&labels),
            vec!["Living Room × 1", "Kitchen × 1", "Bedroom × 2"]
        );
    }

    #[test]
    fn summary_shows_every_answer() {
        let state = WizardState {
            scope: Some(Scope::NewDesign),
            home_type: Some(HomeType::Bhk(3)),
            carpet_area: " 1200 ".to_string(),
            rooms: vec!["Kitchen".to_string(), "Dining".to_string()],
            package: Some(Package::Luxury),
            user_details: UserDetails {
                name: "Meera".to_string(),
                email: "meera@example.com".to_string(),
                phone: "9123456780".to_string(),
                city: String::new(),
            },
            estimated_cost: 1_800_000,
            company_id: Some("c4".to_string()),
            company_name: Some("Urban Nest".to_string()),
        };

        let text = summary_text(&state);

        assert!(text.starts_with("Quote for Urban Nest\n"));
        assert!(text.contains("Scope:       New Home Design\n"));
        assert!(text.contains("Home type:   3 BHK\n"));
        assert!(text.contains("Carpet area: 1200 sq. ft.\n"));
        assert!(text.contains("Rooms:       Kitchen × 1, Dining × 1\n"));
        assert!(text.contains("City:        -\n"));
        assert!(text.ends_with("Estimated cost: ₹18,00,000"));
    }

    #[test]
    fn empty_summary_uses_dashes() {
        let text = summary_text(&WizardState::default());

        assert!(!text.contains("Quote for"));
        assert!(text.contains("Package:     -\n"));
        assert!(text.ends_with("Estimated cost: ₹0"));
    }
}
