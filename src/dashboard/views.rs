//! Role-gated dashboard views
//!
//! Selects the dashboard branch for an authenticated role. How each panel
//! renders is left to the charting, mapping and export front ends.

use std::fmt;

use crate::auth::Role;

/// A single dashboard feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    CsvUpload,
    IncidentBarCharts,
    IncidentMap,
    Clustering,
    Forecasting,
    Export,
}

impl Panel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Panel::CsvUpload => "csv_upload",
            Panel::IncidentBarCharts => "incident_bar_charts",
            Panel::IncidentMap => "incident_map",
            Panel::Clustering => "clustering",
            Panel::Forecasting => "forecasting",
            Panel::Export => "export",
        }
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const PUBLIC_PANELS: &[Panel] = &[Panel::CsvUpload, Panel::IncidentBarCharts];

const ANALYST_PANELS: &[Panel] = &[
    Panel::CsvUpload,
    Panel::IncidentBarCharts,
    Panel::IncidentMap,
    Panel::Clustering,
    Panel::Forecasting,
];

const LAW_ENFORCEMENT_PANELS: &[Panel] = &[
    Panel::CsvUpload,
    Panel::IncidentBarCharts,
    Panel::IncidentMap,
    Panel::Clustering,
    Panel::Forecasting,
    Panel::Export,
];

/// The dashboard branch a role renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardView {
    Public,
    Analyst,
    LawEnforcement,
}

impl DashboardView {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Public => DashboardView::Public,
            Role::Analyst => DashboardView::Analyst,
            Role::LawEnforcement => DashboardView::LawEnforcement,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DashboardView::Public => "Public dashboard",
            DashboardView::Analyst => "Analyst dashboard",
            DashboardView::LawEnforcement => "Law enforcement dashboard",
        }
    }

    pub fn panels(&self) -> &'static [Panel] {
        match self {
            DashboardView::Public => PUBLIC_PANELS,
            DashboardView::Analyst => ANALYST_PANELS,
            DashboardView::LawEnforcement => LAW_ENFORCEMENT_PANELS,
        }
    }

    pub fn allows(&self, panel: Panel) -> bool {
        self.panels().contains(&panel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_per_role() {
        assert_eq!(DashboardView::for_role(Role::Public), DashboardView::Public);
        assert_eq!(DashboardView::for_role(Role::Analyst), DashboardView::Analyst);
        assert_eq!(
            DashboardView::for_role(Role::LawEnforcement),
            DashboardView::LawEnforcement
        );
    }

    #[test]
    fn test_public_is_limited_to_charts() {
        let view = DashboardView::Public;
        assert!(view.allows(Panel::IncidentBarCharts));
        assert!(!view.allows(Panel::IncidentMap));
        assert!(!view.allows(Panel::Forecasting));
        assert!(!view.allows(Panel::Export));
    }

    #[test]
    fn test_export_is_law_enforcement_only() {
        assert!(!DashboardView::Analyst.allows(Panel::Export));
        assert!(DashboardView::LawEnforcement.allows(Panel::Export));
    }

    #[test]
    fn test_higher_roles_see_everything_lower_roles_see() {
        for panel in DashboardView::Public.panels() {
            assert!(DashboardView::Analyst.allows(*panel));
        }
        for panel in DashboardView::Analyst.panels() {
            assert!(DashboardView::LawEnforcement.allows(*panel));
        }
    }
}
