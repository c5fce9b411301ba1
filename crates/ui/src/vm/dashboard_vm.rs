use chrono::NaiveDate;
use prep_core::model::{ProgressMap, UserSettings};
use prep_core::{Catalog, PaceStats, PaceStatus};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhaseBarVm {
    pub title: String,
    pub done: usize,
    pub total: usize,
    pub percent: u32,
    pub accent: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardVm {
    pub name: String,
    pub target_date: String,
    pub days_left: i64,
    pub pace_label: String,
    pub pace_status: PaceStatus,
    pub mastered: usize,
    pub overall_percent: u32,
    pub phases: Vec<PhaseBarVm>,
}

impl DashboardVm {
    #[must_use]
    pub fn status_class(&self) -> &'static str {
        self.pace_status.css_class()
    }
}

/// Bar colour per phase, keyed on the phase position.
fn phase_accent(index: usize) -> &'static str {
    match index {
        1 => "bar--cyan",
        3 => "bar--purple",
        _ => "bar--orange",
    }
}

#[must_use]
pub fn map_dashboard(
    user: &UserSettings,
    catalog: &Catalog,
    progress: &ProgressMap,
    today: NaiveDate,
) -> DashboardVm {
    let pace = PaceStats::compute(user.target_date(), today);
    let curriculum = catalog.curriculum();
    let phases = curriculum
        .phase_progress(progress)
        .into_iter()
        .enumerate()
        .map(|(index, phase)| PhaseBarVm {
            title: phase.title,
            done: phase.done,
            total: phase.total,
            percent: phase.percent,
            accent: phase_accent(index),
        })
        .collect();

    DashboardVm {
        name: user.name().to_string(),
        target_date: user.target_date().format("%Y-%m-%d").to_string(),
        days_left: pace.days_left(),
        pace_label: pace.units_per_day_label(),
        pace_status: pace.status(),
        mastered: progress.completed_count(),
        overall_percent: curriculum.overall_percent(progress),
        phases,
    }
}
