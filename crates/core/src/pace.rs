use chrono::NaiveDate;

/// Study units still to cover before the target date.
pub const REMAINING_UNITS: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaceStatus {
    SuicideMission,
    Aggressive,
    Comfortable,
}

impl PaceStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::SuicideMission => "Suicide Mission",
            Self::Aggressive => "Aggressive",
            Self::Comfortable => "Comfortable",
        }
    }

    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::SuicideMission => "pace--danger",
            Self::Aggressive => "pace--warn",
            Self::Comfortable => "pace--ok",
        }
    }
}

/// Daily workload needed to reach the target date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaceStats {
    days_left: i64,
    units_per_day: f64,
    status: PaceStatus,
}

impl PaceStats {
    /// Computes pace from the absolute day distance, never dividing by less
    /// than one day.
    #[must_use]
    pub fn compute(target: NaiveDate, today: NaiveDate) -> Self {
        let days_left = (target - today).num_days().abs();
        #[allow(clippy::cast_precision_loss)]
        let units_per_day = REMAINING_UNITS / days_left.max(1) as f64;
        let status = if units_per_day > 3.0 {
            PaceStatus::SuicideMission
        } else if units_per_day > 1.5 {
            PaceStatus::Aggressive
        } else {
            PaceStatus::Comfortable
        };
        Self {
            days_left,
            units_per_day,
            status,
        }
    }

    #[must_use]
    pub fn days_left(&self) -> i64 {
        self.days_left
    }

    #[must_use]
    pub fn units_per_day(&self) -> f64 {
        self.units_per_day
    }

    #[must_use]
    pub fn status(&self) -> PaceStatus {
        self.status
    }

    /// One decimal place, e.g. `"2.0"`.
    #[must_use]
    pub fn units_per_day_label(&self) -> String {
        format!("{:.1}", self.units_per_day)
    }
}
