//! Which datasets a deployment gathers, and which of them get flattened.

use crate::core::models::StatsWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    Workouts,
    Classes,
    Bookings,
    LifetimeStats(StatsWindow),
    PerformanceSummaries,
    EquipmentBenchmarks,
    ChallengeBenchmarks,
    NearbyStudios,
    HomeStudio,
    StudioServices,
    FavoriteStudios,
}

impl DatasetKind {
    /// Only record sequences with class-like records can be flattened.
    #[must_use]
    pub fn supports_flatten(self) -> bool {
        matches!(
            self,
            DatasetKind::Classes | DatasetKind::Bookings | DatasetKind::PerformanceSummaries
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSpec {
    /// Key under which the dataset appears in the response body.
    pub key: &'static str,
    pub kind: DatasetKind,
    pub flatten: bool,
}

impl DatasetSpec {
    #[must_use]
    pub const fn raw(key: &'static str, kind: DatasetKind) -> Self {
        Self {
            key,
            kind,
            flatten: false,
        }
    }

    #[must_use]
    pub const fn flattened(key: &'static str, kind: DatasetKind) -> Self {
        Self {
            key,
            kind,
            flatten: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerProfile {
    pub name: &'static str,
    pub datasets: Vec<DatasetSpec>,
}

impl HandlerProfile {
    /// Workouts, all-time stats, classes and bookings, returned as-is.
    #[must_use]
    pub fn basic() -> Self {
        Self {
            name: "basic",
            datasets: vec![
                DatasetSpec::raw("workouts", DatasetKind::Workouts),
                DatasetSpec::raw("stats", DatasetKind::LifetimeStats(StatsWindow::AllTime)),
                DatasetSpec::raw("classes", DatasetKind::Classes),
                DatasetSpec::raw("bookings", DatasetKind::Bookings),
            ],
        }
    }

    /// Everything the dashboard shows, with class-like datasets flattened.
    #[must_use]
    pub fn full() -> Self {
        Self {
            name: "full",
            datasets: vec![
                DatasetSpec::flattened("classes", DatasetKind::Classes),
                DatasetSpec::flattened("bookings", DatasetKind::Bookings),
                DatasetSpec::raw("equipment_benchmarks", DatasetKind::EquipmentBenchmarks),
                DatasetSpec::raw("challenge_benchmarks", DatasetKind::ChallengeBenchmarks),
                DatasetSpec::raw(
                    "stats_all_time",
                    DatasetKind::LifetimeStats(StatsWindow::AllTime),
                ),
                DatasetSpec::raw(
                    "stats_this_month",
                    DatasetKind::LifetimeStats(StatsWindow::ThisMonth),
                ),
                DatasetSpec::flattened("performance_summaries", DatasetKind::PerformanceSummaries),
                DatasetSpec::raw("nearby_studios", DatasetKind::NearbyStudios),
                DatasetSpec::raw("home_studio", DatasetKind::HomeStudio),
                DatasetSpec::raw("studio_services", DatasetKind::StudioServices),
                DatasetSpec::raw("favorite_studios", DatasetKind::FavoriteStudios),
            ],
        }
    }

    #[must_use]
    pub fn by_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "basic" => Some(Self::basic()),
            "full" => Some(Self::full()),
            _ => None,
        }
    }

    /// Dataset keys in gather order.
    #[must_use]
    pub fn keys(&self) -> Vec<&'static str> {
        self.datasets.iter().map(|d| d.key).collect()
    }
}

impl Default for HandlerProfile {
    fn default() -> Self {
        Self::full()
    }
}
