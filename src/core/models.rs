use serde::{Deserialize, Serialize};

/// Equipment types the benchmark tracker groups results by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipmentType {
    Treadmill,
    Strider,
    Rower,
    Bike,
    WeightFloor,
    PowerWalker,
}

impl EquipmentType {
    pub const ALL: &'static [EquipmentType] = &[
        EquipmentType::Treadmill,
        EquipmentType::Strider,
        EquipmentType::Rower,
        EquipmentType::Bike,
        EquipmentType::WeightFloor,
        EquipmentType::PowerWalker,
    ];

    #[must_use]
    pub fn id(self) -> u32 {
        match self {
            EquipmentType::Treadmill => 2,
            EquipmentType::Strider => 3,
            EquipmentType::Rower => 4,
            EquipmentType::Bike => 5,
            EquipmentType::WeightFloor => 6,
            EquipmentType::PowerWalker => 7,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            EquipmentType::Treadmill => "Treadmill",
            EquipmentType::Strider => "Strider",
            EquipmentType::Rower => "Rower",
            EquipmentType::Bike => "Bike",
            EquipmentType::WeightFloor => "WeightFloor",
            EquipmentType::PowerWalker => "PowerWalker",
        }
    }
}

/// Challenge categories the benchmark tracker groups results by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengeCategory {
    Other,
    DriTri,
    MarathonMonth,
    HellWeek,
    Mayhem,
    TwelveDaysOfFitness,
    Transformation,
    RemixInSix,
    Push,
    BackAtIt,
}

impl ChallengeCategory {
    pub const ALL: &'static [ChallengeCategory] = &[
        ChallengeCategory::Other,
        ChallengeCategory::DriTri,
        ChallengeCategory::MarathonMonth,
        ChallengeCategory::HellWeek,
        ChallengeCategory::Mayhem,
        ChallengeCategory::TwelveDaysOfFitness,
        ChallengeCategory::Transformation,
        ChallengeCategory::RemixInSix,
        ChallengeCategory::Push,
        ChallengeCategory::BackAtIt,
    ];

    #[must_use]
    pub fn id(self) -> u32 {
        match self {
            ChallengeCategory::Other => 0,
            ChallengeCategory::DriTri => 2,
            ChallengeCategory::MarathonMonth => 5,
            ChallengeCategory::HellWeek => 52,
            ChallengeCategory::Mayhem => 58,
            ChallengeCategory::TwelveDaysOfFitness => 63,
            ChallengeCategory::Transformation => 64,
            ChallengeCategory::RemixInSix => 65,
            ChallengeCategory::Push => 66,
            ChallengeCategory::BackAtIt => 84,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ChallengeCategory::Other => "Other",
            ChallengeCategory::DriTri => "DriTri",
            ChallengeCategory::MarathonMonth => "MarathonMonth",
            ChallengeCategory::HellWeek => "HellWeek",
            ChallengeCategory::Mayhem => "Mayhem",
            ChallengeCategory::TwelveDaysOfFitness => "TwelveDaysOfFitness",
            ChallengeCategory::Transformation => "Transformation",
            ChallengeCategory::RemixInSix => "RemixInSix",
            ChallengeCategory::Push => "Push",
            ChallengeCategory::BackAtIt => "BackAtIt",
        }
    }
}

/// Time window for lifetime statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatsWindow {
    AllTime,
    ThisYear,
    ThisMonth,
    ThisWeek,
    LastYear,
    LastMonth,
    LastWeek,
}

impl StatsWindow {
    /// Path segment the stats endpoint expects.
    #[must_use]
    pub fn as_path(self) -> &'static str {
        match self {
            StatsWindow::AllTime => "allTime",
            StatsWindow::ThisYear => "thisYear",
            StatsWindow::ThisMonth => "thisMonth",
            StatsWindow::ThisWeek => "thisWeek",
            StatsWindow::LastYear => "lastYear",
            StatsWindow::LastMonth => "lastMonth",
            StatsWindow::LastWeek => "lastWeek",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}
