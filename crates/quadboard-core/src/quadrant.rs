use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four fixed zones of the urgency/importance matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Quadrant {
    UrgentImportant,
    NotUrgentImportant,
    UrgentNotImportant,
    NotUrgentNotImportant,
}

impl Quadrant {
    /// Board order: top-left, top-right, bottom-left, bottom-right.
    pub const ALL: &[Quadrant] = &[
        Quadrant::UrgentImportant,
        Quadrant::NotUrgentImportant,
        Quadrant::UrgentNotImportant,
        Quadrant::NotUrgentNotImportant,
    ];

    /// Where new notes land when nothing is hovered.
    pub const DEFAULT: Quadrant = Quadrant::UrgentImportant;

    pub fn as_str(&self) -> &'static str {
        match self {
            Quadrant::UrgentImportant => "urgent-important",
            Quadrant::NotUrgentImportant => "not-urgent-important",
            Quadrant::UrgentNotImportant => "urgent-not-important",
            Quadrant::NotUrgentNotImportant => "not-urgent-not-important",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Quadrant::UrgentImportant => "Urgent & Important",
            Quadrant::NotUrgentImportant => "Not Urgent & Important",
            Quadrant::UrgentNotImportant => "Urgent & Not Important",
            Quadrant::NotUrgentNotImportant => "Not Urgent & Not Important",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "urgent-important" => Some(Quadrant::UrgentImportant),
            "not-urgent-important" => Some(Quadrant::NotUrgentImportant),
            "urgent-not-important" => Some(Quadrant::UrgentNotImportant),
            "not-urgent-not-important" => Some(Quadrant::NotUrgentNotImportant),
            _ => None,
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
