use crate::errors::AppError;
use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;

/// Admin screens reachable from the CLI and the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Screen {
    BudgetTypes,
    MaterialTypes,
    Materials,
    Facilities,
    Courses,
}

impl Screen {
    pub const ALL: [Screen; 5] = [
        Screen::BudgetTypes,
        Screen::MaterialTypes,
        Screen::Materials,
        Screen::Facilities,
        Screen::Courses,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::BudgetTypes => "budget-types",
            Screen::MaterialTypes => "material-types",
            Screen::Materials => "materials",
            Screen::Facilities => "facilities",
            Screen::Courses => "courses",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::BudgetTypes => "Budget types",
            Screen::MaterialTypes => "Material types",
            Screen::Materials => "Materials",
            Screen::Facilities => "Facilities",
            Screen::Courses => "Courses",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Screen {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Screen::ALL
            .into_iter()
            .find(|screen| screen.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::UnknownScreen(s.to_string()))
    }
}
