/// Closed device-category enumeration with an `Other` catch-all.
///
/// `Other` doubles as the "no browser matched" default, so every
/// classification carries a defined category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Category {
    GameConsole,
    #[default]
    Other,
    Pda,
    PersonalComputer,
    Smartphone,
    SmartTv,
    Tablet,
    WearableComputer,
}

impl Category {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "game console" | "game_console" => Some(Self::GameConsole),
            "other" => Some(Self::Other),
            "pda" => Some(Self::Pda),
            "personal computer" | "personal_computer" => Some(Self::PersonalComputer),
            "smartphone" => Some(Self::Smartphone),
            "smart tv" | "smart_tv" => Some(Self::SmartTv),
            "tablet" => Some(Self::Tablet),
            "wearable computer" | "wearable_computer" => Some(Self::WearableComputer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GameConsole => "game console",
            Self::Other => "other",
            Self::Pda => "pda",
            Self::PersonalComputer => "personal computer",
            Self::Smartphone => "smartphone",
            Self::SmartTv => "smart tv",
            Self::Tablet => "tablet",
            Self::WearableComputer => "wearable computer",
        }
    }
}
