use std::fmt;

/// Maturity level of a project, mapped from the numeric code in its index document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectLevel {
    /// Code "1": listed but not yet rated; renders as an empty cell
    Unrated,
    /// Code "2"
    Incubator,
    /// Code "3"
    Lab,
    /// Code "3.5"
    Production,
    /// Code "4"
    Flagship,
}

impl ProjectLevel {
    /// Maps a level code to a level; unknown codes yield `None`
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Self::Unrated),
            "2" => Some(Self::Incubator),
            "3" => Some(Self::Lab),
            "3.5" => Some(Self::Production),
            "4" => Some(Self::Flagship),
            _ => None,
        }
    }

    /// Report label for this level
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unrated => "",
            Self::Incubator => "Incubator",
            Self::Lab => "Lab",
            Self::Production => "Production",
            Self::Flagship => "Flagship",
        }
    }
}

impl fmt::Display for ProjectLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
