use std::{fmt, str::FromStr};

/// Ames neighborhood codes offered by the form, in selector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Neighborhood {
    CollgCr,
    Veenker,
    Crawfor,
    NoRidge,
    Mitchel,
    Somerst,
    NWAmes,
    OldTown,
    BrkSide,
    Sawyer,
    NridgHt,
    NAmes,
    SawyerW,
    IDOTRR,
    MeadowV,
    Edwards,
    Timber,
    Gilbert,
    StoneBr,
    ClearCr,
    NPkVill,
    Blmngtn,
    BrDale,
    SWISU,
    Blueste,
}

impl Neighborhood {
    pub const ALL: [Neighborhood; 25] = [
        Self::CollgCr,
        Self::Veenker,
        Self::Crawfor,
        Self::NoRidge,
        Self::Mitchel,
        Self::Somerst,
        Self::NWAmes,
        Self::OldTown,
        Self::BrkSide,
        Self::Sawyer,
        Self::NridgHt,
        Self::NAmes,
        Self::SawyerW,
        Self::IDOTRR,
        Self::MeadowV,
        Self::Edwards,
        Self::Timber,
        Self::Gilbert,
        Self::StoneBr,
        Self::ClearCr,
        Self::NPkVill,
        Self::Blmngtn,
        Self::BrDale,
        Self::SWISU,
        Self::Blueste,
    ];

    /// The dataset code, as the model was trained on it.
    pub fn code(self) -> &'static str {
        match self {
            Self::CollgCr => "CollgCr",
            Self::Veenker => "Veenker",
            Self::Crawfor => "Crawfor",
            Self::NoRidge => "NoRidge",
            Self::Mitchel => "Mitchel",
            Self::Somerst => "Somerst",
            Self::NWAmes => "NWAmes",
            Self::OldTown => "OldTown",
            Self::BrkSide => "BrkSide",
            Self::Sawyer => "Sawyer",
            Self::NridgHt => "NridgHt",
            Self::NAmes => "NAmes",
            Self::SawyerW => "SawyerW",
            Self::IDOTRR => "IDOTRR",
            Self::MeadowV => "MeadowV",
            Self::Edwards => "Edwards",
            Self::Timber => "Timber",
            Self::Gilbert => "Gilbert",
            Self::StoneBr => "StoneBr",
            Self::ClearCr => "ClearCr",
            Self::NPkVill => "NPkVill",
            Self::Blmngtn => "Blmngtn",
            Self::BrDale => "BrDale",
            Self::SWISU => "SWISU",
            Self::Blueste => "Blueste",
        }
    }

    /// Position of this code in [`Neighborhood::ALL`].
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|n| *n == self)
            .unwrap_or_default()
    }

    /// The next code in selector order, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// The previous code in selector order, wrapping around.
    pub fn prev(self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.index() + len - 1) % len]
    }
}

impl Default for Neighborhood {
    fn default() -> Self {
        Self::ALL[0]
    }
}

impl fmt::Display for Neighborhood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Neighborhood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|n| n.code() == s)
            .ok_or_else(|| format!("unknown neighborhood: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_code_is_initial_selection() {
        assert_eq!(Neighborhood::default(), Neighborhood::CollgCr);
    }

    #[test]
    fn codes_are_unique_and_parse_back() {
        for (i, n) in Neighborhood::ALL.iter().enumerate() {
            assert_eq!(n.index(), i);
            assert_eq!(n.code().parse::<Neighborhood>().unwrap(), *n);
        }
        assert!("Nowhere".parse::<Neighborhood>().is_err());
    }

    #[test]
    fn cycling_wraps() {
        assert_eq!(Neighborhood::Blueste.next(), Neighborhood::CollgCr);
        assert_eq!(Neighborhood::CollgCr.prev(), Neighborhood::Blueste);
        assert_eq!(Neighborhood::NridgHt.next(), Neighborhood::NAmes);
    }
}
