//! Event action codes from the MBO feed

use std::fmt;

/// What an incoming event does.
///
/// Only Add, Cancel, Modify, and Clear mutate a book directly; Trade and
/// Fill feed the trade/fill/cancel correlator, and None is a no-op.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Add,
    Cancel,
    Modify,
    Clear,
    Trade,
    Fill,
    #[default]
    None,
}

impl Action {
    /// Parse the wire character (`A`, `C`, `M`, `R`, `T`, `F`, `N`).
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(Action::Add),
            'C' => Some(Action::Cancel),
            'M' => Some(Action::Modify),
            'R' => Some(Action::Clear),
            'T' => Some(Action::Trade),
            'F' => Some(Action::Fill),
            'N' => Some(Action::None),
            _ => None,
        }
    }

    /// The wire character for this action.
    #[inline]
    pub fn as_char(self) -> char {
        match self {
            Action::Add => 'A',
            Action::Cancel => 'C',
            Action::Modify => 'M',
            Action::Clear => 'R',
            Action::Trade => 'T',
            Action::Fill => 'F',
            Action::None => 'N',
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Add => "Add",
            Action::Cancel => "Cancel",
            Action::Modify => "Modify",
            Action::Clear => "Clear",
            Action::Trade => "Trade",
            Action::Fill => "Fill",
            Action::None => "None",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_chars() {
        assert_eq!(Action::from_char('A'), Some(Action::Add));
        assert_eq!(Action::from_char('R'), Some(Action::Clear));
        assert_eq!(Action::from_char('Z'), None);
        assert_eq!(Action::Clear.as_char(), 'R');
        assert_eq!(Action::Trade.as_char(), 'T');
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Action::Modify), "Modify");
        assert_eq!(format!("{}", Action::None), "None");
    }
}
