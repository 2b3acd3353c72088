//! Skills held by employees and required by spots.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Name under which the wildcard skill is written in imported data.
pub const WILDCARD_SKILL_NAME: &str = "any";

/// A qualification.
///
/// `Wildcard` is the distinguished "any" skill: a spot requiring it accepts
/// every employee, and every employee is considered to hold it.
///
/// # Example
///
/// ```
/// use roster_core::domain::Skill;
///
/// assert_eq!("any".parse::<Skill>().unwrap(), Skill::Wildcard);
/// assert_eq!("Night".parse::<Skill>().unwrap(), Skill::named("Night"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Skill {
    Named(String),
    Wildcard,
}

impl Skill {
    pub fn named(name: impl Into<String>) -> Self {
        Skill::Named(name.into())
    }

    pub fn name(&self) -> &str {
        match self {
            Skill::Named(name) => name,
            Skill::Wildcard => WILDCARD_SKILL_NAME,
        }
    }

    #[inline]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Skill::Wildcard)
    }
}

impl FromStr for Skill {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name == WILDCARD_SKILL_NAME {
            Ok(Skill::Wildcard)
        } else {
            Ok(Skill::named(name))
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
