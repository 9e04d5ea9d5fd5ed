use std::fmt::Display;
use std::hash::Hash;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};

use crate::error::GenomicArrayError;

/// Orientation of a feature or an aligned read.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, PartialOrd, Ord, Default)]
pub enum Strand {
    /// Plus (forward) strand.
    Plus,
    /// Minus (reverse) strand.
    Minus,
    /// No strand information.
    #[default]
    Unstranded,
}

impl Strand {
    /// Returns the opposite strand. `Unstranded` stays unstranded.
    pub fn flip(self) -> Self {
        match self {
            Strand::Plus => Strand::Minus,
            Strand::Minus => Strand::Plus,
            Strand::Unstranded => Strand::Unstranded,
        }
    }

    pub fn is_minus(&self) -> bool {
        matches!(self, Strand::Minus)
    }
}

impl FromStr for Strand {
    type Err = GenomicArrayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Plus),
            "-" => Ok(Strand::Minus),
            "." => Ok(Strand::Unstranded),
            other => {
                Err(GenomicArrayError::invalid(format!(
                    "strand code '{}' is not one of '+', '-', '.'",
                    other
                )))
            },
        }
    }
}

impl TryFrom<char> for Strand {
    type Error = GenomicArrayError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        let mut buf = [0u8; 4];
        Strand::from_str(value.encode_utf8(&mut buf))
    }
}

impl From<Strand> for Option<bool> {
    fn from(value: Strand) -> Option<bool> {
        match value {
            Strand::Plus => Some(true),
            Strand::Minus => Some(false),
            Strand::Unstranded => None,
        }
    }
}

impl From<Option<bool>> for Strand {
    fn from(value: Option<bool>) -> Strand {
        match value {
            Some(true) => Strand::Plus,
            Some(false) => Strand::Minus,
            None => Strand::Unstranded,
        }
    }
}

impl From<Strand> for char {
    fn from(value: Strand) -> Self {
        match value {
            Strand::Plus => '+',
            Strand::Minus => '-',
            Strand::Unstranded => '.',
        }
    }
}

impl From<bio::bio_types::strand::Strand> for Strand {
    fn from(value: bio::bio_types::strand::Strand) -> Self {
        match value {
            bio::bio_types::strand::Strand::Forward => Strand::Plus,
            bio::bio_types::strand::Strand::Reverse => Strand::Minus,
            bio::bio_types::strand::Strand::Unknown => Strand::Unstranded,
        }
    }
}

impl Display for Strand {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}

impl Serialize for Strand {
    fn serialize<S>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer, {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Strand {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>, {
        let s = String::deserialize(deserializer)?;
        Strand::from_str(&s).map_err(serde::de::Error::custom)
    }
}
