use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ParseVisibilityError;

macro_rules! text_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

text_newtype!(ApiKey);
text_newtype!(ProgramHash);

/// Whether an input value is disclosed to downstream processing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Private,
    Public,
}

impl Visibility {
    pub const ALL: [Visibility; 2] = [Visibility::Private, Visibility::Public];

    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::Public => "public",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Visibility::Private => "Private",
            Visibility::Public => "Public",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = ParseVisibilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "private" => Ok(Visibility::Private),
            "public" => Ok(Visibility::Public),
            other => Err(ParseVisibilityError(other.to_string())),
        }
    }
}

/// One argument of a task, submitted in the order the user entered it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEntry {
    pub visibility: Visibility,
    pub value: String,
}

impl InputEntry {
    pub fn new(visibility: Visibility, value: impl Into<String>) -> Self {
        Self {
            visibility,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_parses_wire_names_only() {
        assert_eq!("private".parse::<Visibility>().unwrap(), Visibility::Private);
        assert_eq!("public".parse::<Visibility>().unwrap(), Visibility::Public);
        assert!("Public".parse::<Visibility>().is_err());
        assert!("".parse::<Visibility>().is_err());
    }

    #[test]
    fn default_input_entry_is_private_and_empty() {
        assert_eq!(
            InputEntry::default(),
            InputEntry::new(Visibility::Private, "")
        );
    }

    #[test]
    fn text_newtypes_serialize_as_plain_strings() {
        let hash = ProgramHash::from("0xabc");
        assert_eq!(serde_json::to_string(&hash).unwrap(), "\"0xabc\"");
        assert!(ApiKey::default().is_empty());
    }
}
