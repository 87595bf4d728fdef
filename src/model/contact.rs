use std::fmt::Display;

use phonenumber::PhoneNumber;
use serde::{de::Visitor, Deserialize, Deserializer, Serialize, Serializer};

/// A participant's contact phone number, used only to deliver their draw
/// result. Validated at the API boundary; the draw engine itself only ever
/// carries the formatted string.
#[derive(Debug, Clone)]
pub struct Contact {
    inner: PhoneNumber,
}

impl Serialize for Contact {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.inner.to_string())
    }
}

struct ContactVisitor;

impl Visitor<'_> for ContactVisitor {
    type Value = Contact;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(formatter, "a valid phone number string")
    }

    fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        s.parse::<PhoneNumber>()
            .map(|inner| Contact { inner })
            .map_err(|err| E::custom(err))
    }
}

impl<'de> Deserialize<'de> for Contact {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(ContactVisitor)
    }
}

impl Display for Contact {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        self.inner.fmt(formatter)
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl Contact {
        pub fn example() -> Self {
            Self {
                inner: "+447700900123".parse().unwrap(),
            }
        }

        pub fn example2() -> Self {
            Self {
                inner: "+447700900456".parse().unwrap(),
            }
        }
    }
}
