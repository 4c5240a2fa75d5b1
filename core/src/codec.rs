//! Wire-string codec shared by the API's small enumerations.
//!
//! # Design
//! The API names things differently from this crate (`"wind"` is the Earth
//! attribute, `"manauser"` is the Soul Weaver role). Each enumeration declares
//! a single variant/token table through `wire_enum!`; rendering, parsing and
//! the serde impls are all derived from that table, so the two directions
//! cannot drift apart. A token outside the table is rejected with an
//! `UnrecognizedValue` tagged with the enumeration's `ValueKind`.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer};
use serde::Serializer;
use thiserror::Error;

use crate::error::Error;

/// Which enumeration a wire token was parsed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Attribute,
    Role,
    Stat,
    Topic,
    CalculatedState,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Attribute => "attribute",
            ValueKind::Role => "role",
            ValueKind::Stat => "stat",
            ValueKind::Topic => "topic",
            ValueKind::CalculatedState => "calculated state",
        };
        f.write_str(name)
    }
}

/// A wire token that is not in the enumeration's table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized {kind}: {token:?}")]
pub struct UnrecognizedValue {
    pub kind: ValueKind,
    pub token: String,
}

/// An enumeration with a fixed, bidirectional wire vocabulary.
///
/// Implemented by `wire_enum!`; `as_str` is generated as an exhaustive match
/// and `TABLE` lists the same pairs, one per variant.
pub trait WireEnum: Copy + Eq + Sized + 'static {
    const KIND: ValueKind;
    const TABLE: &'static [(Self, &'static str)];

    /// The wire token for this variant.
    fn as_str(self) -> &'static str;

    /// Look a wire token up in the table.
    fn from_wire(token: &str) -> Result<Self, UnrecognizedValue> {
        Self::TABLE
            .iter()
            .find(|(_, wire)| *wire == token)
            .map(|(value, _)| *value)
            .ok_or_else(|| UnrecognizedValue {
                kind: Self::KIND,
                token: token.to_string(),
            })
    }

    /// Render as a bare JSON string literal, e.g. `"wind"`.
    fn to_json(self) -> String {
        serde_json::Value::from(self.as_str()).to_string()
    }

    /// Parse a quoted JSON string. Malformed JSON is a `Decode` error; a
    /// well-formed string outside the table is `UnrecognizedValue`.
    fn from_json(bytes: &[u8]) -> Result<Self, Error> {
        let token: String = serde_json::from_slice(bytes).map_err(Error::Decode)?;
        Ok(Self::from_wire(&token)?)
    }
}

pub(crate) fn serialize<T: WireEnum, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.as_str())
}

pub(crate) fn deserialize<'de, T: WireEnum, D: Deserializer<'de>>(deserializer: D) -> Result<T, D::Error> {
    let token = String::deserialize(deserializer)?;
    T::from_wire(&token).map_err(de::Error::custom)
}

/// Declare a `#[repr(u8)]` enum together with its wire table.
///
/// ```ignore
/// wire_enum! {
///     pub enum Role: Role {
///         Warrior => "warrior",
///         Thief => "assassin",
///     }
/// }
/// ```
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $kind:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $token:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u8)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $crate::codec::WireEnum for $name {
            const KIND: $crate::codec::ValueKind = $crate::codec::ValueKind::$kind;
            const TABLE: &'static [(Self, &'static str)] = &[ $( ($name::$variant, $token), )+ ];

            fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $token, )+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::codec::WireEnum::as_str(*self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::codec::UnrecognizedValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as $crate::codec::WireEnum>::from_wire(s)
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                $crate::codec::serialize(self, serializer)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                $crate::codec::deserialize(deserializer)
            }
        }
    };
}

pub(crate) use wire_enum;
