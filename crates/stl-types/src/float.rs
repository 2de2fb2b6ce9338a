//! Serde codec for metrics that may be non-finite.
//!
//! JSON has no NaN or infinity, and `serde_json` writes them as `null`,
//! which then fails to read back as `f64`. Fields using this codec write
//! finite values as plain numbers and non-finite ones as the strings
//! `"NaN"`, `"Infinity"` and `"-Infinity"`. A `null` reads back as NaN.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

const NAN: &str = "NaN";
const INFINITY: &str = "Infinity";
const NEG_INFINITY: &str = "-Infinity";

/// An `f64` whose serialized form survives NaN and infinity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lenient(pub f64);

impl Serialize for Lenient {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let v = self.0;
        if v.is_nan() {
            serializer.serialize_str(NAN)
        } else if v == f64::INFINITY {
            serializer.serialize_str(INFINITY)
        } else if v == f64::NEG_INFINITY {
            serializer.serialize_str(NEG_INFINITY)
        } else {
            serializer.serialize_f64(v)
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Repr {
    Number(f64),
    Text(String),
    Null,
}

impl<'de> Deserialize<'de> for Lenient {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(v) => Ok(Lenient(v)),
            Repr::Null => Ok(Lenient(f64::NAN)),
            Repr::Text(s) => match s.as_str() {
                NAN => Ok(Lenient(f64::NAN)),
                INFINITY => Ok(Lenient(f64::INFINITY)),
                NEG_INFINITY => Ok(Lenient(f64::NEG_INFINITY)),
                other => Err(serde::de::Error::custom(format!(
                    "expected a number, \"NaN\" or \"Infinity\", found {:?}",
                    other
                ))),
            },
        }
    }
}

/// `#[serde(with = "...")]` adapter for a single `f64`.
pub mod scalar {
    use super::*;

    pub fn serialize<S: Serializer>(v: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        Lenient(*v).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Lenient::deserialize(deserializer).map(|l| l.0)
    }
}

/// `#[serde(with = "...")]` adapter for a `[f64; 3]` corner.
pub mod triple {
    use super::*;

    pub fn serialize<S: Serializer>(v: &[f64; 3], serializer: S) -> Result<S::Ok, S::Error> {
        v.map(Lenient).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[f64; 3], D::Error> {
        <[Lenient; 3]>::deserialize(deserializer).map(|a| a.map(|l| l.0))
    }
}
