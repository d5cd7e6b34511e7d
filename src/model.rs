//! Product wire and row types.

use chrono::{DateTime, Utc};
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::postgres::{PgTypeInfo, PgValueRef};
use sqlx::Postgres;
use std::fmt;
use utoipa::ToSchema;

/// Decimal amount carried as text end to end. Accepted from JSON as a string
/// or a number, and from XML as element text; stored in NUMERIC and read back
/// with a `::text` cast so no float rounding ever touches it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Price(String);

impl Price {
    pub fn new(s: impl Into<String>) -> Self {
        Price(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Price {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

struct PriceVisitor;

impl<'de> Visitor<'de> for PriceVisitor {
    type Value = Price;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal string or number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Price, E> {
        Ok(Price(v.trim().to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Price, E> {
        Ok(Price(format!("{}", v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Price, E> {
        Ok(Price(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Price, E> {
        Ok(Price(v.to_string()))
    }

    /// The XML deserializer hands an element over as a map whose text
    /// content sits under the `$text` key.
    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Price, A::Error> {
        let mut text: Option<String> = None;
        while let Some(key) = map.next_key::<String>()? {
            if key == "$text" {
                text = Some(map.next_value()?);
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        match text {
            Some(s) => Ok(Price(s.trim().to_string())),
            None => Err(de::Error::custom("expected element text")),
        }
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PriceVisitor)
    }
}

impl sqlx::Type<Postgres> for Price {
    fn type_info() -> PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> sqlx::Decode<'r, Postgres> for Price {
    fn decode(value: PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        Ok(Price(<String as sqlx::Decode<Postgres>>::decode(value)?))
    }
}

/// Full representation returned by every read and write.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Product {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Pencil")]
    pub name: String,
    #[schema(value_type = String, example = "1.99")]
    pub price: Price,
    /// Server-assigned at creation; immutable afterwards.
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

/// Body for create and full update.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProductInput {
    #[schema(example = "Pencil")]
    pub name: String,
    #[schema(value_type = String, example = "1.99")]
    pub price: Price,
}

/// Body for partial update; only supplied fields change.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ProductPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "2.49")]
    pub price: Option<Price>,
}
