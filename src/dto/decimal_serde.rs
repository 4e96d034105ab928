//! Prices, sizes and money travel as JSON numbers but are held as
//! [`Decimal`] so that ladder prices like `1.01` stay exact.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{de, ser, Deserialize, Deserializer, Serializer};
use std::str::FromStr;

fn to_f64<E: ser::Error>(value: &Decimal) -> Result<f64, E> {
    value
        .to_f64()
        .ok_or_else(|| E::custom(format!("{value} is not representable as a number")))
}

fn from_number<E: de::Error>(num: serde_json::Number) -> Result<Decimal, E> {
    let text = num.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(E::custom)
}

pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(to_f64(value)?)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    from_number(serde_json::Number::deserialize(deserializer)?)
}

pub mod option {
    use super::{from_number, to_f64};
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(d) => serializer.serialize_some(&to_f64::<S::Error>(d)?),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<serde_json::Number>::deserialize(deserializer)?
            .map(from_number)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct Stake {
        #[serde(with = "super")]
        size: Decimal,
        #[serde(default, with = "super::option")]
        price: Option<Decimal>,
    }

    #[test]
    fn test_decimal_fields_keep_ladder_prices_exact() {
        let stake: Stake = serde_json::from_str(r#"{"size": 2.0, "price": 1.01}"#).unwrap();
        assert_eq!(stake.size, dec!(2.0));
        assert_eq!(stake.price, Some(dec!(1.01)));

        let json = serde_json::to_value(&stake).unwrap();
        assert_eq!(json["price"], serde_json::json!(1.01));
    }

    #[test]
    fn test_missing_optional_decimal_is_none() {
        let stake: Stake = serde_json::from_str(r#"{"size": 5}"#).unwrap();
        assert_eq!(stake.size, dec!(5));
        assert!(stake.price.is_none());
    }
}
