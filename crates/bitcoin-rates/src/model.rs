//! Domain Models
//!
//! Ticker payloads and the price classes they are exposed under.
//! Prices stay `f64` end to end since Prometheus samples are `f64`.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

/// Quote for one currency as published by the ticker API
///
/// The payload carries more fields (`15m`, `symbol`); only these three are kept.
/// A missing or `null` field reads as 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Price {
    /// Last traded price
    #[serde(deserialize_with = "null_as_default")]
    pub last: f64,

    /// Buy price, exposed as `ask`
    #[serde(deserialize_with = "null_as_default")]
    pub buy: f64,

    /// Sell price, exposed as `bid`
    #[serde(deserialize_with = "null_as_default")]
    pub sell: f64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Price {
    pub const fn new(last: f64, buy: f64, sell: f64) -> Self {
        Self { last, buy, sell }
    }

    /// Value of this quote for a price class
    pub const fn value(&self, class: PriceClass) -> f64 {
        match class {
            PriceClass::Ltp => self.last,
            PriceClass::Ask => self.buy,
            PriceClass::Bid => self.sell,
        }
    }
}

/// The `class` label of `bitcoin_exchange_rate`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PriceClass {
    /// Last traded price
    Ltp,
    Ask,
    Bid,
}

impl PriceClass {
    pub const ALL: [Self; 3] = [Self::Ltp, Self::Ask, Self::Bid];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Ltp => "ltp",
            Self::Ask => "ask",
            Self::Bid => "bid",
        }
    }
}

/// One decoded ticker response, keyed by currency code.
///
/// Lives only for the duration of a scrape. A `null` body decodes as an
/// empty record and a `null` quote as all zeros.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PriceRecord {
    prices: BTreeMap<String, Price>,
}

impl<'de> Deserialize<'de> for PriceRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let prices: Option<BTreeMap<String, Option<Price>>> = Option::deserialize(deserializer)?;
        let prices = prices
            .unwrap_or_default()
            .into_iter()
            .map(|(currency, price)| (currency, price.unwrap_or_default()))
            .collect();

        Ok(Self { prices })
    }
}

impl PriceRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the quote for a currency
    #[must_use]
    pub fn with(mut self, currency: impl Into<String>, price: Price) -> Self {
        self.prices.insert(currency.into(), price);
        self
    }

    pub fn get(&self, currency: &str) -> Option<&Price> {
        self.prices.get(currency)
    }

    /// Currencies in sorted order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Price)> {
        self.prices.iter().map(|(currency, price)| (currency.as_str(), price))
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}
