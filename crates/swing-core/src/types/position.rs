//! Position and portfolio documents.
//!
//! Both documents belong to the journal, which is edited by hand. They are
//! kept as the JSON objects they were loaded from so a save changes only the
//! values the refresh pass recomputes: other keys keep their place and their
//! number formatting.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::HashMap;
use std::mem;
use std::str::FromStr;

/// Live prices keyed by symbol.
pub type PriceMap = HashMap<String, Decimal>;

/// Read a JSON number (or numeric string) as an exact decimal.
fn value_to_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            let text = n.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .ok()
        }
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

/// Whole values are written as JSON integers, everything else as floats.
fn decimal_to_value(value: Decimal) -> Value {
    if value.scale() == 0 {
        if let Some(n) = value.to_i64() {
            return Value::from(n);
        }
    }
    value
        .to_f64()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// An open swing position.
///
/// The refresh pass overwrites the derived fields (`current_price` through
/// `distance_to_t2_percent`); everything else is owned by the journal and
/// left untouched, including keys this type does not know about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionRecord {
    pub fields: Map<String, Value>,
}

impl PositionRecord {
    pub const STOCK: &'static str = "stock";
    pub const SYMBOL: &'static str = "symbol";
    pub const ENTRY_PRICE: &'static str = "entry_price";
    pub const SHARES: &'static str = "shares";
    pub const QUANTITY: &'static str = "quantity";
    pub const STOP_LOSS: &'static str = "stop_loss";
    pub const TARGET_1: &'static str = "target_1";
    pub const TARGET_2: &'static str = "target_2";
    pub const CAPITAL_INVESTED: &'static str = "capital_invested";
    pub const INVESTED_CAPITAL: &'static str = "invested_capital";

    pub const CURRENT_PRICE: &'static str = "current_price";
    pub const CURRENT_VALUE: &'static str = "current_value";
    pub const UNREALIZED_PNL: &'static str = "unrealized_pnl";
    pub const PNL_PERCENT: &'static str = "pnl_percent";
    pub const DISTANCE_TO_SL_PERCENT: &'static str = "distance_to_sl_percent";
    pub const DISTANCE_TO_T1_PERCENT: &'static str = "distance_to_t1_percent";
    pub const DISTANCE_TO_T2_PERCENT: &'static str = "distance_to_t2_percent";

    /// Create a position with the journal fields only.
    pub fn new(symbol: impl Into<String>, entry_price: Decimal, shares: Decimal) -> Self {
        let mut position = Self::default();
        position
            .fields
            .insert(Self::STOCK.to_string(), Value::String(symbol.into()));
        position.set_decimal(Self::ENTRY_PRICE, Some(entry_price));
        position.set_decimal(Self::SHARES, Some(shares));
        position
    }

    /// Set stop-loss and targets.
    pub fn with_levels(mut self, stop_loss: Decimal, target_1: Decimal, target_2: Decimal) -> Self {
        self.set_decimal(Self::STOP_LOSS, Some(stop_loss));
        self.set_decimal(Self::TARGET_1, Some(target_1));
        self.set_decimal(Self::TARGET_2, Some(target_2));
        self
    }

    /// Set the capital committed to the position.
    pub fn with_capital(mut self, capital: Decimal) -> Self {
        self.set_decimal(Self::CAPITAL_INVESTED, Some(capital));
        self
    }

    /// The position's symbol, from `stock` or else `symbol`; empty if neither.
    pub fn symbol(&self) -> &str {
        self.fields
            .get(Self::STOCK)
            .or_else(|| self.fields.get(Self::SYMBOL))
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// Numeric field as a decimal; `None` when absent, null or not a number.
    pub fn decimal(&self, key: &str) -> Option<Decimal> {
        self.fields.get(key).and_then(value_to_decimal)
    }

    /// Write a numeric field.
    ///
    /// An existing key is overwritten where it stands and a new one goes
    /// last. `None` removes the key.
    pub fn set_decimal(&mut self, key: &str, value: Option<Decimal>) {
        match value {
            Some(value) => {
                self.fields.insert(key.to_string(), decimal_to_value(value));
            }
            None => {
                self.fields.shift_remove(key);
            }
        }
    }

    /// Entry price, zero when missing or unreadable.
    pub fn entry_price(&self) -> Decimal {
        self.decimal(Self::ENTRY_PRICE).unwrap_or(Decimal::ZERO)
    }

    pub fn stop_loss(&self) -> Option<Decimal> {
        self.decimal(Self::STOP_LOSS)
    }

    pub fn target_1(&self) -> Option<Decimal> {
        self.decimal(Self::TARGET_1)
    }

    pub fn target_2(&self) -> Option<Decimal> {
        self.decimal(Self::TARGET_2)
    }

    pub fn current_price(&self) -> Option<Decimal> {
        self.decimal(Self::CURRENT_PRICE)
    }

    pub fn current_value(&self) -> Option<Decimal> {
        self.decimal(Self::CURRENT_VALUE)
    }

    pub fn unrealized_pnl(&self) -> Option<Decimal> {
        self.decimal(Self::UNREALIZED_PNL)
    }

    pub fn pnl_percent(&self) -> Option<Decimal> {
        self.decimal(Self::PNL_PERCENT)
    }

    pub fn distance_to_stop_loss_percent(&self) -> Option<Decimal> {
        self.decimal(Self::DISTANCE_TO_SL_PERCENT)
    }

    pub fn distance_to_target1_percent(&self) -> Option<Decimal> {
        self.decimal(Self::DISTANCE_TO_T1_PERCENT)
    }

    pub fn distance_to_target2_percent(&self) -> Option<Decimal> {
        self.decimal(Self::DISTANCE_TO_T2_PERCENT)
    }

    /// Share count: `shares`, else `quantity`, else zero.
    ///
    /// Journals written by hand use either key; `shares` wins when both
    /// are present.
    pub fn resolved_shares(&self) -> Decimal {
        self.decimal(Self::SHARES)
            .or_else(|| self.decimal(Self::QUANTITY))
            .unwrap_or(Decimal::ZERO)
    }

    /// Capital deployed: `capital_invested`, else `invested_capital`, else zero.
    pub fn resolved_capital(&self) -> Decimal {
        self.decimal(Self::CAPITAL_INVESTED)
            .or_else(|| self.decimal(Self::INVESTED_CAPITAL))
            .unwrap_or(Decimal::ZERO)
    }

    /// Unrealized P&L as last computed, zero if never refreshed.
    pub fn unrealized_pnl_or_zero(&self) -> Decimal {
        self.unrealized_pnl().unwrap_or(Decimal::ZERO)
    }
}

/// Aggregate portfolio record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortfolioSummary {
    pub fields: Map<String, Value>,
}

impl PortfolioSummary {
    pub const TOTAL_PNL: &'static str = "total_pnl";
    pub const TOTAL_PNL_PERCENT: &'static str = "total_pnl_percent";
    pub const LAST_UPDATED: &'static str = "last_updated";

    pub fn total_pnl(&self) -> Decimal {
        self.fields
            .get(Self::TOTAL_PNL)
            .and_then(value_to_decimal)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn total_pnl_percent(&self) -> Decimal {
        self.fields
            .get(Self::TOTAL_PNL_PERCENT)
            .and_then(value_to_decimal)
            .unwrap_or(Decimal::ZERO)
    }

    /// `YYYY-MM-DDTHH:MM:SS+05:30`
    pub fn last_updated(&self) -> Option<&str> {
        self.fields.get(Self::LAST_UPDATED).and_then(Value::as_str)
    }

    /// Overwrite the three totals, each in place if already present.
    pub fn set_totals(&mut self, total_pnl: Decimal, total_pnl_percent: Decimal, last_updated: &str) {
        self.fields
            .insert(Self::TOTAL_PNL.to_string(), decimal_to_value(total_pnl));
        self.fields.insert(
            Self::TOTAL_PNL_PERCENT.to_string(),
            decimal_to_value(total_pnl_percent),
        );
        self.fields.insert(
            Self::LAST_UPDATED.to_string(),
            Value::String(last_updated.to_string()),
        );
    }
}

const PORTFOLIO_KEY: &str = "portfolio";
const ACTIVE_POSITIONS_KEY: &str = "active_positions";

/// The dashboard's trading data document.
///
/// `portfolio` and `active_positions` are parsed out for the refresh pass;
/// the rest of the document is carried as loaded and both sections are
/// written back to their original place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct PortfolioDocument {
    pub portfolio: PortfolioSummary,
    pub active_positions: Vec<PositionRecord>,
    fields: Map<String, Value>,
}

impl TryFrom<Map<String, Value>> for PortfolioDocument {
    type Error = String;

    fn try_from(mut fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let portfolio = match fields.get_mut(PORTFOLIO_KEY) {
            Some(slot) => serde_json::from_value(mem::take(slot))
                .map_err(|e| format!("invalid '{}' record: {}", PORTFOLIO_KEY, e))?,
            None => PortfolioSummary::default(),
        };
        let active_positions = match fields.get_mut(ACTIVE_POSITIONS_KEY) {
            Some(slot) => serde_json::from_value(mem::take(slot))
                .map_err(|e| format!("invalid '{}' list: {}", ACTIVE_POSITIONS_KEY, e))?,
            None => Vec::new(),
        };
        Ok(Self {
            portfolio,
            active_positions,
            fields,
        })
    }
}

impl From<PortfolioDocument> for Map<String, Value> {
    fn from(document: PortfolioDocument) -> Self {
        let mut fields = document.fields;
        fields.insert(
            PORTFOLIO_KEY.to_string(),
            Value::Object(document.portfolio.fields),
        );
        fields.insert(
            ACTIVE_POSITIONS_KEY.to_string(),
            Value::Array(
                document
                    .active_positions
                    .into_iter()
                    .map(|p| Value::Object(p.fields))
                    .collect(),
            ),
        );
        fields
    }
}

impl PortfolioDocument {
    /// Create a document holding `positions` and an empty aggregate.
    pub fn with_positions(active_positions: Vec<PositionRecord>) -> Self {
        Self {
            active_positions,
            ..Default::default()
        }
    }

    /// Any other top-level key of the document.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match key {
            PORTFOLIO_KEY | ACTIVE_POSITIONS_KEY => None,
            _ => self.fields.get(key),
        }
    }

    /// Symbols of the active positions, in document order, without repeats.
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = Vec::with_capacity(self.active_positions.len());
        for position in &self.active_positions {
            let symbol = position.symbol();
            if !symbol.is_empty() && !symbols.iter().any(|s| s == symbol) {
                symbols.push(symbol.to_string());
            }
        }
        symbols
    }

    /// Get a position by symbol.
    pub fn get_position(&self, symbol: &str) -> Option<&PositionRecord> {
        self.active_positions.iter().find(|p| p.symbol() == symbol)
    }

    /// Get the number of active positions.
    pub fn position_count(&self) -> usize {
        self.active_positions.len()
    }
}
