//! Trade records annotated with entry indicators.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{IndicatorSnapshot, SectorRecord};
use crate::error::SwingResult;

/// Sector context stored alongside the entry indicators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectorData {
    pub sector: Option<String>,
    pub sector_rank: Option<u32>,
    pub sector_day_change_percent: Option<f64>,
    pub sector_weekly_change_percent: Option<f64>,
    pub sector_gainers_count: Option<u32>,
    pub sector_losers_count: Option<u32>,
}

impl From<&SectorRecord> for SectorData {
    fn from(sector: &SectorRecord) -> Self {
        Self {
            sector: sector.sector.clone(),
            sector_rank: sector.rank,
            sector_day_change_percent: sector.day_change_percent,
            sector_weekly_change_percent: sector.week_change_percent,
            sector_gainers_count: sector.gainers_count,
            sector_losers_count: sector.losers_count,
        }
    }
}

/// The `entry_indicators` slot of a trade: the snapshot plus optional
/// sector context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryIndicators {
    #[serde(flatten)]
    pub snapshot: IndicatorSnapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector_data: Option<SectorData>,
}

impl From<IndicatorSnapshot> for EntryIndicators {
    fn from(snapshot: IndicatorSnapshot) -> Self {
        Self {
            snapshot,
            sector_data: None,
        }
    }
}

/// Key of the slot the annotator writes.
pub const ENTRY_INDICATORS_KEY: &str = "entry_indicators";

/// A trade as stored by the journal.
///
/// The record is the journal's own JSON object, kept as is: key order and
/// number formatting survive a load/save cycle. `entry_indicators` is only
/// interpreted on request, so slots written by older capture tools load
/// without complaint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeRecord {
    pub fields: Map<String, Value>,
}

impl TradeRecord {
    /// Trade identifier, if the record carries one.
    pub fn trade_id(&self) -> Option<&str> {
        self.fields.get("trade_id").and_then(Value::as_str)
    }

    /// Symbol traded, if the record carries one.
    pub fn symbol(&self) -> Option<&str> {
        self.fields
            .get("stock")
            .or_else(|| self.fields.get("symbol"))
            .and_then(Value::as_str)
    }

    /// The stored slot, in whatever layout wrote it.
    pub fn entry_indicators_value(&self) -> Option<&Value> {
        self.fields.get(ENTRY_INDICATORS_KEY)
    }

    /// The stored slot, if present and in the current layout.
    pub fn entry_indicators(&self) -> Option<EntryIndicators> {
        self.entry_indicators_value()
            .and_then(|value| EntryIndicators::deserialize(value).ok())
    }

    /// Replace the entry indicators, dropping whatever was stored before.
    ///
    /// An existing slot is overwritten where it stands; a new one goes
    /// after the trade's other keys.
    pub fn set_entry_indicators(
        &mut self,
        snapshot: IndicatorSnapshot,
        sector: Option<&SectorRecord>,
    ) -> SwingResult<()> {
        let indicators = EntryIndicators {
            snapshot,
            sector_data: sector.map(SectorData::from),
        };
        let value = serde_json::to_value(&indicators)?;
        self.fields.insert(ENTRY_INDICATORS_KEY.to_string(), value);
        Ok(())
    }
}
