//! Attach entry indicators to a trade record.

use swing_core::{IndicatorSnapshot, SectorRecord, SwingResult, TradeRecord};
use tracing::debug;

/// Store `snapshot` as the trade's entry indicators.
///
/// Takes the trade by value and hands it back: any previous
/// `entry_indicators` is replaced wholesale, never merged. With a sector
/// record the slot also carries its `sector_data` projection. The rest of
/// the trade is left byte for byte as it was.
pub fn annotate_trade(
    mut trade: TradeRecord,
    snapshot: IndicatorSnapshot,
    sector: Option<&SectorRecord>,
) -> SwingResult<TradeRecord> {
    debug!(
        trade_id = trade.trade_id().unwrap_or("-"),
        sector = sector.and_then(|s| s.sector.as_deref()).unwrap_or("-"),
        "Annotating trade with entry indicators"
    );
    trade.set_entry_indicators(snapshot, sector)?;
    Ok(trade)
}
