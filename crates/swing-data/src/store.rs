//! JSON document storage.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::mem;
use std::path::{Path, PathBuf};
use swing_core::{DataError, PortfolioDocument, SwingResult, TradeRecord};
use tracing::{debug, info};

/// The trades file.
///
/// Either a bare array of trades or an object whose `trades` key holds the
/// array; the shape is kept so a save writes back what was loaded, with
/// `trades` in its original place among the wrapper's keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeLog {
    pub trades: Vec<TradeRecord>,
    wrapper: Option<Map<String, Value>>,
}

impl TradeLog {
    /// Create a bare-array log.
    pub fn new(trades: Vec<TradeRecord>) -> Self {
        Self {
            trades,
            wrapper: None,
        }
    }

    fn from_value(value: Value) -> Result<Self, DataError> {
        match value {
            Value::Array(_) => Ok(Self::new(serde_json::from_value(value)?)),
            Value::Object(mut wrapper) => {
                let slot = wrapper.get_mut("trades").ok_or_else(|| {
                    DataError::ParseError("trades file object has no 'trades' array".to_string())
                })?;
                let trades = serde_json::from_value(mem::take(slot))?;
                Ok(Self {
                    trades,
                    wrapper: Some(wrapper),
                })
            }
            _ => Err(DataError::ParseError(
                "trades file must be an array or an object".to_string(),
            )),
        }
    }

    fn to_value(&self) -> Result<Value, DataError> {
        let trades = serde_json::to_value(&self.trades)?;
        match &self.wrapper {
            None => Ok(trades),
            Some(wrapper) => {
                let mut object = wrapper.clone();
                object.insert("trades".to_string(), trades);
                Ok(Value::Object(object))
            }
        }
    }

    /// Whether the file was an object wrapping the array.
    pub fn is_wrapped(&self) -> bool {
        self.wrapper.is_some()
    }

    /// Find a trade by its `trade_id`.
    pub fn find_mut(&mut self, trade_id: &str) -> Option<&mut TradeRecord> {
        self.trades
            .iter_mut()
            .find(|t| t.trade_id() == Some(trade_id))
    }

    /// Replace the trade with `trade_id` by `f` applied to a copy of it.
    ///
    /// The log is only changed when `f` succeeds.
    pub fn update<F>(&mut self, trade_id: &str, f: F) -> SwingResult<()>
    where
        F: FnOnce(TradeRecord) -> SwingResult<TradeRecord>,
    {
        let slot = self
            .find_mut(trade_id)
            .ok_or_else(|| DataError::TradeNotFound(trade_id.to_string()))?;
        *slot = f(slot.clone())?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }
}

/// Portfolio document and trades file on disk.
#[derive(Debug, Clone)]
pub struct JsonStore {
    portfolio_path: PathBuf,
    trades_path: PathBuf,
}

impl JsonStore {
    /// Create a store over the two document paths.
    pub fn new(portfolio_path: impl Into<PathBuf>, trades_path: impl Into<PathBuf>) -> Self {
        Self {
            portfolio_path: portfolio_path.into(),
            trades_path: trades_path.into(),
        }
    }

    pub fn portfolio_path(&self) -> &Path {
        &self.portfolio_path
    }

    pub fn trades_path(&self) -> &Path {
        &self.trades_path
    }

    /// Load the portfolio document.
    pub fn load_portfolio(&self) -> Result<PortfolioDocument, DataError> {
        let content = read_document(&self.portfolio_path)?;
        let document: PortfolioDocument = serde_json::from_str(&content)?;
        debug!(
            path = %self.portfolio_path.display(),
            positions = document.position_count(),
            "Loaded portfolio"
        );
        Ok(document)
    }

    /// Save the portfolio document.
    pub fn save_portfolio(&self, document: &PortfolioDocument) -> Result<(), DataError> {
        write_json(&self.portfolio_path, document)?;
        info!("Saved portfolio to {}", self.portfolio_path.display());
        Ok(())
    }

    /// Load the trades file.
    pub fn load_trades(&self) -> Result<TradeLog, DataError> {
        let content = read_document(&self.trades_path)?;
        let log = TradeLog::from_value(serde_json::from_str(&content)?)?;
        debug!(path = %self.trades_path.display(), trades = log.len(), "Loaded trades");
        Ok(log)
    }

    /// Save the trades file in the shape it was loaded in.
    pub fn save_trades(&self, log: &TradeLog) -> Result<(), DataError> {
        write_json(&self.trades_path, &log.to_value()?)?;
        info!("Saved {} trades to {}", log.len(), self.trades_path.display());
        Ok(())
    }
}

fn read_document(path: &Path) -> Result<String, DataError> {
    if !path.exists() {
        return Err(DataError::DocumentNotFound(path.display().to_string()));
    }
    Ok(fs::read_to_string(path)?)
}

/// Write pretty JSON through a sibling temp file, then rename over `path`.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), DataError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let content = serde_json::to_string_pretty(value)?;

    let mut tmp_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .ok_or_else(|| DataError::StoreError(format!("not a file path: {}", path.display())))?;
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, content)?;
    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        DataError::StoreError(format!("failed to replace {}: {}", path.display(), e))
    })?;
    Ok(())
}
