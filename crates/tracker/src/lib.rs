pub mod store;

pub use store::{JsonFileStore, MemoryStore, StateStore};

use chrono::Utc;
use tracing::{info, warn};

use common::{
    AlertEvent, Error, HistoryEntry, Positions, PriceRecord, Result, TrackerState,
};

/// Outcome of one successful price update.
#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    pub market: String,
    pub old_price: Option<f64>,
    pub new_price: f64,
    /// Relative change from the previous price. `None` when no prior
    /// baseline exists (first observation or a zero previous price).
    pub change: Option<f64>,
    pub portfolio_value: f64,
    pub profit: f64,
    /// Present only when the move is at least the alert threshold.
    pub alert: Option<AlertEvent>,
}

/// Threshold-gated price tracker over a persisted state store.
///
/// Every operation is one read-modify-write cycle: `load` once, mutate
/// in memory, `save` once. Prices are probabilities in `[0, 1]`.
pub struct TrackerEngine<S: StateStore> {
    store: S,
    alert_threshold: f64,
}

impl<S: StateStore> TrackerEngine<S> {
    pub fn new(store: S, alert_threshold: f64) -> Self {
        Self {
            store,
            alert_threshold,
        }
    }

    /// Seed a market for tracking with its position and no price yet.
    /// Registering a name twice fails rather than resetting positions.
    pub fn register(
        &self,
        market: &str,
        contracts: f64,
        total_cost: f64,
        url: Option<String>,
    ) -> Result<()> {
        let mut state = self.store.load()?;
        if state.markets.contains_key(market) {
            return Err(Error::MarketExists(market.to_string()));
        }

        state.markets.insert(
            market.to_string(),
            PriceRecord {
                positions: Positions {
                    contracts,
                    total_cost,
                },
                url,
                ..Default::default()
            },
        );
        state.last_updated = Some(Utc::now());
        self.store.save(&state)?;

        info!(market, contracts, total_cost, "Market registered");
        Ok(())
    }

    /// Record a newly observed price for a tracked market.
    ///
    /// Validation happens before any state mutation. The engine never
    /// creates markets on the fly; unknown names are rejected.
    pub fn update(&self, market: &str, new_price: f64) -> Result<UpdateOutcome> {
        if !(0.0..=1.0).contains(&new_price) {
            return Err(Error::InvalidPrice(new_price));
        }

        let mut state = self.store.load()?;
        let record = state
            .markets
            .get_mut(market)
            .ok_or_else(|| Error::MarketNotFound(market.to_string()))?;

        let old_price = record.current_price;
        record.previous_price = old_price;
        record.current_price = Some(new_price);

        // A zero previous price has no meaningful relative change; it is
        // treated as "no baseline" instead of dividing to infinity.
        let change = match old_price {
            Some(old) if old != 0.0 => Some((new_price - old) / old),
            _ => None,
        };
        if change.is_some() {
            record.last_change = change;
        }
        let positions = record.positions;
        let url = record.url.clone();

        let portfolio_value = new_price * positions.contracts;
        let profit = portfolio_value - positions.total_cost;
        let now = Utc::now();

        state.history.push(HistoryEntry {
            timestamp: now,
            market: market.to_string(),
            price: new_price,
            change,
            portfolio_value,
            profit,
        });
        state.last_updated = Some(now);
        self.store.save(&state)?;

        let alert = match (old_price, change) {
            (Some(old), Some(change)) if change.abs() >= self.alert_threshold => {
                Some(AlertEvent::new(market, old, new_price, change, url, now))
            }
            _ => None,
        };

        if let Some(alert) = &alert {
            warn!(market, change_pct = %alert.change_pct, "Price alert");
        } else {
            info!(market, price = new_price, "Price updated");
        }

        Ok(UpdateOutcome {
            market: market.to_string(),
            old_price,
            new_price,
            change,
            portfolio_value,
            profit,
            alert,
        })
    }

    /// Read-only snapshot of the full tracker state.
    pub fn status(&self) -> Result<TrackerState> {
        self.store.load()
    }
}
