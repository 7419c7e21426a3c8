//! Derived analytics built on bump-and-reprice: sensitivities, scenario
//! shocks, daily PnL attribution, and historical backtesting.

pub mod backtest;
pub mod pnl;
pub mod scenarios;
pub mod sensitivity;

pub use backtest::Backtester;
pub use pnl::{PnlAttribution, PnlRecord, PnlTracker};
pub use scenarios::{CurveShift, ScenarioEngine, ScenarioOutcome};
pub use sensitivity::{KeyRateSensitivity, Pv01, SensitivityEngine};
