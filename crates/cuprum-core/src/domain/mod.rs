mod day;
mod lookback;
mod symbol;

pub use day::TradingDay;
pub use lookback::Lookback;
pub use symbol::Symbol;
