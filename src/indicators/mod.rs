//! Stateless indicator functions over numeric sequences.
//!
//! Every function returns one value per input position so results line up
//! with the series' date index.

pub mod frame;
pub mod momentum;
pub mod trend;
pub mod volatility;
pub mod volume;

pub use frame::annotate;
