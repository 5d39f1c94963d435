// Application layer: turns raw form input into ledger operations and
// renders the outcome as display text.

pub mod error;
pub mod processor;

pub use error::*;
pub use processor::*;
