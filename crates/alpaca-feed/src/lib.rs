//! Read-only Alpaca account/position feed.
//!
//! Only the two reads the dashboard core needs: account equity/cash and
//! the current open positions. Order placement is deliberately absent.

pub mod client;
pub mod models;

pub use client::AlpacaClient;
pub use models::{Account, Position};
