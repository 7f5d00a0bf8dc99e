pub mod catalog;
pub mod change;
pub mod config;
pub mod error;
pub mod factors;
pub mod lineitem;
pub mod options;
pub mod output;
pub mod projection;
pub mod results;
pub mod rollup;
pub mod server;
pub mod units;
