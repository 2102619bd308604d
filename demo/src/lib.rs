//! Demo scenarios and a small load-test runner for the gateway client.
//!
//! # Design
//! Scenarios are plain sequential call chains: each step feeds ids from the
//! previous response into the next request, and the first failure stops the
//! chain. The load runner drives one scenario from several threads, each with
//! its own client, and only aggregates what the calls report.

pub mod load;
pub mod scenarios;
