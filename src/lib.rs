//! zooapi - schema-driven data-access API for zoo operations records
//!
//! A fixed set of HTTP verbs operating generically over a heterogeneous
//! set of resource kinds: registries resolve names, the dispatcher runs
//! generic reads/inserts/deletes, and the procedure orchestrator handles
//! routine-backed multi-statement sequences on one reserved connection.

pub mod catalog;
pub mod cli;
pub mod dispatch;
pub mod http_server;
pub mod procedures;
pub mod store;
