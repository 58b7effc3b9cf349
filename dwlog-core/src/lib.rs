//! Core of dwlog: parsing node log corpora, querying and aggregating them,
//! exporting datasets and serving it all over HTTP.

pub mod api;
pub mod cli;
pub mod conf;
pub mod corpus;
pub mod export;
pub mod files;
pub mod logging;
pub mod query;
pub mod server;
pub mod stats;
pub mod users;

#[cfg(feature = "static_files")]
pub mod static_files;
