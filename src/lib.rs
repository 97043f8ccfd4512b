//! # Shamba
//!
//! Rule-based classification for agricultural knowledge documents.
//!
//! Shamba infers a document's category, crops, seasons, farming activities,
//! regions, keywords and language (English, Swahili, Korean) from its title
//! and text using static dictionaries and keyword scoring. Around the
//! classifier it provides a SQLite source store, an auto-classify HTTP
//! callback for ingestion pipelines, a filesystem sync command, and a
//! statistics view over stored classifications.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────┐   ┌────────────┐
//! │ Filesystem  │──▶│  Classifier  │──▶│   SQLite   │
//! │  sync       │   │ (pure, sync) │   │  sources   │
//! └─────────────┘   └──────▲───────┘   └─────┬──────┘
//!                          │                 │
//!                   ┌──────┴───────┐   ┌─────▼──────┐
//!                   │ POST         │   │ stats      │
//!                   │ /classify    │   │ CLI / HTTP │
//!                   └──────────────┘   └────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! shamba init                                   # create database
//! shamba classify --title "Maize Planting Guide" --file guide.txt
//! shamba sync filesystem                        # ingest + classify docs
//! shamba stats
//! shamba serve                                  # start HTTP callback
//! ```
//!
//! ## Library use
//!
//! ```rust
//! use shamba::classifier::{classify_document, FixedClock};
//!
//! let result = classify_document(
//!     "Maize Planting Guide",
//!     "This guide explains kupanda mahindi during masika season in Arusha.",
//!     &FixedClock(4),
//! );
//! assert_eq!(result.crops, vec!["maize"]);
//! assert!(result.regions.contains(&"northern".to_string()));
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`classifier`] | Dictionaries, extractors, category scoring, language detection |
//! | [`auto_classify`] | Callback request handling |
//! | [`server`] | HTTP server |
//! | [`store`] | Source store trait and in-memory store |
//! | [`sqlite_store`] | SQLite source store |
//! | [`ingest`] | Filesystem sync with classification |
//! | [`stats`] | Classification statistics |
//! | [`config`] | TOML configuration parsing |

pub mod auto_classify;
pub mod classifier;
pub mod config;
pub mod connector_fs;
pub mod db;
pub mod get;
pub mod ingest;
pub mod migrate;
pub mod models;
pub mod server;
pub mod sqlite_store;
pub mod stats;
pub mod store;
pub mod telemetry;
