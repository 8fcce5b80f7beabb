//! # oshud-store: Data Layer for Oshud Kini
//!
//! Salary history and the current payroll roster, persisted as a single
//! JSON document.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Oshud Kini Data Flow                                │
//! │                                                                         │
//! │  CLI command (oshud process)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  oshud-store (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────────┐              │   │
//! │  │   │  SalaryStore  │◄───│ SalaryHistoryRepository │              │   │
//! │  │   │  (store.rs)   │◄───│ RosterRepository        │              │   │
//! │  │   └───────────────┘    └────────────────────────┘              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  salaries.json { "salaries": [...], "currentMonthEmployees": [...] }    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use oshud_store::SalaryStore;
//!
//! let store = SalaryStore::open("salaries.json").await?;
//! let roster = store.roster().current_month_employees().await;
//! let history = store.history().list().await;
//! ```

pub mod document;
pub mod error;
pub mod repository;
pub mod store;

pub use document::SalaryDocument;
pub use error::{StoreError, StoreResult};
pub use repository::history::SalaryHistoryRepository;
pub use repository::roster::RosterRepository;
pub use store::SalaryStore;
