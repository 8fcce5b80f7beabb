//! # Repository Module
//!
//! Repository implementations over the payroll document.
//!
//! ```text
//! CLI command
//!      │  store.history().create(draft)
//!      ▼
//! SalaryHistoryRepository / RosterRepository
//!      │  read() or mutate()
//!      ▼
//! SalaryStore (salaries.json)
//! ```
//!
//! ## Available Repositories
//!
//! - [`SalaryHistoryRepository`](history::SalaryHistoryRepository) - Processed run CRUD
//! - [`RosterRepository`](roster::RosterRepository) - Current month roster and adjustments

pub mod history;
pub mod roster;
