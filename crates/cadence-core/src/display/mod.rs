//! Display formatting functions and result types.
//!
//! Display implementations for the domain models live here, separated from
//! the model definitions, together with newtype wrappers for collections and
//! operation results. All formatters produce markdown so interface layers can
//! render rich terminal output from the same strings.
//!
//! ## Module Organization
//!
//! - [`models`]: Display implementations for domain models
//! - [`views`]: Board, backlog, and chart rendering
//! - [`results`]: Operation result types (CreateResult, SprintCompletion)
//! - [`datetime`]: Date/time formatting utilities

pub mod datetime;
pub mod models;
pub mod results;
pub mod views;

pub use datetime::LocalDateTime;
pub use results::{CreateResult, SprintCompletion};
pub use views::{ChartSeries, HistoryEntries};
