//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `survey` - Survey definitions and the draft edit operations
//! - `response` - Answers, submitted responses and listing filters
//! - `scoring` - Pure scoring, range matching, availability and branching
//! - `flow` - Respondent traversal state machine
//! - `notification` - Result emails composed after submission

pub mod flow;
pub mod foundation;
pub mod notification;
pub mod response;
pub mod scoring;
pub mod survey;
