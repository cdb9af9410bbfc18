//! Survey Builder - survey scoring and branching engine
//!
//! Authors build surveys of sectioned, typed questions with points, branch
//! rules and result ranges. Respondents run through them one section at a
//! time; the engine scores answers, picks the next section and matches the
//! score against result ranges. Submitted responses are stored and may be
//! emailed back to the respondent.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
