//! Survey Reliability - Item reliability and construct validity for survey data
//!
//! This crate reads Likert-style survey responses from a spreadsheet and
//! computes Cronbach's alpha (with per-item deletion impact), split-half
//! reliability with the Spearman-Brown correction and Spearman construct
//! validity, then writes the results as a multi-sheet Excel report.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
