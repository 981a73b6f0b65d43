//! Core library for the credit pre-analysis workflow: eligibility rules,
//! invoice batch validation, and final decision records.

pub mod config;
pub mod error;
pub mod router;
pub mod service;
pub mod sessao;
pub mod telemetry;
pub mod workflows;
