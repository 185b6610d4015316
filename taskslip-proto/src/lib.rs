//! Shared print-session and receipt definitions for `taskslip`.

pub mod escpos;
pub mod print;
pub mod receipt;
