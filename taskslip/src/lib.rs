//! `taskslip` — task list manager that prints checklists on receipt printers.

pub mod app;
pub mod config;
pub mod menu;
pub mod print;
pub mod printer;
pub mod storage;
pub mod tasks;
