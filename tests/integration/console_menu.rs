//! Integration tests for the console menu.
//!
//! Drives scripted sessions through [`Menu`] and checks both the messages
//! shown and the files left on disk.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::io::Cursor;

use chrono::{NaiveDate, NaiveDateTime};
use taskslip::app::TaskApp;
use taskslip::config::AppConfig;
use taskslip::menu::Menu;
use taskslip::printer::memory::{FailOn, MemoryPrinter};

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

fn fixed_clock() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 5)
        .and_then(|d| d.and_hms_opt(9, 30, 0))
        .expect("valid time")
}

/// Runs `script` (one answer per line) and returns everything printed.
fn run_script(dir: &tempfile::TempDir, printer: MemoryPrinter, script: &str) -> String {
    let config = AppConfig {
        data_dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    let app = TaskApp::from_config(&config, printer);
    let mut output = Vec::new();
    Menu::new(Cursor::new(script.as_bytes()), &mut output)
        .with_clock(fixed_clock)
        .run(&app)
        .expect("menu run");
    String::from_utf8(output).expect("utf-8 output")
}

fn read_tasks(dir: &tempfile::TempDir) -> Vec<String> {
    let raw = std::fs::read_to_string(dir.path().join("tarefas.json")).expect("tasks file");
    serde_json::from_str(&raw).expect("task json")
}

// ===========================================================================
// Task editing
// ===========================================================================

#[test]
fn add_list_and_exit() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_script(&dir, MemoryPrinter::new(), "2\nComprar pão\n1\n0\n");

    assert!(out.contains("Tarefa adicionada."));
    assert!(out.contains("1. Comprar pão"));
    assert!(out.contains("Saindo..."));
    assert_eq!(read_tasks(&dir), vec!["Comprar pão"]);
}

#[test]
fn blank_task_is_not_added() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_script(&dir, MemoryPrinter::new(), "2\n   \n0\n");

    assert!(out.contains("Tarefa vazia não adicionada."));
    assert!(!dir.path().join("tarefas.json").exists());
}

#[test]
fn update_and_remove_use_one_based_numbers() {
    let dir = tempfile::tempdir().unwrap();
    let script = "2\nA\n2\nB\n2\nC\n3\n2\nB2\n4\n1\n0\n";
    let out = run_script(&dir, MemoryPrinter::new(), script);

    assert!(out.contains("Tarefa atualizada."));
    assert!(out.contains("Tarefa 'A' removida."));
    assert_eq!(read_tasks(&dir), vec!["B2", "C"]);
}

#[test]
fn invalid_numbers_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_script(&dir, MemoryPrinter::new(), "2\nA\n4\n5\n4\nx\n9\n0\n");

    assert!(out.contains("Índice inválido."));
    assert!(out.contains("Entrada inválida."));
    assert!(out.contains("Opção inválida."));
    assert_eq!(read_tasks(&dir), vec!["A"]);
}

#[test]
fn empty_list_message() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_script(&dir, MemoryPrinter::new(), "1\n0\n");
    assert!(out.contains("Nenhuma tarefa encontrada."));
}

#[test]
fn end_of_input_exits_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_script(&dir, MemoryPrinter::new(), "2\nA\n");
    assert!(out.contains("Tarefa adicionada."));
    assert!(!out.contains("Saindo..."));
}

#[test]
fn corrupt_file_is_reported_and_add_recovers() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("tarefas.json"), "not json").unwrap();
    let out = run_script(&dir, MemoryPrinter::new(), "1\n2\nNova\n0\n");

    assert!(out.contains("Erro ao carregar tarefas"));
    assert!(out.contains("Tarefa adicionada."));
    assert_eq!(read_tasks(&dir), vec!["Nova"]);
}

// ===========================================================================
// Printing
// ===========================================================================

#[test]
fn print_selection_asks_once_per_task() {
    let dir = tempfile::tempdir().unwrap();
    let printer = MemoryPrinter::new();
    // Select 2,1,2: one evaluate prompt for task 2 and one for task 1.
    let script = "2\nA\n2\nB\n5\n2,1,2\ns\nn\n0\n";
    let out = run_script(&dir, printer.clone(), script);

    assert_eq!(out.matches("Incluir avaliação para \"B\"").count(), 1);
    assert_eq!(out.matches("Incluir avaliação para \"A\"").count(), 1);
    assert!(out.contains("Tarefas impressas com sucesso!"));

    let raw = std::fs::read_to_string(dir.path().join("ultima_impressao.json")).unwrap();
    let last: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        last,
        serde_json::json!([
            {"tarefa": "B", "avaliar": true},
            {"tarefa": "A", "avaliar": false},
            {"tarefa": "B", "avaliar": true}
        ])
    );
    assert_eq!(printer.jobs().len(), 1);
}

#[test]
fn out_of_range_numbers_are_skipped_and_reported() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_script(&dir, MemoryPrinter::new(), "2\nA\n5\n1,7\nn\n0\n");

    assert!(out.contains("Tarefas impressas com sucesso!"));
    assert!(out.contains("Números ignorados: 7"));
}

#[test]
fn nothing_valid_selected() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_script(&dir, MemoryPrinter::new(), "2\nA\n5\n3,4\n0\n");
    assert!(out.contains("Nenhuma tarefa válida selecionada."));
}

#[test]
fn non_numeric_selection_is_invalid_input() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_script(&dir, MemoryPrinter::new(), "2\nA\n5\num\n0\n");
    assert!(out.contains("Entrada inválida."));
    assert!(!dir.path().join("ultima_impressao.json").exists());
}

#[test]
fn printer_error_is_shown_and_menu_continues() {
    let dir = tempfile::tempdir().unwrap();
    let printer = MemoryPrinter::failing(FailOn::Open(std::io::ErrorKind::NotFound));
    let out = run_script(&dir, printer, "2\nA\n5\n1\nn\n1\n0\n");

    assert!(out.contains("Erro ao imprimir:"));
    assert!(out.contains("simulated open failure"));
    assert!(out.contains("Saindo..."));
}

#[test]
fn reprint_without_history_and_after_print() {
    let dir = tempfile::tempdir().unwrap();
    let printer = MemoryPrinter::new();
    let out = run_script(&dir, printer.clone(), "6\n2\nA\n5\n1\nn\n6\n0\n");

    assert!(out.contains("Nenhuma impressão anterior encontrada."));
    assert_eq!(out.matches("Tarefas impressas com sucesso!").count(), 2);
    assert_eq!(printer.jobs().len(), 2);
}
