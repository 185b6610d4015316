//! Text-menu front-end.
//!
//! Translates console input into [`TaskApp`] calls and results into
//! messages. Task numbers are 1-based on screen and 0-based in the app.
//! Generic over reader and writer so whole sessions can be scripted.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};

use chrono::NaiveDateTime;

use crate::app::{AppError, Reprint, TaskApp};
use crate::print::SelectionError;
use crate::printer::PrinterDevice;
use crate::tasks::TaskError;

const MENU: &str = "\n== GERENCIADOR DE TAREFAS ==
1. Listar tarefas
2. Adicionar tarefa
3. Atualizar tarefa
4. Remover tarefa
5. Imprimir tarefas selecionadas
6. Reimprimir última lista
0. Sair";

const PRINTED: &str = "Tarefas impressas com sucesso!";
const INVALID_INDEX: &str = "Índice inválido.";
const INVALID_INPUT: &str = "Entrada inválida.";

/// Interactive console menu over a [`TaskApp`].
pub struct Menu<R, W> {
    input: R,
    output: W,
    clock: Box<dyn Fn() -> NaiveDateTime>,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    /// Creates a menu reading from `input` and writing to `output`,
    /// stamping receipts with the local time.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            clock: Box::new(|| chrono::Local::now().naive_local()),
        }
    }

    /// Replaces the clock used to stamp receipts.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDateTime + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Runs the menu until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub fn run<D: PrinterDevice>(&mut self, app: &TaskApp<D>) -> io::Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.prompt("Escolha uma opção: ")? else {
                return Ok(());
            };
            match choice.as_str() {
                "1" => {
                    self.show_tasks(app)?;
                }
                "2" => self.add(app)?,
                "3" => self.update(app)?,
                "4" => self.remove(app)?,
                "5" => self.print_selected(app)?,
                "6" => self.reprint_last(app)?,
                "0" => {
                    writeln!(self.output, "Saindo...")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Opção inválida.")?,
            }
        }
    }

    /// Writes `question`, then reads one trimmed line. `None` on end of input.
    fn prompt(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prints the numbered list and returns it; `None` if it could not be loaded.
    fn show_tasks<D: PrinterDevice>(&mut self, app: &TaskApp<D>) -> io::Result<Option<Vec<String>>> {
        let tasks = match app.list() {
            Ok(tasks) => tasks,
            Err(e) => {
                writeln!(self.output, "Erro ao carregar tarefas: {e}")?;
                return Ok(None);
            }
        };
        if tasks.is_empty() {
            writeln!(self.output, "Nenhuma tarefa encontrada.")?;
        }
        for (i, task) in tasks.iter().enumerate() {
            writeln!(self.output, "{}. {task}", i + 1)?;
        }
        Ok(Some(tasks))
    }

    /// Asks for a 1-based task number and checks it against `tasks`.
    fn ask_index(&mut self, tasks: &[String], question: &str) -> io::Result<Option<usize>> {
        let Some(answer) = self.prompt(question)? else {
            return Ok(None);
        };
        let Ok(number) = answer.parse::<usize>() else {
            writeln!(self.output, "{INVALID_INPUT}")?;
            return Ok(None);
        };
        match number.checked_sub(1).filter(|&i| i < tasks.len()) {
            Some(index) => Ok(Some(index)),
            None => {
                writeln!(self.output, "{INVALID_INDEX}")?;
                Ok(None)
            }
        }
    }

    fn add<D: PrinterDevice>(&mut self, app: &TaskApp<D>) -> io::Result<()> {
        let Some(text) = self.prompt("Digite a nova tarefa: ")? else {
            return Ok(());
        };
        match app.add(&text) {
            Ok(()) => writeln!(self.output, "Tarefa adicionada."),
            Err(TaskError::EmptyInput) => writeln!(self.output, "Tarefa vazia não adicionada."),
            Err(e) => writeln!(self.output, "Erro ao salvar tarefa: {e}"),
        }
    }

    fn update<D: PrinterDevice>(&mut self, app: &TaskApp<D>) -> io::Result<()> {
        let Some(tasks) = self.show_tasks(app)? else {
            return Ok(());
        };
        let Some(index) =
            self.ask_index(&tasks, "Digite o número da tarefa que deseja atualizar: ")?
        else {
            return Ok(());
        };
        let Some(text) = self.prompt("Digite o novo texto: ")? else {
            return Ok(());
        };
        match app.update(index, &text) {
            Ok(()) => writeln!(self.output, "Tarefa atualizada."),
            Err(TaskError::EmptyInput) => writeln!(self.output, "Tarefa vazia não atualizada."),
            Err(TaskError::IndexOutOfRange { .. }) => writeln!(self.output, "{INVALID_INDEX}"),
            Err(e) => writeln!(self.output, "Erro ao salvar tarefa: {e}"),
        }
    }

    fn remove<D: PrinterDevice>(&mut self, app: &TaskApp<D>) -> io::Result<()> {
        let Some(tasks) = self.show_tasks(app)? else {
            return Ok(());
        };
        let Some(index) =
            self.ask_index(&tasks, "Digite o número da tarefa que deseja remover: ")?
        else {
            return Ok(());
        };
        match app.remove(index) {
            Ok(removed) => writeln!(self.output, "Tarefa '{removed}' removida."),
            Err(TaskError::IndexOutOfRange { .. }) => writeln!(self.output, "{INVALID_INDEX}"),
            Err(e) => writeln!(self.output, "Erro ao salvar tarefa: {e}"),
        }
    }

    fn print_selected<D: PrinterDevice>(&mut self, app: &TaskApp<D>) -> io::Result<()> {
        let Some(tasks) = self.show_tasks(app)? else {
            return Ok(());
        };
        let Some(answer) =
            self.prompt("Digite os números das tarefas que deseja imprimir (ex: 1,3,4): ")?
        else {
            return Ok(());
        };
        let Some(indices) = parse_selection(&answer) else {
            writeln!(self.output, "{INVALID_INPUT}")?;
            return Ok(());
        };

        let mut evaluate = HashMap::new();
        for &index in &indices {
            let Some(task) = tasks.get(index) else {
                continue;
            };
            if evaluate.contains_key(&index) {
                continue;
            }
            let Some(answer) = self.prompt(&format!("Incluir avaliação para \"{task}\"? (s/n): "))?
            else {
                return Ok(());
            };
            evaluate.insert(index, answer.to_lowercase() == "s");
        }

        match app.print_selected(&indices, &evaluate, (self.clock)()) {
            Ok(report) => {
                writeln!(self.output, "{PRINTED}")?;
                if !report.skipped.is_empty() {
                    let numbers: Vec<String> =
                        report.skipped.iter().map(|i| (i + 1).to_string()).collect();
                    writeln!(self.output, "Números ignorados: {}", numbers.join(", "))?;
                }
                Ok(())
            }
            Err(AppError::Selection(SelectionError::NoSelection { .. })) => {
                writeln!(self.output, "Nenhuma tarefa válida selecionada.")
            }
            Err(AppError::Printer(e)) => writeln!(self.output, "Erro ao imprimir: {e}"),
            Err(e) => writeln!(self.output, "Erro: {e}"),
        }
    }

    fn reprint_last<D: PrinterDevice>(&mut self, app: &TaskApp<D>) -> io::Result<()> {
        match app.reprint_last((self.clock)()) {
            Ok(Reprint::Printed { .. }) => writeln!(self.output, "{PRINTED}"),
            Ok(Reprint::NothingToReprint) => {
                writeln!(self.output, "Nenhuma impressão anterior encontrada.")
            }
            Err(AppError::Printer(e)) => writeln!(self.output, "Erro ao imprimir: {e}"),
            Err(e) => writeln!(self.output, "Erro: {e}"),
        }
    }
}

/// Parses `"1, 3,4"` into 0-based indices, keeping order and repeats.
///
/// Returns `None` if any entry is not a number. Numbers below `1` have no
/// task and are dropped here, like any other number past the end of the
/// list is dropped later by the selection.
#[must_use]
pub fn parse_selection(input: &str) -> Option<Vec<usize>> {
    input
        .split(',')
        .map(|part| part.trim().parse::<i64>().ok())
        .collect::<Option<Vec<_>>>()
        .map(|numbers| {
            numbers
                .into_iter()
                .filter_map(|n| usize::try_from(n.checked_sub(1)?).ok())
                .collect()
        })
}
