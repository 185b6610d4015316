//! Receipt layout for a print list.
//!
//! Layout, top to bottom:
//!
//! ```text
//!      Lista de Tarefas          centered, bold, double height
//!      05/01/2024 09:30          centered, normal weight
//! [ ] first task                 left, condensed font from here on
//! [ ] Ruim   [ ] Médio   [ ] Bom  only under tasks flagged for evaluation
//! ...
//!                                trailing blank line
//! ---- cut ----
//! ```

use chrono::NaiveDateTime;
use taskslip_proto::print::{PrintList, RATING_LINE};
use taskslip_proto::receipt::{Align, Font, ReceiptCommand, Style};

/// Receipt title line.
pub const TITLE: &str = "Lista de Tarefas";

/// `chrono` format of the timestamp line (`DD/MM/YYYY HH:MM`, 24-hour).
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Prefix of every task line.
const CHECKBOX: &str = "[ ] ";

/// Lays out print lists as receipt command sequences.
pub struct ReceiptFormatter;

impl ReceiptFormatter {
    /// Formats `list` printed at `timestamp`.
    ///
    /// Does not reject an empty list: header, timestamp, blank line and cut
    /// are always emitted. Refusing to print nothing is the caller's call.
    #[must_use]
    pub fn format(list: &PrintList, timestamp: NaiveDateTime) -> Vec<ReceiptCommand> {
        let mut commands = Vec::with_capacity(6 + list.len() * 2);

        commands.push(ReceiptCommand::SetStyle(
            Style::plain().aligned(Align::Center).bold().double_height(),
        ));
        commands.push(ReceiptCommand::line(TITLE));

        commands.push(ReceiptCommand::SetStyle(
            Style::plain().aligned(Align::Center),
        ));
        commands.push(ReceiptCommand::Line(
            timestamp.format(TIMESTAMP_FORMAT).to_string(),
        ));

        commands.push(ReceiptCommand::SetStyle(Style::plain().with_font(Font::B)));
        for item in list {
            commands.push(ReceiptCommand::Line(format!("{CHECKBOX}{}", item.task)));
            if item.evaluate {
                commands.push(ReceiptCommand::line(RATING_LINE));
            }
        }

        commands.push(ReceiptCommand::line(""));
        commands.push(ReceiptCommand::Cut);
        commands
    }
}
