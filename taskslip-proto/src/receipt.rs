//! Device-independent receipt command model.
//!
//! A receipt is a flat sequence of [`ReceiptCommand`]s: style changes,
//! text lines and a final cut. The sequence is what the formatter produces
//! and what tests assert on; [`crate::escpos`] turns it into printer bytes.

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Flush left.
    #[default]
    Left,
    /// Centered on the paper width.
    Center,
}

/// Printer character font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Font {
    /// Standard font.
    #[default]
    A,
    /// Condensed font.
    B,
}

/// Text style applied to all following lines until the next style change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Alignment of following lines.
    pub align: Align,
    /// Emphasized (bold) printing.
    pub bold: bool,
    /// Double character height.
    pub double_height: bool,
    /// Character font.
    pub font: Font,
}

impl Style {
    /// Left aligned, normal weight, standard font.
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            align: Align::Left,
            bold: false,
            double_height: false,
            font: Font::A,
        }
    }

    /// Returns this style with the given alignment.
    #[must_use]
    pub const fn aligned(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Returns this style with bold switched on.
    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Returns this style with double height switched on.
    #[must_use]
    pub const fn double_height(mut self) -> Self {
        self.double_height = true;
        self
    }

    /// Returns this style with the given font.
    #[must_use]
    pub const fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }
}

/// A single printer instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiptCommand {
    /// Switch the active text style.
    SetStyle(Style),
    /// Print one line of text. An empty string feeds a blank line.
    Line(String),
    /// Feed and cut the paper.
    Cut,
}

impl ReceiptCommand {
    /// Convenience constructor for a text line.
    pub fn line(text: impl Into<String>) -> Self {
        Self::Line(text.into())
    }
}
