//! Output formatting for CLI commands.
//!
//! Supports table (human-readable) and JSON output formats.

use std::io::Write;

use console_pki::CertificateBinding;
use console_tenancy::{Organization, Project, SelectionSummary, Workspace};
use serde::Serialize;

use crate::cli::Format;
use crate::error::CliError;

/// Output formatter that handles both table and JSON output.
#[derive(Debug, Clone)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Create a new output formatter.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Get the current format.
    #[must_use]
    pub const fn format(&self) -> Format {
        self.format
    }

    /// Check if JSON format is selected.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self.format, Format::Json)
    }

    /// Write a serializable value to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write<W, T>(&self, writer: &mut W, value: &T) -> Result<(), CliError>
    where
        W: Write,
        T: Serialize + TableDisplay,
    {
        match self.format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, value)
                    .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
                writeln!(writer)?;
            }
            Format::Table => {
                value.write_table(writer)?;
            }
        }
        Ok(())
    }

    /// Write a serializable value to a string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_string<T>(&self, value: &T) -> Result<String, CliError>
    where
        T: Serialize + TableDisplay,
    {
        let mut buf = Vec::new();
        self.write(&mut buf, value)?;
        String::from_utf8(buf).map_err(|e| CliError::Format(format!("UTF-8 error: {e}")))
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::new(Format::Table)
    }
}

/// Trait for types that can be displayed as a table.
pub trait TableDisplay {
    /// Write the value as a human-readable table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError>;
}

impl TableDisplay for Vec<Organization> {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.is_empty() {
            writeln!(writer, "No Organizations found")?;
            return Ok(());
        }
        let rows: Vec<[&str; 3]> = self
            .iter()
            .map(|org| [org.id.as_str(), org.code.as_str(), org.name.as_str()])
            .collect();
        write_rows(writer, ["ORG ID", "CODE", "ORG NAME"], &rows)?;
        writeln!(writer)?;
        writeln!(writer, "Total: {} organization(s)", self.len())?;
        Ok(())
    }
}

impl TableDisplay for Vec<Project> {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.is_empty() {
            writeln!(writer, "No Projects found")?;
            return Ok(());
        }
        let rows: Vec<[&str; 3]> = self
            .iter()
            .map(|p| [p.id.as_str(), p.name.as_str(), p.title.as_str()])
            .collect();
        write_rows(writer, ["ID", "NAME", "TITLE"], &rows)?;
        writeln!(writer)?;
        writeln!(writer, "Total: {} project(s)", self.len())?;
        Ok(())
    }
}

impl TableDisplay for Vec<Workspace> {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.is_empty() {
            writeln!(writer, "No Workspaces found")?;
            return Ok(());
        }
        let rows: Vec<[&str; 2]> = self
            .iter()
            .map(|ws| [ws.id.as_str(), ws.name.as_str()])
            .collect();
        write_rows(writer, ["ID", "NAME"], &rows)?;
        writeln!(writer)?;
        writeln!(writer, "Total: {} workspace(s)", self.len())?;
        Ok(())
    }
}

impl TableDisplay for Vec<CertificateBinding> {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.is_empty() {
            writeln!(writer, "No certificate bindings")?;
            return Ok(());
        }
        let expires: Vec<String> = self.iter().map(CertificateBinding::expires_display).collect();
        let rows: Vec<[&str; 3]> = self
            .iter()
            .zip(&expires)
            .map(|(b, exp)| [b.binding_id.as_str(), b.certificate_fingerprint.as_str(), exp.as_str()])
            .collect();
        write_rows(writer, ["ID", "FINGERPRINT", "EXPIRES"], &rows)?;
        Ok(())
    }
}

impl TableDisplay for SelectionSummary {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "You are currently in:")?;
        writeln!(writer, "  Organization:   {}", self.org)?;
        writeln!(writer, "  Project:        {}", self.project)?;
        writeln!(writer, "  Workspace:      {}", self.workspace)?;
        Ok(())
    }
}

/// Simple message output.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    /// Message text.
    pub message: String,
    /// Whether this is a success message.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub success: bool,
}

impl Message {
    /// Create a success message.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    /// Create an informational message.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}

impl TableDisplay for Message {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.success {
            writeln!(writer, "✓ {}", self.message)?;
        } else {
            writeln!(writer, "{}", self.message)?;
        }
        Ok(())
    }
}

/// Writes a header, a rule and left-aligned rows, each column as wide as
/// its widest cell.
fn write_rows<W: Write, const N: usize>(
    writer: &mut W,
    header: [&str; N],
    rows: &[[&str; N]],
) -> Result<(), CliError> {
    let mut widths = header.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(writer, &header, &widths)?;
    let rule = widths.iter().sum::<usize>() + 2 * N.saturating_sub(1);
    writeln!(writer, "{}", "─".repeat(rule))?;
    for row in rows {
        write_row(writer, row, &widths)?;
    }
    Ok(())
}

fn write_row<W: Write>(writer: &mut W, cells: &[&str], widths: &[usize]) -> Result<(), CliError> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(writer, "{}", line.trim_end())?;
    Ok(())
}
