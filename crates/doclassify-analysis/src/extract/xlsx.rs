//! Spreadsheet extraction with calamine.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

use doclassify::UploadedDocument;

use super::backend::{ExtractionError, Extractor, ExtractorKind};

/// Flattens every sheet of an XLSX workbook into one text blob.
///
/// Each sheet starts with its name, followed by one line per non-empty row
/// with the cell values separated by two spaces. Sheets are separated by a
/// blank line. The output only feeds the classifiers.
#[derive(Debug, Default)]
pub struct SpreadsheetExtractor;

impl SpreadsheetExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for SpreadsheetExtractor {
    fn kind(&self) -> ExtractorKind {
        ExtractorKind::Spreadsheet
    }

    fn extract(&self, document: &UploadedDocument) -> Result<String, ExtractionError> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(document.content()))
            .map_err(|e| ExtractionError::Workbook(e.to_string()))?;

        let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
        let mut sheets = Vec::with_capacity(sheet_names.len());

        for sheet_name in &sheet_names {
            let range = workbook
                .worksheet_range(sheet_name)
                .map_err(|e| ExtractionError::Workbook(format!("{}: {}", sheet_name, e)))?;

            let mut lines = vec![sheet_name.clone()];
            for row in range.rows() {
                let cells: Vec<String> = row
                    .iter()
                    .filter(|cell| !matches!(cell, Data::Empty))
                    .map(|cell| cell.to_string())
                    .filter(|s| !s.trim().is_empty())
                    .collect();
                if !cells.is_empty() {
                    lines.push(cells.join("  "));
                }
            }
            sheets.push(lines.join("\n"));
        }

        Ok(sheets.join("\n\n"))
    }
}
