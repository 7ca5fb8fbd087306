//! DOCX text extraction via docx-rs.
//!
//! Walks the document body in order. Paragraphs end with a newline, run
//! breaks become newlines and run tabs become tabs. Table rows become one
//! line each with cells separated by tabs. Tracked deletions and field
//! instructions are not part of the visible text and are skipped.

use docx_rs::{DocumentChild, Paragraph, ParagraphChild, Run, RunChild, Table};

use doclassify::UploadedDocument;

use super::backend::{ExtractionError, Extractor, ExtractorKind};
use super::scratch::ScratchFile;

/// Extracts paragraph and table text from Word documents.
#[derive(Debug, Default)]
pub struct DocxExtractor;

impl DocxExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for DocxExtractor {
    fn kind(&self) -> ExtractorKind {
        ExtractorKind::Docx
    }

    fn extract(&self, document: &UploadedDocument) -> Result<String, ExtractionError> {
        let scratch = ScratchFile::persist(document.content(), ".docx")?;
        let bytes = std::fs::read(scratch.path())?;

        let docx = docx_rs::read_docx(&bytes)
            .map_err(|e| ExtractionError::Archive(format!("Failed to parse DOCX: {}", e)))?;

        let mut text = String::new();
        for child in &docx.document.children {
            match child {
                DocumentChild::Paragraph(para) => push_paragraph(para, &mut text),
                DocumentChild::Table(table) => push_table(table, &mut text),
                _ => {}
            }
        }
        Ok(text)
    }
}

fn push_paragraph(para: &Paragraph, out: &mut String) {
    push_paragraph_children(&para.children, out);
    out.push('\n');
}

fn push_paragraph_children(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run(run, out),
            ParagraphChild::Hyperlink(link) => push_paragraph_children(&link.children, out),
            _ => {}
        }
    }
}

fn push_run(run: &Run, out: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(text) => out.push_str(&text.text),
            RunChild::Tab(_) => out.push('\t'),
            RunChild::Break(_) => out.push('\n'),
            _ => {}
        }
    }
}

fn push_table(table: &Table, out: &mut String) {
    for row in &table.rows {
        let docx_rs::TableChild::TableRow(tr) = row;
        let mut cells = Vec::with_capacity(tr.cells.len());
        for cell in &tr.cells {
            let docx_rs::TableRowChild::TableCell(tc) = cell;
            let mut cell_text = String::new();
            for content in &tc.children {
                if let docx_rs::TableCellContent::Paragraph(para) = content {
                    if !cell_text.is_empty() {
                        cell_text.push(' ');
                    }
                    push_paragraph_children(&para.children, &mut cell_text);
                }
            }
            cells.push(cell_text);
        }
        out.push_str(&cells.join("\t"));
        out.push('\n');
    }
}
