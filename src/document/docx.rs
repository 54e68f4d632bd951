use std::fs;
use std::path::Path;

use docx_rs::{
    read_docx, DocumentChild, Paragraph, ParagraphChild, RunChild, Table, TableCellContent,
    TableChild, TableRowChild,
};

use super::ExtractError;

pub fn extract(path: &Path) -> Result<String, ExtractError> {
    let buffer = fs::read(path)?;
    let document = read_docx(&buffer).map_err(|err| ExtractError::ReadFailed(err.to_string()))?;

    let mut text = String::new();
    for child in &document.document.children {
        match child {
            DocumentChild::Paragraph(p) => push_paragraph(&mut text, p),
            DocumentChild::Table(t) => push_table(&mut text, t),
            _ => {}
        }
    }

    Ok(text)
}

fn push_paragraph(text: &mut String, paragraph: &Paragraph) {
    push_runs(text, &paragraph.children);
    text.push('\n');
}

fn push_runs(text: &mut String, children: &[ParagraphChild]) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for node in &run.children {
                    match node {
                        RunChild::Text(t) => text.push_str(&t.text),
                        RunChild::Tab(_) => text.push('\t'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => push_runs(text, &link.children),
            _ => {}
        }
    }
}

// Cells are visited row by row, each cell paragraph on its own line.
fn push_table(text: &mut String, table: &Table) {
    for row in &table.rows {
        let TableChild::TableRow(row) = row;
        for cell in &row.cells {
            let TableRowChild::TableCell(cell) = cell;
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(p) => push_paragraph(text, p),
                    TableCellContent::Table(t) => push_table(text, t),
                    _ => {}
                }
            }
        }
    }
}
