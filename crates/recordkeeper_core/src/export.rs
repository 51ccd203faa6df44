//! CSV documents produced by export and download actions.
//!
//! Values are joined with commas and rows with newlines, header first. There
//! is no quoting; callers export values that never contain commas.

use crate::model::report::{Report, ReportLine};
use crate::model::sale::Sale;
use log::info;
use std::io;
use std::path::{Path, PathBuf};

pub const SALES_EXPORT_FILE: &str = "sales_export.csv";
pub const SALES_HEADER: [&str; 6] = ["Date", "Item", "Customer", "Quantity", "Unit Price", "Total"];
pub const REPORT_HEADER: [&str; 4] = ["Date", "Description", "Amount", "Category"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDocument {
    pub file_name: String,
    pub content: String,
}

impl CsvDocument {
    pub fn new<R>(file_name: impl Into<String>, header: &[&str], rows: R) -> Self
    where
        R: IntoIterator<Item = Vec<String>>,
    {
        let mut lines = vec![header.join(",")];
        lines.extend(rows.into_iter().map(|row| row.join(",")));
        Self {
            file_name: file_name.into(),
            content: lines.join("\n"),
        }
    }

    /// Number of data rows, header excluded.
    pub fn row_count(&self) -> usize {
        self.content.lines().count().saturating_sub(1)
    }

    /// Writes the document as `<dir>/<file_name>`, creating `dir` if needed.
    ///
    /// # Errors
    /// - Returns the underlying I/O error when the directory or file cannot
    ///   be written.
    pub fn write_into(&self, dir: &Path) -> io::Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, self.content.as_bytes())?;
        info!(
            "event=csv_export module=export status=ok rows={} bytes={}",
            self.row_count(),
            self.content.len()
        );
        Ok(path)
    }
}

/// `sales_export.csv` with one row per sale in display order.
pub fn sales_csv<'a>(sales: impl IntoIterator<Item = &'a Sale>) -> CsvDocument {
    let rows = sales.into_iter().map(|sale| {
        vec![
            sale.sale_date.to_string(),
            sale.item_name.clone(),
            sale.customer_name.clone(),
            sale.quantity.to_string(),
            sale.unit_price.normalize().to_string(),
            sale.total().normalize().to_string(),
        ]
    });
    CsvDocument::new(SALES_EXPORT_FILE, &SALES_HEADER, rows)
}

/// Download document for one report.
pub fn report_csv(report: &Report, lines: &[ReportLine]) -> CsvDocument {
    let rows = lines.iter().map(|line| {
        vec![
            line.date.to_string(),
            line.description.clone(),
            format!("{:.2}", line.amount),
            line.category.clone(),
        ]
    });
    CsvDocument::new(report.file_name(), &REPORT_HEADER, rows)
}

#[cfg(test)]
mod tests {
    use super::CsvDocument;

    #[test]
    fn header_comes_first_and_rows_are_newline_joined() {
        let doc = CsvDocument::new(
            "out.csv",
            &["A", "B"],
            vec![vec!["1".to_string(), "2".to_string()], vec!["3".to_string(), "4".to_string()]],
        );
        assert_eq!(doc.content, "A,B\n1,2\n3,4");
        assert_eq!(doc.row_count(), 2);
    }

    #[test]
    fn header_only_document_has_no_rows() {
        let doc = CsvDocument::new("empty.csv", &["A"], Vec::<Vec<String>>::new());
        assert_eq!(doc.content, "A");
        assert_eq!(doc.row_count(), 0);
    }
}
