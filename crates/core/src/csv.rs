//! Minimal CSV writer for export endpoints.

/// Escape a value for CSV: wrap in quotes if it contains comma, quote, or newline.
pub fn escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Accumulates CSV rows into a `String`, one `\n`-terminated line per row.
#[derive(Debug, Default)]
pub struct CsvWriter {
    buf: String,
}

impl CsvWriter {
    /// Start a document with the given header row.
    pub fn with_header(columns: &[&str]) -> Self {
        let mut writer = Self::default();
        writer.push_row(columns.iter().copied());
        writer
    }

    pub fn push_row<I, S>(&mut self, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let line: Vec<String> = fields.into_iter().map(|f| escape(f.as_ref())).collect();
        self.buf.push_str(&line.join(","));
        self.buf.push('\n');
    }

    pub fn finish(self) -> String {
        self.buf
    }
}
