//! Header-keyed view over delimited text.
//!
//! Ingestion is best effort: unreadable input produces an empty table and
//! unreadable rows are dropped. Nothing here returns an error.

use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn parse(text: &str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = match reader.headers() {
            Ok(h) => h.iter().map(str::to_string).collect(),
            Err(e) => {
                debug!("unreadable header row: {e}");
                return Self::default();
            }
        };
        if headers.iter().all(|h| h.is_empty()) {
            return Self::default();
        }

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            match record {
                Ok(r) => rows.push(r.iter().map(str::to_string).collect()),
                Err(e) => debug!("skipping row {}: {e}", index + 1),
            }
        }

        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Index of the first column with exactly this header.
    pub fn column(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        self.rows.iter().map(|cells| Row { cells })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    cells: &'a [String],
}

impl<'a> Row<'a> {
    /// Cell text at `column`, or `None` when the row is short.
    pub fn get(&self, column: Option<usize>) -> Option<&'a str> {
        column.and_then(|i| self.cells.get(i)).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::Table;

    #[test]
    fn empty_and_headerless_input_is_empty() {
        assert!(Table::parse("").is_empty());
        assert!(Table::parse("").headers().is_empty());
        assert!(Table::parse("\n\n").headers().is_empty());
    }

    #[test]
    fn short_rows_are_kept_and_read_as_missing() {
        let t = Table::parse("a,b,c\n1,2\n\n4,5,6\n");
        assert_eq!(t.len(), 2);
        let rows: Vec<_> = t.rows().collect();
        assert_eq!(rows[0].get(t.column("c")), None);
        assert_eq!(rows[1].get(t.column("c")), Some("6"));
        assert_eq!(rows[0].get(t.column("missing")), None);
    }

    #[test]
    fn quoted_cells_keep_commas() {
        let t = Table::parse("Country,Rate\n\"Korea, Republic of\",24\n");
        let row = t.rows().next().unwrap();
        assert_eq!(row.get(t.column("Country")), Some("Korea, Republic of"));
    }

    #[test]
    fn byte_order_mark_is_ignored() {
        let t = Table::parse("\u{feff}Country,Rate\nChad,35\n");
        assert_eq!(t.column("Country"), Some(0));
    }
}
