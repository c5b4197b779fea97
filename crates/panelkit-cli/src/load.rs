//! Reading and writing delimited files.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use panelkit::DataTable;

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

type LoadResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Load a CSV/TSV file, detecting its delimiter from the first lines.
pub fn read_table(path: &Path) -> LoadResult<DataTable> {
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()).into());
    }

    let contents = fs::read(path)?;
    let delimiter = detect_delimiter(&contents)
        .ok_or_else(|| format!("No data found in {}", path.display()))?;
    let table = parse_bytes(&contents, delimiter)?;

    tracing::debug!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.column_count(),
        delimiter = %(delimiter as char).escape_default(),
        "loaded table"
    );
    Ok(table)
}

/// Parse delimited bytes with a header row.
pub fn parse_bytes(bytes: &[u8], delimiter: u8) -> LoadResult<DataTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() {
        return Err("No columns found".into());
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(str::to_string).collect());
    }

    Ok(DataTable::new(headers, rows, delimiter)?)
}

/// Write a table using its own delimiter, to `path` or stdout.
pub fn write_table(table: &DataTable, path: Option<&Path>) -> LoadResult<()> {
    match path {
        Some(path) => {
            let file = fs::File::create(path)?;
            write_to(table, file)
        }
        None => write_to(table, io::stdout().lock()),
    }
}

fn write_to<W: Write>(table: &DataTable, out: W) -> LoadResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(table.delimiter)
        .from_writer(out);

    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Pick the delimiter that splits the first lines most consistently.
fn detect_delimiter(bytes: &[u8]) -> Option<u8> {
    let text = String::from_utf8_lossy(bytes);
    let lines: Vec<&str> = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(10)
        .collect();

    if lines.is_empty() {
        return None;
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        // Consistent counts win; tab breaks ties since it rarely appears in values.
        let score = if counts.iter().all(|&c| c == first_count) {
            first_count * 1000 + if delim == b'\t' { 100 } else { 0 }
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Some(best_delimiter)
}

/// Count delimiter occurrences in a line, ignoring quoted sections.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter(b"id,t,x\n1,1,10\n1,2,20"), Some(b','));
        assert_eq!(detect_delimiter(b"id\tt\tx\n1\t1\t10"), Some(b'\t'));
        assert_eq!(detect_delimiter(b"id;t\n1;1"), Some(b';'));
        assert_eq!(detect_delimiter(b"\n\n"), None);
    }

    #[test]
    fn test_quoted_delimiters_ignored() {
        assert_eq!(count_delimiter_in_line("\"a,b\";c;d", b','), 0);
        assert_eq!(count_delimiter_in_line("\"a,b\";c;d", b';'), 2);
    }

    #[test]
    fn test_parse_pads_short_rows() {
        let table = parse_bytes(b"id,t,x\n1,1,10\n2,1", b',').unwrap();
        assert_eq!(table.headers, vec!["id", "t", "x"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(1, 2), Some(""));
    }

    #[test]
    fn test_parse_rejects_duplicate_headers() {
        assert!(parse_bytes(b"id,id\n1,2", b',').is_err());
    }

    #[test]
    fn test_write_round_trip() {
        let table = parse_bytes(b"id\tx\na\t1.5\nb\tNA\n", b'\t').unwrap();
        let mut out = Vec::new();
        write_to(&table, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "id\tx\na\t1.5\nb\tNA\n");
    }

    #[test]
    fn test_read_and_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("panel.tsv");
        fs::write(&input, "id\tt\tx\n1\t1\t10\n1\t2\t20\n").unwrap();

        let table = read_table(&input).unwrap();
        assert_eq!(table.delimiter, b'\t');
        assert_eq!(table.column_by_name("x"), Some(vec!["10", "20"]));

        let output = dir.path().join("out.tsv");
        write_table(&table, Some(&output)).unwrap();
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "id\tt\tx\n1\t1\t10\n1\t2\t20\n"
        );

        assert!(read_table(&dir.path().join("missing.csv")).is_err());
    }
}
