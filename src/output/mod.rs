// mod.rs - Output formatters module

use crate::core::matrix::Matrix;
use crate::data::location::LocationRow;
use crate::error::{MsaError, Result};
use log::info;
use serde::Serialize;
use std::fmt::Display;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Matrix output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Tsv,
    Csv,
    Phylip,
    Json,
}

impl FromStr for OutputFormat {
    type Err = MsaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "tsv" => Ok(OutputFormat::Tsv),
            "csv" => Ok(OutputFormat::Csv),
            "phylip" => Ok(OutputFormat::Phylip),
            "json" => Ok(OutputFormat::Json),
            _ => Err(MsaError::config(format!(
                "Unsupported output format: {}. Use: tsv, csv, phylip, json",
                s
            ))),
        }
    }
}

/// Row and column labels for a matrix
#[derive(Debug, Clone, Copy)]
pub struct Labels<'a> {
    pub rows: &'a [&'a str],
    pub cols: &'a [&'a str],
    /// Name of the top-left header cell
    pub corner: &'a str,
}

#[derive(Serialize)]
struct JsonMatrix<'a, T: Serialize> {
    command: &'a str,
    generated: String,
    version: &'static str,
    row_labels: &'a [&'a str],
    col_labels: &'a [&'a str],
    values: Vec<Vec<T>>,
}

fn write_err(e: std::io::Error) -> MsaError {
    MsaError::Output(format!("Write error: {}", e))
}

fn timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent).map_err(|e| MsaError::io(parent, e))?;
        }
    }
    Ok(())
}

fn check_shape<T>(labels: &Labels<'_>, matrix: &Matrix<T>) -> Result<()> {
    if labels.rows.len() != matrix.rows() || labels.cols.len() != matrix.cols() {
        return Err(MsaError::Output(format!(
            "label count {}x{} does not match matrix shape {}x{}",
            labels.rows.len(),
            labels.cols.len(),
            matrix.rows(),
            matrix.cols()
        )));
    }
    Ok(())
}

fn write_delimited<W: Write, T: Display>(
    writer: &mut W,
    sep: char,
    labels: &Labels<'_>,
    matrix: &Matrix<T>,
    command_line: &str,
) -> Result<()> {
    writeln!(writer, "# Command: {}", command_line).map_err(write_err)?;
    writeln!(writer, "# Generated: {}", timestamp()).map_err(write_err)?;
    writeln!(writer, "# msadist v{}", env!("CARGO_PKG_VERSION")).map_err(write_err)?;

    write!(writer, "{}", labels.corner).map_err(write_err)?;
    for label in labels.cols {
        write!(writer, "{}{}", sep, label).map_err(write_err)?;
    }
    writeln!(writer).map_err(write_err)?;

    for (label, row) in labels.rows.iter().zip(matrix.iter_rows()) {
        write!(writer, "{}", label).map_err(write_err)?;
        for value in row {
            write!(writer, "{}{}", sep, value).map_err(write_err)?;
        }
        writeln!(writer).map_err(write_err)?;
    }
    Ok(())
}

/// PHYLIP lower triangle, read from the populated upper triangle of a
/// square matrix
fn write_phylip<W: Write, T: Display>(
    writer: &mut W,
    labels: &Labels<'_>,
    matrix: &Matrix<T>,
    command_line: &str,
) -> Result<()> {
    if matrix.rows() != matrix.cols() {
        return Err(MsaError::Output(format!(
            "PHYLIP needs a square matrix, got {}x{}",
            matrix.rows(),
            matrix.cols()
        )));
    }

    writeln!(writer, "    {}", matrix.rows()).map_err(write_err)?;
    for (i, label) in labels.rows.iter().enumerate() {
        write!(writer, "{:<10}", label).map_err(write_err)?;
        for j in 0..=i {
            write!(writer, "  {}", matrix[(j, i)]).map_err(write_err)?;
        }
        writeln!(writer).map_err(write_err)?;
    }

    // Trailing comments; PHYLIP readers stop after the matrix
    writeln!(writer).map_err(write_err)?;
    writeln!(writer, "# Command: {}", command_line).map_err(write_err)?;
    writeln!(writer, "# Generated: {}", timestamp()).map_err(write_err)?;
    writeln!(writer, "# msadist v{}", env!("CARGO_PKG_VERSION")).map_err(write_err)?;
    Ok(())
}

fn write_json<W: Write, T: Serialize + Clone>(
    writer: &mut W,
    labels: &Labels<'_>,
    matrix: &Matrix<T>,
    command_line: &str,
) -> Result<()> {
    let doc = JsonMatrix {
        command: command_line,
        generated: timestamp(),
        version: env!("CARGO_PKG_VERSION"),
        row_labels: labels.rows,
        col_labels: labels.cols,
        values: matrix.to_rows(),
    };
    serde_json::to_writer_pretty(&mut *writer, &doc)
        .map_err(|e| MsaError::Output(format!("Failed to serialize matrix: {}", e)))?;
    writeln!(writer).map_err(write_err)?;
    Ok(())
}

/// Write a labelled matrix to any writer
pub fn write_matrix_to<W: Write, T: Display + Serialize + Clone>(
    writer: &mut W,
    format: OutputFormat,
    labels: &Labels<'_>,
    matrix: &Matrix<T>,
    command_line: &str,
) -> Result<()> {
    check_shape(labels, matrix)?;
    match format {
        OutputFormat::Tsv => write_delimited(writer, '\t', labels, matrix, command_line),
        OutputFormat::Csv => write_delimited(writer, ',', labels, matrix, command_line),
        OutputFormat::Phylip => write_phylip(writer, labels, matrix, command_line),
        OutputFormat::Json => write_json(writer, labels, matrix, command_line),
    }
}

/// Write a labelled matrix to `file_path` in the specified format
pub fn write_matrix<T: Display + Serialize + Clone>(
    file_path: &Path,
    format: OutputFormat,
    labels: &Labels<'_>,
    matrix: &Matrix<T>,
    command_line: &str,
) -> Result<()> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path).map_err(|e| MsaError::io(file_path, e))?;
    let mut writer = BufWriter::new(file);
    write_matrix_to(&mut writer, format, labels, matrix, command_line)?;
    writer
        .flush()
        .map_err(|e| MsaError::Output(format!("Flush error: {}", e)))?;
    info!("Matrix written to: {}", file_path.display());
    Ok(())
}

/// TSV with one row per record: id, location, then one column per hierarchy level
pub fn write_location_table_to<W: Write>(
    writer: &mut W,
    rows: &[LocationRow],
    command_line: &str,
) -> Result<()> {
    writeln!(writer, "# Command: {}", command_line).map_err(write_err)?;
    writeln!(writer, "# Generated: {}", timestamp()).map_err(write_err)?;
    writeln!(writer, "# msadist v{}", env!("CARGO_PKG_VERSION")).map_err(write_err)?;
    writeln!(writer, "id\tlocation\tcontinent\tcountry\tstate\tcity\tdistrict").map_err(write_err)?;
    for row in rows {
        let loc = &row.parsed;
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            row.id,
            row.location,
            loc.continent(),
            loc.country(),
            loc.state(),
            loc.city(),
            loc.district()
        )
        .map_err(write_err)?;
    }
    Ok(())
}

pub fn write_location_table(file_path: &Path, rows: &[LocationRow], command_line: &str) -> Result<()> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path).map_err(|e| MsaError::io(file_path, e))?;
    let mut writer = BufWriter::new(file);
    write_location_table_to(&mut writer, rows, command_line)?;
    writer
        .flush()
        .map_err(|e| MsaError::Output(format!("Flush error: {}", e)))?;
    info!("Location table written to: {}", file_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::alignment::Step;

    fn render<T: Display + Serialize + Clone>(
        format: OutputFormat,
        labels: &Labels<'_>,
        matrix: &Matrix<T>,
    ) -> String {
        let mut buf = Vec::new();
        write_matrix_to(&mut buf, format, labels, matrix, "msadist test").unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn sample() -> Matrix<usize> {
        Matrix::from_rows(vec![vec![0, 1, 4], vec![0, 0, 3], vec![0, 0, 0]]).unwrap()
    }

    const IDS: [&str; 3] = ["s1", "s2", "s3"];

    #[test]
    fn test_tsv() {
        let labels = Labels { rows: &IDS, cols: &IDS, corner: "Sample" };
        let text = render(OutputFormat::Tsv, &labels, &sample());
        let body: Vec<&str> = text.lines().filter(|l| !l.starts_with('#')).collect();
        assert_eq!(body[0], "Sample\ts1\ts2\ts3");
        assert_eq!(body[1], "s1\t0\t1\t4");
        assert_eq!(body[3], "s3\t0\t0\t0");
    }

    #[test]
    fn test_csv() {
        let labels = Labels { rows: &IDS, cols: &IDS, corner: "Sample" };
        let text = render(OutputFormat::Csv, &labels, &sample());
        assert!(text.contains("s2,0,0,3"));
    }

    #[test]
    fn test_phylip_mirrors_upper_triangle() {
        let labels = Labels { rows: &IDS, cols: &IDS, corner: "" };
        let text = render(OutputFormat::Phylip, &labels, &sample());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0].trim(), "3");
        assert_eq!(lines[2], "s2          1  0");
        assert_eq!(lines[3], "s3          4  3  0");
    }

    #[test]
    fn test_phylip_rejects_rectangular() {
        let m: Matrix<usize> = Matrix::new(1, 2);
        let labels = Labels { rows: &["a"], cols: &["b", "c"], corner: "" };
        let mut buf = Vec::new();
        let err = write_matrix_to(&mut buf, OutputFormat::Phylip, &labels, &m, "").unwrap_err();
        assert!(matches!(err, MsaError::Output(_)));
    }

    #[test]
    fn test_json_traceback() {
        let mut m: Matrix<Step> = Matrix::new(2, 2);
        m[(1, 1)] = Step::Diagonal;
        let labels = Labels { rows: &["-", "A"], cols: &["-", "A"], corner: "" };
        let text = render(OutputFormat::Json, &labels, &m);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["values"][1][1], "Diagonal");
        assert_eq!(value["row_labels"][1], "A");
    }

    #[test]
    fn test_label_mismatch() {
        let labels = Labels { rows: &["a"], cols: &IDS, corner: "" };
        let mut buf = Vec::new();
        assert!(write_matrix_to(&mut buf, OutputFormat::Tsv, &labels, &sample(), "").is_err());
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("TSV".parse::<OutputFormat>().unwrap(), OutputFormat::Tsv);
        assert!(matches!("nexus".parse::<OutputFormat>(), Err(MsaError::Configuration(_))));
    }

    #[test]
    fn test_write_matrix_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.tsv");
        let labels = Labels { rows: &IDS, cols: &IDS, corner: "Sample" };
        write_matrix(&path, OutputFormat::Tsv, &labels, &sample(), "cmd").unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("# Command: cmd"));
    }

    #[test]
    fn test_location_table() {
        use crate::data::location::{split_location, Location, LOCATION_DEPTH};

        let rows = vec![
            LocationRow {
                id: "s1".to_string(),
                location: "Asia/Singapore".to_string(),
                parsed: split_location("Asia/Singapore", LOCATION_DEPTH),
            },
            LocationRow {
                id: "s2".to_string(),
                location: "*".to_string(),
                parsed: Location::unknown(LOCATION_DEPTH),
            },
        ];
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meta").join("run.locations.tsv");
        write_location_table(&path, &rows, "msadist test").unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let body: Vec<&str> = text.lines().filter(|l| !l.starts_with('#')).collect();
        assert_eq!(body[0], "id\tlocation\tcontinent\tcountry\tstate\tcity\tdistrict");
        assert_eq!(body[1], "s1\tAsia/Singapore\tAsia\tSingapore\t*\t*\t*");
        assert_eq!(body[2], "s2\t*\t*\t*\t*\t*\t*");
    }
}
