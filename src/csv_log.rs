use crate::types::{Reading, CSV_HEADER};
use anyhow::{Context, Result};
use csv::{Writer, WriterBuilder};
use log::info;
use std::fs::{File, OpenOptions};
use std::path::Path;

/// Append-only CSV sink for readings. The header row is written exactly
/// once, when the file is empty at open time; reopening an existing log
/// appends data rows only. The underlying writer flushes any buffered
/// output when dropped.
pub struct CsvLog {
    writer: Writer<File>,
}

impl CsvLog {
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file: {}", path.display()))?;

        let is_empty = file
            .metadata()
            .with_context(|| format!("Failed to stat log file: {}", path.display()))?
            .len()
            == 0;

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

        if is_empty {
            writer
                .write_record(CSV_HEADER)
                .context("Failed to write header row")?;
            writer.flush().context("Failed to flush header row")?;
            info!("Wrote header row to new log file: {}", path.display());
        }

        Ok(Self { writer })
    }

    /// Append one 7-field row and flush it so the row is durable before the
    /// next message is awaited.
    pub fn append(&mut self, reading: &Reading) -> Result<()> {
        self.writer
            .write_record(reading.record())
            .context("Failed to write data row")?;
        self.writer.flush().context("Failed to flush data row")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PLACEHOLDER;
    use std::collections::HashMap;
    use std::fs;

    fn reading_with_voltage(voltage: &str) -> Reading {
        let mut fields = HashMap::new();
        fields.insert("voltage".to_string(), voltage.to_string());
        Reading::from_fields(chrono::Local::now(), &fields)
    }

    #[test]
    fn test_header_written_to_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pzem_data.csv");

        let mut log = CsvLog::open(&path).unwrap();
        log.append(&reading_with_voltage("230")).unwrap();
        drop(log);

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "Timestamp,Voltage,Current,Power,Energy,Frequency,Power Factor"
        );
    }

    #[test]
    fn test_header_not_duplicated_on_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pzem_data.csv");

        {
            let mut log = CsvLog::open(&path).unwrap();
            log.append(&reading_with_voltage("230")).unwrap();
        }
        {
            let mut log = CsvLog::open(&path).unwrap();
            log.append(&reading_with_voltage("231")).unwrap();
        }

        let contents = fs::read_to_string(&path).unwrap();
        let header_count = contents.lines().filter(|l| l.starts_with("Timestamp")).count();
        assert_eq!(header_count, 1);
        assert_eq!(contents.lines().count(), 3);
    }

    #[test]
    fn test_rows_have_seven_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pzem_data.csv");

        let mut log = CsvLog::open(&path).unwrap();
        log.append(&reading_with_voltage("230")).unwrap();
        drop(log);

        let contents = fs::read_to_string(&path).unwrap();
        let row = contents.lines().nth(1).unwrap();
        let cells: Vec<&str> = row.split(',').collect();
        assert_eq!(cells.len(), 7);
        assert_eq!(cells[1], "230");
        assert_eq!(cells[2], PLACEHOLDER);
    }
}
