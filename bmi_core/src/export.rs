//! CSV export of the calculation history.

use crate::{BmiRecord, Result};
use std::io::Write;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    timestamp: i64,
    date: String,
    bmi: f64,
    category: String,
    weight: f64,
    height: f64,
    unit: String,
}

impl<'a> From<&'a BmiRecord> for CsvRow<'a> {
    fn from(record: &'a BmiRecord) -> Self {
        CsvRow {
            id: &record.id,
            timestamp: record.timestamp,
            date: record.local_date(),
            bmi: record.bmi,
            category: record.category.to_string(),
            weight: record.weight,
            height: record.height,
            unit: record.unit.to_string(),
        }
    }
}

/// Write `records` as CSV with a header row; returns the number of rows
pub fn write_csv<W: Write>(records: &[BmiRecord], writer: W) -> Result<usize> {
    let mut writer = csv::WriterBuilder::new().has_headers(true).from_writer(writer);

    for record in records {
        writer.serialize(CsvRow::from(record))?;
    }
    // An empty export still gets a header row
    if records.is_empty() {
        writer.write_record([
            "id", "timestamp", "date", "bmi", "category", "weight", "height", "unit",
        ])?;
    }

    writer.flush()?;
    Ok(records.len())
}

/// Export `records` to a CSV file at `path`, replacing any existing file
pub fn export_csv(records: &[BmiRecord], path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = std::fs::File::create(path)?;
    let count = write_csv(records, std::io::BufWriter::new(&file))?;
    file.sync_all()?;

    tracing::info!("Exported {} record(s) to {:?}", count, path);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{engine, Measurement};
    use chrono::Utc;

    fn record(measurement: Measurement) -> BmiRecord {
        BmiRecord::new(&measurement, &engine::calculate(&measurement), Utc::now())
    }

    #[test]
    fn test_write_csv_rows_in_order() {
        let records = vec![
            record(Measurement::Imperial {
                weight_lb: 154.0,
                height_ft: 5.0,
                height_in: 9.0,
            }),
            record(Measurement::Metric {
                weight_kg: 70.0,
                height_cm: 175.0,
            }),
        ];

        let mut out = Vec::new();
        let count = write_csv(&records, &mut out).unwrap();
        assert_eq!(count, 2);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "id,timestamp,date,bmi,category,weight,height,unit");
        assert!(lines[1].contains("22.7,Normal,154.0,69.0,Imperial"));
        assert!(lines[2].contains("22.9,Normal,70.0,175.0,Metric"));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_empty_export_has_header_only() {
        let mut out = Vec::new();
        assert_eq!(write_csv(&[], &mut out).unwrap(), 0);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.trim_end(), "id,timestamp,date,bmi,category,weight,height,unit");
    }

    #[test]
    fn test_export_csv_creates_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("out").join("history.csv");
        let records = vec![record(Measurement::Metric {
            weight_kg: 45.0,
            height_cm: 170.0,
        })];

        assert_eq!(export_csv(&records, &path).unwrap(), 1);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Underweight"));
    }
}
