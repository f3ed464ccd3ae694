use crate::Result;
use crate::activity::ActivityEntry;
use std::path::Path;

/// Header row of an exported activity log.
pub const CSV_HEADERS: [&str; 4] = ["Timestamp", "Action", "Status", "Details"];

/// Write the log as CSV with the fixed header row.
pub fn write_csv(entries: &[ActivityEntry], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    write_entries(&mut writer, entries)?;
    writer.flush()?;

    tracing::debug!(
        "Exported {} activity entries to {}",
        entries.len(),
        path.display()
    );
    Ok(())
}

/// Render the log as a CSV string.
pub fn to_csv_string(entries: &[ActivityEntry]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    write_entries(&mut writer, entries)?;
    writer.flush()?;

    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn write_entries<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    entries: &[ActivityEntry],
) -> Result<()> {
    writer.write_record(CSV_HEADERS)?;
    for entry in entries {
        writer.write_record([
            entry.timestamp.as_str(),
            entry.action.as_str(),
            entry.status.as_str(),
            entry.details.as_str(),
        ])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::{ActivityStatus, actions};

    fn entries() -> Vec<ActivityEntry> {
        vec![
            ActivityEntry {
                timestamp: "22/08/2026, 10:30:00".to_string(),
                action: actions::LOAD_AIRTABLE.to_string(),
                status: ActivityStatus::Success,
                details: "loaded 3 draft listings".to_string(),
            },
            ActivityEntry {
                timestamp: "22/08/2026, 10:31:12".to_string(),
                action: actions::COMPILE_FORM.to_string(),
                status: ActivityStatus::Error,
                details: "tricky, \"quoted\" details\nwith a newline".to_string(),
            },
        ]
    }

    #[test]
    fn test_header_row_comes_first() {
        let csv = to_csv_string(&entries()).unwrap();
        assert!(csv.starts_with("Timestamp,Action,Status,Details\n"));
    }

    #[test]
    fn test_round_trip_preserves_awkward_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        write_csv(&entries(), &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(
            reader.headers().unwrap(),
            &csv::StringRecord::from(CSV_HEADERS.to_vec())
        );

        let rows: Vec<csv::StringRecord> =
            reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "LOAD_AIRTABLE");
        assert_eq!(&rows[1][2], "error");
        assert_eq!(&rows[1][3], "tricky, \"quoted\" details\nwith a newline");
    }
}
