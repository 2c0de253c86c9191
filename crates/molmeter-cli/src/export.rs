use crate::cli::ExportFormat;
use crate::error::Result;
use molmeter::engine::store::ExportRecord;
use std::io::Write;

/// Writes the export records in `format`. JSON is a pretty-printed array;
/// CSV has a `type,value,atoms,timestamp` header row.
pub fn write_records<W: Write>(
    records: &[ExportRecord],
    format: ExportFormat,
    mut writer: W,
) -> Result<()> {
    match format {
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, records)?;
            writeln!(writer)?;
        }
        ExportFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(writer);
            for record in records {
                csv_writer.serialize(record)?;
            }
            csv_writer.flush()?;
        }
    }
    Ok(())
}
