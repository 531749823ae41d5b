use crate::output::format::OutputResult;
use crate::record::{ProductRecord, RecordCollection, COLUMNS};
use std::io::{Read, Write};

/// Writes the header row and one row per record
///
/// The header is written even for an empty collection.
pub fn write_csv<W: Write>(records: &RecordCollection, writer: W) -> OutputResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}

/// Reads records from CSV with a header row
pub fn read_csv<R: Read>(reader: R) -> OutputResult<RecordCollection> {
    let mut reader = csv::Reader::from_reader(reader);
    let records = reader
        .deserialize::<ProductRecord>()
        .collect::<Result<RecordCollection, csv::Error>>()?;
    Ok(records)
}
