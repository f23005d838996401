use crate::errors::AppResult;
use crate::models::record::Record;
use csv::Writer;
use std::path::Path;

/// Scrive i record in CSV: una colonna per campo, valori come in tabella.
pub fn write_csv<R: Record>(path: &Path, records: &[R]) -> AppResult<()> {
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record(R::columns())?;

    for record in records {
        let row: Vec<String> = R::columns()
            .iter()
            .map(|c| record.field(c).unwrap_or_default())
            .collect();
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}
