use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use polars::prelude::{Column as FrameColumn, DataFrame, ParquetWriter, PolarsError, PolarsResult};

use crate::table::{Column, Table, Tables};

fn io_error(error: std::io::Error) -> PolarsError {
    PolarsError::IO {
        error: error.into(),
        msg: None,
    }
}

impl Table {
    /// One polars column per captured field, in field-name order.
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let columns = self
            .columns()
            .map(|(name, column)| match column {
                Column::U64(v) => FrameColumn::new(name.into(), v),
                Column::I64(v) => FrameColumn::new(name.into(), v),
                Column::F64(v) => FrameColumn::new(name.into(), v),
                Column::Bool(v) => FrameColumn::new(name.into(), v),
                Column::Text(v) => FrameColumn::new(name.into(), v),
            })
            .collect();
        DataFrame::new(columns)
    }
}

impl Tables {
    pub fn to_frames(&self) -> PolarsResult<BTreeMap<String, DataFrame>> {
        self.iter()
            .map(|(name, table)| Ok((name.to_string(), table.to_frame()?)))
            .collect()
    }
}

/// Write each frame to `{dir}/{name}.parquet`, creating `dir` as needed.
pub fn save_parquet(frames: &mut BTreeMap<String, DataFrame>, dir: &Path) -> PolarsResult<()> {
    std::fs::create_dir_all(dir).map_err(io_error)?;
    for (name, frame) in frames.iter_mut() {
        let file = File::create(dir.join(format!("{name}.parquet"))).map_err(io_error)?;
        ParquetWriter::new(file).finish(frame)?;
    }
    Ok(())
}
