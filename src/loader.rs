//! Reading CSV files into a [`Dataset`].
//!
//! Tokenizing is delegated to polars' CSV reader. Every column is read as a
//! string; this module only turns the resulting frame into ordered records.

use color_eyre::Result;
use polars::prelude::*;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::Instant;

use crate::dataset::{Dataset, Record};
use crate::{CompressionFormat, OpenOptions};

/// Load `path` as a dataset.
///
/// A zero-byte file, or one polars reports as having no data, gives an empty
/// dataset rather than an error.
pub fn load_dataset(path: &Path, options: &OpenOptions) -> Result<Dataset> {
    let started = Instant::now();
    if std::fs::metadata(path)?.len() == 0 {
        log::info!("{} is empty", path.display());
        return Ok(Dataset::empty());
    }

    let df = match read_frame(path, options) {
        Ok(df) => df,
        Err(PolarsError::NoData(msg)) => {
            log::info!("{} has no data: {}", path.display(), msg);
            return Ok(Dataset::empty());
        }
        Err(e) => return Err(e.into()),
    };

    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|n| n.to_string())
        .collect();
    let records = records_from_frame(&df)?;
    let dataset = Dataset::with_columns(columns, records);
    log::info!(
        "loaded {} ({} columns, {} rows) in {:?}",
        path.display(),
        dataset.columns().len(),
        dataset.num_rows(),
        started.elapsed()
    );
    Ok(dataset)
}

fn read_options(options: &OpenOptions) -> CsvReadOptions {
    let mut read_options = CsvReadOptions::default().with_infer_schema_length(Some(0));
    if let Some(has_header) = options.has_header {
        read_options.has_header = has_header;
    }
    if let Some(skip_rows) = options.skip_rows {
        read_options.skip_rows_after_header = skip_rows;
    }
    let delimiter = options.delimiter;
    read_options.map_parse_options(|opts| {
        let opts = opts
            .with_missing_is_null(true)
            .with_truncate_ragged_lines(true);
        match delimiter {
            Some(d) => opts.with_separator(d),
            None => opts,
        }
    })
}

fn read_frame(path: &Path, options: &OpenOptions) -> PolarsResult<DataFrame> {
    let read_options = read_options(options);
    let compression = options
        .compression
        .or_else(|| CompressionFormat::from_extension(path));

    match compression {
        None => read_options
            .try_into_reader_with_file_path(Some(path.into()))?
            .finish(),
        Some(compression) => {
            let decompressed = decompress(path, compression)?;
            CsvReader::new(std::io::Cursor::new(decompressed))
                .with_options(read_options)
                .finish()
        }
    }
}

fn decompress(path: &Path, compression: CompressionFormat) -> std::io::Result<Vec<u8>> {
    let file = BufReader::new(File::open(path)?);
    let mut reader: Box<dyn Read> = match compression {
        CompressionFormat::Gzip => Box::new(flate2::read::MultiGzDecoder::new(file)),
        CompressionFormat::Zstd => Box::new(zstd::Decoder::new(file)?),
        CompressionFormat::Bzip2 => Box::new(bzip2::read::BzDecoder::new(file)),
        CompressionFormat::Xz => Box::new(xz2::read::XzDecoder::new(file)),
    };
    let mut out = Vec::new();
    reader.read_to_end(&mut out)?;
    Ok(out)
}

/// Turn a frame of string columns into records, skipping blank lines.
///
/// Null cells (empty fields, or fields a short line did not have) are left out
/// of the record. A record left with no cells came from a blank line.
fn records_from_frame(df: &DataFrame) -> PolarsResult<Vec<Record>> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|n| n.to_string())
        .collect();
    let series: Vec<Series> = df
        .get_columns()
        .iter()
        .map(|c| c.as_materialized_series().cast(&DataType::String))
        .collect::<PolarsResult<_>>()?;
    let strings: Vec<&StringChunked> = series
        .iter()
        .map(|s| s.str())
        .collect::<PolarsResult<_>>()?;

    let mut records = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let record: Record = names
            .iter()
            .zip(&strings)
            .filter_map(|(name, ca)| ca.get(i).map(|v| (name.clone(), v.to_string())))
            .collect();
        if !record.is_empty() {
            records.push(record);
        }
    }
    Ok(records)
}
