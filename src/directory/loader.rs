//! Downloads and caches the Meteostat station directory.

use crate::directory::error::DirectoryError;
use crate::types::station::directory_schema;
use async_compression::tokio::bufread::GzipDecoder;
use futures_util::TryStreamExt;
use log::{info, warn};
use polars::prelude::*;
use reqwest::Client;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::NamedTempFile;
use tokio::io::{AsyncReadExt, BufReader};
use tokio::{fs, task};
use tokio_util::io::StreamReader;

const DIRECTORY_URL: &str = "https://bulk.meteostat.net/v2/stations/lib.csv.gz";
pub(crate) const CACHE_FILE_NAME: &str = "stations_lib.parquet";

/// Fetches the full station directory, keeping a parquet copy of the parsed
/// table next to it so later loads skip the download entirely.
pub(crate) struct DirectoryLoader {
    cache_dir: PathBuf,
    max_age: Duration,
    n_threads: usize,
    client: Client,
}

impl DirectoryLoader {
    pub(crate) fn new(cache_dir: PathBuf, max_age: Duration, n_threads: usize) -> Self {
        Self {
            cache_dir,
            max_age,
            n_threads: n_threads.max(1),
            client: Client::new(),
        }
    }

    /// Returns the full station directory, reading the parquet cache when it
    /// is fresh enough and downloading otherwise.
    pub(crate) async fn load(&self) -> Result<DataFrame, DirectoryError> {
        let cache_file = self.cache_dir.join(CACHE_FILE_NAME);

        if self.cache_is_fresh(&cache_file).await? {
            info!("Station directory cache hit at {:?}", cache_file);
            return Self::read_cached_frame(&cache_file).await;
        }

        warn!(
            "Station directory cache miss or stale. Downloading {}",
            DIRECTORY_URL
        );
        let raw = self.download().await?;
        let frame = Self::csv_to_dataframe(raw, self.n_threads).await?;
        Self::cache_dataframe(frame.clone(), &cache_file).await?;
        info!(
            "Cached station directory ({} stations) to {:?}",
            frame.height(),
            cache_file
        );
        Ok(frame)
    }

    async fn cache_is_fresh(&self, path: &Path) -> Result<bool, DirectoryError> {
        let metadata = match fs::metadata(path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(DirectoryError::CacheMetadataRead(path.to_path_buf(), e)),
        };
        let modified = metadata
            .modified()
            .map_err(|e| DirectoryError::CacheMetadataRead(path.to_path_buf(), e))?;
        let age = modified
            .elapsed()
            .map_err(|e| DirectoryError::CacheAge(path.to_path_buf(), e))?;
        Ok(age <= self.max_age)
    }

    async fn read_cached_frame(path: &Path) -> Result<DataFrame, DirectoryError> {
        let path_buf = path.to_path_buf();
        task::spawn_blocking(move || {
            LazyFrame::scan_parquet(&path_buf, Default::default())
                .map_err(|e| DirectoryError::ParquetScan(path_buf.clone(), e))?
                .collect()
                .map_err(|e| DirectoryError::ParquetScan(path_buf, e))
        })
        .await?
    }

    async fn download(&self) -> Result<Vec<u8>, DirectoryError> {
        let response = self
            .client
            .get(DIRECTORY_URL)
            .send()
            .await
            .map_err(|e| DirectoryError::NetworkRequest(DIRECTORY_URL.to_string(), e))?;
        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                return Err(if let Some(status) = e.status() {
                    DirectoryError::HttpStatus {
                        url: DIRECTORY_URL.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    DirectoryError::NetworkRequest(DIRECTORY_URL.to_string(), e)
                });
            }
        };

        let stream = response
            .bytes_stream()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e));
        let mut decoder = GzipDecoder::new(BufReader::new(StreamReader::new(stream)));
        let mut decompressed = Vec::new();
        decoder.read_to_end(&mut decompressed).await?;
        info!(
            "Downloaded and decompressed {} bytes of station metadata",
            decompressed.len()
        );
        Ok(decompressed)
    }

    /// Parses the raw headerless CSV with the fixed directory schema inside a
    /// blocking task. Unparsable cells become nulls rather than failing the
    /// whole file.
    async fn csv_to_dataframe(bytes: Vec<u8>, n_threads: usize) -> Result<DataFrame, DirectoryError> {
        task::spawn_blocking(move || {
            let mut temp_file = NamedTempFile::new().map_err(DirectoryError::CsvReadIo)?;
            temp_file
                .write_all(&bytes)
                .map_err(DirectoryError::CsvReadIo)?;
            temp_file.flush().map_err(DirectoryError::CsvReadIo)?;

            CsvReadOptions::default()
                .with_has_header(false)
                .with_schema(Some(Arc::new(directory_schema())))
                .with_ignore_errors(true)
                .with_n_threads(Some(n_threads))
                .try_into_reader_with_file_path(Some(temp_file.path().to_path_buf()))
                .map_err(DirectoryError::CsvReadPolars)?
                .finish()
                .map_err(DirectoryError::CsvReadPolars)
        })
        .await?
    }

    async fn cache_dataframe(mut frame: DataFrame, path: &Path) -> Result<(), DirectoryError> {
        let path_buf = path.to_path_buf();
        task::spawn_blocking(move || {
            let file = std::fs::File::create(&path_buf)
                .map_err(|e| DirectoryError::ParquetWriteIo(path_buf.clone(), e))?;
            ParquetWriter::new(file)
                .with_compression(ParquetCompression::Snappy)
                .finish(&mut frame)
                .map_err(|e| DirectoryError::ParquetWritePolars(path_buf, e))?;
            Ok::<(), DirectoryError>(())
        })
        .await??;
        Ok(())
    }
}
