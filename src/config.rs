use std::path::PathBuf;
use std::time::Duration;

pub(crate) const DEFAULT_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);
pub(crate) const DEFAULT_MAX_THREADS: usize = 1;

/// Configuration for [`Stations`](crate::Stations), passed once at
/// construction and never mutated afterwards.
///
/// # Examples
///
/// ```
/// use meteostat_stations::StationsConfig;
/// use std::time::Duration;
///
/// let config = StationsConfig {
///     max_age: Duration::from_secs(60 * 60),
///     ..StationsConfig::default()
/// };
/// assert_eq!(config.max_threads, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationsConfig {
    /// Directory holding the cached station directory file. `None` resolves
    /// to the system cache directory joined with `meteostat_stations_cache`.
    pub cache_dir: Option<PathBuf>,

    /// Maximum age before the cached directory file is considered stale, and
    /// also the tolerance added to a station's recorded inventory end date
    /// when matching coverage windows. Default: 24 hours.
    pub max_age: Duration,

    /// Worker threads used when parsing the downloaded station CSV.
    /// Default: 1.
    pub max_threads: usize,
}

impl Default for StationsConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            max_age: DEFAULT_MAX_AGE,
            max_threads: DEFAULT_MAX_THREADS,
        }
    }
}
