//! The record store: flat files on disk, cached in memory.
//!
//! [`RecordStore::open`] is the one-time bootstrap: it loads every record
//! type from its file into the in-memory tables and marks each loaded record
//! clean. From then on reads are served from memory, and a file is only
//! rewritten when a record of its type is saved or deleted, when a
//! [`Changeset`] commits, or on [`RecordStore::flush`].
//!
//! # Examples
//!
//! ```no_run
//! use innkeep::entities::Room;
//! use innkeep::store::{Query, RecordStore, StoreConfig};
//!
//! let store = RecordStore::open(StoreConfig::new("/var/lib/innkeep")).unwrap();
//! let vacant = store
//!     .find_all::<Room>(&Query::by("status", "VACANT"))
//!     .unwrap();
//! println!("{} vacant rooms", vacant.len());
//! ```

mod cache;
mod changeset;
mod flatfile;
mod query;

#[cfg(test)]
mod proptests;
#[cfg(test)]
pub(crate) mod test_util;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::record::{Entity, Record, RecordKind};

pub use cache::{Row, RowId, Table, Tables};
pub use changeset::Changeset;
pub use flatfile::FlatFile;
pub use query::{MatchMode, Query};

/// Suffix of the copy kept of a file that could not be loaded.
pub const MALFORMED_SUFFIX: &str = "malformed";

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "INNKEEP_DATA_DIR";

/// Returns the default data directory, `~/.innkeep`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
///
/// # Examples
///
/// ```no_run
/// use innkeep::store::default_data_dir;
///
/// let data_dir = default_data_dir().unwrap();
/// println!("Data directory: {}", data_dir.display());
/// ```
pub fn default_data_dir() -> Result<PathBuf> {
    let home = home::home_dir().ok_or_else(|| Error::Validation {
        field: "home_directory".into(),
        message: "Cannot determine home directory".into(),
    })?;
    Ok(home.join(".innkeep"))
}

/// Resolves the data directory.
///
/// The resolution order is:
/// 1. `explicit`, if given
/// 2. `$INNKEEP_DATA_DIR` if set and non-empty
/// 3. `~/.innkeep` otherwise
///
/// # Errors
///
/// Returns an error if the home directory is needed and cannot be
/// determined.
pub fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }
    match std::env::var(DATA_DIR_ENV) {
        Ok(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => default_data_dir(),
    }
}

/// Parameters for opening a record store.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use innkeep::clock::ManualClock;
/// use innkeep::config::Config;
/// use innkeep::store::StoreConfig;
///
/// let noon = NaiveDate::from_ymd_opt(2099, 1, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// let config = StoreConfig::new("/tmp/hotel")
///     .with_config(Config::with_defaults())
///     .with_clock(ManualClock::new(noon));
/// assert_eq!(config.data_dir.to_str().unwrap(), "/tmp/hotel");
/// ```
#[derive(Debug)]
pub struct StoreConfig {
    /// Directory holding the record files.
    pub data_dir: PathBuf,
    /// Filenames and business settings.
    pub config: Config,
    /// Source of the current time.
    pub clock: Box<dyn Clock>,
}

impl StoreConfig {
    /// Creates a store configuration with default settings and the system
    /// clock.
    #[must_use]
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            config: Config::with_defaults(),
            clock: Box::new(SystemClock),
        }
    }

    /// Sets the configuration.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Sets the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }
}

/// The record cache and its backing files.
#[derive(Debug)]
pub struct RecordStore {
    data_dir: PathBuf,
    config: Config,
    clock: Box<dyn Clock>,
    pub(crate) tables: Tables,
    pub(crate) next_row: u64,
    malformed: Vec<RecordKind>,
}

impl RecordStore {
    /// Opens the store, loading every record type.
    ///
    /// The data directory and any missing record file are created. A file
    /// whose records cannot be decoded is loaded as empty: a warning names
    /// it and a copy is kept next to it with a `.malformed` suffix, since
    /// the next write of that type replaces it.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory or a file cannot be created or
    /// read.
    pub fn open(config: StoreConfig) -> Result<Self> {
        fs::create_dir_all(&config.data_dir)?;

        let mut store = Self {
            data_dir: config.data_dir,
            config: config.config,
            clock: config.clock,
            tables: Tables::default(),
            next_row: 0,
            malformed: Vec::new(),
        };

        store.load::<crate::entities::Guest>()?;
        store.load::<crate::entities::Room>()?;
        store.load::<crate::entities::Reservation>()?;
        store.load::<crate::entities::MenuItem>()?;
        store.load::<crate::entities::OrderMenuItem>()?;
        store.load::<crate::entities::RoomService>()?;

        log::debug!("opened record store at {}", store.data_dir.display());
        Ok(store)
    }

    fn load<T: Entity>(&mut self) -> Result<()> {
        let file = self.flat_file(T::KIND);
        let decoded = match file.load() {
            Ok(maps) => maps.iter().map(T::from_fields).collect::<Result<Vec<T>>>(),
            Err(Error::Io(e)) if e.kind() == ErrorKind::InvalidData => Err(Error::Io(e)),
            Err(e) => return Err(e),
        };

        match decoded {
            Ok(values) => {
                log::debug!("loaded {} {} records", values.len(), T::KIND);
                for value in values {
                    let row = self.allocate_row();
                    T::table_mut(&mut self.tables).upsert(row, value);
                }
            }
            Err(e) => {
                log::warn!(
                    "{} is malformed ({e}); no {} records were loaded",
                    file.path().display(),
                    T::KIND
                );
                Self::keep_malformed_copy(file.path());
                self.malformed.push(T::KIND);
            }
        }
        Ok(())
    }

    fn keep_malformed_copy(path: &Path) {
        let mut backup = path.as_os_str().to_os_string();
        backup.push(".");
        backup.push(MALFORMED_SUFFIX);
        let backup = PathBuf::from(backup);

        match fs::copy(path, &backup) {
            Ok(_) => log::warn!("kept a copy at {}", backup.display()),
            Err(e) => log::warn!("could not copy to {}: {e}", backup.display()),
        }
    }

    /// The directory holding the record files.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The configuration the store was opened with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The current time according to the store's clock.
    #[must_use]
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// Record types whose file could not be decoded at open.
    #[must_use]
    pub fn malformed_kinds(&self) -> &[RecordKind] {
        &self.malformed
    }

    /// The path of the file backing `kind`.
    #[must_use]
    pub fn path_for(&self, kind: RecordKind) -> PathBuf {
        self.data_dir.join(self.config.file_for(kind))
    }

    /// The file backing `kind`.
    #[must_use]
    pub fn flat_file(&self, kind: RecordKind) -> FlatFile {
        FlatFile::new(self.path_for(kind))
    }

    /// The in-memory tables.
    #[must_use]
    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    /// Every record of type `T`, in file order.
    #[must_use]
    pub fn all<T: Entity>(&self) -> Vec<Record<T>> {
        T::table(&self.tables)
            .rows()
            .iter()
            .map(|row| Record::loaded(row.id(), row.value().clone()))
            .collect()
    }

    /// The record stored at `row`.
    #[must_use]
    pub fn get<T: Entity>(&self, row: RowId) -> Option<Record<T>> {
        T::table(&self.tables)
            .get(row)
            .map(|value| Record::loaded(row, value.clone()))
    }

    /// Every record of type `T` matching `query`, in file order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownField`] if the query names a field `T` does
    /// not declare.
    pub fn find_all<T: Entity>(&self, query: &Query) -> Result<Vec<Record<T>>> {
        let rows = query.select(T::table(&self.tables).rows())?;
        Ok(rows
            .into_iter()
            .map(|row| Record::loaded(row.id(), row.value().clone()))
            .collect())
    }

    /// The first record of type `T` matching `query`.
    ///
    /// The query runs with a limit of one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownField`] if the query names a field `T` does
    /// not declare.
    pub fn find<T: Entity>(&self, query: &Query) -> Result<Option<Record<T>>> {
        let limited = query.clone().limit(1);
        Ok(self.find_all(&limited)?.into_iter().next())
    }

    /// Resolves a weak reference: the first `T` whose `field` equals
    /// `value`, ignoring case.
    ///
    /// A miss, including an undeclared `field`, is `None`.
    #[must_use]
    pub fn lookup<T: Entity>(&self, field: &str, value: &str) -> Option<Record<T>> {
        self.find(&Query::by(field, value)).ok().flatten()
    }

    /// True iff every `T` whose `field` equals `value` is the row `except`.
    ///
    /// With `except` unset, true iff no `T` matches.
    #[must_use]
    pub fn is_unique<T: Entity>(&self, field: &str, value: &str, except: Option<RowId>) -> bool {
        Query::by(field, value)
            .select(T::table(&self.tables).rows())
            .map(|rows| rows.iter().all(|row| Some(row.id()) == except))
            .unwrap_or(false)
    }

    /// Opens a changeset over the store.
    pub fn changeset(&mut self) -> Changeset<'_> {
        Changeset::new(self)
    }

    /// Rewrites every record file from memory.
    ///
    /// # Errors
    ///
    /// Returns the first I/O error; files after it are still attempted.
    pub fn flush(&self) -> Result<()> {
        let mut first_error = None;
        for kind in RecordKind::ALL {
            if let Err(e) = self.write_kind(kind) {
                log::error!("failed to flush {}: {e}", self.path_for(kind).display());
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Rewrites the file backing `kind` from memory.
    pub(crate) fn write_kind(&self, kind: RecordKind) -> Result<()> {
        let file = self.flat_file(kind);
        file.write(
            &self.tables.field_maps(kind),
            &kind.descriptor().field_names(),
        )?;
        log::debug!("wrote {}", file.path().display());
        Ok(())
    }

    /// Stores `value` at `row`, or in a new row if `row` is unset.
    pub(crate) fn put<T: Entity>(&mut self, row: Option<RowId>, value: T) -> RowId {
        let row = row.unwrap_or_else(|| self.allocate_row());
        T::table_mut(&mut self.tables).upsert(row, value);
        row
    }

    pub(crate) fn remove<T: Entity>(&mut self, row: RowId) -> Option<T> {
        T::table_mut(&mut self.tables).remove(row)
    }

    fn allocate_row(&mut self) -> RowId {
        self.next_row += 1;
        RowId(self.next_row)
    }
}
