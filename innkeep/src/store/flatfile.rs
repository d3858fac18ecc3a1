//! Per-type record files.
//!
//! Each file holds a sequence of records separated by a blank line. A
//! record is one `name<TAB>value` line per field. Values are not escaped,
//! so a value containing a tab or newline does not survive a round trip.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::record::FieldMap;

/// Suffix of the sibling file a staged write goes to before it is renamed
/// into place.
pub const STAGING_SUFFIX: &str = "tmp";

/// Reader and writer for one record file.
///
/// # Examples
///
/// ```
/// use innkeep::record::FieldMap;
/// use innkeep::store::FlatFile;
///
/// let dir = tempfile::tempdir().unwrap();
/// let file = FlatFile::new(dir.path().join("menuitem.txt"));
///
/// let tea = FieldMap::from([
///     ("name".to_string(), "Tea".to_string()),
///     ("price".to_string(), "2.0".to_string()),
/// ]);
/// file.write(&[tea.clone()], &["name", "price"]).unwrap();
/// assert_eq!(file.load().unwrap(), vec![tea]);
/// ```
#[derive(Debug, Clone)]
pub struct FlatFile {
    path: PathBuf,
}

impl FlatFile {
    /// Addresses the file at `path`.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The file's path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The sibling path a staged write goes to.
    #[must_use]
    pub fn staging_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".");
        name.push(STAGING_SUFFIX);
        PathBuf::from(name)
    }

    /// Reads every record in the file.
    ///
    /// A missing file is created empty and yields no records.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read or created, including
    /// [`ErrorKind::InvalidData`] when it is not UTF-8.
    pub fn load(&self) -> Result<Vec<FieldMap>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Self::parse(&text)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fs::write(&self.path, "")?;
                log::debug!("created empty {}", self.path.display());
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrites the file with `records`, writing fields in `order`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be written.
    pub fn write(&self, records: &[FieldMap], order: &[&str]) -> Result<()> {
        fs::write(&self.path, Self::render(records, order))?;
        Ok(())
    }

    /// Writes `records` to the staging path, leaving the file itself
    /// untouched, and returns the staging path.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the staging file cannot be written.
    pub fn write_staged(&self, records: &[FieldMap], order: &[&str]) -> Result<PathBuf> {
        let staging = self.staging_path();
        fs::write(&staging, Self::render(records, order))?;
        Ok(staging)
    }

    /// Parses file text into field maps.
    ///
    /// Every line is trimmed. A line that is then empty ends the current
    /// record; any other line is split on its first tab, and a line without
    /// a tab yields an empty value. Runs of blank lines produce no empty
    /// records.
    #[must_use]
    pub fn parse(text: &str) -> Vec<FieldMap> {
        let mut records = Vec::new();
        let mut current = FieldMap::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                if !current.is_empty() {
                    records.push(std::mem::take(&mut current));
                }
                continue;
            }

            let (name, value) = line.split_once('\t').unwrap_or((line, ""));
            current.insert(name.to_string(), value.to_string());
        }

        if !current.is_empty() {
            records.push(current);
        }
        records
    }

    /// Renders field maps as file text.
    ///
    /// Fields are written in `order`; a field missing from a map is written
    /// with an empty value and keys outside `order` are dropped. Records are
    /// separated by one blank line and there is no trailing newline.
    #[must_use]
    pub fn render(records: &[FieldMap], order: &[&str]) -> String {
        records
            .iter()
            .map(|record| {
                order
                    .iter()
                    .map(|name| {
                        let value = record.get(*name).map_or("", String::as_str);
                        format!("{name}\t{value}").trim().to_string()
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn map(pairs: &[(&str, &str)]) -> FieldMap {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_load_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let file = FlatFile::new(dir.path().join("guest.txt"));

        assert!(file.load().unwrap().is_empty());
        assert!(file.path().exists());
        assert_eq!(fs::read_to_string(file.path()).unwrap(), "");
    }

    #[test]
    fn test_parse_records_and_missing_tab() {
        let text = "name\tTea\nprice\t2.0\n\nname\tCoffee\nprice\n";
        let records = FlatFile::parse(text);
        assert_eq!(
            records,
            vec![
                map(&[("name", "Tea"), ("price", "2.0")]),
                map(&[("name", "Coffee"), ("price", "")]),
            ]
        );
    }

    #[test]
    fn test_parse_splits_on_first_tab_and_trims() {
        let records = FlatFile::parse("  remarks\tless\tspicy  \n");
        assert_eq!(records, vec![map(&[("remarks", "less\tspicy")])]);
    }

    #[test]
    fn test_parse_tolerates_repeated_blank_lines() {
        let records = FlatFile::parse("\n\na\t1\n\n\n   \nb\t2\n\n");
        assert_eq!(records, vec![map(&[("a", "1")]), map(&[("b", "2")])]);
    }

    #[test]
    fn test_render_order_and_separators() {
        let records = vec![
            map(&[("price", "2.0"), ("name", "Tea"), ("extra", "dropped")]),
            map(&[("name", "Coffee")]),
        ];
        assert_eq!(
            FlatFile::render(&records, &["name", "price"]),
            "name\tTea\nprice\t2.0\n\nname\tCoffee\nprice"
        );
    }

    #[test]
    fn test_render_empty_sequence() {
        assert_eq!(FlatFile::render(&[], &["name"]), "");
    }

    #[test]
    fn test_write_then_load() {
        let dir = TempDir::new().unwrap();
        let file = FlatFile::new(dir.path().join("room.txt"));
        let records = vec![
            map(&[("roomId", "0205"), ("status", "VACANT")]),
            map(&[("roomId", "0301"), ("status", "")]),
        ];

        file.write(&records, &["roomId", "status"]).unwrap();
        assert_eq!(file.load().unwrap(), records);
    }

    #[test]
    fn test_write_staged_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let file = FlatFile::new(dir.path().join("room.txt"));
        file.write(&[map(&[("roomId", "0205")])], &["roomId"]).unwrap();

        let staging = file
            .write_staged(&[map(&[("roomId", "0301")])], &["roomId"])
            .unwrap();
        assert_eq!(staging, dir.path().join("room.txt.tmp"));
        assert_eq!(fs::read_to_string(file.path()).unwrap(), "roomId\t0205");
        assert_eq!(fs::read_to_string(staging).unwrap(), "roomId\t0301");
    }

    #[test]
    fn test_load_rejects_non_utf8() {
        let dir = TempDir::new().unwrap();
        let file = FlatFile::new(dir.path().join("guest.txt"));
        fs::write(file.path(), [0xff, 0xfe, b'\n']).unwrap();
        assert!(file.load().is_err());
    }
}
