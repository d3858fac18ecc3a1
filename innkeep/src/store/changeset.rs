//! Staged multi-record writes.
//!
//! A [`Changeset`] captures the store's tables, lets validated records be
//! staged into them, and commits every touched file together: each file is
//! first written to a sibling staging file, and only when all of those
//! writes succeed are they renamed into place. A changeset dropped without a
//! successful commit restores the tables it captured.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::record::{Entity, Record, RecordKind};
use crate::store::cache::Tables;
use crate::store::RecordStore;

/// A group of record writes that is committed or discarded as a unit.
///
/// # Examples
///
/// ```no_run
/// use innkeep::entities::{Reservation, ReservationStatus, Room, RoomStatus};
/// use innkeep::store::{Query, RecordStore, StoreConfig};
///
/// let mut store = RecordStore::open(StoreConfig::new("/tmp/hotel")).unwrap();
/// let mut reservation = store
///     .find::<Reservation>(&Query::by("reservationCode", "20990101-90-G1"))
///     .unwrap()
///     .unwrap();
/// let mut room = reservation.room(&store).unwrap();
///
/// reservation.status = ReservationStatus::CheckedOut;
/// room.status = RoomStatus::Vacant;
///
/// let mut changes = store.changeset();
/// changes.stage(&mut reservation).unwrap();
/// changes.stage(&mut room).unwrap();
/// changes.commit().unwrap();
/// ```
#[derive(Debug)]
pub struct Changeset<'s> {
    store: &'s mut RecordStore,
    pre_image: Option<(Tables, u64)>,
    touched: BTreeSet<RecordKind>,
}

impl<'s> Changeset<'s> {
    pub(crate) fn new(store: &'s mut RecordStore) -> Self {
        let pre_image = Some((store.tables.clone(), store.next_row));
        Self {
            store,
            pre_image,
            touched: BTreeSet::new(),
        }
    }

    /// The store, including everything staged so far.
    #[must_use]
    pub fn store(&self) -> &RecordStore {
        &*self.store
    }

    /// Record types with staged changes.
    pub fn touched(&self) -> impl Iterator<Item = RecordKind> + '_ {
        self.touched.iter().copied()
    }

    /// Validates `record` and stages it into the in-memory tables.
    ///
    /// Later validations in the same changeset see the staged value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if validation fails; the record is
    /// reverted as by [`Record::validate`].
    pub fn stage<T: Entity>(&mut self, record: &mut Record<T>) -> Result<()> {
        record.validate(&*self.store)?;
        let row = self.store.put(record.row(), record.value().clone());
        record.attach(row);
        self.touched.insert(T::KIND);
        Ok(())
    }

    /// Writes every touched file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TransitionFailed`] naming the files that could not
    /// be written. No file has been replaced when a staging write fails, and
    /// the in-memory tables are restored.
    pub fn commit(&mut self) -> Result<()> {
        let mut staged = Vec::new();
        let mut failed = Vec::new();
        let mut reason = None;

        for kind in &self.touched {
            let file = self.store.flat_file(*kind);
            let records = self.store.tables.field_maps(*kind);
            match file.write_staged(&records, &kind.descriptor().field_names()) {
                Ok(staging) => staged.push((staging, file.path().to_path_buf())),
                Err(e) => {
                    failed.push(file.path().to_path_buf());
                    reason.get_or_insert_with(|| e.to_string());
                }
            }
        }

        if !failed.is_empty() {
            for (staging, _) in &staged {
                Self::discard(staging);
            }
            self.rollback();
            return Err(Error::TransitionFailed {
                files: failed,
                reason: reason.unwrap_or_default(),
            });
        }

        for (index, (staging, target)) in staged.iter().enumerate() {
            if let Err(e) = fs::rename(staging, target) {
                for (rest, _) in &staged[index..] {
                    Self::discard(rest);
                }
                let renamed: Vec<RecordKind> = self.touched.iter().copied().take(index).collect();
                self.rollback();
                self.rewrite(&renamed);
                return Err(Error::TransitionFailed {
                    files: vec![target.clone()],
                    reason: e.to_string(),
                });
            }
        }

        self.pre_image = None;
        log::debug!(
            "committed changes to {}",
            self.touched
                .iter()
                .map(|kind| kind.name())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(())
    }

    /// Restores the tables captured when the changeset was opened.
    fn rollback(&mut self) {
        if let Some((tables, next_row)) = self.pre_image.take() {
            self.store.tables = tables;
            self.store.next_row = next_row;
        }
    }

    /// Best-effort rewrite of files already replaced before a failed rename.
    fn rewrite(&self, kinds: &[RecordKind]) {
        for kind in kinds {
            if let Err(e) = self.store.write_kind(*kind) {
                log::error!(
                    "{} may not match memory after a failed commit: {e}",
                    self.store.path_for(*kind).display()
                );
            }
        }
    }

    fn discard(staging: &Path) {
        if let Err(e) = fs::remove_file(staging) {
            log::warn!("could not remove {}: {e}", staging.display());
        }
    }
}

impl Drop for Changeset<'_> {
    fn drop(&mut self) {
        self.rollback();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Room, RoomStatus};
    use crate::store::test_util::{create_test_store, sample_room};

    #[test]
    fn test_commit_writes_all_touched_files() {
        let (mut store, _clock) = create_test_store();
        let mut first = Record::new(sample_room(2, 5));
        let mut second = Record::new(sample_room(2, 6));

        let mut changes = store.changeset();
        changes.stage(&mut first).unwrap();
        changes.stage(&mut second).unwrap();
        assert_eq!(changes.touched().collect::<Vec<_>>(), [RecordKind::Room]);
        changes.commit().unwrap();
        drop(changes);

        assert_eq!(store.all::<Room>().len(), 2);
        let on_disk = fs::read_to_string(store.path_for(RecordKind::Room)).unwrap();
        assert!(on_disk.contains("roomId\t0205"));
        assert!(on_disk.contains("roomId\t0206"));
        assert!(!store.flat_file(RecordKind::Room).staging_path().exists());
    }

    #[test]
    fn test_staged_rows_visible_to_later_validation() {
        let (mut store, _clock) = create_test_store();
        let mut first = Record::new(sample_room(2, 5));
        let mut twin = Record::new(sample_room(2, 5));

        let mut changes = store.changeset();
        changes.stage(&mut first).unwrap();
        assert!(changes.stage(&mut twin).is_err());
    }

    #[test]
    fn test_drop_without_commit_restores_tables() {
        let (mut store, _clock) = create_test_store();
        let mut room = Record::new(sample_room(2, 5));
        room.save(&mut store).unwrap();

        room.status = RoomStatus::Occupied;
        {
            let mut changes = store.changeset();
            changes.stage(&mut room).unwrap();
            assert_eq!(
                changes.store().lookup::<Room>("roomId", "0205").unwrap().status,
                RoomStatus::Occupied
            );
        }

        assert_eq!(
            store.lookup::<Room>("roomId", "0205").unwrap().status,
            RoomStatus::Vacant
        );
    }

    #[test]
    fn test_failed_staging_write_restores_everything() {
        let (mut store, _clock) = create_test_store();
        let mut room = Record::new(sample_room(2, 5));
        room.save(&mut store).unwrap();
        let before = fs::read_to_string(store.path_for(RecordKind::Room)).unwrap();

        // a directory squatting on the staging path makes the write fail
        fs::create_dir(store.flat_file(RecordKind::Room).staging_path()).unwrap();

        room.status = RoomStatus::Occupied;
        let mut changes = store.changeset();
        changes.stage(&mut room).unwrap();
        let err = changes.commit().unwrap_err();
        drop(changes);

        assert!(matches!(err, Error::TransitionFailed { ref files, .. } if files.len() == 1));
        assert_eq!(
            store.lookup::<Room>("roomId", "0205").unwrap().status,
            RoomStatus::Vacant
        );
        assert_eq!(fs::read_to_string(store.path_for(RecordKind::Room)).unwrap(), before);
    }
}
