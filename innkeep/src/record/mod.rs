//! Typed records and the contract every record type fulfils.
//!
//! A [`Record`] wraps one entity value together with its store row, the
//! clean snapshot it was last persisted as, and the messages produced by
//! its last validation. Records are detached copies of the store's rows:
//! edits are invisible to the store until [`Record::save`] succeeds.

pub mod descriptor;
pub mod value;

use std::any::Any;
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

use chrono::NaiveDateTime;

use crate::error::{Error, Result};
use crate::store::{RecordStore, RowId, Table, Tables};

pub use descriptor::{Descriptor, FieldDef, FieldKind, RecordKind};

/// A record's fields keyed by name, as read from or written to disk.
pub type FieldMap = HashMap<String, String>;

/// Behaviour shared by every record type.
pub trait Entity: Clone + std::fmt::Debug + Sized + 'static {
    /// The record type tag.
    const KIND: RecordKind;

    /// Converts the value into its stored fields.
    fn to_fields(&self) -> FieldMap;

    /// Builds a value from its stored fields.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRecord`] if a field is missing or cannot be
    /// parsed.
    fn from_fields(fields: &FieldMap) -> Result<Self>;

    /// Evaluates the type's business rules, returning every violation.
    fn check(&self, ctx: &ValidationContext<'_>) -> Vec<String>;

    /// The store table holding this type.
    fn table(tables: &Tables) -> &Table<Self>;

    /// The store table holding this type, mutably.
    fn table_mut(tables: &mut Tables) -> &mut Table<Self>;

    /// The registry entry for this type.
    fn descriptor() -> &'static Descriptor {
        Self::KIND.descriptor()
    }

    /// The value of this record's identity field, if the type has one.
    fn identity(&self) -> Option<String> {
        Self::descriptor()
            .identity
            .and_then(|field| self.to_fields().remove(field))
    }
}

/// What a record's business rules may consult while validating.
#[derive(Clone, Copy)]
pub struct ValidationContext<'a> {
    store: &'a RecordStore,
    row: Option<RowId>,
    clean: Option<&'a dyn Any>,
}

impl std::fmt::Debug for ValidationContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationContext")
            .field("row", &self.row)
            .field("is_new", &self.is_new())
            .finish_non_exhaustive()
    }
}

impl<'a> ValidationContext<'a> {
    pub(crate) fn new<T: Entity>(
        store: &'a RecordStore,
        row: Option<RowId>,
        clean: Option<&'a T>,
    ) -> Self {
        Self {
            store,
            row,
            clean: clean.map(|value| value as &dyn Any),
        }
    }

    /// The store the record is validated against.
    #[must_use]
    pub fn store(&self) -> &'a RecordStore {
        self.store
    }

    /// The store's current time.
    #[must_use]
    pub fn now(&self) -> NaiveDateTime {
        self.store.now()
    }

    /// Whether the record has never been successfully saved.
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.clean.is_none()
    }

    /// The record's value as last persisted, when it is a `T`.
    ///
    /// `None` for a record that was never saved.
    #[must_use]
    pub fn clean<T: Entity>(&self) -> Option<&'a T> {
        self.clean.and_then(|value| value.downcast_ref::<T>())
    }

    /// True iff every `T` whose `field` equals `value` is the record being
    /// validated.
    #[must_use]
    pub fn is_unique<T: Entity>(&self, field: &str, value: &str) -> bool {
        self.store.is_unique::<T>(field, value, self.row)
    }
}

/// A typed, mutable record with dirty tracking.
///
/// # Examples
///
/// ```no_run
/// use innkeep::entities::{Guest, IdType};
/// use innkeep::record::Record;
/// use innkeep::store::{RecordStore, StoreConfig};
///
/// let mut store = RecordStore::open(StoreConfig::new("/tmp/hotel")).unwrap();
/// let mut guest = Record::new(Guest {
///     id: "S1234567A".to_string(),
///     id_type: IdType::Passport,
///     name: "Ada".to_string(),
///     address: "1 Main St".to_string(),
///     country: "SG".to_string(),
///     gender: "F".to_string(),
///     nationality: "SG".to_string(),
///     contact: "91234567".to_string(),
///     credit_card: "4111111111111111".to_string(),
/// });
///
/// if guest.save(&mut store).is_err() {
///     for message in guest.errors() {
///         eprintln!("{message}");
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Record<T> {
    row: Option<RowId>,
    value: T,
    clean: Option<T>,
    errors: Vec<String>,
}

impl<T: Entity> Record<T> {
    /// Wraps a value that has never been persisted.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            row: None,
            value,
            clean: None,
            errors: Vec::new(),
        }
    }

    pub(crate) fn loaded(row: RowId, value: T) -> Self {
        Self {
            row: Some(row),
            clean: Some(value.clone()),
            value,
            errors: Vec::new(),
        }
    }

    /// The store row this record occupies, once staged or saved.
    #[must_use]
    pub fn row(&self) -> Option<RowId> {
        self.row
    }

    /// Whether the record has never been successfully saved.
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.clean.is_none()
    }

    /// The current (possibly unsaved) value.
    #[must_use]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Consumes the record, returning its current value.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.value
    }

    /// The value as last persisted, if any.
    #[must_use]
    pub fn clean_snapshot(&self) -> Option<&T> {
        self.clean.as_ref()
    }

    /// The current value's stored fields.
    #[must_use]
    pub fn fields(&self) -> FieldMap {
        self.value.to_fields()
    }

    /// Messages produced by the last validation or transition attempt.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Restores the value to its clean snapshot.
    ///
    /// A record that was never saved has no snapshot and is left untouched.
    pub fn revert(&mut self) {
        if let Some(clean) = &self.clean {
            self.value = clean.clone();
        }
    }

    /// Runs the type's business rules against `store`.
    ///
    /// On failure the messages are kept in [`errors`](Self::errors) and the
    /// value is reverted to its clean snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] carrying every violated rule.
    pub fn validate(&mut self, store: &RecordStore) -> Result<()> {
        let ctx = ValidationContext::new(store, self.row, self.clean.as_ref());
        self.errors = self.value.check(&ctx);
        if self.errors.is_empty() {
            return Ok(());
        }

        self.revert();
        Err(Error::Invalid {
            kind: T::KIND,
            errors: self.errors.clone(),
        })
    }

    /// Validates the record, then creates or updates its row and rewrites
    /// the type's file.
    ///
    /// If the file write fails, the in-memory table keeps the change and the
    /// record keeps its previous clean state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if validation fails, or an I/O error if the
    /// file cannot be written.
    pub fn save(&mut self, store: &mut RecordStore) -> Result<()> {
        self.validate(store)?;

        let row = store.put(self.row, self.value.clone());
        self.row = Some(row);
        store.write_kind(T::KIND)?;

        self.mark_saved();
        Ok(())
    }

    /// Removes the record's row and rewrites the type's file.
    ///
    /// The record becomes new again; saving it afterwards re-creates it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the record has no row in `store`, or
    /// an I/O error if the file cannot be written.
    pub fn delete(&mut self, store: &mut RecordStore) -> Result<()> {
        let removed = self.row.and_then(|row| store.remove::<T>(row));
        if removed.is_none() {
            return Err(Error::NotFound {
                resource: format!(
                    "{} record {}",
                    T::KIND,
                    self.value.identity().unwrap_or_default()
                ),
            });
        }

        self.row = None;
        self.clean = None;
        store.write_kind(T::KIND)
    }

    pub(crate) fn attach(&mut self, row: RowId) {
        self.row = Some(row);
    }

    pub(crate) fn mark_saved(&mut self) {
        self.clean = Some(self.value.clone());
    }

    /// Undoes a staged change that was not committed.
    pub(crate) fn abandon(&mut self) {
        if self.is_new() {
            self.row = None;
        } else {
            self.revert();
        }
    }

    pub(crate) fn push_error(&mut self, message: String) {
        self.errors.push(message);
    }

    pub(crate) fn clear_errors(&mut self) {
        self.errors.clear();
    }
}

impl<T> Deref for Record<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> DerefMut for Record<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}
