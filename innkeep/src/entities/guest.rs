//! Hotel guests.

use crate::entities::reservation::Reservation;
use crate::error::Result;
use crate::record::value::{self, symbolic_enum};
use crate::record::{
    Descriptor, Entity, FieldDef, FieldKind, FieldMap, Record, RecordKind, ValidationContext,
};
use crate::store::{RecordStore, Table, Tables};

symbolic_enum! {
    /// The identity document a guest registered with.
    pub enum IdType {
        /// A passport.
        Passport => "PASSPORT",
        /// A driving license.
        DrivingLicense => "DRIVING_LICENSE",
    }
}

/// Required length of a contact number.
pub const CONTACT_LENGTH: usize = 8;

/// Required length of a credit card number.
pub const CREDIT_CARD_LENGTH: usize = 16;

pub(crate) static DESCRIPTOR: Descriptor = Descriptor {
    kind: RecordKind::Guest,
    fields: &[
        FieldDef::editable("id", FieldKind::Text),
        FieldDef::editable("idType", FieldKind::Enumerated(IdType::NAMES)),
        FieldDef::editable("name", FieldKind::Text),
        FieldDef::editable("address", FieldKind::Text),
        FieldDef::editable("country", FieldKind::Text),
        FieldDef::editable("gender", FieldKind::Gender),
        FieldDef::editable("nationality", FieldKind::Text),
        FieldDef::editable("contact", FieldKind::Integer),
        FieldDef::editable("creditCard", FieldKind::Text),
    ],
    identity: Some("id"),
    labels: &[
        ("idType", "Type of ID"),
        ("id", "ID Number"),
        ("name", "Name"),
        ("address", "Address"),
        ("country", "Country"),
        ("gender", "Gender"),
        ("nationality", "Nationality"),
        ("contact", "Contact"),
        ("creditCard", "Credit Card"),
        ("PASSPORT", "Passport"),
        ("DRIVING_LICENSE", "Driving License"),
    ],
};

/// A registered guest.
///
/// `gender`, `contact` and `credit_card` are kept as entered so that
/// validation can report bad input instead of rejecting it at parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guest {
    /// Identity document number; unique across guests.
    pub id: String,
    /// Identity document type.
    pub id_type: IdType,
    /// Full name.
    pub name: String,
    /// Postal address.
    pub address: String,
    /// Country of residence.
    pub country: String,
    /// `M` or `F`.
    pub gender: String,
    /// Nationality.
    pub nationality: String,
    /// Contact number, eight characters.
    pub contact: String,
    /// Credit card number, sixteen characters.
    pub credit_card: String,
}

impl Guest {
    /// The guest's most recent reservation, if any.
    ///
    /// Reservations are ordered by check-in time.
    #[must_use]
    pub fn latest_reservation(&self, store: &RecordStore) -> Option<Record<Reservation>> {
        store
            .all::<Reservation>()
            .into_iter()
            .filter(|reservation| reservation.guest_id == self.id)
            .max_by_key(|reservation| reservation.check_in)
    }
}

impl Entity for Guest {
    const KIND: RecordKind = RecordKind::Guest;

    fn to_fields(&self) -> FieldMap {
        FieldMap::from([
            ("id".into(), self.id.clone()),
            ("idType".into(), self.id_type.as_str().into()),
            ("name".into(), self.name.clone()),
            ("address".into(), self.address.clone()),
            ("country".into(), self.country.clone()),
            ("gender".into(), self.gender.clone()),
            ("nationality".into(), self.nationality.clone()),
            ("contact".into(), self.contact.clone()),
            ("creditCard".into(), self.credit_card.clone()),
        ])
    }

    fn from_fields(fields: &FieldMap) -> Result<Self> {
        let kind = Self::KIND;
        Ok(Self {
            id: value::text(fields, kind, "id")?,
            id_type: value::parse(fields, kind, "idType")?,
            name: value::text(fields, kind, "name")?,
            address: value::text(fields, kind, "address")?,
            country: value::text(fields, kind, "country")?,
            gender: value::text(fields, kind, "gender")?,
            nationality: value::text(fields, kind, "nationality")?,
            contact: value::text(fields, kind, "contact")?,
            credit_card: value::text(fields, kind, "creditCard")?,
        })
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> Vec<String> {
        let mut errors = Vec::new();

        if !ctx.is_unique::<Self>("id", &self.id) {
            errors.push("ID has already been used.".to_string());
        }
        if self.gender != "M" && self.gender != "F" {
            errors.push("Gender can only be Male or Female".to_string());
        }
        if self.contact.chars().count() != CONTACT_LENGTH {
            errors.push(format!(
                "Phone number is invalid. It should have {CONTACT_LENGTH} characters."
            ));
        }
        if self.credit_card.chars().count() != CREDIT_CARD_LENGTH {
            errors.push(format!(
                "Credit Card Number is invalid. It should have {CREDIT_CARD_LENGTH} characters."
            ));
        }

        errors
    }

    fn table(tables: &Tables) -> &Table<Self> {
        &tables.guests
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.guests
    }
}
