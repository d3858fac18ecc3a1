//! Bills for a stay.
//!
//! Billing is a pure read of the store: nothing is written, so a bill can be
//! shown for confirmation before check-out commits.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDateTime, Weekday};

use crate::entities::{Reservation, RoomService};
use crate::error::{Error, Result};
use crate::store::{Query, RecordStore};

/// The amounts owed for one reservation.
#[derive(Debug, Clone, PartialEq)]
pub struct Bill {
    /// The reservation billed.
    pub reservation_code: String,
    /// The room stayed in.
    pub room_id: String,
    /// Nights stayed.
    pub nights: i64,
    /// Nights charged at the weekday rate.
    pub weekday_nights: i64,
    /// Nights charged at the weekend rate.
    pub weekend_nights: i64,
    /// Weekday rate at billing time.
    pub room_rate: f64,
    /// Weekend rate at billing time.
    pub weekend_rate: f64,
    /// Room charges.
    pub room_total: f64,
    /// Room-service charges.
    pub service_total: f64,
    /// Service charge percentage applied.
    pub service_charge_percent: u32,
    /// Service charge on room and room-service charges.
    pub service_charge: f64,
    /// Everything owed.
    pub total: f64,
    /// Symbol amounts are shown with.
    pub currency: String,
}

impl fmt::Display for Bill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.currency;
        writeln!(f, "Reservation {} (room {})", self.reservation_code, self.room_id)?;
        writeln!(
            f,
            "  {} weekday night(s) x {c}{:.2}",
            self.weekday_nights, self.room_rate
        )?;
        writeln!(
            f,
            "  {} weekend night(s) x {c}{:.2}",
            self.weekend_nights, self.weekend_rate
        )?;
        writeln!(f, "  Room charges:       {c}{:.2}", self.room_total)?;
        writeln!(f, "  Room service:       {c}{:.2}", self.service_total)?;
        writeln!(
            f,
            "  Service charge {}%: {c}{:.2}",
            self.service_charge_percent, self.service_charge
        )?;
        write!(f, "  Total:              {c}{:.2}", self.total)
    }
}

/// Payment computation.
pub struct Payment;

impl Payment {
    /// Computes the bill for `reservation` from its room's current rates
    /// and the room-service orders charged to it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the reservation's room no longer
    /// exists.
    pub fn compute(store: &RecordStore, reservation: &Reservation) -> Result<Bill> {
        let room = reservation.room(store).ok_or_else(|| Error::NotFound {
            resource: format!("room {}", reservation.room_id),
        })?;

        let nights = reservation.total_days().max(0);
        let weekday_nights = Self::weekday_nights(reservation.check_in, reservation.check_out)
            .min(nights);
        let weekend_nights = nights - weekday_nights;

        #[allow(clippy::cast_precision_loss)]
        let room_total =
            weekday_nights as f64 * room.rate + weekend_nights as f64 * room.weekend_rate;

        let service_total: f64 = store
            .find_all::<RoomService>(&Query::by("reservationId", &reservation.code))?
            .iter()
            .map(|order| order.total(store))
            .sum();

        let percent = store.config().service_charge_percent();
        let service_charge = (room_total + service_total) * f64::from(percent) / 100.0;

        Ok(Bill {
            reservation_code: reservation.code.clone(),
            room_id: reservation.room_id.clone(),
            nights,
            weekday_nights,
            weekend_nights,
            room_rate: room.rate,
            weekend_rate: room.weekend_rate,
            room_total,
            service_total,
            service_charge_percent: percent,
            service_charge,
            total: room_total + service_total + service_charge,
            currency: store.config().currency_symbol().to_string(),
        })
    }

    /// Counts Monday-to-Friday days stepping a day at a time from
    /// `check_in` while before `check_out`; the check-in day always counts.
    #[must_use]
    pub fn weekday_nights(check_in: NaiveDateTime, check_out: NaiveDateTime) -> i64 {
        let mut count = 0;
        let mut day = check_in;
        loop {
            if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
                count += 1;
            }
            day += Duration::days(1);
            if day >= check_out {
                break;
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use crate::store::test_util::{at, create_test_store, sample_reservation, sample_room};

    #[test]
    fn test_weekday_nights() {
        // 2099-01-01 is a Thursday
        assert_eq!(
            Payment::weekday_nights(at("2099-01-01 1400"), at("2099-01-03 1200")),
            2
        );
        // Friday into Monday: only Friday counts
        assert_eq!(
            Payment::weekday_nights(at("2099-01-02 1400"), at("2099-01-05 1200")),
            1
        );
        // the check-in day counts even when check-out precedes it
        assert_eq!(
            Payment::weekday_nights(at("2099-01-01 1400"), at("2099-01-01 1200")),
            1
        );
    }

    #[test]
    fn test_bill_splits_weekend_and_adds_service_charge() {
        let (mut store, _clock) = create_test_store();
        Record::new(sample_room(2, 5)).save(&mut store).unwrap();
        let reservation = sample_reservation("0205", "2099-01-02 1400", "2099-01-05 1200");

        let bill = Payment::compute(&store, &reservation).unwrap();
        assert_eq!(bill.nights, 3);
        assert_eq!(bill.weekday_nights, 1);
        assert_eq!(bill.weekend_nights, 2);
        assert!((bill.room_total - 260.0).abs() < f64::EPSILON);
        assert!((bill.service_charge - 18.2).abs() < 1e-9);
        assert!((bill.total - 278.2).abs() < 1e-9);
        assert_eq!(bill.currency, "S$");
    }

    #[test]
    fn test_missing_room_is_not_found() {
        let (store, _clock) = create_test_store();
        let reservation = sample_reservation("0205", "2099-01-01 1400", "2099-01-03 1200");
        assert!(matches!(
            Payment::compute(&store, &reservation),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn test_display_lists_amounts() {
        let (mut store, _clock) = create_test_store();
        Record::new(sample_room(2, 5)).save(&mut store).unwrap();
        let reservation = sample_reservation("0205", "2099-01-01 1400", "2099-01-03 1200");

        let text = Payment::compute(&store, &reservation).unwrap().to_string();
        assert!(text.contains("Room charges:       S$200.00"));
        assert!(text.contains("Service charge 7%: S$14.00"));
        assert!(text.contains("Total:              S$214.00"));
    }
}
