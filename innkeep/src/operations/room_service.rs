//! Room-service orders for guests in residence.

use crate::entities::{
    MenuItem, OrderMenuItem, OrderStatus, Reservation, ReservationStatus, RoomService,
};
use crate::error::{Error, Result};
use crate::operations::reservation_status_label;
use crate::record::{Entity, Record};
use crate::store::{Changeset, RecordStore};

/// One requested line of an order: a menu item by name and a quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    /// Name of the menu item, matched ignoring case.
    pub menu_item: String,
    /// Quantity ordered.
    pub qty: i32,
}

impl OrderLine {
    /// Creates an order line.
    #[must_use]
    pub fn new(menu_item: impl Into<String>, qty: i32) -> Self {
        Self {
            menu_item: menu_item.into(),
            qty,
        }
    }
}

/// Room-service operations.
pub struct RoomServiceOperations;

impl RoomServiceOperations {
    /// Places an order charged to a checked-in reservation.
    ///
    /// Each line copies the menu item's current name and price. The order
    /// starts `CONFIRMED`, and it and its lines are committed together.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidTransition`] unless the reservation is `CHECKED_IN`
    /// - [`Error::NotFound`] if a line names an unknown menu item
    /// - [`Error::Invalid`] if a quantity is not positive, the order has no
    ///   lines, or its id is already taken
    /// - [`Error::TransitionFailed`] if the files cannot be written
    pub fn place_order(
        store: &mut RecordStore,
        reservation: &Reservation,
        lines: &[OrderLine],
        remarks: &str,
    ) -> Result<Record<RoomService>> {
        if reservation.status != ReservationStatus::CheckedIn {
            return Err(Error::InvalidTransition {
                action: "order room service for",
                subject: format!("reservation {}", reservation.code),
                status: reservation_status_label(reservation),
            });
        }

        let created = store.now();
        let id = RoomService::generate_id(created, &reservation.room_id);

        let mut items = lines
            .iter()
            .map(|line| {
                let menu = store
                    .lookup::<MenuItem>("name", &line.menu_item)
                    .ok_or_else(|| Error::NotFound {
                        resource: format!("menu item {}", line.menu_item),
                    })?;
                Ok(Record::new(OrderMenuItem::from_menu(&menu, &id, line.qty)))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut order = Record::new(RoomService {
            id,
            remarks: remarks.to_string(),
            status: OrderStatus::Confirmed,
            created,
            reservation_id: reservation.code.clone(),
        });

        {
            let mut changes = store.changeset();
            Self::stage_order(&mut changes, &mut items, &mut order)?;
        }
        order.mark_saved();

        log::info!(
            "placed order {} with {} item(s) for reservation {}",
            order.id,
            items.len(),
            reservation.code
        );
        Ok(order)
    }

    fn stage_order(
        changes: &mut Changeset<'_>,
        items: &mut [Record<OrderMenuItem>],
        order: &mut Record<RoomService>,
    ) -> Result<()> {
        for item in items.iter_mut() {
            changes.stage(item)?;
        }
        changes.stage(order)?;
        changes.commit()
    }

    /// Moves an order to its next status.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] if the order is already
    /// delivered, or an I/O error if the order file cannot be written.
    pub fn advance_order(store: &mut RecordStore, order: &mut Record<RoomService>) -> Result<OrderStatus> {
        let Some(next) = order.status.next() else {
            return Err(Error::InvalidTransition {
                action: "advance",
                subject: format!("order {}", order.id),
                status: RoomService::descriptor()
                    .label(order.status.as_str())
                    .to_string(),
            });
        };

        order.status = next;
        order.save(store)?;
        log::info!("order {} is now {next}", order.id);
        Ok(next)
    }
}
