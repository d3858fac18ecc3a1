//! The hotel's record types.
//!
//! Each module defines one [`Entity`](crate::record::Entity) with its
//! registry [`Descriptor`](crate::record::Descriptor), stored field layout
//! and business rules.

pub mod guest;
pub mod menu_item;
pub mod order_item;
pub mod reservation;
pub mod room;
pub mod room_service;

pub use guest::{Guest, IdType};
pub use menu_item::MenuItem;
pub use order_item::OrderMenuItem;
pub use reservation::{Reservation, ReservationStatus};
pub use room::{BedType, Facing, Room, RoomStatus, RoomType};
pub use room_service::{OrderStatus, RoomService};
