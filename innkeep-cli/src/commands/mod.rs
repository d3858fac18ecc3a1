//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `guest`: Register and list guests
//! - `room`: Add, list and maintain rooms
//! - `menu`: Add and list room-service dishes
//! - `reserve`: Reserve a room for a future stay
//! - `walk_in`: Book and check in at once
//! - `check_in`/`check_out`: Start and end a stay, printing the bill
//! - `expire`: Expire no-show reservations
//! - `reservations`: List reservations
//! - `order`/`order_status`: Order room service and advance orders
//! - `report`: Room status and occupancy summaries

pub mod expire;
pub mod guest;
pub mod menu;
pub mod order;
pub mod report;
pub mod reservations;
pub mod reserve;
pub mod room;
pub mod stay;

pub use expire::ExpireCommand;
pub use guest::GuestCommand;
pub use menu::MenuCommand;
pub use order::{OrderCommand, OrderStatusCommand};
pub use report::ReportCommand;
pub use reservations::ReservationsCommand;
pub use reserve::{ReserveCommand, WalkInCommand};
pub use room::RoomCommand;
pub use stay::{CheckInCommand, CheckOutCommand};
