//! The two-slot seat registry: which connection, if any, occupies each seat.

use uuid::Uuid;

use crate::domain::Seat;

const SEAT_ORDER: [Seat; 2] = [Seat::A, Seat::B];

/// Exactly two slots, each free or holding the occupying connection id.
/// Assignment always scans `A` before `B`.
#[derive(Debug, Default)]
pub struct SeatRegistry {
    slots: [Option<Uuid>; 2],
}

impl SeatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Occupies the first free seat, or `None` when both are taken.
    pub fn assign(&mut self, conn_id: Uuid) -> Option<Seat> {
        for seat in SEAT_ORDER {
            let slot = &mut self.slots[seat.index() as usize];
            if slot.is_none() {
                *slot = Some(conn_id);
                return Some(seat);
            }
        }
        None
    }

    /// Frees the slot unconditionally. Releasing a free seat is a no-op.
    pub fn release(&mut self, seat: Seat) {
        self.slots[seat.index() as usize] = None;
    }

    /// Frees whichever slot the connection holds, reporting the seat.
    pub fn release_conn(&mut self, conn_id: Uuid) -> Option<Seat> {
        let seat = self.seat_of(conn_id)?;
        self.release(seat);
        Some(seat)
    }

    pub fn occupant(&self, seat: Seat) -> Option<Uuid> {
        self.slots[seat.index() as usize]
    }

    pub fn seat_of(&self, conn_id: Uuid) -> Option<Seat> {
        SEAT_ORDER
            .into_iter()
            .find(|seat| self.slots[seat.index() as usize] == Some(conn_id))
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }
}
