//! Seats arranged in closed rings, one ring per table.
//!
//! Seats live in a single arena ordered table-then-seat, so a seat's index
//! is `(table_number - 1) * table_size + (seat_number - 1)`. Adjacency is
//! modular arithmetic inside a table's slice of the arena; no seat holds a
//! reference to another.

use std::collections::HashSet;

use tracing::debug;

use crate::error::PlanError;
use crate::model::entity::GuestId;
use crate::solution::Occupancy;

pub type SeatIndex = usize;
pub type SeatId = u32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    pub id: SeatId,
    pub table_number: u32,
    pub seat_number: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    table_size: usize,
    number_of_tables: usize,
    seats: Vec<Seat>,
}

impl Topology {
    /// Builds `ceil(number_of_guests / table_size)` full rings of
    /// `table_size` seats. Spare seats all end up at the last table.
    pub fn build(number_of_guests: usize, table_size: usize) -> Result<Topology, PlanError> {
        if table_size == 0 {
            return Err(PlanError::InvalidTableSize(table_size));
        }
        let number_of_tables = number_of_guests.div_ceil(table_size);
        let seats = (1..=number_of_tables)
            .flat_map(|table_number| {
                (1..=table_size).map(move |seat_number| (table_number, seat_number))
            })
            .enumerate()
            .map(|(index, (table_number, seat_number))| Seat {
                id: index as SeatId + 1,
                table_number: table_number as u32,
                seat_number: seat_number as u32,
            })
            .collect::<Vec<_>>();
        debug!(
            guests = number_of_guests,
            tables = number_of_tables,
            seats = seats.len(),
            "built table topology"
        );
        Ok(Topology { table_size, number_of_tables, seats })
    }

    pub fn table_size(&self) -> usize {
        self.table_size
    }

    pub fn number_of_tables(&self) -> usize {
        self.number_of_tables
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn seat(&self, index: SeatIndex) -> Option<&Seat> {
        self.seats.get(index)
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// Zero-based table a seat belongs to.
    pub fn table_of(&self, index: SeatIndex) -> usize {
        index / self.table_size
    }

    /// Seat indices of a zero-based table, in seat-number order.
    pub fn table_seats(&self, table: usize) -> std::ops::Range<SeatIndex> {
        let start = table * self.table_size;
        start..start + self.table_size
    }

    pub fn index_of(&self, table_number: u32, seat_number: u32) -> Option<SeatIndex> {
        let (table, seat) = (table_number as usize, seat_number as usize);
        if table == 0 || seat == 0 || table > self.number_of_tables || seat > self.table_size {
            return None;
        }
        Some((table - 1) * self.table_size + seat - 1)
    }

    pub fn left(&self, index: SeatIndex) -> SeatIndex {
        let base = index - index % self.table_size;
        base + (index % self.table_size + self.table_size - 1) % self.table_size
    }

    pub fn right(&self, index: SeatIndex) -> SeatIndex {
        let base = index - index % self.table_size;
        base + (index % self.table_size + 1) % self.table_size
    }

    /// Distinct seats directly beside `index`. A ring of one seat has no
    /// neighbour seat; a ring of two has one.
    pub fn neighbour_seats(&self, index: SeatIndex) -> impl Iterator<Item = SeatIndex> {
        let left = self.left(index);
        let right = self.right(index);
        let right = (right != left).then_some(right);
        std::iter::once(left).chain(right).filter(move |&seat| seat != index)
    }

    /// Guests seated directly to the left or right of `index`.
    pub fn neighbours<O: Occupancy + ?Sized>(
        &self,
        index: SeatIndex,
        occupancy: &O,
    ) -> HashSet<GuestId> {
        self.neighbour_seats(index)
            .filter_map(|seat| occupancy.occupant(seat))
            .collect()
    }

    /// Guests seated anywhere else at the same table as `index`.
    ///
    /// Walks left until a visited seat is reached, then right under the
    /// same rule, so each seat of the ring is looked at once.
    pub fn tablemates<O: Occupancy + ?Sized>(
        &self,
        index: SeatIndex,
        occupancy: &O,
    ) -> HashSet<GuestId> {
        let mut guests = HashSet::new();
        let mut visited = HashSet::from([index]);
        let steps: [fn(&Topology, SeatIndex) -> SeatIndex; 2] = [Topology::left, Topology::right];
        for step in steps {
            let mut next = step(self, index);
            while visited.insert(next) {
                guests.extend(occupancy.occupant(next));
                next = step(self, next);
            }
        }
        guests
    }
}
