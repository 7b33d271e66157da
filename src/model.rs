pub mod entity {
    use std::collections::{HashMap, HashSet};
    use std::fmt;
    use std::str::FromStr;

    use serde::{Deserialize, Serialize};
    use tracing::{debug, warn};

    use crate::error::PlanError;

    pub type GuestId = u32;

    /// Serialized as `MALE`/`FEMALE`; parsed in any case.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(try_from = "String", into = "String")]
    pub enum Gender {
        Male,
        Female,
    }

    impl FromStr for Gender {
        type Err = PlanError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s.to_ascii_uppercase().as_str() {
                "MALE" => Ok(Gender::Male),
                "FEMALE" => Ok(Gender::Female),
                _ => Err(PlanError::UnknownGender(s.to_string())),
            }
        }
    }

    impl TryFrom<String> for Gender {
        type Error = PlanError;

        fn try_from(token: String) -> Result<Self, Self::Error> {
            token.parse()
        }
    }

    impl From<Gender> for String {
        fn from(gender: Gender) -> Self {
            gender.to_string()
        }
    }

    impl fmt::Display for Gender {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Gender::Male => f.write_str("MALE"),
                Gender::Female => f.write_str("FEMALE"),
            }
        }
    }

    /// A guest and the four relations it holds towards other guests.
    ///
    /// Relations are one-directional: `a.seat_beside` containing `b` says
    /// nothing about `b.seat_beside`.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Guest {
        pub id: GuestId,
        pub first_name: String,
        pub last_name: String,
        pub gender: Gender,
        pub seat_beside: HashSet<GuestId>,
        pub do_not_seat_beside: HashSet<GuestId>,
        pub seat_at_same_table: HashSet<GuestId>,
        pub do_not_seat_at_same_table: HashSet<GuestId>,
    }

    impl Guest {
        pub fn new(id: GuestId, first_name: &str, last_name: &str, gender: Gender) -> Guest {
            Guest {
                id,
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                gender,
                seat_beside: HashSet::new(),
                do_not_seat_beside: HashSet::new(),
                seat_at_same_table: HashSet::new(),
                do_not_seat_at_same_table: HashSet::new(),
            }
        }

        pub fn full_name(&self) -> String {
            format!("{} {}", self.first_name, self.last_name)
        }

        fn relations_mut(&mut self) -> [(&'static str, &mut HashSet<GuestId>); 4] {
            [
                ("seatBeside", &mut self.seat_beside),
                ("doNotSeatBeside", &mut self.do_not_seat_beside),
                ("seatAtSameTable", &mut self.seat_at_same_table),
                ("doNotSeatAtSameTable", &mut self.do_not_seat_at_same_table),
            ]
        }
    }

    /// Immutable set of guests, addressable by id.
    #[derive(Debug, Clone, Default)]
    pub struct GuestRegistry {
        guests: Vec<Guest>,
        index: HashMap<GuestId, usize>,
    }

    impl GuestRegistry {
        /// Builds the registry, dropping preference entries that point at
        /// unknown guests or at the guest itself.
        pub fn new(mut guests: Vec<Guest>) -> Result<GuestRegistry, PlanError> {
            let mut index = HashMap::with_capacity(guests.len());
            for (position, guest) in guests.iter().enumerate() {
                if index.insert(guest.id, position).is_some() {
                    return Err(PlanError::DuplicateGuest(guest.id));
                }
            }
            for guest in guests.iter_mut() {
                let id = guest.id;
                for (relation, ids) in guest.relations_mut() {
                    if ids.remove(&id) {
                        warn!(guest = id, relation, "dropping self reference");
                    }
                    ids.retain(|other| {
                        let known = index.contains_key(other);
                        if !known {
                            warn!(
                                guest = id,
                                relation,
                                other,
                                "dropping reference to unknown guest"
                            );
                        }
                        known
                    });
                }
            }
            debug!(guests = guests.len(), "built guest registry");
            Ok(GuestRegistry { guests, index })
        }

        pub fn get(&self, id: GuestId) -> Option<&Guest> {
            self.index.get(&id).map(|&position| &self.guests[position])
        }

        pub fn contains(&self, id: GuestId) -> bool {
            self.index.contains_key(&id)
        }

        pub fn len(&self) -> usize {
            self.guests.len()
        }

        pub fn is_empty(&self) -> bool {
            self.guests.is_empty()
        }

        pub fn ids(&self) -> impl Iterator<Item = GuestId> + '_ {
            self.guests.iter().map(|guest| guest.id)
        }

        pub fn count_gender(&self, gender: Gender) -> usize {
            self.guests.iter().filter(|guest| guest.gender == gender).count()
        }
    }
}

pub mod condition {
    use std::fmt;
    use std::iter::Sum;
    use std::ops::{Add, AddAssign, Sub};

    use serde::{Deserialize, Serialize};

    /// Two-level score. Derived ordering compares `hard` first, so any
    /// gain in `hard` beats every change in `soft`.
    #[derive(
        Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    )]
    pub struct HardSoftScore {
        pub hard: i64,
        pub soft: i64,
    }

    impl HardSoftScore {
        pub const ZERO: HardSoftScore = HardSoftScore { hard: 0, soft: 0 };

        pub fn new(hard: i64, soft: i64) -> HardSoftScore {
            HardSoftScore { hard, soft }
        }

        pub fn of_hard(hard: i64) -> HardSoftScore {
            HardSoftScore { hard, soft: 0 }
        }

        pub fn of_soft(soft: i64) -> HardSoftScore {
            HardSoftScore { hard: 0, soft }
        }

        /// No guest is unseated or seated twice.
        pub fn is_feasible(&self) -> bool {
            self.hard >= 0
        }
    }

    impl Add for HardSoftScore {
        type Output = Self;

        fn add(self, rhs: Self) -> Self::Output {
            HardSoftScore { hard: self.hard + rhs.hard, soft: self.soft + rhs.soft }
        }
    }

    impl Sub for HardSoftScore {
        type Output = Self;

        fn sub(self, rhs: Self) -> Self::Output {
            HardSoftScore { hard: self.hard - rhs.hard, soft: self.soft - rhs.soft }
        }
    }

    impl AddAssign for HardSoftScore {
        fn add_assign(&mut self, rhs: Self) {
            self.hard += rhs.hard;
            self.soft += rhs.soft;
        }
    }

    impl Sum for HardSoftScore {
        fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
            iter.fold(HardSoftScore::ZERO, Add::add)
        }
    }

    impl fmt::Display for HardSoftScore {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}hard/{}soft", self.hard, self.soft)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::condition::HardSoftScore;
    use super::entity::{Gender, Guest, GuestRegistry};
    use crate::error::PlanError;

    #[test]
    fn hard_dominates_soft() {
        let better_hard = HardSoftScore::new(0, -100);
        let better_soft = HardSoftScore::new(-1, 100);
        assert!(better_hard > better_soft);
        assert!(HardSoftScore::new(-1, 3) > HardSoftScore::new(-1, 2));
        assert_eq!(HardSoftScore::new(-2, 5).to_string(), "-2hard/5soft");
    }

    #[test]
    fn feasible_means_no_hard_penalty() {
        assert!(HardSoftScore::of_soft(-40).is_feasible());
        assert!(HardSoftScore::ZERO.is_feasible());
        assert!(!HardSoftScore::new(-1, 12).is_feasible());
        let total: HardSoftScore = [HardSoftScore::of_hard(-1), HardSoftScore::of_hard(1)]
            .into_iter()
            .sum();
        assert!(total.is_feasible());
    }

    #[test]
    fn gender_tokens() {
        assert_eq!("MALE".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
        assert!(matches!("other".parse::<Gender>(), Err(PlanError::UnknownGender(_))));
        assert_eq!(Gender::Female.to_string(), "FEMALE");
    }

    #[test]
    fn gender_json_accepts_any_case() {
        assert_eq!(serde_json::from_str::<Gender>(r#""female""#).unwrap(), Gender::Female);
        assert_eq!(serde_json::from_str::<Gender>(r#""Male""#).unwrap(), Gender::Male);
        assert_eq!(serde_json::to_string(&Gender::Male).unwrap(), r#""MALE""#);
        let err = serde_json::from_str::<Gender>(r#""OTHER""#).unwrap_err();
        assert!(err.to_string().contains("unknown gender token"), "{err}");
    }

    #[test]
    fn registry_drops_dangling_and_self_references() {
        let mut ann = Guest::new(1, "Ann", "Lee", Gender::Female);
        ann.seat_beside.extend([1, 2, 99]);
        ann.do_not_seat_at_same_table.insert(42);
        let bob = Guest::new(2, "Bob", "Kim", Gender::Male);
        let registry = GuestRegistry::new(vec![ann, bob]).unwrap();

        let ann = registry.get(1).unwrap();
        assert_eq!(ann.seat_beside.iter().copied().collect::<Vec<_>>(), vec![2]);
        assert!(ann.do_not_seat_at_same_table.is_empty());
        assert_eq!(registry.count_gender(Gender::Male), 1);
    }

    #[test]
    fn registry_rejects_duplicate_ids() {
        let guests = vec![
            Guest::new(7, "Ann", "Lee", Gender::Female),
            Guest::new(7, "Bob", "Kim", Gender::Male),
        ];
        assert!(matches!(GuestRegistry::new(guests), Err(PlanError::DuplicateGuest(7))));
    }
}
