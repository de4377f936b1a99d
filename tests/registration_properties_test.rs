//! Property tests for the registration roster
//!
//! For any sequence of claim/release operations the roster must keep every
//! role at or under capacity and every user in at most one list.

use proptest::prelude::*;

use RaidBuddy::models::preset::{RolePreset, RoleSlot};
use RaidBuddy::models::roster::{Participant, Roster};

const USERS: i64 = 8;

#[derive(Debug, Clone)]
enum Op {
    Claim { user: i64, key: usize },
    Release { user: i64 },
}

fn preset() -> RolePreset {
    RolePreset {
        key: "ss".to_string(),
        title: "Small Scale Event".to_string(),
        description: "Small group out roaming and ganking.".to_string(),
        roles: vec![
            RoleSlot { name: "Tank".to_string(), capacity: 2 },
            RoleSlot { name: "Healer".to_string(), capacity: 2 },
            RoleSlot { name: "DPS".to_string(), capacity: 6 },
            RoleSlot { name: "Scout".to_string(), capacity: 1 },
        ],
        statuses: vec!["Maybe".to_string()],
    }
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        // An out-of-range key index exercises the UnknownRole path too
        (0..USERS, 0..7usize).prop_map(|(user, key)| Op::Claim { user, key }),
        (0..USERS).prop_map(|user| Op::Release { user }),
    ]
}

proptest! {
    #[test]
    fn invariants_hold_over_any_operation_sequence(
        ops in proptest::collection::vec(op_strategy(), 0..64)
    ) {
        let preset = preset();
        let mut keys: Vec<String> = preset.roster_keys().map(|k| k.to_string()).collect();
        keys.push("NoSuchRole".to_string());

        let mut roster = Roster::for_preset(&preset);

        for op in ops {
            let counts_before: Vec<usize> = (0..USERS)
                .map(|user| user_count(&roster, &keys, user))
                .collect();

            match op {
                Op::Claim { user, key } => {
                    let name = &keys[key % keys.len()];
                    let result = roster.claim(
                        &preset,
                        Participant { user_id: user, display_name: format!("u{}", user) },
                        name,
                    );

                    // A failed claim never leaves the user registered
                    if result.is_err() {
                        prop_assert_eq!(user_count(&roster, &keys, user), 0);
                    }
                }
                Op::Release { user } => {
                    let removed = roster.release(user);
                    prop_assert_eq!(removed, counts_before[user as usize] > 0);
                }
            }

            // Capacity invariant
            for slot in &preset.roles {
                prop_assert!(roster.members(&slot.name).len() <= slot.capacity as usize);
            }

            // Mutual exclusion across roles and statuses
            for user in 0..USERS {
                prop_assert!(user_count(&roster, &keys, user) <= 1);
            }
        }
    }

    #[test]
    fn total_claims_matches_sum_of_lists(
        ops in proptest::collection::vec(op_strategy(), 0..64)
    ) {
        let preset = preset();
        let keys: Vec<String> = preset.roster_keys().map(|k| k.to_string()).collect();
        let mut roster = Roster::for_preset(&preset);

        for op in ops {
            match op {
                Op::Claim { user, key } => {
                    let name = &keys[key % keys.len()];
                    let _ = roster.claim(
                        &preset,
                        Participant { user_id: user, display_name: format!("u{}", user) },
                        name,
                    );
                }
                Op::Release { user } => {
                    roster.release(user);
                }
            }
        }

        let sum: usize = keys.iter().map(|k| roster.members(k).len()).sum();
        prop_assert_eq!(roster.total_claims(), sum);
    }
}

fn user_count(roster: &Roster, keys: &[String], user: i64) -> usize {
    keys.iter()
        .map(|key| {
            roster
                .members(key)
                .iter()
                .filter(|p| p.user_id == user)
                .count()
        })
        .sum()
}
