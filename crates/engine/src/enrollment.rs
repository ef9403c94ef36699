//! Enrollment reconciliation — maintains the available/enrolled partition of
//! a campaign's worker-account universe during an editing session.

use serde::{Deserialize, Serialize};

/// Body of the full-replacement persistence request: the complete enrolled
/// list, not a delta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentPayload {
    pub account_names: Vec<String>,
}

/// Disjoint partition of a campaign's account universe.
///
/// Seeded from the server-reported partition; every `enroll`/`unenroll`
/// keeps the two sides disjoint with their union equal to the original
/// universe. Both sides stay lexicographically sorted for deterministic
/// display. Misuse (moving a name that is not on the expected side) is a
/// silent no-op.
#[derive(Debug, Clone)]
pub struct EnrollmentState {
    available: Vec<String>,
    enrolled: Vec<String>,
}

impl EnrollmentState {
    /// Seed from the server's partition. Duplicates are collapsed; a name
    /// reported on both sides stays enrolled.
    pub fn new(available: Vec<String>, enrolled: Vec<String>) -> Self {
        let mut enrolled = enrolled;
        enrolled.sort();
        enrolled.dedup();
        let mut available = available;
        available.sort();
        available.dedup();
        available.retain(|name| enrolled.binary_search(name).is_err());
        Self { available, enrolled }
    }

    /// Move each given name from `available` into `enrolled`. Names not
    /// currently available are ignored, so nothing can be enrolled twice.
    pub fn enroll<I>(&mut self, names: I)
    where
        I: IntoIterator<Item = String>,
    {
        let mut moved = false;
        for name in names {
            if let Some(pos) = self.available.iter().position(|n| *n == name) {
                self.available.remove(pos);
                self.enrolled.push(name);
                moved = true;
            }
        }
        if moved {
            self.enrolled.sort();
        }
    }

    /// Move one name back from `enrolled` into `available`. No-op when the
    /// name is not enrolled.
    pub fn unenroll(&mut self, name: &str) {
        if let Some(pos) = self.enrolled.iter().position(|n| n == name) {
            let name = self.enrolled.remove(pos);
            self.available.push(name);
            self.available.sort();
        }
    }

    /// The payload to persist: the complete current enrolled set.
    pub fn commit(&self) -> EnrollmentPayload {
        EnrollmentPayload {
            account_names: self.enrolled.clone(),
        }
    }

    pub fn available(&self) -> &[String] {
        &self.available
    }

    pub fn enrolled(&self) -> &[String] {
        &self.enrolled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn assert_partition(state: &EnrollmentState, universe: &[&str]) {
        let mut union: Vec<&str> = state
            .available()
            .iter()
            .chain(state.enrolled().iter())
            .map(String::as_str)
            .collect();
        union.sort();
        let mut expected = universe.to_vec();
        expected.sort();
        assert_eq!(union, expected, "union must equal the original universe");
        for name in state.enrolled() {
            assert!(
                !state.available().contains(name),
                "{name} present on both sides"
            );
        }
    }

    #[test]
    fn enroll_moves_names_and_sorts() {
        let mut state = EnrollmentState::new(names(&["carol", "alice", "bob"]), vec![]);
        state.enroll(names(&["carol", "alice"]));

        assert_eq!(state.enrolled(), &["alice", "carol"]);
        assert_eq!(state.available(), &["bob"]);
        assert_partition(&state, &["alice", "bob", "carol"]);
    }

    #[test]
    fn unenroll_is_the_inverse() {
        let mut state = EnrollmentState::new(names(&["bob"]), names(&["alice", "carol"]));
        state.unenroll("carol");

        assert_eq!(state.available(), &["bob", "carol"]);
        assert_eq!(state.enrolled(), &["alice"]);
        assert_partition(&state, &["alice", "bob", "carol"]);
    }

    #[test]
    fn enrolling_an_unknown_name_is_a_no_op() {
        let mut state = EnrollmentState::new(names(&["alice"]), names(&["bob"]));
        state.enroll(names(&["bob", "ghost"]));

        // "bob" is already enrolled and must not be duplicated
        assert_eq!(state.enrolled(), &["bob"]);
        assert_eq!(state.available(), &["alice"]);
    }

    #[test]
    fn unenrolling_a_ghost_leaves_both_sides_unchanged() {
        let mut state = EnrollmentState::new(names(&["alice"]), names(&["bob"]));
        state.unenroll("ghost");

        assert_eq!(state.available(), &["alice"]);
        assert_eq!(state.enrolled(), &["bob"]);
    }

    #[test]
    fn partition_holds_under_interleaved_calls() {
        let universe = ["a", "b", "c", "d", "e"];
        let mut state = EnrollmentState::new(names(&universe), vec![]);

        state.enroll(names(&["a", "c"]));
        assert_partition(&state, &universe);
        state.unenroll("a");
        assert_partition(&state, &universe);
        state.enroll(names(&["e", "a", "a"]));
        assert_partition(&state, &universe);
        state.unenroll("zz");
        assert_partition(&state, &universe);
        state.enroll(names(&["b", "d"]));
        assert_partition(&state, &universe);

        assert!(state.available().is_empty());
        assert_eq!(state.enrolled(), &["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn commit_carries_the_full_enrolled_set() {
        let mut state = EnrollmentState::new(names(&["alice", "bob"]), names(&["carol"]));
        state.enroll(names(&["bob"]));

        let payload = state.commit();
        assert_eq!(payload.account_names, names(&["bob", "carol"]));
    }

    #[test]
    fn seed_collapses_duplicates_and_overlap() {
        let state = EnrollmentState::new(
            names(&["alice", "alice", "bob"]),
            names(&["bob", "carol"]),
        );

        assert_eq!(state.available(), &["alice"]);
        assert_eq!(state.enrolled(), &["bob", "carol"]);
    }
}
