//! Status-flag predicates and transitions.
//!
//! Rows are never removed. Visibility is the conjunction of flags below, and
//! every transition is a single conditional `UPDATE` whose `WHERE` clause is
//! the source state, so a lost race shows up as zero affected rows.

use crate::database::reason;

pub const ADMIN_ACTIVE: &str = "is_active AND NOT delete_status";

pub const CLUB_ACTIVE: &str = "is_active AND NOT is_suspended AND NOT delete_status";

/// States a player row moves through after registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    /// Registered, waiting for the club.
    Pending,
    /// Approved and in good standing; the only state that may log in.
    Active,
    Suspended,
    /// Any row not soft-deleted.
    Present,
}

impl PlayerState {
    pub const fn predicate(self) -> &'static str {
        match self {
            PlayerState::Pending => "is_active AND NOT is_approved AND NOT is_suspended AND NOT delete_status",
            PlayerState::Active => "is_active AND is_approved AND NOT is_suspended AND NOT delete_status",
            PlayerState::Suspended => "is_suspended AND NOT is_active AND NOT delete_status",
            PlayerState::Present => "NOT delete_status",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    Live,
    Ended,
    Present,
}

impl MatchState {
    pub const fn predicate(self) -> &'static str {
        match self {
            MatchState::Live => "NOT end_status AND NOT delete_status",
            MatchState::Ended => "end_status AND NOT delete_status",
            MatchState::Present => "NOT delete_status",
        }
    }

    pub const fn not_found(self) -> &'static str {
        match self {
            MatchState::Live => reason::MATCH_NOT_FOUND_OR_ENDED,
            MatchState::Ended | MatchState::Present => reason::MATCH_NOT_FOUND,
        }
    }
}

pub const NEWS_LIVE: &str = "NOT delete_status";

pub const LEAVE_PENDING: &str = "NOT is_approved";
pub const LEAVE_APPROVED: &str = "is_approved";

/// A guarded flag change: `SET assigns WHERE <scope> AND requires`.
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    pub requires: &'static str,
    pub assigns: &'static str,
    pub rejection: &'static str,
}

pub const APPROVE_PLAYER: Transition = Transition {
    requires: PlayerState::Pending.predicate(),
    assigns: "is_approved = TRUE",
    rejection: reason::PLAYER_ALREADY_APPROVED,
};

pub const SUSPEND_PLAYER: Transition = Transition {
    requires: PlayerState::Active.predicate(),
    assigns: "is_suspended = TRUE, is_active = FALSE",
    rejection: reason::PLAYER_ALREADY_SUSPENDED,
};

pub const UNSUSPEND_PLAYER: Transition = Transition {
    requires: PlayerState::Suspended.predicate(),
    assigns: "is_suspended = FALSE, is_active = TRUE",
    rejection: reason::PLAYER_NOT_SUSPENDED,
};

pub const DELETE_PLAYER: Transition = Transition {
    requires: PlayerState::Present.predicate(),
    assigns: "delete_status = TRUE",
    rejection: reason::PLAYER_ALREADY_DELETED,
};

pub const END_MATCH: Transition = Transition {
    requires: MatchState::Live.predicate(),
    assigns: "end_status = TRUE",
    rejection: reason::MATCH_NOT_FOUND_OR_ENDED,
};

pub const DELETE_MATCH: Transition = Transition {
    requires: MatchState::Present.predicate(),
    assigns: "delete_status = TRUE",
    rejection: reason::MATCH_NOT_FOUND,
};

pub const DELETE_NEWS: Transition = Transition {
    requires: NEWS_LIVE,
    assigns: "delete_status = TRUE",
    rejection: reason::NEWS_NOT_FOUND,
};

pub const APPROVE_LEAVE: Transition = Transition {
    requires: LEAVE_PENDING,
    assigns: "is_approved = TRUE",
    rejection: reason::LEAVE_NOT_ELIGIBLE,
};

impl Transition {
    /// `UPDATE table SET ... WHERE scope AND requires RETURNING *`.
    pub fn update_sql(&self, table: &str, scope: &str) -> String {
        format!(
            "UPDATE {} SET {}, updated_date = now() WHERE {} AND {} RETURNING *",
            table, self.assigns, scope, self.requires
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Flags of a player row, evaluated the way the SQL predicates read.
    #[derive(Clone, Copy)]
    struct Flags {
        is_active: bool,
        is_approved: bool,
        is_suspended: bool,
        delete_status: bool,
    }

    impl Flags {
        fn satisfies(&self, state: PlayerState) -> bool {
            match state {
                PlayerState::Pending => {
                    self.is_active && !self.is_approved && !self.is_suspended && !self.delete_status
                }
                PlayerState::Active => self.is_active && self.is_approved && !self.is_suspended && !self.delete_status,
                PlayerState::Suspended => self.is_suspended && !self.is_active && !self.delete_status,
                PlayerState::Present => !self.delete_status,
            }
        }
    }

    #[test]
    fn predicates_name_every_flag_they_depend_on() {
        for flag in ["is_active", "is_approved", "is_suspended", "delete_status"] {
            assert!(PlayerState::Active.predicate().contains(flag));
            assert!(PlayerState::Pending.predicate().contains(flag));
        }
        assert!(MatchState::Live.predicate().contains("NOT end_status"));
        assert!(MatchState::Ended.predicate().starts_with("end_status"));
    }

    #[test]
    fn suspended_and_active_are_exclusive() {
        let active = Flags { is_active: true, is_approved: true, is_suspended: false, delete_status: false };
        let suspended = Flags { is_active: false, is_suspended: true, ..active };

        assert!(active.satisfies(PlayerState::Active));
        assert!(!active.satisfies(PlayerState::Suspended));
        assert!(suspended.satisfies(PlayerState::Suspended));
        assert!(!suspended.satisfies(PlayerState::Active));

        let deleted = Flags { delete_status: true, ..active };
        for state in [PlayerState::Pending, PlayerState::Active, PlayerState::Suspended, PlayerState::Present] {
            assert!(!deleted.satisfies(state));
        }
    }

    #[test]
    fn transition_sql_guards_on_source_state() {
        let sql = APPROVE_PLAYER.update_sql("players", "player_id = $1 AND club_id = $2");
        assert_eq!(
            sql,
            "UPDATE players SET is_approved = TRUE, updated_date = now() \
             WHERE player_id = $1 AND club_id = $2 \
             AND is_active AND NOT is_approved AND NOT is_suspended AND NOT delete_status RETURNING *"
        );
        assert!(END_MATCH.update_sql("matches", "match_id = $1").contains("NOT end_status"));
    }
}
