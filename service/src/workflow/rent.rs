//! [`RentRequest`] state machine.
//!
//! ```text
//! PENDING ──approve──> APPROVED ──confirm viewing──> VIEW_CONFIRMED
//!    │                    │                               │
//!  reject               cancel                   both finalized
//!    │                    │                               │
//!    └──> REJECTED <──────┘                               └──> BOTH_FINALIZED
//! ```
//!
//! [`RentRequest`]: crate::domain::RentRequest

use derive_more::{Display, Error as StdError};

use crate::domain::{
    notification,
    rent_request::{Finalization, Status},
    user,
};

use super::{Notice, Transition};

/// Users involved into a rent request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Parties {
    /// User willing to rent the room.
    pub tenant: user::Id,

    /// User owning the room.
    pub owner: user::Id,
}

impl Parties {
    /// Ensures the `actor` is the owner.
    fn require_owner(self, actor: user::Id) -> Result<(), Error> {
        if actor == self.owner {
            Ok(())
        } else {
            Err(Error::Forbidden(actor))
        }
    }

    /// Ensures the `actor` is the tenant.
    fn require_tenant(self, actor: user::Id) -> Result<(), Error> {
        if actor == self.tenant {
            Ok(())
        } else {
            Err(Error::Forbidden(actor))
        }
    }
}

/// State of a rent request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct State {
    /// Current [`Status`].
    pub status: Status,

    /// Current [`Finalization`] marks.
    pub finalization: Finalization,
}

impl State {
    /// [`State`] of a freshly created rent request.
    pub const INITIAL: Self = Self {
        status: Status::Pending,
        finalization: Finalization {
            tenant: false,
            owner: false,
        },
    };

    /// Ensures the current [`Status`] is the `expected` one.
    fn require(self, expected: Status, reason: &'static str) -> Result<(), Error> {
        if self.status == expected {
            Ok(())
        } else {
            Err(Error::InvalidState {
                status: self.status,
                reason,
            })
        }
    }
}

/// Owner's decision upon a pending rent request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Decision {
    /// Approve the request.
    Approve,

    /// Reject the request.
    Reject,
}

impl Decision {
    /// Returns the [`Status`] this [`Decision`] leads to.
    #[must_use]
    pub const fn status(self) -> Status {
        match self {
            Self::Approve => Status::Approved,
            Self::Reject => Status::Rejected,
        }
    }
}

/// Action upon an existing rent request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Action {
    /// Owner decides upon a pending request.
    Decide(Decision),

    /// Tenant confirms the viewing took place.
    ConfirmViewing,

    /// Either party finalizes the rental.
    ConfirmFinalize,

    /// Owner cancels an approved request.
    Cancel,
}

/// Error of a rent request transition.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, StdError)]
pub enum Error {
    /// Acting user is not allowed to perform the action.
    #[display("`User(id: {_0})` is not allowed to perform this action")]
    Forbidden(#[error(not(source))] user::Id),

    /// Action is not allowed in the current [`Status`].
    #[display("rent request is `{status}`: {reason}")]
    InvalidState {
        /// Current [`Status`] of the rent request.
        status: Status,

        /// Explanation of the rejection.
        reason: &'static str,
    },
}

/// Creates a new rent request between the provided [`Parties`].
///
/// # Errors
///
/// [`Error::Forbidden`] if the tenant owns the room.
pub fn create(parties: Parties) -> Result<Transition<State>, Error> {
    if parties.tenant == parties.owner {
        return Err(Error::Forbidden(parties.tenant));
    }

    Ok(Transition {
        state: State::INITIAL,
        notices: vec![notice(
            parties.owner,
            "You have received a new rent request for your room",
        )],
    })
}

/// Applies the `action` of the `actor` to the provided `state`.
///
/// # Errors
///
/// - [`Error::Forbidden`] if the `actor` is not the party the `action`
///   belongs to;
/// - [`Error::InvalidState`] if the `action` is not allowed in the current
///   [`Status`].
pub fn transition(
    state: State,
    actor: user::Id,
    parties: Parties,
    action: Action,
) -> Result<Transition<State>, Error> {
    match action {
        Action::Decide(decision) => {
            parties.require_owner(actor)?;
            state.require(Status::Pending, "can only decide upon PENDING")?;

            let status = decision.status();
            Ok(Transition {
                state: State { status, ..state },
                notices: vec![notice(
                    parties.tenant,
                    format!("Your rent request has been {status}"),
                )],
            })
        }

        Action::ConfirmViewing => {
            parties.require_tenant(actor)?;
            state.require(
                Status::Approved,
                "can only confirm viewing of APPROVED",
            )?;

            Ok(Transition {
                state: State {
                    status: Status::ViewConfirmed,
                    ..state
                },
                notices: vec![notice(
                    parties.owner,
                    "The tenant has confirmed viewing your room",
                )],
            })
        }

        Action::ConfirmFinalize => finalize(state, actor, parties),

        Action::Cancel => {
            parties.require_owner(actor)?;
            state.require(Status::Approved, "can only cancel APPROVED")?;

            Ok(Transition {
                state: State {
                    status: Status::Rejected,
                    ..state
                },
                notices: vec![notice(
                    parties.tenant,
                    "Your approved rent request has been cancelled by the owner",
                )],
            })
        }
    }
}

/// Puts the finalization mark of the `actor`.
///
/// Repeated finalization by the same party changes nothing.
fn finalize(
    state: State,
    actor: user::Id,
    parties: Parties,
) -> Result<Transition<State>, Error> {
    let by_tenant = actor == parties.tenant;
    if !by_tenant && actor != parties.owner {
        return Err(Error::Forbidden(actor));
    }
    state.require(
        Status::ViewConfirmed,
        "can only finalize VIEW_CONFIRMED",
    )?;

    let mut finalization = state.finalization;
    let mark = if by_tenant {
        &mut finalization.tenant
    } else {
        &mut finalization.owner
    };
    if *mark {
        return Ok(Transition {
            state,
            notices: vec![],
        });
    }
    *mark = true;

    let status = finalization.status(state.status);
    let notices = if status == Status::BothFinalized {
        [parties.tenant, parties.owner]
            .into_iter()
            .map(|to| notice(to, "The rental has been finalized by both parties"))
            .collect()
    } else {
        let counterpart = if by_tenant {
            parties.owner
        } else {
            parties.tenant
        };
        vec![notice(
            counterpart,
            "The other party has finalized the rental, awaiting your \
             confirmation",
        )]
    };

    Ok(Transition {
        state: State {
            status,
            finalization,
        },
        notices,
    })
}

/// Creates a rent request [`Notice`] for the `recipient`.
fn notice(recipient: user::Id, text: impl Into<String>) -> Notice {
    Notice {
        recipient,
        kind: notification::Kind::RentRequest,
        text: text.into(),
    }
}

#[cfg(test)]
mod spec {
    use crate::domain::{
        rent_request::{Finalization, Status},
        user,
    };

    use super::{create, transition, Action, Decision, Error, Parties, State};

    fn parties() -> Parties {
        Parties {
            tenant: user::Id::new(),
            owner: user::Id::new(),
        }
    }

    fn at(status: Status) -> State {
        State {
            status,
            ..State::INITIAL
        }
    }

    #[test]
    fn creation_notifies_owner() {
        let p = parties();

        let t = create(p).unwrap();

        assert_eq!(t.state, State::INITIAL);
        assert_eq!(t.notices.len(), 1);
        assert_eq!(t.notices[0].recipient, p.owner);
    }

    #[test]
    fn owner_cannot_request_own_room() {
        let owner = user::Id::new();

        let err = create(Parties {
            tenant: owner,
            owner,
        })
        .unwrap_err();

        assert_eq!(err, Error::Forbidden(owner));
    }

    #[test]
    fn errors_are_std_errors_without_source() {
        let id = user::Id::new();
        let err: Box<dyn std::error::Error> = Box::new(Error::Forbidden(id));

        assert!(err.source().is_none());
        assert!(err.to_string().contains(&id.to_string()));
    }

    #[test]
    fn owner_decides_pending() {
        let p = parties();

        let approved = transition(
            State::INITIAL,
            p.owner,
            p,
            Action::Decide(Decision::Approve),
        )
        .unwrap();
        assert_eq!(approved.state.status, Status::Approved);
        assert_eq!(approved.notices[0].recipient, p.tenant);

        let rejected = transition(
            State::INITIAL,
            p.owner,
            p,
            Action::Decide(Decision::Reject),
        )
        .unwrap();
        assert_eq!(rejected.state.status, Status::Rejected);
        assert!(rejected.notices[0].text.contains("REJECTED"));
    }

    #[test]
    fn tenant_cannot_decide() {
        let p = parties();

        let err = transition(
            State::INITIAL,
            p.tenant,
            p,
            Action::Decide(Decision::Approve),
        )
        .unwrap_err();

        assert_eq!(err, Error::Forbidden(p.tenant));
    }

    #[test]
    fn cannot_decide_twice() {
        let p = parties();

        let err = transition(
            at(Status::Approved),
            p.owner,
            p,
            Action::Decide(Decision::Reject),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            Error::InvalidState {
                status: Status::Approved,
                ..
            },
        ));
    }

    #[test]
    fn viewing_requires_approval() {
        let p = parties();

        let err =
            transition(State::INITIAL, p.tenant, p, Action::ConfirmViewing)
                .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidState {
                status: Status::Pending,
                ..
            },
        ));

        let ok = transition(at(Status::Approved), p.tenant, p, Action::ConfirmViewing)
            .unwrap();
        assert_eq!(ok.state.status, Status::ViewConfirmed);
        assert_eq!(ok.notices[0].recipient, p.owner);
    }

    #[test]
    fn only_tenant_confirms_viewing() {
        let p = parties();

        let err = transition(at(Status::Approved), p.owner, p, Action::ConfirmViewing)
            .unwrap_err();

        assert_eq!(err, Error::Forbidden(p.owner));
    }

    #[test]
    fn finalization_by_both_parties() {
        let p = parties();

        let first = transition(
            at(Status::ViewConfirmed),
            p.tenant,
            p,
            Action::ConfirmFinalize,
        )
        .unwrap();
        assert_eq!(first.state.status, Status::ViewConfirmed);
        assert_eq!(
            first.state.finalization,
            Finalization {
                tenant: true,
                owner: false,
            },
        );
        assert_eq!(first.notices.len(), 1);
        assert_eq!(first.notices[0].recipient, p.owner);

        let second =
            transition(first.state, p.owner, p, Action::ConfirmFinalize)
                .unwrap();
        assert_eq!(second.state.status, Status::BothFinalized);
        assert!(second.state.finalization.is_complete());
        let recipients = second
            .notices
            .iter()
            .map(|n| n.recipient)
            .collect::<Vec<_>>();
        assert_eq!(recipients, [p.tenant, p.owner]);
    }

    #[test]
    fn repeated_finalization_is_noop() {
        let p = parties();
        let state = State {
            status: Status::ViewConfirmed,
            finalization: Finalization {
                tenant: false,
                owner: true,
            },
        };

        let t = transition(state, p.owner, p, Action::ConfirmFinalize).unwrap();

        assert_eq!(t.state, state);
        assert!(t.notices.is_empty());
    }

    #[test]
    fn finalization_requires_confirmed_viewing() {
        let p = parties();

        let err = transition(at(Status::Approved), p.owner, p, Action::ConfirmFinalize)
            .unwrap_err();

        assert!(matches!(err, Error::InvalidState { .. }));
    }

    #[test]
    fn stranger_cannot_finalize() {
        let p = parties();
        let stranger = user::Id::new();

        let err = transition(
            at(Status::ViewConfirmed),
            stranger,
            p,
            Action::ConfirmFinalize,
        )
        .unwrap_err();

        assert_eq!(err, Error::Forbidden(stranger));
    }

    #[test]
    fn cancel_only_approved() {
        let p = parties();

        let err = transition(State::INITIAL, p.owner, p, Action::Cancel)
            .unwrap_err();
        assert_eq!(
            err,
            Error::InvalidState {
                status: Status::Pending,
                reason: "can only cancel APPROVED",
            },
        );

        let ok = transition(at(Status::Approved), p.owner, p, Action::Cancel)
            .unwrap();
        assert_eq!(ok.state.status, Status::Rejected);
        assert_eq!(ok.notices[0].recipient, p.tenant);
    }

    #[test]
    fn terminal_states_accept_nothing() {
        let p = parties();

        for status in [Status::Rejected, Status::BothFinalized] {
            for (actor, action) in [
                (p.owner, Action::Decide(Decision::Approve)),
                (p.tenant, Action::ConfirmViewing),
                (p.tenant, Action::ConfirmFinalize),
                (p.owner, Action::Cancel),
            ] {
                assert!(
                    transition(at(status), actor, p, action).is_err(),
                    "{action:?} allowed from {status}",
                );
            }
        }
    }
}
