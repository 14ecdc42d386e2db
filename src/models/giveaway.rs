use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard, PoisonError, RwLock,
    },
};

use serenity::all::{ChannelId, MessageId, UserId};
use thiserror::Error;

pub type GiveawayId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GiveawayPhase {
    Created,
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    Entered,
    AlreadyEntered,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveOutcome {
    Exited,
    NotParticipating,
    Closed,
}

/// Rejections of a `/giveaway` request, worded for the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GiveawayError {
    #[error("Only the server owner can use this command.")]
    Unauthorized,
    #[error("Invalid channel ID.")]
    ChannelNotFound,
    #[error("Invalid duration format. Use s, m, h, or d.")]
    InvalidDuration,
    #[error("Invalid claim_time format. Use m or h.")]
    InvalidClaimTime,
}

/// Everything a giveaway needs, validated, before it is registered.
#[derive(Debug, Clone)]
pub struct NewGiveaway {
    pub channel: ChannelId,
    pub prize: String,
    pub duration: std::time::Duration,
    pub end_time: time::OffsetDateTime,
    pub winner: UserId,
    pub host: UserId,
    pub claim_time: String,
}

#[derive(Debug)]
struct GiveawayState {
    entries: Vec<UserId>,
    message: Option<MessageId>,
    phase: GiveawayPhase,
}

#[derive(Debug)]
pub struct Giveaway {
    pub id: GiveawayId,
    pub channel: ChannelId,
    pub prize: String,
    pub duration: std::time::Duration,
    pub end_time: time::OffsetDateTime,
    pub winner: UserId,
    pub host: UserId,
    pub claim_time: String,
    state: Mutex<GiveawayState>,
}

impl Giveaway {
    pub fn new(id: GiveawayId, new: NewGiveaway) -> Self {
        Giveaway {
            id,
            channel: new.channel,
            prize: new.prize,
            duration: new.duration,
            end_time: new.end_time,
            winner: new.winner,
            host: new.host,
            claim_time: new.claim_time,
            state: Mutex::new(GiveawayState {
                entries: Vec::new(),
                message: None,
                phase: GiveawayPhase::Created,
            }),
        }
    }

    // Nothing panics while holding the guard, but a poisoned lock still holds
    // consistent state.
    fn state(&self) -> MutexGuard<'_, GiveawayState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn join(&self, user: UserId) -> JoinOutcome {
        let mut state = self.state();
        if state.phase == GiveawayPhase::Closed {
            return JoinOutcome::Closed;
        }
        if state.entries.contains(&user) {
            return JoinOutcome::AlreadyEntered;
        }
        state.entries.push(user);
        JoinOutcome::Entered
    }

    pub fn leave(&self, user: UserId) -> LeaveOutcome {
        let mut state = self.state();
        if state.phase == GiveawayPhase::Closed {
            return LeaveOutcome::Closed;
        }
        match state.entries.iter().position(|entry| *entry == user) {
            Some(index) => {
                state.entries.remove(index);
                LeaveOutcome::Exited
            }
            None => LeaveOutcome::NotParticipating,
        }
    }

    /// Entrants in the order they joined.
    pub fn participants(&self) -> Vec<UserId> {
        self.state().entries.clone()
    }

    pub fn entry_count(&self) -> usize {
        self.state().entries.len()
    }

    pub fn phase(&self) -> GiveawayPhase {
        self.state().phase
    }

    pub fn message(&self) -> Option<MessageId> {
        self.state().message
    }

    pub fn open(&self, message: MessageId) {
        let mut state = self.state();
        state.message = Some(message);
        state.phase = GiveawayPhase::Open;
    }

    pub fn close(&self) {
        self.state().phase = GiveawayPhase::Closed;
    }
}

/// In-memory registry of running giveaways, keyed by giveaway id.
#[derive(Debug, Default)]
pub struct GiveawayManager {
    next_id: AtomicU64,
    giveaways: RwLock<HashMap<GiveawayId, Arc<Giveaway>>>,
}

impl GiveawayManager {
    pub fn new() -> Self {
        GiveawayManager::default()
    }

    pub fn register(&self, new: NewGiveaway) -> Arc<Giveaway> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let giveaway = Arc::new(Giveaway::new(id, new));
        self.giveaways
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, giveaway.clone());
        giveaway
    }

    pub fn get(&self, id: GiveawayId) -> Option<Arc<Giveaway>> {
        self.giveaways
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    pub fn remove(&self, id: GiveawayId) -> Option<Arc<Giveaway>> {
        self.giveaways
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
    }

    pub fn active_count(&self) -> usize {
        self.giveaways
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn new_giveaway(seconds: u64) -> NewGiveaway {
        NewGiveaway {
            channel: ChannelId::new(100),
            prize: "Nitro".to_string(),
            duration: std::time::Duration::from_secs(seconds),
            end_time: time::OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap(),
            winner: UserId::new(7),
            host: UserId::new(8),
            claim_time: "30m".to_string(),
        }
    }

    #[test]
    fn test_join_twice_keeps_one_entry() {
        let giveaway = Giveaway::new(1, new_giveaway(10));

        assert_eq!(giveaway.join(UserId::new(1)), JoinOutcome::Entered);
        assert_eq!(giveaway.join(UserId::new(1)), JoinOutcome::AlreadyEntered);
        assert_eq!(giveaway.entry_count(), 1);
    }

    #[test]
    fn test_join_then_leave_restores_entries() {
        let giveaway = Giveaway::new(1, new_giveaway(10));
        giveaway.join(UserId::new(1));
        let before = giveaway.participants();

        assert_eq!(giveaway.join(UserId::new(2)), JoinOutcome::Entered);
        assert_eq!(giveaway.leave(UserId::new(2)), LeaveOutcome::Exited);
        assert_eq!(giveaway.participants(), before);
        assert_eq!(
            giveaway.leave(UserId::new(2)),
            LeaveOutcome::NotParticipating
        );
    }

    #[test]
    fn test_participants_keep_join_order() {
        let giveaway = Giveaway::new(1, new_giveaway(10));
        for id in [5, 3, 9] {
            giveaway.join(UserId::new(id));
        }
        giveaway.leave(UserId::new(3));
        giveaway.join(UserId::new(3));

        assert_eq!(
            giveaway.participants(),
            vec![UserId::new(5), UserId::new(9), UserId::new(3)]
        );
    }

    #[test]
    fn test_phase_transitions() {
        let giveaway = Giveaway::new(1, new_giveaway(10));
        assert_eq!(giveaway.phase(), GiveawayPhase::Created);
        assert_eq!(giveaway.message(), None);

        giveaway.open(MessageId::new(55));
        assert_eq!(giveaway.phase(), GiveawayPhase::Open);
        assert_eq!(giveaway.message(), Some(MessageId::new(55)));

        giveaway.join(UserId::new(1));
        giveaway.close();
        assert_eq!(giveaway.join(UserId::new(2)), JoinOutcome::Closed);
        assert_eq!(giveaway.leave(UserId::new(1)), LeaveOutcome::Closed);
        assert_eq!(giveaway.entry_count(), 1);
    }

    #[test]
    fn test_manager_register_get_remove() {
        let manager = GiveawayManager::new();
        let first = manager.register(new_giveaway(10));
        let second = manager.register(new_giveaway(20));

        assert_ne!(first.id, second.id);
        assert_eq!(manager.active_count(), 2);
        assert_eq!(manager.get(first.id).unwrap().duration.as_secs(), 10);

        manager.remove(first.id);
        assert!(manager.get(first.id).is_none());
        assert_eq!(manager.active_count(), 1);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GiveawayError::Unauthorized.to_string(),
            "Only the server owner can use this command."
        );
        assert_eq!(
            GiveawayError::InvalidClaimTime.to_string(),
            "Invalid claim_time format. Use m or h."
        );
    }
}
