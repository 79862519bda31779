use std::fmt;

use bevy::prelude::*;

use super::components::DamageInfo;

/// Handle returned by [`Hook::subscribe`], used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookId(u64);

type Callback<A> = Box<dyn FnMut(&A) + Send + Sync + 'static>;

/// A zero-or-more-subscriber notification hook.
///
/// Subscribers are invoked in registration order, synchronously, every time
/// the hook fires. Subscribing while dead or mid-game is allowed; firing with
/// no subscribers is a no-op.
pub struct Hook<A> {
    next_id: u64,
    subscribers: Vec<(HookId, Callback<A>)>,
}

impl<A> Hook<A> {
    pub fn subscribe(&mut self, callback: impl FnMut(&A) + Send + Sync + 'static) -> HookId {
        let id = HookId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Removes a subscriber. Returns false if the id was already gone.
    pub fn unsubscribe(&mut self, id: HookId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    pub fn fire(&mut self, arg: &A) {
        for (_, callback) in self.subscribers.iter_mut() {
            callback(arg);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl<A> Default for Hook<A> {
    fn default() -> Self {
        Self {
            next_id: 0,
            subscribers: Vec::new(),
        }
    }
}

impl<A> fmt::Debug for Hook<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// Argument for [`HealthHooks::on_injured`] and [`HealthHooks::on_hurt`].
///
/// For `on_injured`, `damage` is always `None` (the base damage path has no
/// damage detail to pass) and `other` is the causer. For `on_hurt`, `damage`
/// carries the dealt hit and `other` is the victim.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HurtPayload {
    pub damage: Option<DamageInfo>,
    pub other: Option<Entity>,
}

/// The full set of notification hooks raised by a `CharacterHealth`.
///
/// Firing order within each operation is fixed; game logic (death animations
/// before the game-over screen, invulnerability jingles...) depends on it.
#[derive(Debug, Default)]
pub struct HealthHooks {
    /// Fired when a heal leaves the character at max health.
    pub on_max_health: Hook<()>,
    /// Fired on every damage attempt that passes the friendly-fire gate,
    /// even when the character is immune or invulnerable.
    pub on_damage: Hook<()>,
    /// Fired right after `on_damage` when the hit was ignored because the
    /// character is immune or invulnerable.
    pub on_immunity: Hook<()>,
    /// Fired when this character's health was actually reduced.
    pub on_injured: Hook<HurtPayload>,
    /// Fired on the *causer* when a hit it dealt reduced someone's health.
    pub on_hurt: Hook<HurtPayload>,
    /// Fired on every heal.
    pub on_heal: Hook<()>,
    /// Fired when the character dies, before game-over or respawn handling.
    pub on_death: Hook<()>,
    /// Fired after `on_death` when the last life was spent.
    pub on_game_over: Hook<()>,
    /// Fired every time the invulnerability window is (re)armed.
    pub on_invulnerability_start: Hook<()>,
    /// Fired exactly once when the window expires naturally. An explicit
    /// `set_vulnerable` does NOT fire this.
    pub on_invulnerability_end: Hook<()>,
    /// Fired after a death that still had lives left, once health is
    /// restored.
    pub on_respawn: Hook<()>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_fire_with_no_subscribers_is_noop() {
        let mut hook: Hook<()> = Hook::default();
        hook.fire(&());
        assert!(hook.is_empty());
    }

    #[test]
    fn test_subscribe_and_fire() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut hook: Hook<()> = Hook::default();
        let c = counter.clone();
        hook.subscribe(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        hook.fire(&());
        hook.fire(&());
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_fire_runs_in_registration_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut hook: Hook<()> = Hook::default();
        for label in ["first", "second", "third"] {
            let o = order.clone();
            hook.subscribe(move |_| o.lock().unwrap().push(label));
        }

        hook.fire(&());
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_unsubscribe_removes_subscriber() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut hook: Hook<()> = Hook::default();
        let c = counter.clone();
        let id = hook.subscribe(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        assert!(hook.unsubscribe(id));
        hook.fire(&());
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        // Second removal reports nothing left
        assert!(!hook.unsubscribe(id));
    }

    #[test]
    fn test_unsubscribe_keeps_other_subscribers() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut hook: Hook<()> = Hook::default();
        let first = hook.subscribe(|_| {});
        let c = counter.clone();
        hook.subscribe(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        hook.unsubscribe(first);
        hook.fire(&());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(hook.subscriber_count(), 1);
    }

    #[test]
    fn test_payload_reaches_subscriber() {
        let seen = Arc::new(Mutex::new(None));
        let mut hook: Hook<HurtPayload> = Hook::default();
        let s = seen.clone();
        hook.subscribe(move |payload: &HurtPayload| {
            *s.lock().unwrap() = Some(*payload);
        });

        let mut world = World::new();
        let causer = world.spawn_empty().id();
        hook.fire(&HurtPayload {
            damage: None,
            other: Some(causer),
        });

        let payload = seen.lock().unwrap().unwrap();
        assert_eq!(payload.damage, None);
        assert_eq!(payload.other, Some(causer));
    }

    #[test]
    fn test_health_hooks_default_is_empty() {
        let hooks = HealthHooks::default();
        assert!(hooks.on_damage.is_empty());
        assert!(hooks.on_death.is_empty());
        assert!(hooks.on_respawn.is_empty());
    }
}
