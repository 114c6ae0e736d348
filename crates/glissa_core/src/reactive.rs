//! Reactive signal graph
//!
//! Signals are externally-owned value cells. Derived values recompute from
//! whatever signals (and other derived values) their closure reads; the reads
//! are tracked, so the dependency set always matches the latest evaluation.
//! Effects re-run after a tracked signal changes.
//!
//! Recomputation is cooperative and single-threaded: derived values are
//! pull-based (validated against dependency versions on read), effects are
//! push-based (scheduled by `set`). Closures must not write back into the
//! graph; they receive `&ReactiveGraph` and can only read.

use rustc_hash::FxHashSet;
use slotmap::{new_key_type, SlotMap};
use std::any::Any;
use std::cell::RefCell;
use std::marker::PhantomData;

new_key_type! {
    /// Unique identifier for a signal node
    pub struct SignalId;
    /// Unique identifier for a derived node
    pub struct DerivedId;
    /// Unique identifier for an effect
    pub struct EffectId;
}

/// Typed handle to a signal.
///
/// Handles are plain ids plus a type marker; they stay valid for as long as
/// the node exists in the graph and read as `None` afterwards.
pub struct Signal<T> {
    id: SignalId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Signal<T> {
    pub(crate) fn from_id(id: SignalId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    pub fn id(&self) -> SignalId {
        self.id
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Signal<T> {}

impl<T> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Signal").field(&self.id).finish()
    }
}

/// Typed handle to a derived value.
pub struct Derived<T> {
    id: DerivedId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Derived<T> {
    pub(crate) fn from_id(id: DerivedId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    pub fn id(&self) -> DerivedId {
        self.id
    }
}

impl<T> Clone for Derived<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Derived<T> {}

impl<T> std::fmt::Debug for Derived<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Derived").field(&self.id).finish()
    }
}

type BoxedValue = Box<dyn Any + Send>;
type DerivedFn = Box<dyn Fn(&ReactiveGraph) -> BoxedValue + Send>;
type EffectFn = Box<dyn Fn(&ReactiveGraph) + Send>;

struct SignalSlot {
    value: BoxedValue,
    /// Bumped on every write; derived caches compare against this.
    version: u64,
    /// Effects that read this signal during their latest run.
    effects: FxHashSet<EffectId>,
}

#[derive(Default)]
struct DerivedCache {
    value: Option<BoxedValue>,
    /// Signal reads (id, version at read time) from the latest evaluation.
    signal_deps: Vec<(SignalId, u64)>,
    /// Derived reads (id, version at read time) from the latest evaluation.
    derived_deps: Vec<(DerivedId, u64)>,
    /// Bumped on every recomputation.
    version: u64,
}

struct DerivedSlot {
    compute: DerivedFn,
    cache: RefCell<DerivedCache>,
}

struct EffectSlot {
    /// Taken out while the effect runs; doubles as a re-entrancy guard.
    run: Option<EffectFn>,
    deps: Vec<SignalId>,
}

/// One in-flight evaluation (derived recompute or effect run).
#[derive(Default)]
struct TrackFrame {
    signals: Vec<(SignalId, u64)>,
    deriveds: Vec<(DerivedId, u64)>,
}

impl TrackFrame {
    fn record_signal(&mut self, id: SignalId, version: u64) {
        if !self.signals.iter().any(|(s, _)| *s == id) {
            self.signals.push((id, version));
        }
    }

    fn record_derived(&mut self, id: DerivedId, version: u64) {
        if !self.deriveds.iter().any(|(d, _)| *d == id) {
            self.deriveds.push((id, version));
        }
    }
}

/// The reactive graph: owns all signals, derived values and effects.
pub struct ReactiveGraph {
    signals: SlotMap<SignalId, SignalSlot>,
    deriveds: SlotMap<DerivedId, DerivedSlot>,
    effects: SlotMap<EffectId, EffectSlot>,
    /// Stack of active evaluations; reads are recorded into every frame so
    /// outer evaluations pick up transitive signal dependencies.
    tracking: RefCell<Vec<TrackFrame>>,
    batch_depth: u32,
    pending_effects: Vec<EffectId>,
}

impl ReactiveGraph {
    pub fn new() -> Self {
        Self {
            signals: SlotMap::with_key(),
            deriveds: SlotMap::with_key(),
            effects: SlotMap::with_key(),
            tracking: RefCell::new(Vec::new()),
            batch_depth: 0,
            pending_effects: Vec::new(),
        }
    }

    // =========================================================================
    // Signals
    // =========================================================================

    /// Create a new signal with an initial value.
    pub fn create_signal<T: Send + 'static>(&mut self, initial: T) -> Signal<T> {
        let id = self.signals.insert(SignalSlot {
            value: Box::new(initial),
            version: 0,
            effects: FxHashSet::default(),
        });
        Signal::from_id(id)
    }

    /// Read a signal's current value.
    ///
    /// Returns `None` for a removed handle (or one created by another graph).
    /// Inside a derived/effect closure the read is tracked as a dependency.
    pub fn get<T: Clone + 'static>(&self, signal: Signal<T>) -> Option<T> {
        let slot = self.signals.get(signal.id)?;
        let mut tracking = self.tracking.borrow_mut();
        for frame in tracking.iter_mut() {
            frame.record_signal(signal.id, slot.version);
        }
        drop(tracking);
        slot.value.downcast_ref::<T>().cloned()
    }

    /// Write a signal, triggering dependent effects.
    ///
    /// Inside `batch` the effect runs are deferred and coalesced; otherwise
    /// they run before `set` returns. Writes to removed handles are ignored.
    pub fn set<T: Send + 'static>(&mut self, signal: Signal<T>, value: T) {
        let Some(slot) = self.signals.get_mut(signal.id) else {
            return;
        };
        slot.value = Box::new(value);
        slot.version = slot.version.wrapping_add(1);
        tracing::trace!(signal = ?signal.id, version = slot.version, "signal write");

        let to_run: Vec<EffectId> = slot.effects.iter().copied().collect();
        if self.batch_depth > 0 {
            for id in to_run {
                if !self.pending_effects.contains(&id) {
                    self.pending_effects.push(id);
                }
            }
        } else {
            for id in to_run {
                self.run_effect(id);
            }
        }
    }

    /// Remove a signal. Subsequent reads through stale handles return `None`.
    pub fn remove_signal<T>(&mut self, signal: Signal<T>) {
        self.signals.remove(signal.id);
    }

    // =========================================================================
    // Derived values
    // =========================================================================

    /// Create a derived value. The closure is evaluated once eagerly; the
    /// signals (and derived values) it reads become its dependencies.
    pub fn create_derived<T, F>(&mut self, compute: F) -> Derived<T>
    where
        T: Send + 'static,
        F: Fn(&ReactiveGraph) -> T + Send + 'static,
    {
        let id = self.deriveds.insert(DerivedSlot {
            compute: Box::new(move |g| Box::new(compute(g)) as BoxedValue),
            cache: RefCell::new(DerivedCache::default()),
        });
        self.validate_derived(id);
        Derived::from_id(id)
    }

    /// Read a derived value, recomputing first if any dependency changed.
    pub fn get_derived<T: Clone + 'static>(&self, derived: Derived<T>) -> Option<T> {
        self.validate_derived(derived.id);
        self.track_derived_read(derived.id);
        let slot = self.deriveds.get(derived.id)?;
        let cache = slot.cache.borrow();
        cache.value.as_ref()?.downcast_ref::<T>().cloned()
    }

    /// Remove a derived node.
    pub fn remove_derived<T>(&mut self, derived: Derived<T>) {
        self.deriveds.remove(derived.id);
    }

    fn is_stale(&self, id: DerivedId) -> bool {
        let Some(slot) = self.deriveds.get(id) else {
            return false;
        };
        let (has_value, signal_deps, derived_deps) = {
            let cache = slot.cache.borrow();
            (
                cache.value.is_some(),
                cache.signal_deps.clone(),
                cache.derived_deps.clone(),
            )
        };
        if !has_value {
            return true;
        }
        for (sig, version) in signal_deps {
            match self.signals.get(sig) {
                Some(slot) if slot.version == version => {}
                _ => return true,
            }
        }
        for (child, version) in derived_deps {
            self.validate_derived(child);
            match self.deriveds.get(child) {
                Some(slot) if slot.cache.borrow().version == version => {}
                _ => return true,
            }
        }
        false
    }

    fn validate_derived(&self, id: DerivedId) {
        if !self.is_stale(id) {
            return;
        }
        let Some(slot) = self.deriveds.get(id) else {
            return;
        };
        self.tracking.borrow_mut().push(TrackFrame::default());
        let value = (slot.compute)(self);
        let frame = self.tracking.borrow_mut().pop().unwrap_or_default();
        let mut cache = slot.cache.borrow_mut();
        cache.value = Some(value);
        cache.signal_deps = frame.signals;
        cache.derived_deps = frame.deriveds;
        cache.version = cache.version.wrapping_add(1);
        tracing::trace!(derived = ?id, version = cache.version, "derived recompute");
    }

    /// Record a derived read into the surrounding evaluation, if any.
    ///
    /// The immediate frame gets the derived edge; every active frame also
    /// gets the derived's transitive signal reads, so effects that only read
    /// derived values still re-run when the underlying signals change.
    fn track_derived_read(&self, id: DerivedId) {
        let frames_active = !self.tracking.borrow().is_empty();
        if !frames_active {
            return;
        }
        let mut signal_ids = Vec::new();
        self.cached_signal_deps(id, &mut signal_ids);

        let mut tracking = self.tracking.borrow_mut();
        for frame in tracking.iter_mut() {
            for sig in &signal_ids {
                let version = self.signals.get(*sig).map(|s| s.version).unwrap_or(0);
                frame.record_signal(*sig, version);
            }
        }
        if let Some(frame) = tracking.last_mut() {
            let version = self
                .deriveds
                .get(id)
                .map(|slot| slot.cache.borrow().version)
                .unwrap_or(0);
            frame.record_derived(id, version);
        }
    }

    fn cached_signal_deps(&self, id: DerivedId, out: &mut Vec<SignalId>) {
        let Some(slot) = self.deriveds.get(id) else {
            return;
        };
        let children: Vec<DerivedId> = {
            let cache = slot.cache.borrow();
            for (sig, _) in &cache.signal_deps {
                if !out.contains(sig) {
                    out.push(*sig);
                }
            }
            cache.derived_deps.iter().map(|(d, _)| *d).collect()
        };
        for child in children {
            self.cached_signal_deps(child, out);
        }
    }

    // =========================================================================
    // Effects
    // =========================================================================

    /// Create an effect. It runs once immediately and re-runs after any
    /// signal it read changes.
    pub fn create_effect<F>(&mut self, run: F) -> EffectId
    where
        F: Fn(&ReactiveGraph) + Send + 'static,
    {
        let id = self.effects.insert(EffectSlot {
            run: Some(Box::new(run)),
            deps: Vec::new(),
        });
        self.run_effect(id);
        id
    }

    /// Remove an effect; it will no longer re-run.
    pub fn remove_effect(&mut self, id: EffectId) {
        if let Some(slot) = self.effects.remove(id) {
            for sig in slot.deps {
                if let Some(signal) = self.signals.get_mut(sig) {
                    signal.effects.remove(&id);
                }
            }
        }
    }

    fn run_effect(&mut self, id: EffectId) {
        let (run, old_deps) = {
            let Some(slot) = self.effects.get_mut(id) else {
                return;
            };
            (slot.run.take(), std::mem::take(&mut slot.deps))
        };
        let Some(run) = run else {
            return;
        };
        for sig in old_deps {
            if let Some(signal) = self.signals.get_mut(sig) {
                signal.effects.remove(&id);
            }
        }

        self.tracking.borrow_mut().push(TrackFrame::default());
        run(&*self);
        let frame = self.tracking.borrow_mut().pop().unwrap_or_default();

        let deps: Vec<SignalId> = frame.signals.iter().map(|(sig, _)| *sig).collect();
        for sig in &deps {
            if let Some(signal) = self.signals.get_mut(*sig) {
                signal.effects.insert(id);
            }
        }
        if let Some(slot) = self.effects.get_mut(id) {
            slot.run = Some(run);
            slot.deps = deps;
        }
    }

    // =========================================================================
    // Batching
    // =========================================================================

    /// Run several writes as one update: each affected effect runs once at
    /// the end of the outermost batch instead of once per write.
    pub fn batch<F: FnOnce(&mut ReactiveGraph)>(&mut self, f: F) {
        self.batch_depth += 1;
        f(self);
        self.batch_depth -= 1;
        if self.batch_depth == 0 {
            let pending = std::mem::take(&mut self.pending_effects);
            for id in pending {
                self.run_effect(id);
            }
        }
    }
}

impl Default for ReactiveGraph {
    fn default() -> Self {
        Self::new()
    }
}
