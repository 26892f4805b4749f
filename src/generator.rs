//! UUIDv1 generator and related types.

use parking_lot::Mutex;
use rand::rngs::OsRng;

use crate::{
    ClockSeq, Error, GeneratorState, InterfaceNode, NodeId, NodeSource, PersistError, StateStore,
    Timestamp, Uuid,
};

pub mod with_rand08;


/// A trait that defines the random number generator interface for [`Generator`].
///
/// The source must be cryptographically secure; it seeds the clock sequence and, if enabled, the
/// random node fallback.
pub trait RandSource {
    /// Fills `dest` with random data, or returns [`Error::RandomSource`] if the source fails.
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error>;
}

/// A trait that defines the system clock interface for [`Generator`].
pub trait TimeSource {
    /// Returns the current timestamp.
    fn now(&mut self) -> Timestamp;
}

/// The default [`TimeSource`] implementation that uses [`std::time::SystemTime`].
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct StdSystemTime;

impl TimeSource for StdSystemTime {
    fn now(&mut self) -> Timestamp {
        Timestamp::now()
    }
}

/// What to do when no node identifier can be resolved while creating fresh state.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum NodeFallback {
    /// Fail construction with [`Error::NodeUnavailable`].
    #[default]
    Abort,

    /// Use a random node identifier with the multicast bit set.
    Random,
}

/// Represents a UUIDv1 generator that keeps its clock sequence and last timestamp in a
/// [`StateStore`] so that UUIDs stay distinct across process restarts.
///
/// All calls to [`generate`](Generator::generate) are serialized by an internal lock that is held
/// from reading the clock until the updated state has been saved. Share a single generator by
/// reference or through [`std::sync::Arc`].
///
/// # Examples
///
/// ```rust
/// use std::{sync::Arc, thread};
/// use uuid1::{Generator, MemoryStore, NodeId, StaticNode};
///
/// let g = Arc::new(
///     Generator::builder(MemoryStore::new())
///         .node_source(StaticNode(NodeId::from([0x02, 0, 0, 0, 0, 0x01])))
///         .build()?,
/// );
/// thread::scope(|s| {
///     for i in 0..4 {
///         let g = Arc::clone(&g);
///         s.spawn(move || {
///             for _ in 0..8 {
///                 println!("{} by thread {}", g.generate().unwrap(), i);
///             }
///         });
///     }
/// });
/// # Ok::<(), uuid1::Error>(())
/// ```
#[derive(Debug)]
pub struct Generator<S, T = StdSystemTime> {
    inner: Mutex<Inner<S, T>>,
}

#[derive(Debug)]
struct Inner<S, T> {
    state: GeneratorState,
    store: S,
    time: T,
}

impl<S: StateStore> Generator<S> {
    /// Creates a generator with the default sources, loading prior state from `store` or creating
    /// and saving fresh state if there is none.
    ///
    /// Fresh state requires the hardware address of a network interface; see
    /// [`Builder::node_fallback`] to relax this.
    pub fn new(store: S) -> Result<Self, Error> {
        Self::builder(store).build()
    }

    /// Returns a [`Builder`] to customize the sources and policies of a generator.
    pub fn builder(store: S) -> Builder<S> {
        Builder {
            store,
            time: StdSystemTime,
            node: InterfaceNode,
            rand: with_rand08::Adapter(OsRng),
            node_fallback: NodeFallback::default(),
        }
    }
}

impl<S: StateStore, T: TimeSource> Generator<S, T> {
    /// Generates a new UUIDv1 object from the current timestamp.
    ///
    /// If the updated state cannot be saved, the returned [`PersistError`] still carries the
    /// UUID, which is valid for use.
    pub fn generate(&self) -> Result<Uuid, PersistError> {
        let mut inner = self.inner.lock();
        let timestamp = inner.time.now();
        inner.generate_core(timestamp)
    }

    /// Generates a new UUIDv1 object from the `timestamp` passed.
    ///
    /// The clock sequence is incremented unless `timestamp` is strictly greater than that of the
    /// previous call.
    pub fn generate_core(&self, timestamp: Timestamp) -> Result<Uuid, PersistError> {
        self.inner.lock().generate_core(timestamp)
    }

    /// Returns a snapshot of the current generator state.
    pub fn state(&self) -> GeneratorState {
        self.inner.lock().state.clone()
    }

    /// Returns the node identifier embedded in generated UUIDs.
    pub fn node(&self) -> NodeId {
        self.inner.lock().state.node
    }
}

impl<S: StateStore, T> Inner<S, T> {
    fn generate_core(&mut self, timestamp: Timestamp) -> Result<Uuid, PersistError> {
        let state = &mut self.state;
        if timestamp <= state.last_timestamp {
            state.clock_seq.increment();
        }
        state.last_timestamp = timestamp;

        let uuid = Uuid::from_fields_v1(
            timestamp.ticks(),
            state.clock_seq.get(),
            *state.node.as_bytes(),
        );

        if let Err(err) = self.store.save(&self.state) {
            log::warn!("clock sequence may be reused after restart: {}", err);
            return Err(PersistError::new(uuid, err));
        }
        Ok(uuid)
    }
}

/// Configures and constructs a [`Generator`].
///
/// # Examples
///
/// ```rust
/// use uuid1::{Generator, MemoryStore, NodeFallback};
///
/// let g = Generator::builder(MemoryStore::new())
///     .node_fallback(NodeFallback::Random)
///     .build()?;
/// assert_eq!(g.generate().unwrap().version(), Some(1));
/// # Ok::<(), uuid1::Error>(())
/// ```
#[derive(Debug)]
pub struct Builder<S, T = StdSystemTime, N = InterfaceNode, R = with_rand08::Adapter<OsRng>> {
    store: S,
    time: T,
    node: N,
    rand: R,
    node_fallback: NodeFallback,
}

impl<S, T, N, R> Builder<S, T, N, R> {
    /// Replaces the system clock.
    pub fn time_source<T2: TimeSource>(self, time: T2) -> Builder<S, T2, N, R> {
        Builder {
            store: self.store,
            time,
            node: self.node,
            rand: self.rand,
            node_fallback: self.node_fallback,
        }
    }

    /// Replaces the source of the node identifier used for fresh state.
    pub fn node_source<N2: NodeSource>(self, node: N2) -> Builder<S, T, N2, R> {
        Builder {
            store: self.store,
            time: self.time,
            node,
            rand: self.rand,
            node_fallback: self.node_fallback,
        }
    }

    /// Replaces the secure random number generator.
    pub fn rand_source<R2: RandSource>(self, rand: R2) -> Builder<S, T, N, R2> {
        Builder {
            store: self.store,
            time: self.time,
            node: self.node,
            rand,
            node_fallback: self.node_fallback,
        }
    }

    /// Sets the policy applied when the node source fails while creating fresh state.
    pub fn node_fallback(mut self, node_fallback: NodeFallback) -> Self {
        self.node_fallback = node_fallback;
        self
    }
}

impl<S: StateStore, T: TimeSource, N: NodeSource, R: RandSource> Builder<S, T, N, R> {
    /// Loads prior state from the store, or creates fresh state and saves it.
    ///
    /// Prior state is adopted as-is, including its node identifier.
    pub fn build(mut self) -> Result<Generator<S, T>, Error> {
        let state = match self.store.load()? {
            Some(state) => {
                log::debug!(
                    "adopting saved generator state (node {}, clock sequence {})",
                    state.node,
                    state.clock_seq.get()
                );
                state
            }
            None => {
                let state = self.fresh_state()?;
                self.store.save(&state)?;
                log::info!(
                    "created generator state (node {}, clock sequence {})",
                    state.node,
                    state.clock_seq.get()
                );
                state
            }
        };

        Ok(Generator {
            inner: Mutex::new(Inner {
                state,
                store: self.store,
                time: self.time,
            }),
        })
    }

    fn fresh_state(&mut self) -> Result<GeneratorState, Error> {
        let mut seed = [0u8; 2];
        self.rand.try_fill_bytes(&mut seed)?;
        let clock_seq = ClockSeq::new(u16::from_be_bytes(seed));

        let node = match self.node.node_id() {
            Ok(node) => node,
            Err(err) if self.node_fallback == NodeFallback::Random => {
                log::warn!("falling back to random node identifier: {}", err);
                NodeId::random(&mut self.rand)?
            }
            Err(err) => return Err(err),
        };

        Ok(GeneratorState {
            clock_seq,
            last_timestamp: self.time.now(),
            node,
        })
    }
}
