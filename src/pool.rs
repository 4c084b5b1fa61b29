//! Object pooling
//!
//! Reuses objects (particles, projectiles, floating text) instead of
//! allocating each frame. Handles carry a generation so a handle that
//! outlives its object can never reach the slot's next occupant.

/// Objects that can be returned to a pool
pub trait Poolable {
    /// Restore the object to a fresh state before reuse
    fn reset(&mut self);
}

/// Reference to a pooled object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    index: u32,
    generation: u32,
}

impl Handle {
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

struct Slot<T> {
    value: T,
    generation: u32,
    active: bool,
}

/// Pool of reusable objects
pub struct Pool<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    factory: Box<dyn Fn() -> T>,
    max_size: Option<usize>,
    active: usize,
}

impl<T: Poolable> Pool<T> {
    /// Create an empty pool; `factory` builds new objects on demand
    pub fn new(factory: impl Fn() -> T + 'static) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            factory: Box::new(factory),
            max_size: None,
            active: 0,
        }
    }

    /// Create a pool with `count` objects built up front
    pub fn with_capacity(factory: impl Fn() -> T + 'static, count: usize) -> Self {
        let mut pool = Self::new(factory);
        pool.slots.reserve(count);
        for i in 0..count {
            pool.slots.push(Slot { value: (pool.factory)(), generation: 0, active: false });
            pool.free.push(i as u32);
        }
        // Hand out low indices first
        pool.free.reverse();
        pool
    }

    /// Cap the total number of objects the pool will ever create
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = Some(max_size);
        self
    }

    /// Take an object from the pool, creating one if none are free
    ///
    /// Returns `None` when the pool is at its maximum size.
    pub fn acquire(&mut self) -> Option<Handle> {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                if self.max_size.is_some_and(|max| self.slots.len() >= max) {
                    log::warn!("pool exhausted ({} objects in use)", self.active);
                    return None;
                }
                self.slots.push(Slot { value: (self.factory)(), generation: 0, active: false });
                (self.slots.len() - 1) as u32
            }
        };

        let slot = &mut self.slots[index as usize];
        slot.active = true;
        self.active += 1;
        Some(Handle { index, generation: slot.generation })
    }

    /// Return an object to the pool
    ///
    /// Returns false if the handle is stale or already released.
    pub fn release(&mut self, handle: Handle) -> bool {
        let Some(slot) = self.slots.get_mut(handle.index as usize) else { return false };
        if !slot.active || slot.generation != handle.generation {
            return false;
        }
        slot.value.reset();
        slot.active = false;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.active -= 1;
        true
    }

    /// Release every active object
    pub fn release_all(&mut self) {
        let handles: Vec<Handle> = self.iter().map(|(h, _)| h).collect();
        for handle in handles {
            self.release(handle);
        }
    }

    /// Release objects for which `keep` returns false
    pub fn retain(&mut self, mut keep: impl FnMut(&mut T) -> bool) {
        let mut dead = Vec::new();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.active && !keep(&mut slot.value) {
                dead.push(Handle { index: index as u32, generation: slot.generation });
            }
        }
        for handle in dead {
            self.release(handle);
        }
    }
}

impl<T> Pool<T> {
    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.slots
            .get(handle.index as usize)
            .filter(|s| s.active && s.generation == handle.generation)
            .map(|s| &s.value)
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|s| s.active && s.generation == handle.generation)
            .map(|s| &mut s.value)
    }

    /// Check if a handle still refers to a live object
    pub fn contains(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    /// Iterate active objects
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &T)> {
        self.slots.iter().enumerate().filter(|(_, s)| s.active).map(|(i, s)| {
            (Handle { index: i as u32, generation: s.generation }, &s.value)
        })
    }

    /// Iterate active objects mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Handle, &mut T)> {
        self.slots.iter_mut().enumerate().filter(|(_, s)| s.active).map(|(i, s)| {
            (Handle { index: i as u32, generation: s.generation }, &mut s.value)
        })
    }

    /// Number of objects currently handed out
    pub fn active_count(&self) -> usize {
        self.active
    }

    /// Total objects created (active + free)
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Particle {
        life: f32,
    }

    impl Poolable for Particle {
        fn reset(&mut self) {
            self.life = 0.0;
        }
    }

    #[test]
    fn test_acquire_and_release() {
        let mut pool = Pool::new(Particle::default);
        let h = pool.acquire().unwrap();
        pool.get_mut(h).unwrap().life = 3.0;
        assert_eq!(pool.active_count(), 1);

        assert!(pool.release(h));
        assert_eq!(pool.active_count(), 0);
        assert!(!pool.release(h), "double release must fail");
    }

    #[test]
    fn test_reuse_resets_and_invalidates_old_handle() {
        let mut pool = Pool::new(Particle::default);
        let old = pool.acquire().unwrap();
        pool.get_mut(old).unwrap().life = 5.0;
        pool.release(old);

        let new = pool.acquire().unwrap();
        assert_eq!(new.index(), old.index());
        assert_eq!(pool.get(new).unwrap().life, 0.0);
        assert!(pool.get(old).is_none());
        assert!(!pool.contains(old));
        assert_eq!(pool.capacity(), 1);
    }

    #[test]
    fn test_max_size() {
        let mut pool = Pool::with_capacity(Particle::default, 2).with_max_size(2);
        assert_eq!(pool.capacity(), 2);
        let a = pool.acquire().unwrap();
        let b = pool.acquire().unwrap();
        assert_eq!((a.index(), b.index()), (0, 1));
        assert!(pool.acquire().is_none());
        pool.release(a);
        assert!(pool.acquire().is_some());
    }

    #[test]
    fn test_retain_releases_dead() {
        let mut pool = Pool::new(Particle::default);
        for i in 0..4 {
            let h = pool.acquire().unwrap();
            pool.get_mut(h).unwrap().life = i as f32;
        }
        pool.retain(|p| p.life >= 2.0);
        assert_eq!(pool.active_count(), 2);
        assert!(pool.iter().all(|(_, p)| p.life >= 2.0));
    }

    #[test]
    fn test_release_all() {
        let mut pool = Pool::new(Particle::default);
        let handles: Vec<_> = (0..3).filter_map(|_| pool.acquire()).collect();
        pool.release_all();
        assert_eq!(pool.active_count(), 0);
        assert!(handles.iter().all(|h| !pool.contains(*h)));
        assert_eq!(pool.iter_mut().count(), 0);
    }
}
