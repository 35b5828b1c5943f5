//! Entity implementation

slotmap::new_key_type! {
    /// Entity identifier
    ///
    /// A generational key: once an entity is destroyed its id is never
    /// mistaken for a later entity that reuses the same slot.
    pub struct Entity;
}
