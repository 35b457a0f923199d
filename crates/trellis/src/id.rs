use slotmap::new_key_type;

new_key_type! {
    /// Opaque identifier for an item stored in a [`Tree`](crate::Tree).
    pub struct ItemId;
}
