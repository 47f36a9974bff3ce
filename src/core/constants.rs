/// Capacity reserved by `new()` and `Default` on every container in this crate.
pub const DEFAULT_CAPACITY: usize = 16;
