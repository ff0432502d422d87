/// Selects whether the first derivatives are computed alongside a value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    /// Computes the value only
    Value,

    /// Computes the value and its first derivatives
    First,
}

impl Order {
    /// Indicates that first derivatives are requested
    pub fn first(&self) -> bool {
        *self == Order::First
    }
}
