//! Dense ids for model variables and constraints.
//!
//! An id is the zero-based position of its entry in the model, assigned in
//! insertion order.

macro_rules! dense_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl $name {
            pub const fn new(position: u32) -> Self {
                Self(position)
            }

            pub const fn inner(self) -> u32 {
                self.0
            }

            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

dense_id!(
    /// A column of the model.
    VariableId
);
dense_id!(
    /// A row of the model.
    ConstraintId
);
