//! Value Objects - Immutable, identity-less domain primitives

mod timezone;

pub use timezone::{LOCAL_TIME_FORMAT, Timezone};
