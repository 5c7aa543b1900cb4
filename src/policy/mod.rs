//! Policy trait and implementations.

pub mod courier;
pub mod keyboard;
pub mod random;
pub mod trait_;

pub use courier::CourierPolicy;
pub use keyboard::KeyboardPolicy;
pub use random::RandomPolicy;
pub use trait_::Policy;
