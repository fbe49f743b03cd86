mod base;
pub use base::MatTrait;

pub mod dense;
