pub use crate::MatTrait;

mod mat;
pub use mat::Mat;

mod rref;
pub use rref::*;
