pub mod filters;
pub mod house;
pub mod macros;
pub mod route;

pub use filters::*;
pub use house::*;
pub use route::*;

#[cfg(test)]
pub(crate) mod fixtures;
