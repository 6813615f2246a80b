mod request;
mod wrapper;

pub use request::*;
pub use wrapper::*;
