pub mod replies;
pub mod requests;

pub use replies::Reply;
pub use requests::{Request, Service};
