pub mod dispatcher;
pub mod error;
pub mod model;

pub use dispatcher::SynthesisDispatcher;
pub use error::DispatchError;
pub use model::{Phrase, StoreRef, SynthesisJob};
