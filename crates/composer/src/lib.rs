//! Poem composition core: word registry, device linking state machine, and
//! the accumulated poem specification.

pub mod error;
pub mod registry;
pub mod selection;
pub mod session;
pub mod specification;

pub use error::ComposerError;
pub use registry::WordRegistry;
pub use selection::{Mode, SelectionEvent, SelectionStateMachine, Transition};
pub use session::ComposerSession;
pub use specification::PoemSpecification;
