//! Shared types for the personnel roster presenter.

mod directory;
mod roster;
mod session;
mod sync;
mod ws;

pub use directory::*;
pub use roster::*;
pub use session::*;
pub use sync::*;
pub use ws::*;
