//! Board viewer state reconciliation.
//!
//! Two controllers keep a board and its surrounding affordances consistent:
//!
//! - [`replay::ReplayController`] steps through a finished game's move record.
//! - [`live::LiveSyncClient`] republishes the server-authoritative live game.
//!
//! Both produce [`effects::ViewEffect`] lists; [`view::ViewAdapter`] applies them
//! to the rendering collaborators so position and controls change together.

pub mod controls;
pub mod effects;
pub mod error;
pub mod live;
pub mod replay;
pub mod session;
pub mod text_board;
pub mod view;

pub use controls::{ControlAvailability, Navigation};
pub use effects::{DisplayElement, ViewEffect};
pub use error::ViewerError;
pub use live::LiveSyncClient;
pub use replay::{ReplayController, ReplayFrame};
pub use view::{BoardView, DisplayPanel, ViewAdapter};
