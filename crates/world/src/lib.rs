//! Brick world: placed bricks, crosshair targeting, undo/redo, the player
//! controller and the session that ties them together.

mod brick;
mod command_log;
mod player;
mod registry;
mod selection;
mod session;
mod targeting;

pub use brick::*;
pub use command_log::*;
pub use player::*;
pub use registry::*;
pub use selection::*;
pub use session::*;
pub use targeting::*;
