pub mod events;
pub mod router;

pub use events::{InputEvent, MouseButton};
pub use router::InteractionRouter;
