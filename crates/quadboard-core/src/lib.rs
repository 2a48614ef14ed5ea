pub mod error;
pub mod geometry;
pub mod id;
pub mod note;
pub mod quadrant;

pub use error::NoteError;
pub use geometry::{Point, Rect};
pub use note::Note;
pub use quadrant::Quadrant;
