//! Controller layer: UI events and the view state they drive.

pub mod events;
