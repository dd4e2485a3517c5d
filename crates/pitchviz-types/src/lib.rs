pub mod layout;
pub mod pitch;
pub mod types;

pub use layout::{Anchor, LayoutMetrics, PitchLayout, Segment};
pub use pitch::{EmptySequenceError, ParsePitchError, PitchSequence, PitchSymbol};
pub use types::{AppEvent, DiagramView, ExportTarget, SearchHit};
