//! Replays a river-claim log onto a live graph view.
//!
//! Line 0 of a log is the JSON map; every later line is one claim,
//! `<piece> <source> <target>`. Claim `i` is applied `interval * i` after the
//! replay starts.

mod document;
mod driver;
mod reader;
mod record;
mod timer;
mod visualization;

pub use document::GraphDescription;
pub use driver::ReplayDriver;
pub use reader::load_and_replay;
pub use timer::WindowTimer;
pub use visualization::Visualization;
