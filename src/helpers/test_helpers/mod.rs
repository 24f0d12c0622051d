use super::*;

mod call_recorder;
mod mock_filesystem;
mod mock_reporter;

pub use call_recorder::*;
pub use mock_filesystem::*;
pub use mock_reporter::*;
