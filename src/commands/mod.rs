pub mod abandon;
pub mod changes;
pub mod fixup;
pub mod reindex;
pub mod restash;
pub mod settings;
pub mod snapshot;
pub mod state;
pub mod tuck;
pub mod upstream;

pub use abandon::*;
pub use changes::*;
pub use fixup::*;
pub use reindex::*;
pub use restash::*;
pub use settings::*;
pub use snapshot::*;
pub use state::*;
pub use tuck::*;
pub use upstream::*;
