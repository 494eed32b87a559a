pub mod history;
pub mod session;

pub use history::SnapshotHistory;
pub use session::EditSession;
