pub mod debounce;
pub mod dictionary;
pub mod filter;
pub mod loader;
pub mod preprocess;
pub mod session;

pub use debounce::{Clock, DebounceScheduler, DebounceState, ManualClock, SystemClock};
pub use dictionary::{Dictionary, DictionaryRow, LoadError};
pub use filter::{FilterEngine, FilterState};
pub use loader::{DictionaryLoader, LoadReport};
pub use session::{LookupSession, Refresh, SessionOptions};
