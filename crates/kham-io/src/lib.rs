pub mod clipboard;
pub mod speech;
pub mod wordlist;

pub use clipboard::{ClipboardError, ClipboardReader, SelectionWatcher, SystemClipboard};
pub use speech::{RemoteTts, Speaker, SpeechError};
pub use wordlist::{AppendOutcome, WordList, WordListError};
