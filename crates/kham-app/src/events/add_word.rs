use kham_io::AppendOutcome;

use crate::lookup_context::LookupContext;

/// Save an entry to the personal word list in the background
pub fn handle_add_word(headword: String, translation: String, ctx: &LookupContext) {
    let Some(wordlist) = ctx.wordlist.clone() else {
        tracing::warn!("Word list unavailable");
        return;
    };

    let ctx = ctx.clone();
    tokio::spawn(async move {
        let message = match wordlist.append(&headword, &translation).await {
            Ok(AppendOutcome::Added) => format!("saved {headword}"),
            Ok(AppendOutcome::AlreadyPresent) => format!("{headword} is already saved"),
            Err(e) => {
                tracing::error!("Failed to save '{}': {}", headword, e);
                format!("could not save {headword}: {e}")
            }
        };
        ctx.status(message).await;
    });
}
