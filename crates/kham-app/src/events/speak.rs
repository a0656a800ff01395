use crate::lookup_context::LookupContext;

/// Speak a headword without holding up the event loop
pub fn handle_speak(headword: String, ctx: &LookupContext) {
    let Some(speaker) = ctx.speaker.clone() else {
        tracing::warn!("Speech disabled");
        return;
    };

    let ctx = ctx.clone();
    tokio::spawn(async move {
        match speaker.speak(&headword).await {
            Ok(()) => tracing::debug!("Spoke '{}'", headword),
            Err(e) => {
                tracing::error!("Failed to speak '{}': {}", headword, e);
                ctx.status(format!("speech failed: {e}")).await;
            }
        }
    });
}
