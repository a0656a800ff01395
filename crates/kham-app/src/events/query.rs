use kham_core::preprocess::{Preprocessor, SelectionPreprocessor, TypedPreprocessor};
use kham_core::{Clock, LookupSession};
use kham_types::{InputSource, TextSource};

use crate::lookup_context::LookupContext;

/// Feed text from the active input source into the debounce scheduler
pub async fn handle_query<C: Clock>(
    text: String,
    source: TextSource,
    input_source: InputSource,
    session: &mut LookupSession<C>,
    ctx: &LookupContext,
) -> anyhow::Result<()> {
    if !input_source.accepts(source) {
        tracing::trace!("Ignoring {:?} text while reading {}", source, input_source);
        return Ok(());
    }

    let query = match source {
        TextSource::Typed => TypedPreprocessor.process(&text),
        TextSource::Clipboard => SelectionPreprocessor.process(&text),
    };

    if source == TextSource::Clipboard && !query.is_empty() {
        ctx.status(format!("selection: {query}")).await;
    }

    tracing::debug!("Query submitted: '{}'", query);
    session.submit(query);
    Ok(())
}
