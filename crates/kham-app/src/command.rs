use kham_types::{AppEvent, TextSource, UiEvent};

/// Turn one line of terminal input into an event.
///
/// Lines starting with `:` are commands, anything else is a typed query.
/// Row numbers are shown and entered 1-based.
pub fn parse_line(line: &str) -> AppEvent {
    let line = line.trim_end_matches(['\n', '\r']);

    let Some(command) = line.trim_start().strip_prefix(':') else {
        return AppEvent::Query {
            text: line.to_string(),
            source: TextSource::Typed,
        };
    };

    match parse_command(command) {
        Ok(event) => AppEvent::UiEvent(event),
        Err(message) => AppEvent::Status(message),
    }
}

fn parse_command(command: &str) -> Result<UiEvent, String> {
    let mut words = command.split_whitespace();
    let name = words.next().unwrap_or_default();
    let arg = words.next();

    match (name, arg) {
        ("select" | "s", Some(n)) => match n.parse::<usize>() {
            Ok(n) if n > 0 => Ok(UiEvent::Select(n - 1)),
            _ => Err(format!("not a row number: {n}")),
        },
        ("speak" | "play" | "p", None) => Ok(UiEvent::Speak),
        ("add" | "a", None) => Ok(UiEvent::AddWord),
        ("mode" | "m", Some(mode)) => mode.parse().map(UiEvent::SetMode),
        ("source", Some(source)) => source.parse().map(UiEvent::SetSource),
        ("quit" | "q", None) => Ok(UiEvent::Close),
        _ => Err(format!(
            "unknown command :{command} (try :select N, :speak, :add, :mode, :source, :quit)"
        )),
    }
}
