/// A parsed user command, ready to execute.
///
/// `Replay` carries no payload, so a replayed action can never itself be a
/// replay; the "replay is one level deep" property holds by construction
/// rather than by a depth counter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Start,
    Help,
    Hello,
    /// `/inn` with at least one argument. Args keep user casing and order.
    InnQuery(Vec<String>),
    /// `/inn` without arguments.
    InnMissing,
    /// `/last` — re-run the chat's stored action.
    Replay,
    Unknown,
}

/// Parse one inbound message into an action.
///
/// Empty (after trimming) input is a silent no-op, not an error. The verb is
/// the first space-separated token, lowercased, with a leading `/` and a
/// Telegram `@botname` suffix stripped. Splitting is on single spaces, so a
/// run of spaces yields empty argument tokens; those flow through to the
/// lookup engine and come back as invalid-input outcomes.
pub fn parse(text: &str) -> Option<Action> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let mut tokens = text.split(' ');
    let first = tokens.next().unwrap_or_default();
    let verb = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or_default()
        .to_lowercase();
    let args: Vec<String> = tokens.map(str::to_string).collect();

    Some(match verb.as_str() {
        "start" => Action::Start,
        "help" => Action::Help,
        "hello" => Action::Hello,
        "inn" if args.is_empty() => Action::InnMissing,
        "inn" => Action::InnQuery(args),
        "last" => Action::Replay,
        _ => Action::Unknown,
    })
}
