use crate::{domain::CompanyInfo, ports::RegistryPort};

/// Per-identifier result of a batch lookup.
///
/// One outcome is produced for every input string; a failed lookup becomes
/// data instead of aborting the rest of the batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Found { name: String, address: String },
    NotFound { inn: String },
    InvalidInput { inn: String },
    QueryError { inn: String, message: String },
}

impl Outcome {
    /// Name-like label, used both for rendering and for sorting the batch.
    pub fn display_name(&self) -> String {
        match self {
            Outcome::Found { name, .. } => name.clone(),
            Outcome::NotFound { inn } => format!("Компания с ИНН {inn} не найдена"),
            Outcome::InvalidInput { inn } => format!("Некорректный ИНН: {inn}"),
            Outcome::QueryError { inn, .. } => format!("Ошибка при запросе ИНН {inn}"),
        }
    }

    /// What goes after the dash, if anything. A query error renders its
    /// message in the address position.
    fn address(&self) -> &str {
        match self {
            Outcome::Found { address, .. } => address,
            Outcome::QueryError { message, .. } => message,
            Outcome::NotFound { .. } | Outcome::InvalidInput { .. } => "",
        }
    }
}

/// `Some(normalized)` when the raw string is a well-formed INN: non-empty
/// after trimming and all decimal digits.
fn validate(raw: &str) -> Option<&str> {
    let inn = raw.trim();
    if inn.is_empty() || !inn.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(inn)
}

/// Resolve a batch of raw INN strings against the registry.
///
/// Exactly one outcome per input, in input order. Invalid identifiers are
/// rejected before any network call. A failure on one INN never aborts the
/// rest: remote errors are captured as `QueryError` outcomes and the batch
/// runs to completion.
pub async fn resolve(registry: &dyn RegistryPort, inns: &[String]) -> Vec<Outcome> {
    let mut outcomes = Vec::with_capacity(inns.len());

    for raw in inns {
        let Some(inn) = validate(raw) else {
            outcomes.push(Outcome::InvalidInput { inn: raw.clone() });
            continue;
        };

        let outcome = match registry.find_party(inn).await {
            Ok(Some(CompanyInfo { name, address })) => Outcome::Found { name, address },
            Ok(None) => Outcome::NotFound {
                inn: inn.to_string(),
            },
            Err(e) => {
                tracing::warn!("lookup failed for INN {inn}: {e}");
                Outcome::QueryError {
                    inn: inn.to_string(),
                    message: e.to_string(),
                }
            }
        };
        outcomes.push(outcome);
    }

    outcomes
}

/// Render a batch reply: lines sorted by display name ascending, numbered
/// `"<n>) "` only when the batch has more than one entry. Pure function of
/// its input; formatting the same list twice yields identical text.
pub fn format_outcomes(outcomes: &[Outcome]) -> String {
    let mut sorted: Vec<&Outcome> = outcomes.iter().collect();
    sorted.sort_by_key(|o| o.display_name());

    let numbered = sorted.len() > 1;
    sorted
        .iter()
        .enumerate()
        .map(|(i, o)| {
            let prefix = if numbered {
                format!("{}) ", i + 1)
            } else {
                String::new()
            };
            let address = o.address();
            if address.is_empty() {
                format!("{prefix}{}", o.display_name())
            } else {
                format!("{prefix}{} — {address}", o.display_name())
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
