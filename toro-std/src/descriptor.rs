//! Handler descriptor parsing.
//!
//! A named descriptor may carry static parameters in a query-string shaped
//! suffix:
//!
//! ```text
//! Blog\PostHandler?layout=wide&comments=on
//! └──── handler ───┘ └──── static parameters ───┘
//! ```
//!
//! The suffix is only recognised when the whole descriptor has that shape:
//! an identifier-like name (ASCII word characters and `\`), a `?`, then
//! ASCII word characters, `=` and `&`. Anything else is used as the handler name
//! verbatim, with no static parameters.

use toro_core::{DescriptorError, HandlerDescriptor, StaticParams};

/// A descriptor split into its bare handler reference and static parameters.
#[derive(Debug, Clone)]
pub struct ParsedDescriptor {
    /// The handler reference with any `?...` suffix removed.
    pub handler: HandlerDescriptor,
    /// Parameters declared in the suffix; empty when there was none.
    pub params: StaticParams,
}

/// Split `descriptor` into handler reference and static parameters.
///
/// Factories and names without a query suffix pass through unchanged.
/// Within the suffix each `&`-separated pair is split on its first `=`; a
/// pair with no `=` is an error.
pub fn parse_descriptor(descriptor: &HandlerDescriptor) -> Result<ParsedDescriptor, DescriptorError> {
    let HandlerDescriptor::Named(raw) = descriptor else {
        return Ok(ParsedDescriptor {
            handler: descriptor.clone(),
            params: StaticParams::new(),
        });
    };

    let Some((name, query)) = split_query_suffix(raw) else {
        return Ok(ParsedDescriptor {
            handler: descriptor.clone(),
            params: StaticParams::new(),
        });
    };

    let mut params = StaticParams::new();
    for pair in query.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            return Err(DescriptorError::MalformedPair {
                descriptor: raw.clone(),
                pair: pair.to_string(),
            });
        };
        params.insert(key, value);
    }

    Ok(ParsedDescriptor {
        handler: HandlerDescriptor::Named(name.to_string()),
        params,
    })
}

/// Returns `(name, query)` when `raw` has the `name?query` shape.
fn split_query_suffix(raw: &str) -> Option<(&str, &str)> {
    let (name, query) = raw.split_once('?')?;
    let name_ok = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '\\'));
    let query_ok = query
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '=' | '&'));
    (name_ok && query_ok).then_some((name, query))
}
