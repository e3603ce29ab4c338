use super::{priority, Compose, Items};
use strata_core::{Error, FilterItem, Opt, Result};

/// Splits raw filter keys such as `"age (min)"` into field and operator.
///
/// Items that already carry an operator are only checked: their field must
/// not contain parentheses.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterParser;

impl<A> Compose<FilterItem, A> for FilterParser {
    fn priority(&self) -> i32 {
        priority::PARSE
    }

    fn prepare<'a>(
        &'a self,
        items: Items<'a, FilterItem>,
        _opts: &mut Vec<Opt>,
    ) -> Result<Items<'a, FilterItem>> {
        Ok(Box::new(items.map(|item| item.and_then(parse_item))))
    }
}

fn parse_item(item: FilterItem) -> Result<FilterItem> {
    if !item.operator().is_empty() {
        if item.field().contains(['(', ')']) {
            return Err(Error::invalid_filter(
                item.field(),
                "field names must not contain parentheses",
            ));
        }
        return Ok(item);
    }

    let (field, operator) = parse_key(item.field())?;
    if field == item.field() && operator.is_empty() {
        return Ok(item);
    }

    let (_, _, value) = item.into_parts();
    Ok(FilterItem::new(field, operator, value))
}

/// Parses `field`, `field(op)` or `field (op)` into field and operator.
///
/// Whitespace around either part is ignored and `field ( )` has no
/// operator. Unbalanced or nested parentheses, trailing text after the
/// operator and a missing field name are errors naming the key.
pub fn parse_key(key: &str) -> Result<(String, String)> {
    let trimmed = key.trim();

    match (trimmed.find('('), trimmed.find(')')) {
        (None, None) => Ok((trimmed.to_string(), String::new())),
        (Some(open), Some(close)) if open < close && close == trimmed.len() - 1 => {
            let field = trimmed[..open].trim_end();
            let operator = trimmed[open + 1..close].trim();

            if operator.contains('(') {
                return Err(Error::invalid_filter(key, "nested parentheses"));
            }
            if field.is_empty() {
                return Err(Error::invalid_filter(key, "missing field name"));
            }

            Ok((field.to_string(), operator.to_string()))
        }
        (Some(_), Some(_)) if trimmed.matches('(').count() > 1 => {
            Err(Error::invalid_filter(key, "nested parentheses"))
        }
        _ => Err(Error::invalid_filter(key, "unbalanced parentheses")),
    }
}
