//! Collection filters.
//!
//! Index filters are pure. Text filters read each element's text through the driver,
//! one element at a time in document order.

use crate::driver::Driver;
use crate::error::ResolveError;
use crate::scope::Scope;
use elpath_parser::{Cardinality, IndexSpec, Position, TextFilter};
use tracing::debug;

/// Narrow `elements` by a 1-based index spec.
///
/// An exact position yields one handle and fails when out of range. Ranges yield a
/// list, possibly empty.
pub fn select_index<E>(elements: Vec<E>, spec: IndexSpec) -> Result<Scope<E>, ResolveError> {
    let len = elements.len();
    match spec {
        IndexSpec::Exact(position) => {
            let zero_based = match position {
                Position::First => Some(0),
                Position::Last => len.checked_sub(1),
                Position::Nth(n) => n.checked_sub(1),
            };
            zero_based
                .and_then(|i| elements.into_iter().nth(i))
                .map(Scope::One)
                .ok_or_else(|| ResolveError::IndexOutOfRange {
                    index: spec.to_string(),
                    len,
                })
        }
        IndexSpec::Between { start, end } => Ok(keep(elements, |n| n >= start && n <= end)),
        IndexSpec::GreaterThan(bound) => Ok(keep(elements, |n| n > bound)),
        IndexSpec::LessThan(bound) => Ok(keep(elements, |n| n < bound)),
    }
}

// `n` is the 1-based position.
fn keep<E>(elements: Vec<E>, predicate: impl Fn(usize) -> bool) -> Scope<E> {
    Scope::Many(
        elements
            .into_iter()
            .enumerate()
            .filter(|(i, _)| predicate(i + 1))
            .map(|(_, e)| e)
            .collect(),
    )
}

/// Narrow `elements` by their rendered text.
///
/// With [`Cardinality::First`] reading stops at the first match and no match is an
/// error. With [`Cardinality::All`] every match is returned, possibly none.
pub async fn select_text<D>(
    driver: &D,
    elements: Vec<D::Element>,
    filter: &TextFilter,
    cardinality: Cardinality,
) -> Result<Scope<D::Element>, ResolveError>
where
    D: Driver + ?Sized,
{
    let mut matched = Vec::new();
    for element in elements {
        let text = driver.get_text(&element).await?;
        if !filter.matches(&text) {
            continue;
        }
        debug!(%filter, text = %text, "text filter matched");
        if cardinality == Cardinality::First {
            return Ok(Scope::One(element));
        }
        matched.push(element);
    }

    match cardinality {
        Cardinality::All => Ok(Scope::Many(matched)),
        Cardinality::First => Err(ResolveError::NoMatch {
            filter: filter.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<&'static str> {
        vec!["First", "Second", "Third Third", "Third", "Last"]
    }

    fn many(scope: Scope<&'static str>) -> Vec<&'static str> {
        match scope {
            Scope::Many(v) => v,
            Scope::One(e) => panic!("Expected a list, got {}", e),
        }
    }

    #[test]
    fn test_exact_positions() {
        assert_eq!(
            select_index(items(), IndexSpec::Exact(Position::Nth(1))).unwrap(),
            Scope::One("First")
        );
        assert_eq!(
            select_index(items(), IndexSpec::Exact(Position::First)).unwrap(),
            Scope::One("First")
        );
        assert_eq!(
            select_index(items(), IndexSpec::Exact(Position::Last)).unwrap(),
            Scope::One("Last")
        );
        assert_eq!(
            select_index(items(), IndexSpec::Exact(Position::Nth(5))).unwrap(),
            Scope::One("Last")
        );
    }

    #[test]
    fn test_exact_out_of_range() {
        for position in [Position::Nth(0), Position::Nth(6)] {
            let err = select_index(items(), IndexSpec::Exact(position)).unwrap_err();
            assert!(matches!(err, ResolveError::IndexOutOfRange { len: 5, .. }));
        }
        for position in [Position::First, Position::Last] {
            let err = select_index(Vec::<&str>::new(), IndexSpec::Exact(position)).unwrap_err();
            assert!(matches!(err, ResolveError::IndexOutOfRange { len: 0, .. }));
        }
    }

    #[test]
    fn test_ranges() {
        assert_eq!(
            many(select_index(items(), IndexSpec::Between { start: 2, end: 3 }).unwrap()),
            vec!["Second", "Third Third"]
        );
        assert_eq!(
            many(select_index(items(), IndexSpec::GreaterThan(1)).unwrap()),
            vec!["Second", "Third Third", "Third", "Last"]
        );
        assert_eq!(
            many(select_index(items(), IndexSpec::LessThan(3)).unwrap()),
            vec!["First", "Second"]
        );
        assert!(many(select_index(items(), IndexSpec::Between { start: 4, end: 2 }).unwrap()).is_empty());
        assert!(many(select_index(items(), IndexSpec::LessThan(0)).unwrap()).is_empty());
    }

    #[test]
    fn test_between_count() {
        let len = items().len();
        for a in 1..=len {
            for b in a..=len {
                let got = many(select_index(items(), IndexSpec::Between { start: a, end: b }).unwrap());
                assert_eq!(got.len(), b - a + 1);
                assert_eq!(got, items()[a - 1..b].to_vec());
            }
        }
    }

    #[test]
    fn test_ranges_partition() {
        let len = items().len();
        for n in 0..=len + 1 {
            let greater = many(select_index(items(), IndexSpec::GreaterThan(n)).unwrap());
            let rest: Vec<_> = items().into_iter().take(n).collect();
            assert_eq!(greater.len() + rest.len(), len);
            assert!(greater.iter().all(|e| !rest.contains(e)));

            let less = many(select_index(items(), IndexSpec::LessThan(n)).unwrap());
            let rest: Vec<_> = items().into_iter().skip(n.saturating_sub(1)).collect();
            assert_eq!(less.len() + rest.len(), len);
        }
    }
}
