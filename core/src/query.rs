use crate::DocId;
use std::borrow::Cow;
use std::fmt;

/// Anything that can resolve a query term to a postings list.
pub trait PostingsSource {
    fn lookup(&self, term: &str) -> Cow<'_, [DocId]>;
}

/// Two-pointer intersection of strictly increasing lists.
pub fn intersect(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0usize, 0usize);
    while i < a.len() && j < b.len() {
        let (x, y) = (a[i], b[j]);
        if x == y {
            out.push(x);
            i += 1;
            j += 1;
        } else if x < y {
            i += 1;
        } else {
            j += 1;
        }
    }
    out
}

/// Intersect terms left to right, stopping at the first empty running result.
pub fn and_query<S, T>(source: &S, terms: &[T]) -> Vec<DocId>
where
    S: PostingsSource + ?Sized,
    T: AsRef<str>,
{
    let Some((first, rest)) = terms.split_first() else {
        return Vec::new();
    };
    let mut result = source.lookup(first.as_ref()).into_owned();
    for term in rest {
        if result.is_empty() {
            break;
        }
        result = intersect(&result, &source.lookup(term.as_ref()));
    }
    result
}

/// A parsed query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Term(String),
    And(Vec<String>),
}

impl Query {
    const AND: &'static str = "AND";

    /// `AND` (case-sensitive) separates terms; anything else is a single term.
    pub fn parse(input: &str) -> Self {
        if input.trim().is_empty() {
            return Query::And(Vec::new());
        }
        if input.contains(Self::AND) {
            Query::And(input.split(Self::AND).map(|t| t.trim().to_string()).collect())
        } else {
            Query::Term(input.trim().to_string())
        }
    }

    pub fn evaluate<S: PostingsSource + ?Sized>(&self, source: &S) -> Vec<DocId> {
        match self {
            Query::Term(t) => source.lookup(t).into_owned(),
            Query::And(ts) => and_query(source, ts),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Term(t) => f.write_str(t),
            Query::And(ts) => f.write_str(&ts.join(" AND ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Records every term it is asked for.
    struct CountingSource {
        lists: HashMap<&'static str, Vec<DocId>>,
        asked: RefCell<Vec<String>>,
    }

    impl CountingSource {
        fn new(lists: &[(&'static str, Vec<DocId>)]) -> Self {
            Self { lists: lists.iter().cloned().collect(), asked: RefCell::new(Vec::new()) }
        }
    }

    impl PostingsSource for CountingSource {
        fn lookup(&self, term: &str) -> Cow<'_, [DocId]> {
            self.asked.borrow_mut().push(term.to_string());
            Cow::Owned(self.lists.get(term).cloned().unwrap_or_default())
        }
    }

    #[test]
    fn intersect_basic() {
        assert_eq!(intersect(&[1, 3, 5, 7], &[2, 3, 7, 9]), vec![3, 7]);
        assert_eq!(intersect(&[], &[1, 2]), Vec::<DocId>::new());
        assert_eq!(intersect(&[4], &[4]), vec![4]);
    }

    #[test]
    fn and_query_stops_at_first_empty_result() {
        let source = CountingSource::new(&[("t1", vec![1, 2, 3]), ("t2", vec![]), ("t3", vec![2])]);
        assert!(and_query(&source, &["t1", "t2", "t3"]).is_empty());
        assert_eq!(*source.asked.borrow(), vec!["t1", "t2"]);
    }

    #[test]
    fn and_query_walks_all_terms() {
        let source = CountingSource::new(&[("a", vec![1, 2, 3]), ("b", vec![2, 3]), ("c", vec![3, 8])]);
        assert_eq!(and_query(&source, &["a", "b", "c"]), vec![3]);
        assert_eq!(source.asked.borrow().len(), 3);
    }

    #[test]
    fn empty_and_query_is_empty() {
        let source = CountingSource::new(&[]);
        assert!(and_query::<_, &str>(&source, &[]).is_empty());
        assert!(source.asked.borrow().is_empty());
    }

    #[test]
    fn parse_grammar() {
        assert_eq!(Query::parse("  apple "), Query::Term("apple".into()));
        assert_eq!(
            Query::parse("gold AND stock"),
            Query::And(vec!["gold".into(), "stock".into()])
        );
        // lower-case "and" is an ordinary term character sequence
        assert_eq!(Query::parse("salt and pepper"), Query::Term("salt and pepper".into()));
        assert_eq!(Query::parse("   "), Query::And(vec![]));
        assert_eq!(Query::parse("trade AND market AND oil").to_string(), "trade AND market AND oil");
    }

    #[test]
    fn evaluate_single_term() {
        let source = CountingSource::new(&[("apple", vec![1, 2])]);
        assert_eq!(Query::parse("apple").evaluate(&source), vec![1, 2]);
        assert!(Query::parse("pear").evaluate(&source).is_empty());
    }
}
