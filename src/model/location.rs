//! Navigable location carrying the `q` search parameter, with history

use url::Url;

pub const QUERY_PARAM: &str = "q";

/// The address the results page is shown at.
///
/// Every commit pushes a new entry, so back/forward walks earlier searches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    current: Url,
    back: Vec<Url>,
    forward: Vec<Url>,
}

impl Location {
    pub fn new(current: Url) -> Self {
        Self {
            current,
            back: Vec::new(),
            forward: Vec::new(),
        }
    }

    pub fn parse(raw: &str) -> Result<Self, url::ParseError> {
        Url::parse(raw).map(Self::new)
    }

    pub fn href(&self) -> &str {
        self.current.as_str()
    }

    /// Value of `q`, or an empty string when absent
    pub fn query(&self) -> String {
        query_param(&self.current).unwrap_or_default()
    }

    /// Write `q` (removing it when empty) keeping every other parameter,
    /// then push the result. Pushing the current address is a no-op.
    pub fn push_query(&mut self, query: &str) -> bool {
        let next = with_query_param(&self.current, query);
        if next == self.current {
            return false;
        }
        let previous = std::mem::replace(&mut self.current, next);
        self.back.push(previous);
        self.forward.clear();
        true
    }

    /// Write `q` in place without adding a history entry
    pub fn replace_query(&mut self, query: &str) {
        self.current = with_query_param(&self.current, query);
    }

    pub fn can_go_back(&self) -> bool {
        !self.back.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward.is_empty()
    }

    pub fn go_back(&mut self) -> bool {
        match self.back.pop() {
            Some(previous) => {
                let current = std::mem::replace(&mut self.current, previous);
                self.forward.push(current);
                true
            }
            None => false,
        }
    }

    pub fn go_forward(&mut self) -> bool {
        match self.forward.pop() {
            Some(next) => {
                let current = std::mem::replace(&mut self.current, next);
                self.back.push(current);
                true
            }
            None => false,
        }
    }
}

/// The non-empty `q` of any absolute URL, e.g. a pasted share link
pub fn query_param(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == QUERY_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Parses `text` as an absolute URL and extracts its `q`
pub fn query_from_link(text: &str) -> Option<String> {
    let url = Url::parse(text.trim()).ok()?;
    query_param(&url)
}

fn with_query_param(url: &Url, query: &str) -> Url {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != QUERY_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut next = url.clone();
    next.set_query(None);
    if kept.is_empty() && query.is_empty() {
        return next;
    }

    {
        let mut pairs = next.query_pairs_mut();
        for (key, value) in &kept {
            pairs.append_pair(key, value);
        }
        if !query.is_empty() {
            pairs.append_pair(QUERY_PARAM, query);
        }
    }
    next
}
