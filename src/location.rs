//! Console locations and the `back` query parameter that lets a detail view
//! return to the list it was opened from.

use std::fmt;

/// Query parameter carrying the encoded location to return to.
pub const BACK_PARAM: &str = "back";
/// Navigating here signs the user out.
pub const LOGOUT_PATH: &str = "/auth/logout";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Location {
  path: String,
  query: Vec<(String, String)>,
}

impl Location {
  pub fn new(path: impl Into<String>) -> Self {
    Location { path: path.into(), query: Vec::new() }
  }

  /// Parses `path?key=value&...`. Query keys and values are percent-decoded,
  /// pairs that fail to decode are kept verbatim.
  pub fn parse(location: &str) -> Self {
    let (path, query) = match location.split_once('?') {
      Some((path, query)) => (path, query),
      None => (location, ""),
    };
    let query = query
      .split('&')
      .filter(|pair| !pair.is_empty())
      .map(|pair| {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        (decode(key), decode(value))
      })
      .collect();
    Location { path: path.to_string(), query }
  }

  pub fn pathname(&self) -> &str {
    &self.path
  }

  pub fn query(&self, key: &str) -> Option<&str> {
    self.query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
  }

  /// Sets `key` to `value`, replacing an existing entry in place.
  pub fn with_query(mut self, key: &str, value: impl Into<String>) -> Self {
    let value = value.into();
    match self.query.iter_mut().find(|(k, _)| k == key) {
      Some(entry) => entry.1 = value,
      None => self.query.push((key.to_string(), value)),
    }
    self
  }

  pub fn without_query(mut self, key: &str) -> Self {
    self.query.retain(|(k, _)| k != key);
    self
  }

  /// The full location, percent-encoded so it can travel as a query value.
  pub fn encoded(&self) -> String {
    urlencoding::encode(&self.to_string()).into_owned()
  }

  /// The location stored in this location's `back` parameter.
  pub fn back(&self) -> Option<Location> {
    self.query(BACK_PARAM).map(Location::parse)
  }
}

impl fmt::Display for Location {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.path)?;
    for (i, (key, value)) in self.query.iter().enumerate() {
      let sep = if i == 0 { '?' } else { '&' };
      write!(f, "{sep}{}={}", urlencoding::encode(key), urlencoding::encode(value))?;
    }
    Ok(())
  }
}

/// Appends the "return to here" parameter for `current` to `href`.
pub fn with_back(href: &str, current: &Location) -> String {
  let sep = if href.contains('?') { '&' } else { '?' };
  format!("{href}{sep}{BACK_PARAM}={}", current.encoded())
}

fn decode(s: &str) -> String {
  urlencoding::decode(s).map(|d| d.into_owned()).unwrap_or_else(|_| s.to_string())
}
