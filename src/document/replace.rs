//! Run-text substitution against the raw document body

use crate::document::run::{RUN_CLOSE, RUN_OPEN};
use crate::opc::{Package, MAIN_DOCUMENT};
use crate::xml::{escape_text, stored_text_pattern};
use log::{debug, trace, warn};
use regex::bytes::{Captures, Regex};
use std::collections::{BTreeMap, HashMap};

/// Ordered search key to replacement pairs.
///
/// Pairs are applied in order, each one against the content produced by the
/// previous ones. Keys are display text; they are escaped before matching.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReplaceRequest {
    pairs: Vec<(String, String)>,
}

impl ReplaceRequest {
    /// Create an empty request
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    /// Append a pair, builder style
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Iterate pairs in application order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of pairs
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether there is nothing to replace
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ReplaceRequest {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<HashMap<String, String>> for ReplaceRequest {
    /// Application order follows the map's iteration order, which is unspecified
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<BTreeMap<String, String>> for ReplaceRequest {
    fn from(map: BTreeMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

/// Where substitution reads from and writes to.
///
/// Both members default to `word/document.xml`. When they differ, the
/// substituted content of `read_member` is stored under `write_member` and
/// `read_member` is left as it was.
#[derive(Clone, Debug)]
pub struct ReplaceOptions {
    read_member: String,
    write_member: String,
    escape_values: bool,
}

impl Default for ReplaceOptions {
    fn default() -> Self {
        Self {
            read_member: MAIN_DOCUMENT.to_string(),
            write_member: MAIN_DOCUMENT.to_string(),
            escape_values: false,
        }
    }
}

impl ReplaceOptions {
    /// Default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Member whose content is searched
    pub fn read_member(mut self, name: impl Into<String>) -> Self {
        self.read_member = name.into();
        self
    }

    /// Member the result is stored under
    pub fn write_member(mut self, name: impl Into<String>) -> Self {
        self.write_member = name.into();
        self
    }

    /// Escape replacement values before insertion (off by default: values
    /// are inserted literally)
    pub fn escape_values(mut self, escape: bool) -> Self {
        self.escape_values = escape;
        self
    }

    /// Member whose content is searched
    pub fn source(&self) -> &str {
        &self.read_member
    }

    /// Member the result is stored under
    pub fn target(&self) -> &str {
        &self.write_member
    }
}

/// Replace run-text equal to each key with its value.
///
/// Each `<w:t …>key</w:t>` becomes `<w:t …> value </w:t>`, keeping the
/// original tags. Returns the number of runs rewritten. Keys that do not occur
/// leave the content untouched; an absent read member is treated as empty.
pub fn replace(package: &mut Package, request: &ReplaceRequest, options: &ReplaceOptions) -> usize {
    let mut content = match package.get(&options.read_member) {
        Ok(bytes) => bytes.to_vec(),
        Err(_) => {
            debug!("Member {} absent, substituting in empty content", options.read_member);
            Vec::new()
        }
    };

    let mut total = 0;
    for (key, value) in request.iter() {
        let Some(pattern) = run_text_pattern(key) else {
            continue;
        };

        let value = if options.escape_values {
            escape_text(value)
        } else {
            value.into()
        };

        let mut count = 0;
        let updated = pattern.replace_all(&content, |caps: &Captures| {
            count += 1;
            let mut run = Vec::with_capacity(caps[1].len() + value.len() + caps[2].len() + 2);
            run.extend_from_slice(&caps[1]);
            run.push(b' ');
            run.extend_from_slice(value.as_bytes());
            run.push(b' ');
            run.extend_from_slice(&caps[2]);
            run
        });

        trace!("Replaced {:?} in {} run(s)", key, count);
        if count > 0 {
            content = updated.into_owned();
            total += count;
        }
    }

    debug!(
        "Substituted {} run(s) from {} into {}",
        total, options.read_member, options.write_member
    );
    package.set(&options.write_member, content);
    total
}

/// Pattern for a run whose stored text is exactly `key`
fn run_text_pattern(key: &str) -> Option<Regex> {
    let pattern = format!("{}{}{}", RUN_OPEN, stored_text_pattern(key), RUN_CLOSE);

    match Regex::new(&pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!("Skipping replacement key {:?}: {}", key, e);
            None
        }
    }
}
