//! Keyword tables made of (possibly multi-word) phrases.
//!
//! A table is a sorted, deduplicated list of lowercase word sequences.
//! Because entries are ordered by their space-joined text, every phrase
//! sharing a first word sits in one contiguous run, and an exact phrase
//! always precedes its longer extensions.

use serde::Deserialize;

/// One keyword phrase, e.g. `["left", "outer", "join"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    words: Vec<String>,
    phrase: String,
}

impl Entry {
    fn new(words: Vec<String>) -> Self {
        let words: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
        let phrase = words.join(" ");
        Self { words, phrase }
    }

    fn first(&self) -> &str {
        self.words.first().map_or("", String::as_str)
    }
}

/// Result of looking a word sequence up in a [`KeywordTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// The words form a complete keyword phrase.
    Exact,
    /// The words are a proper prefix of at least one longer phrase.
    Prefix,
    /// Nothing in the table starts with these words.
    NotFound,
}

impl Lookup {
    /// Returns true unless the lookup found nothing.
    #[must_use]
    pub const fn is_found(self) -> bool {
        !matches!(self, Self::NotFound)
    }
}

/// A set of keyword phrases supporting longest-match lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<String>")]
pub struct KeywordTable {
    entries: Vec<Entry>,
}

impl KeywordTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builds a table from whitespace-separated phrases.
    #[must_use]
    pub fn from_phrases<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for phrase in phrases {
            table.insert(phrase.as_ref());
        }
        table.prepare();
        table
    }

    /// Adds a phrase without re-sorting; call [`prepare`](Self::prepare)
    /// before the next lookup.
    pub fn insert(&mut self, phrase: &str) {
        let words: Vec<String> = phrase.split_whitespace().map(String::from).collect();
        if !words.is_empty() {
            self.entries.push(Entry::new(words));
        }
    }

    /// Lowercases, sorts and deduplicates the entries.
    pub fn prepare(&mut self) {
        self.entries
            .iter_mut()
            .for_each(|e| *e = Entry::new(std::mem::take(&mut e.words)));
        self.entries.sort_by(|a, b| a.phrase.cmp(&b.phrase));
        self.entries.dedup_by(|a, b| a.phrase == b.phrase);
    }

    /// Merges another table into this one (dialect extension).
    #[must_use]
    pub fn union(mut self, other: &Self) -> Self {
        self.entries.extend(other.entries.iter().cloned());
        self.prepare();
        self
    }

    /// Number of phrases in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no phrases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if `phrase` is a complete keyword.
    #[must_use]
    pub fn contains(&self, phrase: &str) -> bool {
        let words: Vec<String> = phrase.split_whitespace().map(str::to_lowercase).collect();
        self.lookup(&words) == Lookup::Exact
    }

    /// Iterates over the phrases in sorted order.
    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.phrase.as_str())
    }

    /// Looks up a sequence of lowercase words.
    #[must_use]
    pub fn lookup<S: AsRef<str>>(&self, words: &[S]) -> Lookup {
        let Some(first) = words.first().map(AsRef::as_ref) else {
            return Lookup::NotFound;
        };
        let start = self.entries.partition_point(|e| e.first() < first);
        let Some(candidate) = self.entries.get(start) else {
            return Lookup::NotFound;
        };
        if candidate.first() != first {
            return Lookup::NotFound;
        }

        // Single-word keyword with no longer phrase sharing its first word.
        if words.len() == 1
            && candidate.words.len() == 1
            && !matches!(self.entries.get(start + 1), Some(next) if next.first() == first)
        {
            return Lookup::Exact;
        }

        let got = words
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .join(" ");
        let mut prefix = false;
        for entry in self.entries[start..]
            .iter()
            .take_while(|e| e.first() == first)
        {
            if entry.phrase == got {
                return Lookup::Exact;
            }
            if !prefix
                && entry.words.len() > words.len()
                && entry.words[..words.len()]
                    .iter()
                    .zip(words)
                    .all(|(a, b)| a == b.as_ref())
            {
                prefix = true;
            }
        }
        if prefix {
            Lookup::Prefix
        } else {
            Lookup::NotFound
        }
    }
}

impl From<Vec<String>> for KeywordTable {
    fn from(phrases: Vec<String>) -> Self {
        Self::from_phrases(phrases)
    }
}

impl<'a> FromIterator<&'a str> for KeywordTable {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        Self::from_phrases(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> KeywordTable {
        KeywordTable::from_phrases([
            "select",
            "left join",
            "LEFT OUTER JOIN",
            "group by",
            "from",
            "select",
            "is",
        ])
    }

    #[test]
    fn test_prepare_dedups_and_lowercases() {
        let t = table();
        assert_eq!(t.len(), 6);
        assert!(t.contains("left outer join"));
        assert!(t.contains("LEFT OUTER JOIN"));
    }

    #[test]
    fn test_phrases_are_sorted() {
        let t = table();
        let phrases: Vec<&str> = t.phrases().collect();
        assert_eq!(
            phrases,
            vec![
                "from",
                "group by",
                "is",
                "left join",
                "left outer join",
                "select"
            ]
        );
    }

    #[test]
    fn test_lookup_single_word() {
        let t = table();
        assert_eq!(t.lookup(&["select"]), Lookup::Exact);
        assert_eq!(t.lookup(&["from"]), Lookup::Exact);
        assert_eq!(t.lookup(&["users"]), Lookup::NotFound);
    }

    #[test]
    fn test_lookup_prefix_only() {
        let t = table();
        assert_eq!(t.lookup(&["left"]), Lookup::Prefix);
        assert_eq!(t.lookup(&["left", "outer"]), Lookup::Prefix);
        assert_eq!(t.lookup(&["group"]), Lookup::Prefix);
    }

    #[test]
    fn test_lookup_multi_word_exact() {
        let t = table();
        assert_eq!(t.lookup(&["left", "join"]), Lookup::Exact);
        assert_eq!(t.lookup(&["left", "outer", "join"]), Lookup::Exact);
        assert_eq!(t.lookup(&["group", "by"]), Lookup::Exact);
    }

    #[test]
    fn test_lookup_failed_extension() {
        let t = table();
        assert_eq!(t.lookup(&["left", "users"]), Lookup::NotFound);
        assert_eq!(t.lookup(&["select", "x"]), Lookup::NotFound);
        assert_eq!(t.lookup::<&str>(&[]), Lookup::NotFound);
    }

    #[test]
    fn test_exact_and_prefix_prefers_exact() {
        let t = KeywordTable::from_phrases(["end", "end if"]);
        assert_eq!(t.lookup(&["end"]), Lookup::Exact);
        assert_eq!(t.lookup(&["end", "if"]), Lookup::Exact);
    }

    #[test]
    fn test_union_merges_dialect_entries() {
        let base = KeywordTable::from_phrases(["select", "from"]);
        let extra = KeywordTable::from_phrases(["pragma", "select"]);
        let merged = base.union(&extra);
        assert_eq!(merged.len(), 3);
        assert!(merged.contains("pragma"));
    }

    #[test]
    fn test_deserialize_from_phrase_list() {
        let t: KeywordTable = serde_json::from_str(r#"["order by", "ORDER BY", "limit"]"#).unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t.lookup(&["order"]), Lookup::Prefix);
        assert_eq!(t.lookup(&["order", "by"]), Lookup::Exact);
    }
}
