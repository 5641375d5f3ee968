//! List query options shared by every `ls` command.

use crate::error::{Result, TbsError};
use crate::transport::ApiRequest;

/// Ordered `key=value` filters accumulated from repeated `--filter` flags.
///
/// Each flag value is a comma-separated list. Later values overlay earlier
/// ones: a repeated key takes the new value in its original position, new
/// keys are appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    pairs: Vec<(String, String)>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from every flag occurrence, in order.
    pub fn from_values<I, S>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for value in values {
            set.merge(value.as_ref())?;
        }
        Ok(set)
    }

    /// Overlays one `k=v,k2=v2` flag value onto the set.
    pub fn merge(&mut self, value: &str) -> Result<()> {
        for segment in value.split(',').filter(|s| !s.trim().is_empty()) {
            let (key, val) = segment.split_once('=').ok_or_else(|| {
                TbsError::validation(format!(
                    "Invalid filter '{}': expected key=value",
                    segment
                ))
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(TbsError::validation(format!(
                    "Invalid filter '{}': empty key",
                    segment
                )));
            }
            self.set(key, val.trim());
        }
        Ok(())
    }

    pub fn set(&mut self, key: &str, value: &str) {
        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some(pair) => pair.1 = value.to_string(),
            None => self.pairs.push((key.to_string(), value.to_string())),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Pagination, ordering and filters for a list request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub ordering: Option<String>,
    pub filters: FilterSet,
}

impl ListOptions {
    /// Adds the options to `request` as query parameters.
    ///
    /// A zero limit means "server default" and is omitted. `offset` is sent
    /// whenever `limit` is, defaulting to 0.
    pub fn apply(&self, mut request: ApiRequest) -> ApiRequest {
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            request = request
                .query("limit", limit.to_string())
                .query("offset", self.offset.unwrap_or(0).to_string());
        } else if let Some(offset) = self.offset.filter(|o| *o > 0) {
            request = request.query("offset", offset.to_string());
        }
        if let Some(ordering) = self.ordering.as_deref().filter(|o| !o.is_empty()) {
            request = request.query("ordering", ordering);
        }
        for (key, value) in self.filters.iter() {
            request = request.query(key, value);
        }
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_values_overlay_earlier_ones() {
        let set = FilterSet::from_values(["a=1,b=2", "b=3,c=4"]).unwrap();
        let pairs: Vec<_> = set.iter().collect();
        assert_eq!(pairs, vec![("a", "1"), ("b", "3"), ("c", "4")]);
    }

    #[test]
    fn segment_without_equals_is_rejected() {
        let err = FilterSet::from_values(["a=1,broken"]).unwrap_err();
        assert!(matches!(err, TbsError::Validation(_)));
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn value_may_contain_equals() {
        let set = FilterSet::from_values(["q=a=b"]).unwrap();
        assert_eq!(set.get("q"), Some("a=b"));
    }

    #[test]
    fn trailing_comma_is_ignored() {
        let set = FilterSet::from_values(["a=1,"]).unwrap();
        assert_eq!(set.iter().count(), 1);
    }

    #[test]
    fn options_become_query_params() {
        let options = ListOptions {
            limit: Some(10),
            offset: None,
            ordering: Some("-name".into()),
            filters: FilterSet::from_values(["status=running"]).unwrap(),
        };
        let req = options.apply(ApiRequest::get("/ns/projects/"));
        assert_eq!(
            req.query,
            vec![
                ("limit".to_string(), "10".to_string()),
                ("offset".to_string(), "0".to_string()),
                ("ordering".to_string(), "-name".to_string()),
                ("status".to_string(), "running".to_string()),
            ]
        );
    }

    #[test]
    fn empty_options_add_nothing() {
        let req = ListOptions::default().apply(ApiRequest::get("/users/"));
        assert!(req.query.is_empty());
    }
}
