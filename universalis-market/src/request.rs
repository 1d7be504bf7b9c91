use crate::{Error, ItemId};
use serde::Serialize;
use std::fmt::{Display, Formatter};
use url::Url;

/// Joins identifiers into the comma separated form the API takes for multi item queries.
///
/// Every identifier is written as a JSON literal, so numbers come out as plain decimal text
/// while strings keep their quotes: `[1, 2, 3]` becomes `1,2,3` and `["a"]` becomes `"a"`.
pub fn join_identifiers<T: Serialize>(ids: &[T]) -> Result<String, Error> {
    let id_strs = ids
        .iter()
        .map(serde_json::to_string)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(id_strs.join(","))
}

/// An item identifier as accepted by the listing and history endpoints.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum Identifier {
    Id(i32),
    Name(String),
}

impl Identifier {
    fn is_missing(&self) -> bool {
        match self {
            Identifier::Id(id) => *id == 0,
            Identifier::Name(name) => name.is_empty(),
        }
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Identifier::Id(id) => write!(f, "{id}"),
            Identifier::Name(name) => write!(f, "{name}"),
        }
    }
}

impl From<i32> for Identifier {
    fn from(id: i32) -> Self {
        Identifier::Id(id)
    }
}

impl From<ItemId> for Identifier {
    fn from(id: ItemId) -> Self {
        Identifier::Id(id.0)
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Identifier::Name(name.to_string())
    }
}

impl From<String> for Identifier {
    fn from(name: String) -> Self {
        Identifier::Name(name)
    }
}

/// Either one identifier or a list of them.
///
/// A single identifier goes into the URL as is. A list is joined with [`join_identifiers`],
/// even when it only holds one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemIds {
    One(Identifier),
    Many(Vec<Identifier>),
}

impl ItemIds {
    /// Number of items the request asks for. A single textual id may already hold a comma
    /// separated list, in which case every entry counts.
    pub fn len(&self) -> usize {
        match self {
            ItemIds::One(Identifier::Name(name)) => name.split(',').count(),
            ItemIds::One(Identifier::Id(_)) => 1,
            ItemIds::Many(ids) => ids.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when there is nothing usable to query for: no ids, an empty name or the id `0`.
    pub fn is_missing(&self) -> bool {
        match self {
            ItemIds::One(id) => id.is_missing(),
            ItemIds::Many(ids) => ids.is_empty() || ids.iter().any(Identifier::is_missing),
        }
    }

    pub(crate) fn to_path_segment(&self) -> Result<String, Error> {
        match self {
            ItemIds::One(id) => Ok(id.to_string()),
            ItemIds::Many(ids) => join_identifiers(ids),
        }
    }
}

impl<T: Into<Identifier>> From<Vec<T>> for ItemIds {
    fn from(ids: Vec<T>) -> Self {
        ItemIds::Many(ids.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Identifier> + Clone> From<&[T]> for ItemIds {
    fn from(ids: &[T]) -> Self {
        ItemIds::Many(ids.iter().cloned().map(Into::into).collect())
    }
}

impl From<Identifier> for ItemIds {
    fn from(id: Identifier) -> Self {
        ItemIds::One(id)
    }
}

impl From<i32> for ItemIds {
    fn from(id: i32) -> Self {
        ItemIds::One(id.into())
    }
}

impl From<ItemId> for ItemIds {
    fn from(id: ItemId) -> Self {
        ItemIds::One(id.into())
    }
}

impl From<&str> for ItemIds {
    fn from(name: &str) -> Self {
        ItemIds::One(name.into())
    }
}

impl From<String> for ItemIds {
    fn from(name: String) -> Self {
        ItemIds::One(name.into())
    }
}

/// Composes request URLs below a fixed API root.
#[derive(Debug, Clone)]
pub(crate) struct Endpoints {
    base: String,
}

impl Endpoints {
    pub(crate) fn new(base: &str) -> Result<Self, Error> {
        let base = base.trim_end_matches('/').to_string();
        Url::parse(&base)?;
        Ok(Self { base })
    }

    /// `{base}/{path}` with the given query pairs appended.
    pub(crate) fn resource(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, Error> {
        let mut url = Url::parse(&format!("{}/{path}", self.base))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// `{base}/extra/stats/{stat}` with the given query pairs appended.
    pub(crate) fn stats(&self, stat: &str, query: &[(&str, &str)]) -> Result<Url, Error> {
        self.resource(&format!("extra/stats/{stat}"), query)
    }
}
