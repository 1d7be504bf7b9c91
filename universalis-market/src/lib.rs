//! Client for the [Universalis](https://universalis.app) market board API.
//!
//! Besides the raw endpoints, the crate carries a couple of reshaping helpers in [`reshape`]
//! that group listings by world and sales by calendar day.
pub mod client;
pub mod config;
pub mod request;
pub mod reshape;
pub mod servers;
pub mod views;

pub use client::{UniversalisClient, WorldOrDatacenter};
pub use config::ClientConfig;
pub use request::{join_identifiers, Identifier, ItemIds};
pub use reshape::{
    sort_listings_by_world, sort_sales_by_day, DailySale, ListingsByWorld, SaleTime, SalesByDay,
    WorldListing,
};
pub use servers::{ServerDirectory, ServerKind};
pub use views::*;

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;

#[derive(Hash, Copy, Clone, Debug, Deserialize, Serialize, Eq, PartialEq, PartialOrd, Ord)]
pub struct ItemId(pub i32);

#[derive(Serialize, Deserialize, Debug, Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct WorldId(pub i32);

#[derive(
    Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq, PartialOrd, Ord, Hash,
)]
pub struct WorldName(pub String);

impl Display for WorldName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),
    #[error("HTTP Error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Bad ID, listing returned id {0}")]
    BadId(u32),
}
