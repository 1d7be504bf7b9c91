//! Groupings of listing and sale data that the API doesn't provide itself.
//!
//! Both groupings keep their keys in the order they were first seen, and keep the input order
//! inside each group.
use crate::views::{HistoryEntry, HistorySingleView, ListingView, MateriaView};
use crate::{Error, WorldId, WorldName};
use chrono::{DateTime, Local, Timelike};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_with::{formats::Flexible, serde_as, TimestampSeconds};

/// Listings grouped by the name of the world they are posted on.
pub type ListingsByWorld = IndexMap<String, Vec<WorldListing>>;

/// Sales grouped by their `YYYY-MM-DD` date.
pub type SalesByDay = IndexMap<String, Vec<DailySale>>;

/// A [`ListingView`] without the tax figure, known to carry a world name.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorldListing {
    #[serde_as(as = "TimestampSeconds<i64, Flexible>")]
    pub last_review_time: DateTime<Local>,
    pub price_per_unit: Option<u32>,
    pub quantity: Option<u32>,
    #[serde(rename = "stainID")]
    pub stain_id: Option<u32>,
    pub world_name: String,
    #[serde(rename = "worldID")]
    pub world_id: Option<WorldId>,
    pub creator_name: Option<String>,
    #[serde(rename = "creatorID")]
    pub creator_id: Option<String>,
    pub hq: bool,
    pub is_crafted: bool,
    #[serde(rename = "listingID")]
    pub listing_id: Option<String>,
    pub materia: Vec<MateriaView>,
    pub on_mannequin: bool,
    pub retainer_city: u32,
    #[serde(rename = "retainerID")]
    pub retainer_id: Option<String>,
    pub retainer_name: String,
    #[serde(rename = "sellerID")]
    pub seller_id: Option<String>,
    pub total: u32,
}

impl WorldListing {
    fn new(listing: &ListingView, world_name: String) -> Self {
        Self {
            last_review_time: listing.last_review_time,
            price_per_unit: listing.price_per_unit,
            quantity: listing.quantity,
            stain_id: listing.stain_id,
            world_name,
            world_id: listing.world_id,
            creator_name: listing.creator_name.clone(),
            creator_id: listing.creator_id.clone(),
            hq: listing.hq,
            is_crafted: listing.is_crafted,
            listing_id: listing.listing_id.clone(),
            materia: listing.materia.clone(),
            on_mannequin: listing.on_mannequin,
            retainer_city: listing.retainer_city,
            retainer_id: listing.retainer_id.clone(),
            retainer_name: listing.retainer_name.clone(),
            seller_id: listing.seller_id.clone(),
            total: listing.total,
        }
    }
}

fn missing_world_name() -> Error {
    Error::InvalidInput(
        "Missing worldName in listing data. Ensure the data contains results from an entire \
         data center and not a single world"
            .to_string(),
    )
}

/// Groups data center listings by world.
///
/// Fails with [`Error::InvalidInput`] when `listings` is empty or any listing lacks a world
/// name or has an empty one, which is the case for single world queries.
pub fn sort_listings_by_world(listings: &[ListingView]) -> Result<ListingsByWorld, Error> {
    let first = listings
        .first()
        .ok_or_else(|| Error::InvalidInput("no listings to sort".to_string()))?;
    if first.world_name.as_deref().map_or(true, str::is_empty) {
        return Err(missing_world_name());
    }
    listings
        .iter()
        .try_fold(ListingsByWorld::new(), |mut worlds, listing| {
            let world_name = listing
                .world_name
                .clone()
                .filter(|world| !world.is_empty())
                .ok_or_else(missing_world_name)?;
            worlds
                .entry(world_name.clone())
                .or_default()
                .push(WorldListing::new(listing, world_name));
            Ok(worlds)
        })
}

/// Time of day of a sale. Neither form pads its components, `09:05:07` is `957` and `9:5:7`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SaleTime {
    pub raw: String,
    pub pretty: String,
}

impl SaleTime {
    fn new(time: &DateTime<Local>) -> Self {
        let (hour, minute, second) = (time.hour(), time.minute(), time.second());
        Self {
            raw: format!("{hour}{minute}{second}"),
            pretty: format!("{hour}:{minute}:{second}"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DailySale {
    #[serde(rename = "itemID")]
    pub item_id: u32,
    pub hq: bool,
    pub price_per_unit: u64,
    pub quantity: u32,
    pub world_name: Option<WorldName>,
    #[serde(rename = "worldID")]
    pub world_id: Option<WorldId>,
    pub date: String,
    pub time: SaleTime,
}

impl DailySale {
    fn new(sales: &HistorySingleView, entry: &HistoryEntry) -> Self {
        Self {
            item_id: sales.item_id,
            hq: entry.hq,
            price_per_unit: entry.price_per_unit,
            quantity: entry.quantity,
            world_name: entry
                .world_name
                .clone()
                .or_else(|| sales.world_name.clone()),
            world_id: entry.world_id.or(sales.world_id),
            date: entry.timestamp.format("%Y-%m-%d").to_string(),
            time: SaleTime::new(&entry.timestamp),
        }
    }
}

/// Groups an item's sale history by the local calendar day of each sale, keeping the first
/// `limit` days in the order they appear in `sales`.
///
/// Days are not sorted. Sort the entries beforehand to get the most recent days.
pub fn sort_sales_by_day(sales: &HistorySingleView, limit: usize) -> SalesByDay {
    let mut days = sales
        .entries
        .iter()
        .map(|entry| DailySale::new(sales, entry))
        .fold(SalesByDay::new(), |mut days, sale| {
            days.entry(sale.date.clone()).or_default().push(sale);
            days
        });
    days.truncate(limit);
    days
}
