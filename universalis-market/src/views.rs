use crate::views::MarketView::{MultiView, SingleView};
use crate::{Error, ItemId, WorldId, WorldName};
use chrono::{DateTime, Local};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{formats::Flexible, serde_as, TimestampMilliSeconds, TimestampSeconds};
use std::collections::{BTreeMap, HashMap};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MateriaView {
    #[serde(rename = "slotID")]
    pub slot_id: Option<u32>,
    #[serde(rename = "materiaID")]
    pub materia_id: u32,
}

pub type StackSizeHistogram = HashMap<u64, u16>;

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingMultiViewData {
    #[serde(rename = "itemID")]
    pub item_id: u32,
    pub last_upload_time: i64,
    pub listings: Vec<ListingView>,
    pub recent_history: Vec<SaleView>,
    pub current_average_price: f64,
    #[serde(rename = "currentAveragePriceNQ")]
    pub current_average_price_nq: f64,
    #[serde(rename = "currentAveragePriceHQ")]
    pub current_average_price_hq: f64,
    pub regular_sale_velocity: f64,
    pub nq_sale_velocity: f64,
    pub hq_sale_velocity: f64,
    pub average_price: f64,
    #[serde(rename = "averagePriceNQ")]
    pub average_price_nq: f64,
    #[serde(rename = "averagePriceHQ")]
    pub average_price_hq: f64,
    pub min_price: f64,
    #[serde(rename = "minPriceNQ")]
    pub min_price_nq: f64,
    #[serde(rename = "minPriceHQ")]
    pub min_price_hq: f64,
    pub max_price: f64,
    #[serde(rename = "maxPriceNQ")]
    pub max_price_nq: f64,
    #[serde(rename = "maxPriceHQ")]
    pub max_price_hq: f64,
    pub stack_size_histogram: StackSizeHistogram,
    #[serde(rename = "stackSizeHistogramNQ")]
    pub stack_size_histogram_nq: StackSizeHistogram,
    #[serde(rename = "stackSizeHistogramHQ")]
    pub stack_size_histogram_hq: StackSizeHistogram,
    pub world_upload_times: Option<Value>,
}

/// A single listing on a market board.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListingView {
    #[serde_as(as = "TimestampSeconds<i64, Flexible>")]
    pub last_review_time: DateTime<Local>,
    pub price_per_unit: Option<u32>,
    pub quantity: Option<u32>,
    #[serde(rename = "stainID")]
    pub stain_id: Option<u32>,
    /// Only present when the listing came from a data center or region query.
    pub world_name: Option<String>,
    #[serde(rename = "worldID")]
    pub world_id: Option<WorldId>,
    pub creator_name: Option<String>,
    /// UUID
    #[serde(rename = "creatorID")]
    pub creator_id: Option<String>,
    #[serde(default)]
    pub hq: bool,
    #[serde(default)]
    pub is_crafted: bool,
    #[serde(rename = "listingID")]
    pub listing_id: Option<String>,
    #[serde(default)]
    pub materia: Vec<MateriaView>,
    #[serde(default)]
    pub on_mannequin: bool,
    #[serde(default)]
    pub retainer_city: u32,
    /// UUID
    #[serde(rename = "retainerID")]
    pub retainer_id: Option<String>,
    #[serde(default)]
    pub retainer_name: String,
    #[serde(rename = "sellerID")]
    pub seller_id: Option<String>,
    #[serde(default)]
    pub total: u32,
    pub tax: Option<u32>,
}

/// Entry of the `recentHistory` list that comes with current market data.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SaleView {
    pub hq: bool,
    pub price_per_unit: i32,
    pub quantity: i32,
    #[serde_as(as = "TimestampSeconds<i64, Flexible>")]
    pub timestamp: DateTime<Local>,
    #[serde(default)]
    pub on_mannequin: bool,
    pub world_name: Option<String>,
    #[serde(rename = "worldID")]
    pub world_id: Option<WorldId>,
    pub buyer_name: Option<String>,
    #[serde(default)]
    pub total: i32,
}

/// Current market data. Which variant a response decodes into depends on how many items were
/// asked for, so this is only ever built by the client and never deserialized directly.
#[derive(Serialize, Debug)]
#[serde(untagged)]
pub enum MarketView {
    SingleView(CurrentlyShownSingleView),
    MultiView(CurrentlyShownMultiView),
}

impl MarketView {
    pub fn get_listings_for_item_id(&self, id: u32) -> Result<&Vec<ListingView>, Error> {
        match self {
            SingleView(v) => {
                if v.item_id != id {
                    return Err(Error::BadId(v.item_id));
                }

                Ok(&v.listings)
            }
            MultiView(v) => v
                .items
                .get(&id)
                .ok_or(Error::BadId(id))
                .map(|m| &m.listings),
        }
    }

    pub fn items(self) -> impl Iterator<Item = (ItemId, Vec<ListingView>, Vec<SaleView>)> {
        match self {
            SingleView(single) => vec![(
                ItemId(single.item_id as i32),
                single.listings,
                single.recent_history,
            )]
            .into_iter(),
            MultiView(multi) => multi
                .items
                .into_iter()
                .map(|(i, d)| (ItemId(i as i32), d.listings, d.recent_history))
                .collect::<Vec<_>>()
                .into_iter(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CurrentlyShownSingleView {
    #[serde(rename = "itemID")]
    pub item_id: u32,
    #[serde(rename = "worldID")]
    pub world_id: Option<WorldId>,
    pub world_name: Option<String>,
    pub dc_name: Option<String>,
    pub listings: Vec<ListingView>,
    #[serde(default)]
    pub recent_history: Vec<SaleView>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CurrentlyShownMultiView {
    #[serde(rename = "itemIDs")]
    pub item_ids: Vec<u32>,
    pub items: HashMap<u32, ListingMultiViewData>,
    #[serde(default)]
    pub unresolved_items: Vec<Value>,
    pub dc_name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub enum HistoryView {
    SingleView(Box<HistorySingleView>),
    MultiView(Box<HistoryMultiView>),
}

impl HistoryView {
    pub fn items(self) -> impl Iterator<Item = HistorySingleView> {
        match self {
            HistoryView::SingleView(single) => vec![*single].into_iter(),
            HistoryView::MultiView(multi) => multi.items.into_values().collect::<Vec<_>>().into_iter(),
        }
    }
}

#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub hq: bool,
    pub price_per_unit: u64,
    pub quantity: u32,
    pub buyer_name: Option<String>,
    pub on_mannequin: Option<bool>,
    #[serde_as(as = "TimestampSeconds<i64, Flexible>")]
    pub timestamp: DateTime<Local>,
    pub world_name: Option<WorldName>,
    #[serde(rename = "worldID")]
    pub world_id: Option<WorldId>,
}

#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct HistoryMultiView {
    #[serde(rename = "itemIDs")]
    pub item_ids: Vec<u32>,
    pub items: BTreeMap<u32, HistorySingleView>,
    pub dc_name: Option<String>,
    #[serde(default)]
    pub unresolved_items: Vec<u32>,
}

/// Sale history of one item. `world_name` and `world_id` are set for single world queries,
/// otherwise every entry carries its own world.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct HistorySingleView {
    #[serde(rename = "itemID")]
    pub item_id: u32,
    pub world_name: Option<WorldName>,
    #[serde(rename = "worldID")]
    pub world_id: Option<WorldId>,
    pub dc_name: Option<String>,
    pub entries: Vec<HistoryEntry>,
    #[serde_as(as = "TimestampMilliSeconds<i64, Flexible>")]
    #[serde(default)]
    pub last_upload_time: DateTime<Local>,
    #[serde(default)]
    pub stack_size_histogram: StackSizeHistogram,
    #[serde(rename = "stackSizeHistogramHQ", default)]
    pub stack_size_histogram_hq: StackSizeHistogram,
    #[serde(rename = "stackSizeHistogramNQ", default)]
    pub stack_size_histogram_nq: StackSizeHistogram,
    #[serde(default)]
    pub regular_sale_velocity: f64,
    #[serde(default)]
    pub nq_sale_velocity: f64,
    #[serde(default)]
    pub hq_sale_velocity: f64,
}

/// Market tax rates per city, in percent. Cities the API does not report are `None`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxRatesView {
    #[serde(rename = "Limsa Lominsa")]
    pub limsa_lominsa: Option<u8>,
    #[serde(rename = "Gridania")]
    pub gridania: Option<u8>,
    #[serde(rename = "Ul'dah")]
    pub uldah: Option<u8>,
    #[serde(rename = "Ishgard")]
    pub ishgard: Option<u8>,
    #[serde(rename = "Kugane")]
    pub kugane: Option<u8>,
    #[serde(rename = "Crystarium")]
    pub crystarium: Option<u8>,
    #[serde(rename = "Old Sharlayan")]
    pub old_sharlayan: Option<u8>,
    #[serde(rename = "Tuliyollal")]
    pub tuliyollal: Option<u8>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct MostRecentlyUpdatedItemsView {
    pub items: Vec<WorldItemRecencyView>,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WorldItemRecencyView {
    // The item ID.
    #[serde(rename = "itemID")]
    pub item_id: i32,
    // The last upload time for the item on the listed world.
    #[serde_as(as = "TimestampMilliSeconds<i64, Flexible>")]
    pub last_upload_time: DateTime<Local>,
    // The world ID.
    #[serde(rename = "worldID")]
    pub world_id: i32,
    // The world name.
    pub world_name: Option<String>,
}

/// Recently updated items with no world or time attached.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RecentlyUpdatedItemsView {
    pub items: Vec<ItemId>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct WorldUploadCount {
    pub count: u64,
    pub proportion: f64,
}

/// Upload counts keyed by world name.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct WorldUploadCountsView(pub IndexMap<String, WorldUploadCount>);

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SourceUploadCount {
    pub source_name: String,
    pub upload_count: u64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadHistoryView {
    pub upload_count_by_day: Vec<u64>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct UploadCounts {
    pub world: WorldUploadCountsView,
    pub application: Vec<SourceUploadCount>,
    pub history: UploadHistoryView,
}

#[cfg(test)]
mod test {
    use super::{
        CurrentlyShownMultiView, CurrentlyShownSingleView, HistorySingleView, MarketView,
        TaxRatesView, WorldUploadCountsView,
    };
    use crate::{Error, ItemId, WorldName};
    use serde_json::json;

    #[test]
    fn single_view_listings() {
        let view: CurrentlyShownSingleView = serde_json::from_value(json!({
            "itemID": 5333,
            "worldID": 63,
            "worldName": "Gilgamesh",
            "listings": [{
                "lastReviewTime": 1700000000,
                "pricePerUnit": 120,
                "quantity": 3,
                "hq": false,
                "retainerName": "Pom",
                "total": 360
            }]
        }))
        .unwrap();
        let view = MarketView::SingleView(view);
        assert_eq!(view.get_listings_for_item_id(5333).unwrap().len(), 1);
        assert!(matches!(
            view.get_listings_for_item_id(1),
            Err(Error::BadId(5333))
        ));
        let items: Vec<_> = view.items().collect();
        assert_eq!(items[0].0, ItemId(5333));
    }

    #[test]
    fn multi_view_listings() {
        let view: CurrentlyShownMultiView = serde_json::from_str(
            r#"{
                "itemIDs": [2, 3],
                "items": {
                    "2": { "itemID": 2, "listings": [] },
                    "3": { "itemID": 3, "listings": [] }
                },
                "dcName": "Aether"
            }"#,
        )
        .unwrap();
        let view = MarketView::MultiView(view);
        assert!(view.get_listings_for_item_id(3).unwrap().is_empty());
        assert!(matches!(
            view.get_listings_for_item_id(4),
            Err(Error::BadId(4))
        ));
        assert_eq!(view.items().count(), 2);
    }

    #[test]
    fn history_defaults() {
        let view: HistorySingleView = serde_json::from_value(json!({
            "itemID": 5,
            "worldName": "Gilgamesh",
            "entries": [{ "hq": true, "pricePerUnit": 100, "quantity": 2, "timestamp": 1600000000 }]
        }))
        .unwrap();
        assert_eq!(view.world_name, Some(WorldName("Gilgamesh".to_string())));
        assert_eq!(view.entries[0].timestamp.timestamp(), 1600000000);
        assert!(view.stack_size_histogram.is_empty());
    }

    #[test]
    fn tax_rates() {
        let rates: TaxRatesView = serde_json::from_value(json!({
            "Limsa Lominsa": 5,
            "Gridania": 3,
            "Ul'dah": 0,
            "Ishgard": 5,
            "Kugane": 5,
            "Crystarium": 5,
            "Old Sharlayan": 5
        }))
        .unwrap();
        assert_eq!(rates.gridania, Some(3));
        assert_eq!(rates.uldah, Some(0));
        assert_eq!(rates.tuliyollal, None);
    }

    #[test]
    fn world_upload_counts_keep_order() {
        let counts: WorldUploadCountsView = serde_json::from_str(
            r#"{
                "Zalera": { "count": 10, "proportion": 0.1 },
                "Adamantoise": { "count": 90, "proportion": 0.9 },
                "Midgardsormr": { "count": 50, "proportion": 0.5 }
            }"#,
        )
        .unwrap();
        let worlds: Vec<_> = counts.0.keys().map(String::as_str).collect();
        assert_eq!(worlds, vec!["Zalera", "Adamantoise", "Midgardsormr"]);
        assert_eq!(counts.0["Adamantoise"].count, 90);
    }
}
