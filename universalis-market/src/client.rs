use crate::config::ClientConfig;
use crate::request::{Endpoints, ItemIds};
use crate::servers::{ServerDirectory, ServerKind};
use crate::views::{
    HistoryView, MarketView, MostRecentlyUpdatedItemsView, RecentlyUpdatedItemsView,
    SourceUploadCount, TaxRatesView, UploadCounts, UploadHistoryView, WorldUploadCountsView,
};
use crate::{Error, ItemId};
use log::{debug, info, warn};
use reqwest::{Client, Method, Request, Url};
use serde::de::DeserializeOwned;

/// Number of entries [`UniversalisClient::get_recently_updated_items`] asks for by default.
pub const DEFAULT_RECENTLY_UPDATED_ENTRIES: u32 = 50;

pub enum WorldOrDatacenter<'a> {
    World(&'a str),
    Datacenter(&'a str),
}

/// Stateless client for the Universalis API.
///
/// Methods that need a world, data center or item id return `Ok(None)` without touching the
/// network when that input is empty, or when the server name is unknown to the server
/// directory (see [`ClientConfig::validate_server_names`]). Transport and decoding failures
/// are passed through as [`Error::HttpError`].
pub struct UniversalisClient {
    client: Client,
    endpoints: Endpoints,
    config: ClientConfig,
}

impl UniversalisClient {
    pub fn new(user_agent: impl ToString) -> Result<Self, Error> {
        Self::with_config(ClientConfig::with_user_agent(user_agent))
    }

    pub fn with_config(config: ClientConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;
        let endpoints = Endpoints::new(&config.base_url)?;
        Ok(UniversalisClient {
            client,
            endpoints,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        let request = Request::new(Method::GET, url);
        Ok(self.client.execute(request).await?.json().await?)
    }

    /// Fetches the data center -> worlds directory. Never cached.
    pub async fn get_server_directory(&self) -> Result<ServerDirectory, Error> {
        let url = Url::parse(&self.config.server_directory_url)?;
        info!("Getting server directory: {url}");
        self.get_json(url).await
    }

    /// Works out whether `name` is a data center or a world.
    ///
    /// An empty name is `Ok(None)` straight away; anything else costs one directory request.
    pub async fn validate_server_name(&self, name: &str) -> Result<Option<ServerKind>, Error> {
        if name.is_empty() {
            return Ok(None);
        }
        let kind = self.get_server_directory().await?.classify(name);
        debug!("Server {name} classified as {kind:?}");
        Ok(kind)
    }

    async fn is_known_server(&self, name: &str) -> Result<bool, Error> {
        if !self.config.validate_server_names {
            return Ok(true);
        }
        let known = self.validate_server_name(name).await?.is_some();
        if !known {
            warn!("Unknown world or data center {name}, skipping request");
        }
        Ok(known)
    }

    pub async fn get_marketable_items(&self) -> Result<Vec<ItemId>, Error> {
        let url = self.endpoints.resource("marketable", &[])?;
        info!("Getting marketable items: {url}");
        self.get_json(url).await
    }

    /// Fetches the full marketable item list and checks whether `id` is on it.
    pub async fn validate_marketable_item(&self, id: ItemId) -> Result<bool, Error> {
        Ok(self.get_marketable_items().await?.contains(&id))
    }

    /// Current listings for one or more items on a world, data center or region.
    pub async fn get_listings(
        &self,
        world_or_datacenter: &str,
        item_ids: impl Into<ItemIds>,
    ) -> Result<Option<MarketView>, Error> {
        let item_ids = item_ids.into();
        if world_or_datacenter.is_empty() || item_ids.is_missing() {
            return Ok(None);
        }
        if !self.is_known_server(world_or_datacenter).await? {
            return Ok(None);
        }
        let id_str = item_ids.to_path_segment()?;
        let request = Request::new(
            Method::GET,
            self.endpoints
                .resource(&format!("{world_or_datacenter}/{id_str}"), &[])?,
        );
        info!("Getting current marketboard data: {}", request.url());
        let response = self.client.execute(request).await?;
        // serde struggles with this untagged enum so I just manually decide for it :)
        Ok(Some(if item_ids.len() == 1 {
            MarketView::SingleView(response.json().await?)
        } else {
            MarketView::MultiView(response.json().await?)
        }))
    }

    /// Sale history for one or more items on a world, data center or region.
    pub async fn get_sales(
        &self,
        world_or_datacenter: &str,
        item_ids: impl Into<ItemIds>,
    ) -> Result<Option<HistoryView>, Error> {
        let item_ids = item_ids.into();
        if world_or_datacenter.is_empty() || item_ids.is_missing() {
            return Ok(None);
        }
        if !self.is_known_server(world_or_datacenter).await? {
            return Ok(None);
        }
        let id_str = item_ids.to_path_segment()?;
        let url = self
            .endpoints
            .resource(&format!("history/{world_or_datacenter}/{id_str}"), &[])?;
        info!("getting historical marketboard data: {}", url);
        let response = self.client.get(url).send().await?;
        Ok(Some(if item_ids.len() == 1 {
            HistoryView::SingleView(response.json().await?)
        } else {
            HistoryView::MultiView(response.json().await?)
        }))
    }

    pub async fn get_tax_rates(&self, world: &str) -> Result<Option<TaxRatesView>, Error> {
        if world.is_empty() || !self.is_known_server(world).await? {
            return Ok(None);
        }
        let url = self.endpoints.resource("tax-rates", &[("world", world)])?;
        info!("getting tax rates {url}");
        Ok(Some(self.get_json(url).await?))
    }

    /// Most recently updated items on a world or data center.
    ///
    /// The name is always looked up in the server directory since it decides which filter is
    /// sent; unknown names return `Ok(None)`. `entries` defaults to
    /// [`DEFAULT_RECENTLY_UPDATED_ENTRIES`].
    pub async fn get_recently_updated_items(
        &self,
        world_or_datacenter: &str,
        entries: Option<u32>,
    ) -> Result<Option<MostRecentlyUpdatedItemsView>, Error> {
        let filter = match self.validate_server_name(world_or_datacenter).await? {
            Some(ServerKind::World) => WorldOrDatacenter::World(world_or_datacenter),
            Some(ServerKind::DataCenter) => WorldOrDatacenter::Datacenter(world_or_datacenter),
            None => {
                warn!("Unknown world or data center {world_or_datacenter:?}, skipping request");
                return Ok(None);
            }
        };
        let entries = entries.unwrap_or(DEFAULT_RECENTLY_UPDATED_ENTRIES);
        self.most_recently_updated(filter, entries).await.map(Some)
    }

    pub async fn most_recently_updated(
        &self,
        filter: WorldOrDatacenter<'_>,
        entries: u32,
    ) -> Result<MostRecentlyUpdatedItemsView, Error> {
        let world_filter = match filter {
            WorldOrDatacenter::World(world) => ("world", world),
            WorldOrDatacenter::Datacenter(datacenter) => ("dcName", datacenter),
        };
        let entries = entries.to_string();
        let url = self.endpoints.stats(
            "most-recently-updated",
            &[world_filter, ("entries", entries.as_str())],
        )?;
        info!("getting recently updated items {}", url);
        self.get_json(url).await
    }

    /// Recently updated items, without any world or time context.
    pub async fn get_recently_updated_items_generic(
        &self,
    ) -> Result<RecentlyUpdatedItemsView, Error> {
        let url = self.endpoints.stats("recently-updated", &[])?;
        info!("getting recently updated items {}", url);
        self.get_json(url).await
    }

    pub async fn get_upload_counts_by_world(&self) -> Result<WorldUploadCountsView, Error> {
        let url = self.endpoints.stats("world-upload-counts", &[])?;
        info!("getting upload counts {}", url);
        self.get_json(url).await
    }

    pub async fn get_upload_counts_by_application(
        &self,
    ) -> Result<Vec<SourceUploadCount>, Error> {
        let url = self.endpoints.stats("uploader-upload-counts", &[])?;
        info!("getting upload counts {}", url);
        self.get_json(url).await
    }

    pub async fn get_upload_counts_history(&self) -> Result<UploadHistoryView, Error> {
        let url = self.endpoints.stats("upload-history", &[])?;
        info!("getting upload history {}", url);
        self.get_json(url).await
    }

    /// Fetches the three upload statistics concurrently. Fails if any of them fails.
    pub async fn get_upload_counts(&self) -> Result<UploadCounts, Error> {
        let (world, application, history) = futures::try_join!(
            self.get_upload_counts_by_world(),
            self.get_upload_counts_by_application(),
            self.get_upload_counts_history()
        )?;
        Ok(UploadCounts {
            world,
            application,
            history,
        })
    }
}
