//! reqwest-backed implementation of the gateway traits.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Client, Method, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use pressroom_api_types::{
    PageDto, PageSaveRequest, ReorderRequest, SearchResponse, SettingsMap, UploadResponse,
    UploadedFileDto,
};

use crate::application::gateway::{
    ApiError, ArtworkFile, NavigationApi, NavigationDraft, PageDraft, PagesApi, PositionUpdate,
    SearchApi, SettingsApi, UploadsApi,
};
use crate::domain::navigation::{NavNode, NavScope, NavigationItem};
use crate::domain::pages::Page;
use crate::domain::settings::SiteSettings;

use super::convert;

/// HTTP client for the storefront backend API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base: Url,
    key: Option<String>,
}

impl ApiClient {
    pub fn new(site: &str, key: Option<String>) -> Result<Self, ApiError> {
        let base = Url::parse(site)
            .and_then(|url| url.join("/"))
            .map_err(|err| ApiError::InvalidInput(format!("invalid site URL: {err}")))?;
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .build()
            .map_err(ApiError::transport)?;
        Ok(Self { client, base, key })
    }

    pub fn user_agent() -> &'static str {
        concat!("pressroom/", env!("CARGO_PKG_VERSION"))
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|err| ApiError::InvalidInput(err.to_string()))
    }

    fn auth_header(&self) -> Result<Option<HeaderValue>, ApiError> {
        match &self.key {
            None => Ok(None),
            Some(key) => HeaderValue::from_str(&format!("Bearer {key}"))
                .map(Some)
                .map_err(|err| ApiError::InvalidInput(err.to_string())),
        }
    }

    fn request(
        &self,
        method: Method,
        url: Url,
    ) -> Result<reqwest::RequestBuilder, ApiError> {
        let mut builder = self.client.request(method, url);
        if let Some(header) = self.auth_header()? {
            builder = builder.header(AUTHORIZATION, header);
        }
        Ok(builder)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let mut url = self.url(path)?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query {
                pairs.append_pair(name, value);
            }
        }
        let response = self
            .request(Method::GET, url)?
            .send()
            .await
            .map_err(ApiError::transport)?;
        Self::handle(response).await
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &impl serde::Serialize,
    ) -> Result<T, ApiError> {
        let url = self.url(path)?;
        let response = self
            .request(method, url)?
            .json(body)
            .send()
            .await
            .map_err(ApiError::transport)?;
        Self::handle(response).await
    }

    async fn send_unit(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<(), ApiError> {
        let url = self.url(path)?;
        let mut builder = self.request(method, url)?;
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = builder.send().await.map_err(ApiError::transport)?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }

    async fn handle<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let bytes = response.bytes().await.map_err(ApiError::transport)?;
        if !status.is_success() {
            return Err(ApiError::Server {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }
        serde_json::from_slice(&bytes).map_err(ApiError::decode)
    }
}

#[async_trait]
impl NavigationApi for ApiClient {
    async fn tree(&self, scope: NavScope) -> Result<Vec<NavNode>, ApiError> {
        let nodes: Vec<pressroom_api_types::NavigationTreeNodeDto> = self
            .get_json("api/navigation/tree", &[("scope", scope.as_str())])
            .await?;
        nodes.into_iter().map(convert::node_from_dto).collect()
    }

    async fn list_all(&self, scope: NavScope) -> Result<Vec<NavigationItem>, ApiError> {
        let items: Vec<pressroom_api_types::NavigationItemDto> = self
            .get_json("api/navigation/all", &[("scope", scope.as_str())])
            .await?;
        items.into_iter().map(convert::item_from_dto).collect()
    }

    async fn create(&self, draft: NavigationDraft) -> Result<NavigationItem, ApiError> {
        let payload = convert::create_request_from_draft(draft);
        let created: pressroom_api_types::NavigationItemDto = self
            .send_json(Method::POST, "api/navigation", &payload)
            .await?;
        convert::item_from_dto(created)
    }

    async fn update(&self, item: &NavigationItem) -> Result<NavigationItem, ApiError> {
        let payload = convert::dto_from_item(item);
        let path = format!("api/navigation/{}", item.id);
        let updated: pressroom_api_types::NavigationItemDto =
            self.send_json(Method::PUT, &path, &payload).await?;
        convert::item_from_dto(updated)
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let path = format!("api/navigation/{id}");
        self.send_unit(Method::DELETE, &path, None).await
    }

    async fn reorder_bulk(&self, updates: &[PositionUpdate]) -> Result<(), ApiError> {
        let payload = ReorderRequest {
            items: updates.iter().map(convert::reorder_entry).collect(),
        };
        debug!(count = payload.items.len(), "sending bulk reorder");
        let body = serde_json::to_value(&payload).map_err(ApiError::decode)?;
        self.send_unit(Method::PUT, "api/navigation/reorder/bulk", Some(&body))
            .await
    }
}

#[async_trait]
impl PagesApi for ApiClient {
    async fn list(&self) -> Result<Vec<Page>, ApiError> {
        let pages: Vec<PageDto> = self.get_json("api/pages", &[]).await?;
        pages.into_iter().map(convert::page_from_dto).collect()
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Page>, ApiError> {
        let path = format!("api/pages/{slug}");
        match self.get_json::<PageDto>(&path, &[]).await {
            Ok(dto) => Ok(Some(convert::page_from_dto(dto)?)),
            Err(ApiError::Server { status: 404, .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn create(&self, draft: PageDraft) -> Result<Page, ApiError> {
        let payload = PageSaveRequest {
            slug: draft.slug.as_str().to_string(),
            title: draft.title,
            content: draft.content.iter().map(convert::dto_from_block).collect(),
        };
        let created: PageDto = self.send_json(Method::POST, "api/pages", &payload).await?;
        convert::page_from_dto(created)
    }

    async fn update(&self, page: &Page) -> Result<Page, ApiError> {
        let payload = PageSaveRequest {
            slug: page.slug.as_str().to_string(),
            title: page.title.clone(),
            content: page.content.iter().map(convert::dto_from_block).collect(),
        };
        let path = format!("api/pages/{}", page.id);
        let updated: PageDto = self.send_json(Method::PUT, &path, &payload).await?;
        convert::page_from_dto(updated)
    }
}

#[async_trait]
impl SettingsApi for ApiClient {
    async fn settings(&self) -> Result<SiteSettings, ApiError> {
        let map: SettingsMap = self.get_json("api/settings", &[]).await?;
        Ok(SiteSettings::from_map(map))
    }
}

#[async_trait]
impl SearchApi for ApiClient {
    async fn search(&self, query: &str) -> Result<SearchResponse, ApiError> {
        self.get_json("api/search", &[("q", query)]).await
    }
}

#[async_trait]
impl UploadsApi for ApiClient {
    async fn upload_artwork(
        &self,
        files: Vec<ArtworkFile>,
    ) -> Result<Vec<UploadedFileDto>, ApiError> {
        let mut form = reqwest::multipart::Form::new();
        for file in files {
            let part = reqwest::multipart::Part::bytes(file.bytes)
                .file_name(file.name)
                .mime_str(&file.content_type)
                .map_err(ApiError::transport)?;
            form = form.part("files", part);
        }

        let url = self.url("api/uploads/artwork")?;
        let response = self
            .request(Method::POST, url)?
            .multipart(form)
            .send()
            .await
            .map_err(ApiError::transport)?;
        let uploaded: UploadResponse = Self::handle(response).await?;
        Ok(uploaded.files)
    }
}
