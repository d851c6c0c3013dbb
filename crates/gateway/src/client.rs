use std::marker::PhantomData;

use async_trait::async_trait;
use citas_core::validation::{AppointmentDraft, DoctorDraft, PatientDraft};
use citas_core::{CoreConfig, Submitter, Validate};
use reqwest::Method;
use serde::Serialize;

use crate::error::{GatewayError, GatewayResult};
use crate::resource::{Operation, Resource};

/// A record as returned by the backend. Its shape is owned by the backend.
pub type Record = serde_json::Value;

/// Client for the persistence backend.
///
/// One request per call: no retries, no timeout beyond the HTTP client's default.
#[derive(Clone, Debug)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> GatewayResult<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(GatewayError::Client)?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn from_config(cfg: &CoreConfig) -> GatewayResult<Self> {
        Self::new(cfg.gateway_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn medicos(&self) -> ResourceClient<DoctorDraft> {
        ResourceClient::new(self.clone(), Resource::Medicos)
    }

    pub fn pacientes(&self) -> ResourceClient<PatientDraft> {
        ResourceClient::new(self.clone(), Resource::Pacientes)
    }

    pub fn citas(&self) -> ResourceClient<AppointmentDraft> {
        ResourceClient::new(self.clone(), Resource::Citas)
    }

    pub async fn list(&self, resource: Resource) -> GatewayResult<Vec<Record>> {
        let response = self
            .send(Method::GET, resource, Operation::List, None, None::<&()>)
            .await?;
        decode(resource, Operation::List, response).await
    }

    pub async fn get(&self, resource: Resource, id: u64) -> GatewayResult<Record> {
        let response = self
            .send(Method::GET, resource, Operation::Get, Some(id), None::<&()>)
            .await?;
        decode(resource, Operation::Get, response).await
    }

    pub async fn delete(&self, resource: Resource, id: u64) -> GatewayResult<()> {
        self.send(Method::DELETE, resource, Operation::Delete, Some(id), None::<&()>)
            .await?;
        Ok(())
    }

    fn url(&self, resource: Resource, id: Option<u64>) -> String {
        match id {
            Some(id) => format!("{}{}/{id}", self.base_url, resource.path()),
            None => format!("{}{}", self.base_url, resource.path()),
        }
    }

    /// Sends one request and turns transport failures and non-2xx statuses into errors.
    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        resource: Resource,
        operation: Operation,
        id: Option<u64>,
        body: Option<&B>,
    ) -> GatewayResult<reqwest::Response> {
        let url = self.url(resource, id);
        tracing::debug!("{method} {url}");

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|source| {
            tracing::warn!("{operation} {resource} failed: {source}");
            GatewayError::Network {
                resource,
                operation,
                source,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("{operation} {resource} returned {status}");
            return Err(GatewayError::Status {
                resource,
                operation,
                status,
            });
        }

        Ok(response)
    }
}

async fn decode<T: serde::de::DeserializeOwned>(
    resource: Resource,
    operation: Operation,
    response: reqwest::Response,
) -> GatewayResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|source| GatewayError::Decode {
            resource,
            operation,
            source,
        })
}

/// Typed access to one backend collection whose write payload is `D`.
#[derive(Debug)]
pub struct ResourceClient<D> {
    gateway: HttpGateway,
    resource: Resource,
    _draft: PhantomData<fn() -> D>,
}

impl<D> Clone for ResourceClient<D> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            resource: self.resource,
            _draft: PhantomData,
        }
    }
}

impl<D> ResourceClient<D>
where
    D: Validate + Serialize + Send + Sync,
{
    fn new(gateway: HttpGateway, resource: Resource) -> Self {
        Self {
            gateway,
            resource,
            _draft: PhantomData,
        }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub async fn list(&self) -> GatewayResult<Vec<Record>> {
        self.gateway.list(self.resource).await
    }

    pub async fn get(&self, id: u64) -> GatewayResult<Record> {
        self.gateway.get(self.resource, id).await
    }

    /// Validates `draft`, then POSTs it. An invalid draft is never sent.
    pub async fn create(&self, draft: &D) -> GatewayResult<Record> {
        draft.validate().into_result().map_err(GatewayError::Validation)?;
        let response = self
            .gateway
            .send(Method::POST, self.resource, Operation::Create, None, Some(draft))
            .await?;
        let stored = decode(self.resource, Operation::Create, response).await?;
        tracing::info!("created {} record", self.resource);
        Ok(stored)
    }

    /// Validates `draft`, then PUTs it over record `id`.
    pub async fn update(&self, id: u64, draft: &D) -> GatewayResult<Record> {
        draft.validate().into_result().map_err(GatewayError::Validation)?;
        let response = self
            .gateway
            .send(Method::PUT, self.resource, Operation::Update, Some(id), Some(draft))
            .await?;
        let stored = decode(self.resource, Operation::Update, response).await?;
        tracing::info!("updated {} record {id}", self.resource);
        Ok(stored)
    }

    pub async fn delete(&self, id: u64) -> GatewayResult<()> {
        self.gateway.delete(self.resource, id).await
    }

    /// A submitter that updates record `id` instead of creating a new one.
    pub fn updating(&self, id: u64) -> UpdateSubmitter<D> {
        UpdateSubmitter {
            client: self.clone(),
            id,
        }
    }
}

#[async_trait]
impl<D> Submitter<D> for ResourceClient<D>
where
    D: Validate + Serialize + Send + Sync,
{
    type Output = Record;
    type Error = GatewayError;

    async fn submit(&self, draft: &D) -> GatewayResult<Record> {
        self.create(draft).await
    }
}

/// Submits drafts as updates of one existing record.
#[derive(Debug)]
pub struct UpdateSubmitter<D> {
    client: ResourceClient<D>,
    id: u64,
}

impl<D> UpdateSubmitter<D> {
    pub fn id(&self) -> u64 {
        self.id
    }
}

#[async_trait]
impl<D> Submitter<D> for UpdateSubmitter<D>
where
    D: Validate + Serialize + Send + Sync,
{
    type Output = Record;
    type Error = GatewayError;

    async fn submit(&self, draft: &D) -> GatewayResult<Record> {
        self.client.update(self.id, draft).await
    }
}
