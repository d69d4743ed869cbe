//! Transport to the remote car park service.

use crate::config::RemoteConfig;
use crate::error::TransportError;
use crate::messages::{
    BookPlace, BookPlaceResponse, GetLevelDetails, GetLevelDetailsResponse, GetParkingDetails,
    GetParkingDetailsResponse, GetParkingList, GetParkingListResponse,
};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by every [`CarParkTransport`] method.
///
/// `Ok(None)` is a null response: the service answered without a body.
pub type TransportFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<Option<T>, TransportError>> + Send + 'a>>;

/// One call/response pair per remote operation.
pub trait CarParkTransport: Send + Sync {
    /// Fetch every parking
    fn get_parking_list(&self, request: GetParkingList)
    -> TransportFuture<'_, GetParkingListResponse>;

    /// Fetch one parking with its levels
    fn get_parking_details(
        &self,
        request: GetParkingDetails,
    ) -> TransportFuture<'_, GetParkingDetailsResponse>;

    /// Fetch one level with its parent parking
    fn get_level_details(
        &self,
        request: GetLevelDetails,
    ) -> TransportFuture<'_, GetLevelDetailsResponse>;

    /// Book one space
    fn book_place(&self, request: BookPlace) -> TransportFuture<'_, BookPlaceResponse>;
}

/// JSON-over-HTTP transport.
///
/// Each operation is a `POST {base_url}/{operation}` with the request as the
/// JSON body. `204 No Content` and `404 Not Found` are null responses; any
/// other non-success status is a [`TransportError`].
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
    config: RemoteConfig,
}

impl HttpTransport {
    /// Create a transport with the configured per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::ClientSetup`] if the HTTP client cannot be built.
    pub fn new(config: RemoteConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| TransportError::ClientSetup(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// Create a transport from `CAR_PARK_REMOTE_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::ClientSetup`] if the HTTP client cannot be built.
    pub fn from_env() -> Result<Self, TransportError> {
        Self::new(RemoteConfig::from_env())
    }

    /// The configuration in use
    #[must_use]
    pub const fn config(&self) -> &RemoteConfig {
        &self.config
    }

    async fn call<Req, Resp>(
        &self,
        operation: &'static str,
        request: Req,
    ) -> Result<Option<Resp>, TransportError>
    where
        Req: Serialize + Send,
        Resp: DeserializeOwned + Send,
    {
        tracing::debug!(operation, "Calling remote car park service");

        let response = self
            .client
            .post(self.config.endpoint(operation))
            .json(&request)
            .send()
            .await?;

        match response.status() {
            StatusCode::NO_CONTENT | StatusCode::NOT_FOUND => {
                tracing::debug!(operation, status = %response.status(), "Null response");
                Ok(None)
            }
            status if status.is_success() => response
                .json::<Resp>()
                .await
                .map(Some)
                .map_err(TransportError::from),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(TransportError::ServiceError {
                    status: status.as_u16(),
                    message: body,
                })
            }
        }
    }
}

impl CarParkTransport for HttpTransport {
    fn get_parking_list(
        &self,
        request: GetParkingList,
    ) -> TransportFuture<'_, GetParkingListResponse> {
        Box::pin(self.call("getParkingList", request))
    }

    fn get_parking_details(
        &self,
        request: GetParkingDetails,
    ) -> TransportFuture<'_, GetParkingDetailsResponse> {
        Box::pin(self.call("getParkingDetails", request))
    }

    fn get_level_details(
        &self,
        request: GetLevelDetails,
    ) -> TransportFuture<'_, GetLevelDetailsResponse> {
        Box::pin(self.call("getLevelDetails", request))
    }

    fn book_place(&self, request: BookPlace) -> TransportFuture<'_, BookPlaceResponse> {
        Box::pin(self.call("bookPlace", request))
    }
}
