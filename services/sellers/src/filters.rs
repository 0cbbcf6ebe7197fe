//! Endpoint filters
//!
//! A filter inspects a request before its handler runs and either lets it
//! through or answers on the handler's behalf. Filters are grouped into a
//! [`FilterChain`] attached to a single route; they run in registration order
//! and the first failure short-circuits both the remaining filters and the
//! handler.

use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::{FromRequestParts, RawPathParams, Request},
    http::{Method, request::Parts},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::MethodRouter,
};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::{
    error::ApiError,
    models::SellerInput,
    validation::{validate_new_seller_name, validate_seller},
};

/// Largest request body a filter chain will buffer
pub const MAX_FILTER_BODY_BYTES: usize = 1024 * 1024;

/// Buffered view of a request as seen by filters
#[derive(Debug)]
pub struct FilterContext {
    method: Method,
    path: String,
    arguments: Vec<(String, String)>,
    body: Bytes,
}

impl FilterContext {
    async fn from_parts(parts: &mut Parts, body: Bytes) -> Self {
        let arguments = match RawPathParams::from_request_parts(parts, &()).await {
            Ok(params) => params
                .iter()
                .map(|(key, value)| (key.to_owned(), value.to_owned()))
                .collect(),
            Err(_) => Vec::new(),
        };

        Self {
            method: parts.method.clone(),
            path: parts.uri.path().to_owned(),
            arguments,
            body,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Value of a named route argument, percent-decoded
    pub fn argument(&self, name: &str) -> Option<&str> {
        self.arguments
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body decoded as JSON, or `None` when it does not parse as `T`
    pub fn json_body<T: DeserializeOwned>(&self) -> Option<T> {
        serde_json::from_slice(&self.body).ok()
    }
}

/// A single check in a filter chain
pub trait EndpointFilter: Send + Sync + 'static {
    fn check(&self, ctx: &FilterContext) -> Result<(), ApiError>;
}

impl<F> EndpointFilter for F
where
    F: Fn(&FilterContext) -> Result<(), ApiError> + Send + Sync + 'static,
{
    fn check(&self, ctx: &FilterContext) -> Result<(), ApiError> {
        self(ctx)
    }
}

/// Ordered list of filters guarding one route
#[derive(Clone, Default)]
pub struct FilterChain {
    filters: Vec<Arc<dyn EndpointFilter>>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter; it runs after every filter registered before it
    pub fn filter(mut self, filter: impl EndpointFilter) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Run every filter against the request, then forward it to `next`
    ///
    /// The body is buffered once so filters can read it; the handler receives
    /// the same bytes.
    pub async fn run(&self, req: Request, next: Next) -> Response {
        let (mut parts, body) = req.into_parts();

        let body = match axum::body::to_bytes(body, MAX_FILTER_BODY_BYTES).await {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!("Failed to buffer request body: {}", e);
                return ApiError::PayloadTooLarge.into_response();
            }
        };

        let ctx = FilterContext::from_parts(&mut parts, body).await;

        for filter in &self.filters {
            if let Err(err) = filter.check(&ctx) {
                debug!("{} {} stopped by endpoint filter", ctx.method(), ctx.path());
                return err.into_response();
            }
        }

        next.run(Request::from_parts(parts, Body::from(ctx.body)))
            .await
    }
}

/// Attach a filter chain to a method router
pub trait FilterChainExt {
    fn with_filter_chain(self, chain: FilterChain) -> Self;
}

impl<S> FilterChainExt for MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_filter_chain(self, chain: FilterChain) -> Self {
        let chain = Arc::new(chain);

        self.route_layer(middleware::from_fn(move |req: Request, next: Next| {
            let chain = Arc::clone(&chain);
            async move { chain.run(req, next).await }
        }))
    }
}

/// Rejects new seller names longer than the creation limit
///
/// Reads the `name` route argument.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreationLengthFilter;

impl EndpointFilter for CreationLengthFilter {
    fn check(&self, ctx: &FilterContext) -> Result<(), ApiError> {
        let Some(name) = ctx.argument("name") else {
            return Ok(());
        };

        validate_new_seller_name(name).map_err(|message| {
            info!("Error when creating the new seller");
            ApiError::Problem(message)
        })
    }
}

/// Runs the seller validator over the JSON body
///
/// Bodies that are not a seller-shaped JSON document are let through for the
/// handler's extractor to reject.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateValidityFilter;

impl EndpointFilter for UpdateValidityFilter {
    fn check(&self, ctx: &FilterContext) -> Result<(), ApiError> {
        let Some(seller) = ctx.json_body::<SellerInput>() else {
            return Ok(());
        };

        validate_seller(&seller).map_err(|message| {
            info!("Error when updating the new seller: {}", message);
            ApiError::Problem(message)
        })
    }
}
