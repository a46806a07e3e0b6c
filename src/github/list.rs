//! Paginated list calls

use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::github::client::GitHub;
use crate::http::connector::CallOptions;
use crate::http::endpoint::{paginate, Endpoint};
use crate::http::param::Params;
use crate::http::route::{ApiRequest, Route};
use crate::models::gist::Gist;

/// A GET call returning one page of `T`
#[derive(Debug)]
pub struct ListBuilder<'a, T> {
    client: &'a GitHub,
    endpoint: &'static Endpoint,
    params: Params,
    page: Option<u32>,
    per_page: Option<u32>,
    item: PhantomData<fn() -> T>,
}

impl<'a, T: DeserializeOwned> ListBuilder<'a, T> {
    pub(crate) fn new(client: &'a GitHub, endpoint: &'static Endpoint, params: Params) -> Self {
        Self {
            client,
            endpoint,
            params,
            page: None,
            per_page: None,
            item: PhantomData,
        }
    }

    /// 1-based page number
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Results per page, clamped to what the API allows
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub async fn send(self) -> Result<Vec<T>> {
        self.send_with(&CallOptions::default()).await
    }

    pub async fn send_with(self, options: &CallOptions) -> Result<Vec<T>> {
        self.client.execute_with(&self, options).await
    }
}

impl<'a> ListBuilder<'a, Gist> {
    /// Only gists updated at or after this moment
    pub fn since(mut self, since: DateTime<Utc>) -> Self {
        self.params.insert("since", since);
        self
    }
}

impl<T> Route for ListBuilder<'_, T> {
    fn endpoint(&self) -> &Endpoint {
        self.endpoint
    }

    fn params(&self) -> Params {
        paginate(self.params.clone(), self.page, self.per_page)
    }
}

impl<T: DeserializeOwned> ApiRequest for ListBuilder<'_, T> {
    type Output = Vec<T>;
}
