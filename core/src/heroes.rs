//! Hero endpoints.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::context::Context;
use crate::error::Error;
use crate::http::{Destination, Metadata};
use crate::types::{null_default, Hero};

/// Envelope returned by the hero endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroesResponse {
    #[serde(deserialize_with = "null_default")]
    pub results: Vec<Hero>,
    #[serde(alias = "metadata", deserialize_with = "null_default")]
    pub meta: Metadata,
}

impl HeroesResponse {
    /// The first hero, or `EmptyResult` naming `path` when there is none.
    pub fn into_first(self, path: impl Into<String>) -> Result<Hero, Error> {
        self.results
            .into_iter()
            .next()
            .ok_or_else(|| Error::EmptyResult { path: path.into() })
    }
}

/// Access to the `hero` endpoints, borrowed from a `Client`.
#[derive(Debug, Clone, Copy)]
pub struct Heroes<'a> {
    client: &'a Client,
}

impl<'a> Heroes<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Fetch a hero by id. The id is the hero's name in lowercase with spaces
    /// hyphenated, e.g. `little-queen-charlotte`.
    pub async fn get_by_id(&self, ctx: Option<&Context>, id: &str) -> Result<Hero, Error> {
        let path = format!("hero/{id}");
        let request = self.client.build_request(Method::GET, &path)?;

        let mut response = HeroesResponse::default();
        self.client
            .execute(ctx, request, Destination::Value(&mut response))
            .await?;
        response.into_first(path)
    }

    /// Fetch every hero the API lists.
    pub async fn list(&self, ctx: Option<&Context>) -> Result<Vec<Hero>, Error> {
        let request = self.client.build_request(Method::GET, "hero")?;

        let mut response = HeroesResponse::default();
        self.client
            .execute(ctx, request, Destination::Value(&mut response))
            .await?;
        Ok(response.results)
    }
}
