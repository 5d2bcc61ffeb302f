//! One fetched page of a collection, plus what is needed to fetch the rest.
//!
//! A page is either *has-next* (its links carry a `next` URL) or
//! *exhausted*. Following links only moves forward on the server, so a walk
//! always terminates.
//!
//! Pages are addressed by server-side offset at fetch time. Resources created
//! or deleted while a walk is in progress shift later pages, so an element
//! may be skipped or seen twice. No client-side deduplication is attempted.

use crate::client::Client;
use crate::error::Form3Error;
use crate::models::{Links, Resource};
use log::debug;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone)]
pub struct Page<A> {
    client: Client,
    data: Vec<Resource<A>>,
    links: Option<Links>,
}

impl<A> Page<A> {
    pub(crate) fn new(client: Client, data: Vec<Resource<A>>, links: Option<Links>) -> Self {
        Self {
            client,
            data,
            links,
        }
    }

    fn exhausted(client: Client) -> Self {
        Self::new(client, Vec::new(), None)
    }

    pub fn data(&self) -> &[Resource<A>] {
        &self.data
    }

    pub fn into_data(self) -> Vec<Resource<A>> {
        self.data
    }

    pub fn links(&self) -> Option<&Links> {
        self.links.as_ref()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// True iff the server handed out a link to a following page.
    pub fn has_next(&self) -> bool {
        self.links.as_ref().is_some_and(|l| l.next.is_some())
    }

    /// Apply `f` to each resource of this page only, in order.
    ///
    /// The index counts from zero within the page. Stops at the first error.
    pub fn iterate<F, E>(&self, mut f: F) -> Result<(), E>
    where
        F: FnMut(usize, &Resource<A>) -> Result<(), E>,
    {
        for (i, resource) in self.data.iter().enumerate() {
            f(i, resource)?;
        }
        Ok(())
    }
}

impl<A: DeserializeOwned> Page<A> {
    /// Re-fetch the first page of the collection.
    pub async fn first(&self) -> Result<Page<A>, Form3Error> {
        let link = self
            .links
            .as_ref()
            .and_then(|l| l.first.as_deref())
            .ok_or(Form3Error::Navigation("first"))?;
        debug!("Following first link");
        self.client.get_page(link).await
    }

    /// Fetch the following page.
    ///
    /// On an exhausted page this performs no request and returns an empty,
    /// exhausted page.
    pub async fn next(&self) -> Result<Page<A>, Form3Error> {
        match self.links.as_ref().and_then(|l| l.next.as_deref()) {
            Some(link) => {
                debug!("Following next link");
                self.client.get_page(link).await
            }
            None => Ok(Page::exhausted(self.client.clone())),
        }
    }

    /// Apply `f` to every resource of the collection, starting with this
    /// page and following `next` links until none remain.
    ///
    /// The index passed to `f` restarts at zero on every page. The first
    /// error, from `f` or from fetching a page, ends the walk.
    pub async fn walk<F, E>(&self, mut f: F) -> Result<(), E>
    where
        F: FnMut(usize, &Resource<A>) -> Result<(), E>,
        E: From<Form3Error>,
    {
        self.iterate(&mut f)?;
        if !self.has_next() {
            return Ok(());
        }
        let mut page = self.next().await?;
        loop {
            page.iterate(&mut f)?;
            if !page.has_next() {
                return Ok(());
            }
            page = page.next().await?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientConfig;
    use serde_json::{Value, json};

    fn client() -> Client {
        Client::with_config(ClientConfig::default()).unwrap()
    }

    fn page_from(body: Value) -> Page<Value> {
        let envelope: crate::models::ListEnvelope<Value> = serde_json::from_value(body).unwrap();
        Page::new(client(), envelope.data, envelope.links)
    }

    fn resource(n: u32) -> Value {
        json!({
            "type": "accounts",
            "id": uuid::Uuid::new_v4(),
            "organisation_id": uuid::Uuid::new_v4(),
            "version": 0,
            "attributes": { "account_number": n.to_string() }
        })
    }

    #[test]
    fn null_next_link_is_exhausted() {
        let page = page_from(json!({
            "data": [resource(0)],
            "links": { "first": "/a?page[number]=first", "next": null, "self": "/a" }
        }));
        assert!(!page.has_next());
    }

    #[test]
    fn present_next_link_has_next() {
        let page = page_from(json!({
            "data": [resource(0)],
            "links": { "next": "/a?page[number]=1&page[size]=1" }
        }));
        assert!(page.has_next());
    }

    #[test]
    fn missing_links_block_is_exhausted() {
        let page = page_from(json!({ "data": [] }));
        assert!(!page.has_next());
        assert!(page.links().is_none());
    }

    #[test]
    fn iterate_passes_page_local_indices() {
        let page = page_from(json!({ "data": [resource(0), resource(1), resource(2)] }));
        let mut seen = Vec::new();
        page.iterate(|i, r| {
            seen.push((i, r.attributes["account_number"].as_str().unwrap().to_string()));
            Ok::<_, Form3Error>(())
        })
        .unwrap();
        assert_eq!(
            seen,
            vec![
                (0, "0".to_string()),
                (1, "1".to_string()),
                (2, "2".to_string())
            ]
        );
    }

    #[test]
    fn iterate_stops_at_first_error() {
        let page = page_from(json!({ "data": [resource(0), resource(1), resource(2)] }));
        let mut calls = 0;
        let result = page.iterate(|i, _| {
            calls += 1;
            if i == 1 { Err("boom") } else { Ok(()) }
        });
        assert_eq!(result, Err("boom"));
        assert_eq!(calls, 2);
    }

    #[tokio::test]
    async fn first_without_link_is_a_navigation_error() {
        let page = page_from(json!({ "data": [] }));
        let err = page.first().await.unwrap_err();
        assert!(matches!(err, Form3Error::Navigation("first")));
    }

    #[tokio::test]
    async fn next_on_exhausted_page_is_an_empty_page() {
        let page = page_from(json!({ "data": [resource(0)], "links": { "next": null } }));
        let next = page.next().await.unwrap();
        assert!(next.is_empty());
        assert!(!next.has_next());
    }
}
