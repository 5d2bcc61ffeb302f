//! Rust client for the Form3 accounts REST API.
//! Provides create/fetch/delete for account resources, filtered list
//! queries and page-by-page or whole-collection traversal.

pub mod accounts;
pub mod client;
pub mod error;
pub mod filter;
pub mod models;
pub mod page;

pub use accounts::Accounts;
pub use client::{Client, ClientConfig};
pub use error::{ApiError, Form3Error};
pub use filter::{Filter, FilterParam, FilterParams, encode_filter};
pub use models::{
    Account, AccountFilter, Actor, Links, OrganisationIdentification, PrivateIdentification,
    Resource,
};
pub use page::Page;
