//! Typed UPS shipping client: OAuth client-credentials authentication, rate shopping, and
//! shipment creation with validated request models and transport-aware observability.
//!
//! ```ignore
//! use ups_shipping::{client::Client, config::Config, model::{Address, Package, RateRequest}};
//!
//! let config = Config::builder("client-id", "client-secret", "A1B2C3").build()?;
//! let client = Client::connect(config).await?;
//! let mut request = RateRequest::new().with_shipper(shipper).with_ship_to(to).with_ship_from(from);
//!
//! request.add_package(Package { length: Some(10.), ..Package::default() });
//! request.validate()?;
//!
//! let offers = client.rating().get_rates(&request).await?;
//! ```

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod obs;
pub mod rating;
pub mod shipping;
pub mod wire;

mod _prelude {
	pub use std::{
		borrow::Cow,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
	};

	pub use parking_lot::RwLock;
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::{Date, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
