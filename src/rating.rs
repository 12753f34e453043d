//! Rate shopping against the carrier's `Shop` endpoint.

// self
use crate::{
	_prelude::*,
	client::{Client, RequestOptions},
	model::{RateRequest, service_name},
	obs::{self, OperationKind, warn_event},
	wire::{
		self, PayloadContext, ResponseCode,
		rate::{self as rate_wire, RATED_SHIPMENT_POINTER, RatedShipment},
	},
};

/// Rate-shop endpoint path.
pub const RATING_PATH: &str = "/api/rating/v2409/Shop";

/// One quoted service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RateOffer {
	/// Carrier service code.
	pub service_code: String,
	/// Marketing name for the code.
	pub service_name: String,
	/// Quoted total; negotiated when negotiated rates are enabled and returned.
	pub total: f64,
	/// `true` when `total` is the negotiated amount rather than the published one.
	pub negotiated: bool,
	/// Currency of the published total.
	pub currency: Option<String>,
	/// Business days in transit, when guaranteed.
	pub transit_time: Option<String>,
}

/// Rating service bound to a [`Client`].
#[derive(Clone, Debug)]
pub struct Rating<'a> {
	client: &'a Client,
	account_number: Option<String>,
}
impl<'a> Rating<'a> {
	/// Creates a service billing the configured account.
	pub fn new(client: &'a Client) -> Self {
		Self { client, account_number: None }
	}

	/// Bills `account_number` instead of the configured account.
	pub fn with_account_number(mut self, account_number: impl Into<String>) -> Self {
		self.account_number = Some(account_number.into());

		self
	}

	/// Quotes every available service for `request`.
	///
	/// The request is not validated here; call [`RateRequest::validate`] first. A response
	/// without rated shipments yields an empty list.
	pub async fn get_rates(&self, request: &RateRequest) -> Result<Vec<RateOffer>> {
		obs::observe(OperationKind::Rate, "get_rates", async {
			let config = self.client.config();
			let ctx = PayloadContext {
				shipper_number: &config.account_number,
				bill_account: self.account_number.as_deref().unwrap_or(&config.account_number),
				negotiated_rates: config.negotiated_rates,
				date: OffsetDateTime::now_utc().date(),
			};
			let payload = rate_wire::build_payload(request, ctx)?;
			let response = self.client.post(RATING_PATH, RequestOptions::json(&payload)?).await?;

			Ok(parse_rates(&response, config.negotiated_rates))
		})
		.await
	}
}

/// Extracts offers from a rating response, tolerating missing or malformed structure.
///
/// Each rated shipment is decoded on its own; an entry that does not decode is skipped.
pub(crate) fn parse_rates(response: &Value, negotiated_rates: bool) -> Vec<RateOffer> {
	let Some(rated) = response.pointer(RATED_SHIPMENT_POINTER) else {
		return Vec::new();
	};

	if !rated.is_array() && !rated.is_object() {
		warn_event!("rated shipments are neither an object nor an array");
	}

	wire::entries(Some(rated))
		.iter()
		.filter_map(|entry| {
			let shipment = wire::lenient::<RatedShipment>(Some(entry));

			if shipment.is_none() {
				warn_event!("skipping a rated shipment that did not decode");
			}

			shipment
		})
		.map(|shipment| offer(shipment, negotiated_rates))
		.collect()
}

fn offer(shipment: RatedShipment, negotiated_rates: bool) -> RateOffer {
	let total = wire::select_total(
		negotiated_rates,
		shipment.total_charges.as_ref(),
		shipment.negotiated_rate_charges.as_ref(),
	);
	let service_code =
		shipment.service.and_then(ResponseCode::into_code).unwrap_or_default();

	RateOffer {
		service_name: service_name(&service_code).into_owned(),
		service_code,
		total: total.amount,
		negotiated: total.negotiated,
		currency: shipment.total_charges.and_then(|charge| charge.currency_code),
		transit_time: shipment
			.guaranteed_delivery
			.and_then(|delivery| delivery.business_days_in_transit)
			.map(wire::Scalar::into_string),
	}
}
