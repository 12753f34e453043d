//! Demonstrates rate shopping and label purchase against a mocked carrier.
//!
//! The mock server stands in for the customer integration environment; point
//! [`ConfigBuilder::base_url`](ups_shipping::config::ConfigBuilder::base_url) elsewhere (or drop
//! it) to talk to the real API.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
use url::Url;
// self
use ups_shipping::{
	client::Client,
	config::Config,
	model::{Address, Package, RateRequest, ShipRequest},
	rating::RATING_PATH,
	shipping::SHIPPING_PATH,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/security/v1/oauth/token");
			then.status(200).header("content-type", "application/json").body(
				r#"{"token_type":"Bearer","access_token":"demo-access","expires_in":"14399"}"#,
			);
		})
		.await;
	let rate_mock = server
		.mock_async(|when, then| {
			when.method(POST).path(RATING_PATH);
			then.status(200).header("content-type", "application/json").body(
				json!({
					"RateResponse": {
						"RatedShipment": [
							{
								"Service": { "Code": "03" },
								"TotalCharges": { "CurrencyCode": "USD", "MonetaryValue": "12.40" },
								"GuaranteedDelivery": { "BusinessDaysInTransit": "4" }
							},
							{
								"Service": { "Code": "02" },
								"TotalCharges": { "CurrencyCode": "USD", "MonetaryValue": "31.85" },
								"GuaranteedDelivery": { "BusinessDaysInTransit": "2" }
							}
						]
					}
				})
				.to_string(),
			);
		})
		.await;
	let ship_mock = server
		.mock_async(|when, then| {
			when.method(POST).path(SHIPPING_PATH);
			then.status(200).header("content-type", "application/json").body(
				json!({
					"ShipmentResponse": {
						"ShipmentResults": {
							"ShipmentIdentificationNumber": "1ZDEMO0000000001",
							"ShipmentCharges": {
								"TotalCharges": { "CurrencyCode": "USD", "MonetaryValue": "12.40" }
							},
							"PackageResults": {
								"ShippingLabel": {
									"ImageFormat": { "Code": "GIF" },
									"GraphicImage": "R0lGODlhAQABAAAAACw="
								}
							}
						}
					}
				})
				.to_string(),
			);
		})
		.await;
	let config = Config::builder("demo-client", "demo-secret", "A1B2C3")
		.base_url(Url::parse(&server.base_url())?)
		.build()?;
	let client = Client::connect(config).await?;
	let origin = Address {
		company_name: Some("Acme Widgets".into()),
		attention_name: Some("Shipping Desk".into()),
		phone: Some("5555550100".into()),
		address_line_1: Some("55 Glenlake Pkwy".into()),
		city: Some("Atlanta".into()),
		state: Some("GA".into()),
		postal_code: Some("30328".into()),
		country_code: Some("US".into()),
		..Address::default()
	};
	let destination = Address {
		name: Some("Jane Doe".into()),
		address_line_1: Some("1600 Amphitheatre Pkwy".into()),
		city: Some("Mountain View".into()),
		state: Some("CA".into()),
		postal_code: Some("94043".into()),
		country_code: Some("US".into()),
		..Address::default()
	};
	let package = Package {
		length: Some(12.),
		width: Some(9.),
		height: Some(4.),
		weight: Some(2.5),
		..Package::default()
	};
	let mut rate_request = RateRequest::new()
		.with_shipper(origin.clone())
		.with_ship_to(destination.clone())
		.with_ship_from(origin.clone());

	rate_request.add_package(package.clone());
	rate_request.validate()?;

	let offers = client.rating().get_rates(&rate_request).await?;

	for offer in &offers {
		println!(
			"{} ({}): {:.2} {} in {} days.",
			offer.service_name,
			offer.service_code,
			offer.total,
			offer.currency.as_deref().unwrap_or("?"),
			offer.transit_time.as_deref().unwrap_or("?"),
		);
	}

	let Some(cheapest) = offers.iter().min_by(|a, b| a.total.total_cmp(&b.total)) else {
		println!("No services quoted.");

		return Ok(());
	};
	let mut ship_request = ShipRequest::new()
		.with_shipper(origin.clone())
		.with_ship_to(destination)
		.with_ship_from(origin)
		.with_service_code(&cheapest.service_code)
		.with_reference("demo-order-1");

	ship_request.add_package(package);
	ship_request.validate()?;

	let shipment = client.shipping().create_shipment(&ship_request).await?;

	println!(
		"Created {} for {:.2}; label format {}.",
		shipment.tracking_number,
		shipment.total,
		shipment.label_format.as_deref().unwrap_or("?"),
	);

	token_mock.assert_async().await;
	rate_mock.assert_async().await;
	ship_mock.assert_async().await;

	Ok(())
}
