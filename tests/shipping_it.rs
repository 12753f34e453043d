// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use ups_shipping::{
	client::Client,
	config::Config,
	error::Error,
	model::{Address, Package, ShipRequest},
	shipping::SHIPPING_PATH,
	url::Url,
};

fn build_client(server: &MockServer, negotiated_rates: bool) -> Client {
	let config = Config::builder("client", "s3cret", "A1B2C3")
		.base_url(Url::parse(&server.base_url()).expect("Mock server URL should parse."))
		.negotiated_rates(negotiated_rates)
		.build()
		.expect("Client configuration should build.");

	Client::new(config).expect("Client should build.")
}

async fn mock_token(server: &MockServer) {
	server
		.mock_async(|when, then| {
			when.method(POST).path("/security/v1/oauth/token");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"access_token":"ship-token","expires_in":"14399"}"#);
		})
		.await;
}

fn address(company: &str, attention: &str) -> Address {
	Address {
		company_name: Some(company.into()),
		attention_name: Some(attention.into()),
		address_line_1: Some("12380 Morris Rd".into()),
		city: Some("Alpharetta".into()),
		state: Some("GA".into()),
		postal_code: Some("30005".into()),
		country_code: Some("US".into()),
		phone: Some("5555550100".into()),
		..Address::default()
	}
}

fn build_request() -> ShipRequest {
	let mut request = ShipRequest::new()
		.with_shipper(address("Acme", "Shipping Desk"))
		.with_ship_to(address("Globex", "Receiving"))
		.with_ship_from(address("Acme Warehouse", "Dock 4"))
		.with_service_code("02")
		.with_description("Replacement parts")
		.with_reference("order-42");

	request.add_package(Package {
		length: Some(10.),
		width: Some(10.),
		height: Some(10.),
		weight: Some(5.),
		insurance: Some(150.),
		delivery_confirmation: Some(2),
		..Package::default()
	});
	request.validate().expect("Ship request should be valid.");

	request
}

#[tokio::test]
async fn create_shipment_returns_tracking_and_label() {
	let server = MockServer::start_async().await;

	mock_token(&server).await;

	let ship_mock = server
		.mock_async(|when, then| {
			when.method(POST).path(SHIPPING_PATH).header("authorization", "Bearer ship-token");
			then.status(200).header("content-type", "application/json").body(
				json!({
					"ShipmentResponse": {
						"Response": {
							"ResponseStatus": { "Code": "1", "Description": "Success" },
							"Alert": [
								{ "Code": "129001", "Description": "Additional Handling has automatically been set on Package 1." }
							]
						},
						"ShipmentResults": {
							"ShipmentCharges": {
								"TotalCharges": { "CurrencyCode": "USD", "MonetaryValue": "48.90" },
								"NegotiatedRateCharges": {
									"TotalCharge": { "CurrencyCode": "USD", "MonetaryValue": "39.12" }
								}
							},
							"ShipmentIdentificationNumber": "1ZA1B2C30290000001",
							"PackageResults": [
								{
									"TrackingNumber": "1ZA1B2C30290000001",
									"ShippingLabel": {
										"ImageFormat": { "Code": "GIF", "Description": "GIF" },
										"GraphicImage": "R0lGODlhAQABAAAAACw=",
										"HTMLImage": "PGh0bWw+PC9odG1sPg=="
									}
								}
							]
						}
					}
				})
				.to_string(),
			);
		})
		.await;
	let client = build_client(&server, true);
	let result = client
		.shipping()
		.create_shipment(&build_request())
		.await
		.expect("Shipment creation should succeed.");

	assert_eq!(result.tracking_number, "1ZA1B2C30290000001");
	assert_eq!(result.label.as_deref(), Some("R0lGODlhAQABAAAAACw="));
	assert_eq!(result.label_format.as_deref(), Some("GIF"));
	assert_eq!(result.total, 39.12);
	assert!(result.negotiated);
	assert_eq!(result.currency.as_deref(), Some("USD"));
	assert_eq!(
		result.alerts,
		Some(vec!["Additional Handling has automatically been set on Package 1.".to_owned()])
	);

	let label = &result.raw["ShipmentResponse"]["ShipmentResults"]["PackageResults"][0]
		["ShippingLabel"];

	assert!(label.get("GraphicImage").is_none());
	assert!(label.get("HTMLImage").is_none());

	ship_mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn response_without_results_is_an_api_error() {
	let server = MockServer::start_async().await;

	mock_token(&server).await;
	server
		.mock_async(|when, then| {
			when.method(POST).path(SHIPPING_PATH);
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"ShipmentResponse":{"Response":{"ResponseStatus":{"Code":"0"}}}}"#);
		})
		.await;

	let client = build_client(&server, false);
	let err = client
		.shipping()
		.create_shipment(&build_request())
		.await
		.expect_err("Response without results should fail.");

	assert!(matches!(&err, Error::Api { status: None, .. }), "Unexpected error: {err:?}.");
	assert!(err.to_string().starts_with("Invalid shipment response: "));
	assert!(err.to_string().contains(r#""Code":"0""#));
}

#[tokio::test]
async fn server_error_is_typed() {
	let server = MockServer::start_async().await;

	mock_token(&server).await;
	server
		.mock_async(|when, then| {
			when.method(POST).path(SHIPPING_PATH);
			then.status(500).body("upstream unavailable");
		})
		.await;

	let client = build_client(&server, false);
	let err = client
		.shipping()
		.create_shipment(&build_request())
		.await
		.expect_err("500 should fail.");

	assert!(matches!(err, Error::Server { ref body } if body == "upstream unavailable"));
	assert_eq!(err.status(), Some(500));
}
