use reqwest::header::AUTHORIZATION;
use serde_json::{Map, Value};

use curator_providers::Error;

#[test]
fn builds_bearer_auth_header() {
	let headers =
		curator_providers::auth_headers("secret", &Map::new()).expect("Failed to build headers.");
	let value = headers.get(AUTHORIZATION).expect("Missing authorization header.");

	assert_eq!(value, "Bearer secret");
}

#[test]
fn includes_default_headers() {
	let mut defaults = Map::new();

	defaults.insert("x-goog-api-client".to_string(), Value::String("curator".to_string()));

	let headers =
		curator_providers::auth_headers("secret", &defaults).expect("Failed to build headers.");

	assert_eq!(headers.get("x-goog-api-client").expect("Missing default header."), "curator");
}

#[test]
fn rejects_non_string_default_header() {
	let mut defaults = Map::new();

	defaults.insert("x-retries".to_string(), Value::from(3));

	let err = curator_providers::auth_headers("secret", &defaults)
		.expect_err("Expected header validation error.");

	assert!(matches!(err, Error::InvalidConfig { .. }));
}
