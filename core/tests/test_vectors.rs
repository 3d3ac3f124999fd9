//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected outcomes. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use carangas_core::{Car, CarangasClient, HttpMethod, HttpResponse, Operation, RestError};

const CARS_URL: &str = "http://localhost:3000/cars";
const ORIGIN: &str = "http://localhost:3000";

fn client() -> CarangasClient {
    CarangasClient::new(CARS_URL, "http://localhost:3001/carros/marcas")
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn parse_operation(s: &str) -> Operation {
    match s {
        "Create" => Operation::Create,
        "Modify" => Operation::Modify,
        "Remove" => Operation::Remove,
        other => panic!("unknown operation: {other}"),
    }
}

/// A `null` body in a vector means no body was delivered.
fn simulated_response(sim: &serde_json::Value) -> HttpResponse {
    let status = sim["status"].as_u64().unwrap() as u16;
    match sim["body"].as_str() {
        Some(body) => HttpResponse::new(status, body),
        None => HttpResponse::without_body(status),
    }
}

// ---------------------------------------------------------------------------
// List cars
// ---------------------------------------------------------------------------

#[test]
fn list_cars_test_vectors() {
    let raw = include_str!("../../test-vectors/list_cars.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_list_cars();
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, format!("{ORIGIN}{}", expected_req["path"].as_str().unwrap()), "{name}: path");
        assert!(req.body.is_none(), "{name}: body should be None");

        // Verify parse
        let result = c.parse_list_cars(simulated_response(&case["simulated_response"]));

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "UnexpectedStatus" => {
                    let status = case["expected_status"].as_u64().unwrap() as u16;
                    assert!(
                        matches!(err, RestError::UnexpectedStatus(s) if s == status),
                        "{name}: expected UnexpectedStatus({status}), got {err:?}"
                    );
                }
                "MalformedPayload" => {
                    assert!(matches!(err, RestError::MalformedPayload(_)), "{name}: expected MalformedPayload")
                }
                "NoData" => assert!(matches!(err, RestError::NoData), "{name}: expected NoData"),
                other => panic!("{name}: unknown expected_error: {other}"),
            }
        } else {
            let cars = result.unwrap();
            let expected: Vec<Car> = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(cars, expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

#[test]
fn mutation_test_vectors() {
    let raw = include_str!("../../test-vectors/mutations.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let op = parse_operation(case["operation"].as_str().unwrap());
        let input: Car = serde_json::from_value(case["input"].clone()).unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_mutation(op, &input).unwrap();
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, format!("{ORIGIN}{}", expected_req["path"].as_str().unwrap()), "{name}: path");

        let expected_headers: Vec<(String, String)> = expected_req["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        match req.body.as_deref() {
            Some(body) => {
                let req_body: serde_json::Value = serde_json::from_slice(body).unwrap();
                assert_eq!(req_body, expected_req["body"], "{name}: body");
            }
            None => assert!(expected_req["body"].is_null(), "{name}: body should be present"),
        }

        // Verify parse
        let succeeded = c.mutation_succeeded(simulated_response(&case["simulated_response"]));
        assert_eq!(succeeded, case["expected_success"].as_bool().unwrap(), "{name}: outcome");
    }
}
