//! Full CRUD lifecycle test against the live mock services.
//!
//! # Design
//! Starts both mock services on random ports, then drives every core client
//! operation over real HTTP using ureq as the executor. Validates that request
//! building and response interpretation work end-to-end with the servers.

use carangas_core::{CarangasClient, CarForm, HttpMethod, HttpRequest, HttpResponse, Operation, RestError};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.url).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.url).call(),
        (HttpMethod::Post, Some(body)) => agent
            .post(&req.url)
            .content_type("application/json")
            .send(&body[..]),
        (HttpMethod::Post, None) => agent.post(&req.url).send_empty(),
        (HttpMethod::Put, Some(body)) => agent
            .put(&req.url)
            .content_type("application/json")
            .send(&body[..]),
        (HttpMethod::Put, None) => agent.put(&req.url).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_vec().unwrap_or_default();

    HttpResponse::new(status, body)
}

/// Start both services on random ports; returns `(cars_addr, brands_addr)`.
fn start_servers() -> (std::net::SocketAddr, std::net::SocketAddr) {
    let cars = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let brands = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addrs = (cars.local_addr().unwrap(), brands.local_addr().unwrap());
    cars.set_nonblocking(true).unwrap();
    brands.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let cars = tokio::net::TcpListener::from_std(cars).unwrap();
            let brands = tokio::net::TcpListener::from_std(brands).unwrap();
            tokio::try_join!(mock_server::run_cars(cars), mock_server::run_brands(brands))
        })
        .unwrap();
    });

    addrs
}

#[test]
fn crud_lifecycle() {
    // Step 1: start both services.
    let (cars_addr, brands_addr) = start_servers();
    let client = CarangasClient::new(
        &format!("http://{cars_addr}/cars"),
        &format!("http://{brands_addr}{}", mock_server::BRANDS_PATH),
    );

    // Step 2: list — should be empty.
    let cars = client.parse_list_cars(execute(client.build_list_cars())).unwrap();
    assert!(cars.is_empty(), "expected empty list");

    // Step 3: brands are available for the picker.
    let brands = client.parse_list_brands(execute(client.build_list_brands())).unwrap();
    assert!(!brands.is_empty());

    // Step 4: save a car built from a form with an empty price.
    let form = CarForm {
        brand: brands[0].name.clone(),
        name: "Integration".to_string(),
        price: String::new(),
        gas_type: 0,
    };
    let car = form.apply(None).unwrap();
    let req = client.build_mutation(Operation::Create, &car).unwrap();
    let body = client.parse_mutation(execute(req)).expect("save failed");
    let saved = client.parse_saved_car(&body).unwrap();
    assert_eq!(saved.price, 0.0);
    let id = saved.id.clone().expect("server assigned no id");

    // Step 5: update through the captured id.
    let mut edited = saved.clone();
    edited.name = "Updated".to_string();
    let req = client.build_mutation(Operation::Modify, &edited).unwrap();
    assert!(req.url.ends_with(&format!("/cars/{id}")));
    assert!(client.mutation_succeeded(execute(req)));

    // Step 6: list — one car with the new name.
    let cars = client.parse_list_cars(execute(client.build_list_cars())).unwrap();
    assert_eq!(cars.len(), 1);
    assert_eq!(cars[0].name, "Updated");
    assert_eq!(cars[0].id.as_deref(), Some(id.as_str()));

    // Step 7: delete.
    let req = client.build_mutation(Operation::Remove, &edited).unwrap();
    assert!(client.mutation_succeeded(execute(req)));

    // Step 8: delete again — the 404 collapses to a failed mutation.
    let req = client.build_mutation(Operation::Remove, &edited).unwrap();
    assert!(!client.mutation_succeeded(execute(req)));

    // Step 9: list — should be empty again.
    let cars = client.parse_list_cars(execute(client.build_list_cars())).unwrap();
    assert!(cars.is_empty(), "expected empty list after delete");

    // Step 10: an unknown route surfaces as an unexpected status.
    let bad = CarangasClient::new(&format!("http://{cars_addr}/trucks"), "");
    let err = bad.parse_list_cars(execute(bad.build_list_cars())).unwrap_err();
    assert!(matches!(err, RestError::UnexpectedStatus(404)));
}
