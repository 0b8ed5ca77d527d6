//! Behavioural tests for [`HttpDistanceProvider`] against a mock Distance
//! Matrix service.

mod support;

use std::cell::RefCell;
use std::net::TcpListener;
use std::time::Duration;

use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, scenario, then, when};
use tripsheet_core::{DistanceError, DistanceProvider};
use tripsheet_data::routing::{HttpDistanceProvider, HttpDistanceProviderConfig};

use support::{DistanceService, element_body, service_error_body};

#[derive(Default)]
struct DistanceWorld {
    service: RefCell<Option<DistanceService>>,
    base_url: RefCell<String>,
    result: RefCell<Option<Result<u32, DistanceError>>>,
}

impl DistanceWorld {
    fn start(&self, script: impl FnOnce(&DistanceService)) {
        let service = DistanceService::start();
        script(&service);
        self.base_url.replace(service.base_url());
        self.service.replace(Some(service));
    }

    fn result(&self) -> Result<u32, DistanceError> {
        self.result
            .borrow()
            .clone()
            .expect("a lookup should have run")
    }

    fn destinations(&self) -> Vec<String> {
        self.service
            .borrow()
            .as_ref()
            .map(DistanceService::destinations)
            .unwrap_or_default()
    }
}

#[fixture]
fn world() -> DistanceWorld {
    DistanceWorld::default()
}

// --- Given steps ---

#[given("a distance service that knows the first spelling at {metres} metres")]
fn knows_first(#[from(world)] world: &DistanceWorld, metres: u64) {
    world.start(|service| {
        service.answer("Utrecht, Netherlands", element_body("OK", Some(metres)));
    });
}

#[given("a distance service that only knows the second spelling at {metres} metres")]
fn knows_second(#[from(world)] world: &DistanceWorld, metres: u64) {
    world.start(|service| {
        service.answer("Gent, Netherlands", element_body("NOT_FOUND", None));
        service.answer("Gent, Belgium", element_body("OK", Some(metres)));
    });
}

#[given("a distance service that knows no spelling")]
fn knows_nothing(#[from(world)] world: &DistanceWorld) {
    world.start(|service| {
        service.answer("Nergenshuizen, Netherlands", element_body("NOT_FOUND", None));
        service.answer("Nergenshuizen, Belgium", element_body("ZERO_RESULTS", None));
        service.answer("Nergenshuizen", element_body("NOT_FOUND", None));
    });
}

#[given("a distance service that rejects the key")]
fn rejects_key(#[from(world)] world: &DistanceWorld) {
    world.start(|service| {
        service.answer_all(service_error_body(
            "REQUEST_DENIED",
            "The provided API key is invalid.",
        ));
    });
}

#[given("a distance service that is not running")]
fn not_running(#[from(world)] world: &DistanceWorld) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local port");
    let addr = listener.local_addr().expect("local address");
    drop(listener);
    world.base_url.replace(format!("http://{addr}/json"));
}

// --- When steps ---

#[when("I look up the round trip to {destination}")]
fn look_up(#[from(world)] world: &DistanceWorld, destination: String) {
    let config = HttpDistanceProviderConfig::new("test-key")
        .with_base_url(world.base_url.borrow().clone())
        .with_timeout(Duration::from_secs(5));
    let provider = HttpDistanceProvider::with_config(config).expect("provider should build");
    world
        .result
        .replace(Some(provider.round_trip_km("Den Haag", &destination)));
}

// --- Then steps ---

#[then("the round trip is {km} kilometres")]
fn round_trip_is(#[from(world)] world: &DistanceWorld, km: u32) {
    assert_eq!(world.result(), Ok(km));
}

#[then("the service was asked for {address} only")]
fn asked_for_only(#[from(world)] world: &DistanceWorld, address: String) {
    let address = address.trim_matches('"');
    assert_eq!(world.destinations(), [address.to_owned()]);
}

#[then("the service was asked {count} times")]
fn asked_times(#[from(world)] world: &DistanceWorld, count: usize) {
    assert_eq!(world.destinations().len(), count);
}

#[then("the service was asked for every spelling of {name} in order")]
fn asked_every_spelling(#[from(world)] world: &DistanceWorld, name: String) {
    let name = name.trim_matches('"');
    assert_eq!(
        world.destinations(),
        [
            format!("{name}, Netherlands"),
            format!("{name}, Belgium"),
            name.to_owned(),
        ]
    );
}

#[then("a no route error is returned")]
fn no_route(#[from(world)] world: &DistanceWorld) {
    let result = world.result();
    assert!(
        matches!(result, Err(DistanceError::NoRoute { .. })),
        "expected NoRoute, got {result:?}"
    );
}

#[then("a service error is returned")]
fn service_error(#[from(world)] world: &DistanceWorld) {
    let result = world.result();
    assert!(
        matches!(&result, Err(DistanceError::ServiceError { code, .. }) if code == "REQUEST_DENIED"),
        "expected ServiceError, got {result:?}"
    );
}

#[then("a network error is returned")]
fn network_error(#[from(world)] world: &DistanceWorld) {
    let result = world.result();
    assert!(
        matches!(result, Err(DistanceError::NetworkError { .. })),
        "expected NetworkError, got {result:?}"
    );
    let message = result.expect_err("error").to_string();
    assert!(!message.contains("test-key"), "key leaked into {message}");
}

macro_rules! register_distance_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/http_distance.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: DistanceWorld) {
            let _ = world;
        }
    };
}

register_distance_scenario!(first_spelling, "resolving a destination on the first spelling");
register_distance_scenario!(later_spelling, "falling back to a later spelling");
register_distance_scenario!(no_spelling, "every spelling failing");
register_distance_scenario!(rejected_key, "the service rejecting the key");
register_distance_scenario!(unreachable, "the service being unreachable");

#[rstest]
fn lookup_inside_multi_thread_runtime_does_not_nest_runtimes() {
    let service = DistanceService::start();
    service.answer("Delft, Netherlands", element_body("OK", Some(10_400)));
    let provider = HttpDistanceProvider::with_config(
        HttpDistanceProviderConfig::new("test-key").with_base_url(service.base_url()),
    )
    .expect("provider should build");
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("runtime");

    let km = runtime.block_on(async { provider.round_trip_km("Den Haag", "Delft") });

    assert_eq!(km, Ok(20));
    assert_eq!(service.destinations(), ["Delft, Netherlands"]);
}
