//! Integration tests for TourGuide

use std::process::Command;

use tourguide::TourGuideConfig;
use tourguide::TravelAssistant;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> TourGuideConfig {
    let mut config = TourGuideConfig::default();
    config.geocoding.base_url = server.uri();
    config.weather.base_url = server.uri();
    config.attractions.base_url = server.uri();
    config
}

async fn mount_geocoder(server: &MockServer, body: serde_json::Value, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn bangalore() -> serde_json::Value {
    serde_json::json!([{
        "lat": "12.9767936",
        "lon": "77.590082",
        "display_name": "Bengaluru, Bangalore North, Karnataka, India"
    }])
}

/// Full question with both intents against stubbed collaborators
#[tokio::test]
async fn test_weather_and_places_end_to_end() {
    let server = MockServer::start().await;
    mount_geocoder(&server, bangalore(), 2).await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("latitude", "12.9767936"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current_weather": {"temperature": 27.0},
            "hourly": {"precipitation_probability": [62, 70]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/interpreter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "elements": [
                {"tags": {"name": "Cubbon Park", "leisure": "park", "tourism": "attraction"}},
                {"tags": {"name": "Hotel Royal Orchid", "tourism": "hotel"}},
                {"tags": {"name": "Bangalore Palace", "tourism": "attraction"}},
                {"tags": {"tourism": "viewpoint"}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let assistant = TravelAssistant::from_config(&config_for(&server)).unwrap();
    let reply = assistant
        .reply("Take me to Bangalore, what is the temperature there? And what are the places I can visit?")
        .await;

    assert_eq!(
        reply,
        "In Bangalore it's currently 27.0°C with a chance of 62% to rain. \
         And these are the places you can go:\nCubbon Park\nBangalore Palace"
    );
}

/// Unknown places short-circuit with the fixed sentence
#[tokio::test]
async fn test_unknown_place_end_to_end() {
    let server = MockServer::start().await;
    mount_geocoder(&server, serde_json::json!([]), 2).await;

    let assistant = TravelAssistant::from_config(&config_for(&server)).unwrap();
    let reply = assistant
        .reply("I want to go to Qwertyville, is it cold?")
        .await;

    assert_eq!(reply, "I don't know if this place exists.");
}

/// Filter rejects everything, so raw names are used instead
#[tokio::test]
async fn test_attraction_fallback_end_to_end() {
    let server = MockServer::start().await;
    mount_geocoder(&server, bangalore(), 1).await;

    Mock::given(method("POST"))
        .and(path("/interpreter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "elements": [
                {"tags": {"name": "Sunrise Residency", "tourism": "hotel"}},
                {"tags": {"name": "Travel Desk", "tourism": "information"}}
            ]
        })))
        .mount(&server)
        .await;

    let assistant = TravelAssistant::from_config(&config_for(&server)).unwrap();
    let reply = assistant.reply("Plan a trip to Bangalore.").await;

    assert_eq!(
        reply,
        "In Bangalore these are the places you can go,\nSunrise Residency\nTravel Desk"
    );
}

/// Overpass outage surfaces as "no attractions" while weather still answers
#[tokio::test]
async fn test_attraction_outage_end_to_end() {
    let server = MockServer::start().await;
    mount_geocoder(&server, bangalore(), 2).await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current_weather": {"temperature": 21.5},
            "hourly": {"precipitation_probability": []}
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/interpreter"))
        .respond_with(ResponseTemplate::new(504).set_body_string("Gateway Timeout"))
        .mount(&server)
        .await;

    let assistant = TravelAssistant::from_config(&config_for(&server)).unwrap();
    let reply = assistant
        .reply("Going to Bangalore, how is the weather and what can I visit?")
        .await;

    assert_eq!(
        reply,
        "In Bangalore it's currently 21.5°C. I couldn't find popular tourist places near \
         Bengaluru, Bangalore North, Karnataka, India."
    );
}

/// The CLI answers without network when no place can be extracted
#[test]
fn test_cli_ask_without_place() {
    let output = Command::new(env!("CARGO_BIN_EXE_tourguide"))
        .args(["ask", "hello", "world"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        "I couldn't understand which place you want to go. Please type clearly."
    );
}

/// Test that the CLI shows help with explicit help flag
#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_tourguide"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Travel assistant"));
    assert!(stdout.contains("ask"));
    assert!(stdout.contains("serve"));
}

/// Test chat mode terminates on exit
#[test]
fn test_cli_chat_exit() {
    use std::io::Write;
    use std::process::Stdio;

    let mut child = Command::new(env!("CARGO_BIN_EXE_tourguide"))
        .arg("chat")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to execute command");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(b"quit\n")
        .unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Goodbye"));
}
