use linguora_engine::{
    current_country, CountryClient, CountrySettings, FailureKind, LocationProvider,
};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> CountryClient {
    let settings = CountrySettings {
        base_url: server.uri(),
        ..CountrySettings::default()
    };
    CountryClient::new(&settings).unwrap()
}

fn switzerland() -> serde_json::Value {
    serde_json::json!([{
        "name": { "common": "Switzerland", "official": "Swiss Confederation" },
        "capital": ["Bern"],
        "region": "Europe",
        "subregion": "Western Europe",
        "languages": { "fra": "French", "gsw": "Swiss German", "ita": "Italian", "roh": "Romansh" },
        "currencies": { "CHF": { "name": "Swiss franc", "symbol": "Fr." } },
        "flags": { "png": "https://flagcdn.com/w320/ch.png", "svg": "https://flagcdn.com/ch.svg" },
        "cca2": "CH",
        "cca3": "CHE",
        "capitalInfo": { "latlng": [46.92, 7.47] }
    }])
}

#[tokio::test]
async fn lookup_by_code_decodes_country_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/alpha/CH"))
        .respond_with(ResponseTemplate::new(200).set_body_json(switzerland()))
        .mount(&server)
        .await;

    let country = client_for(&server).by_code("CH").await.unwrap();
    assert_eq!(country.name.common, "Switzerland");
    assert_eq!(country.capital_name(), "Bern");
    assert_eq!(country.currency_summary(), "Swiss franc (CHF)");
    assert_eq!(
        country.language_summary(),
        "French, Swiss German, Italian, Romansh"
    );
    assert_eq!(country.capital_coordinates(), Some((46.92, 7.47)));
    assert_eq!(country.flag_emoji().as_deref(), Some("🇨🇭"));
}

#[tokio::test]
async fn sparse_record_uses_placeholders() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/alpha/AQ"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": { "common": "Antarctica", "official": "Antarctica" },
            "region": "Antarctic"
        })))
        .mount(&server)
        .await;

    let country = client_for(&server).by_code("AQ").await.unwrap();
    assert_eq!(country.capital_name(), "-");
    assert_eq!(country.currency_summary(), "-");
    assert_eq!(country.language_summary(), "-");
    assert_eq!(country.capital_coordinates(), None);
}

#[tokio::test]
async fn empty_result_and_missing_country_fail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/alpha/XX"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/alpha/ZZ"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(client.by_code("XX").await.unwrap_err().kind, FailureKind::Decode);
    assert_eq!(
        client.by_code("ZZ").await.unwrap_err().kind,
        FailureKind::HttpStatus(404)
    );
}

struct FixedLocation(Option<&'static str>);

#[async_trait::async_trait]
impl LocationProvider for FixedLocation {
    async fn current_country_code(&self) -> Option<String> {
        self.0.map(str::to_string)
    }
}

#[tokio::test]
async fn current_country_follows_the_location_provider() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/alpha/CH"))
        .respond_with(ResponseTemplate::new(200).set_body_json(switzerland()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let found = current_country(&FixedLocation(Some("CH")), &client).await.unwrap();
    assert_eq!(found.map(|c| c.name.common).as_deref(), Some("Switzerland"));

    let unknown = current_country(&FixedLocation(None), &client).await.unwrap();
    assert!(unknown.is_none());
}
