use world_news::api::parse_articles;
use world_news::error::ParseError;

fn entry(title: &str, url: &str) -> serde_json::Value {
    serde_json::json!({
        "id": format!("world/{}", title),
        "type": "article",
        "webTitle": title,
        "sectionName": "World news",
        "webPublicationDate": "2023-06-14T08:30:00Z",
        "webUrl": url,
        "apiUrl": "https://content.guardianapis.com/world/x",
        "isHosted": false
    })
}

fn body(results: serde_json::Value) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({
        "response": {
            "status": "ok",
            "userTier": "developer",
            "total": 4,
            "startIndex": 1,
            "pageSize": 10,
            "currentPage": 1,
            "pages": 1,
            "orderBy": "oldest",
            "results": results
        }
    }))
    .unwrap()
}

#[test]
fn keeps_good_entries_in_order_and_skips_the_bad_one() {
    let mut missing_url = entry("Three", "");
    missing_url.as_object_mut().unwrap().remove("webUrl");
    let results = serde_json::json!([
        entry("One", "https://g/1"),
        entry("Two", "https://g/2"),
        missing_url,
        entry("Four", "https://g/4"),
    ]);

    let parsed = parse_articles(&body(results)).unwrap();
    let titles: Vec<&str> = parsed.articles.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["One", "Two", "Four"]);
    assert_eq!(parsed.skipped, 1);

    let first = &parsed.articles[0];
    assert_eq!(first.section, "World news");
    assert_eq!(first.published_at, "2023-06-14T08:30:00Z");
    assert_eq!(first.url, "https://g/1");
}

#[test]
fn empty_results_is_an_empty_success() {
    let parsed = parse_articles(&body(serde_json::json!([]))).unwrap();
    assert!(parsed.articles.is_empty());
    assert_eq!(parsed.skipped, 0);
}

#[test]
fn response_without_results_is_malformed() {
    assert_eq!(
        parse_articles(br#"{"response":{}}"#),
        Err(ParseError::MalformedRoot)
    );
}

#[test]
fn missing_response_object_is_malformed() {
    assert_eq!(
        parse_articles(br#"{"results":[]}"#),
        Err(ParseError::MalformedRoot)
    );
}

#[test]
fn truncated_body_is_malformed() {
    let mut bytes = body(serde_json::json!([entry("One", "https://g/1")]));
    bytes.truncate(bytes.len() / 2);
    assert_eq!(parse_articles(&bytes), Err(ParseError::MalformedRoot));
}

#[test]
fn every_entry_malformed_is_empty_success() {
    let results = serde_json::json!([{"webTitle": "only a title"}, 42, null]);
    let parsed = parse_articles(&body(results)).unwrap();
    assert!(parsed.articles.is_empty());
    assert_eq!(parsed.skipped, 3);
}
