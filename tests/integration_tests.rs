use flickr_readme::config::AppConfig;
use flickr_readme::domain::settings::FeedEndpoints;
use flickr_readme::utils::validation::Validate;
use flickr_readme::{ErrorCategory, LocalStorage, ReadmePipeline, UpdateEngine, UpdateError};
use httpmock::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use tempfile::TempDir;

const ORIGINAL_README: &str = "# old profile\n";

fn setup_readme() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("README.md"), ORIGINAL_README).unwrap();
    temp_dir
}

fn config_for(server: &MockServer, user_id: Option<&str>) -> AppConfig {
    AppConfig {
        user_id: user_id.map(str::to_string),
        endpoints: FeedEndpoints {
            feed_url: server.url("/services/feeds/photos_public.gne?id={user_id}&format=json&nojsoncallback=1"),
            oembed_url: server.url("/services/oembed/"),
            photo_page_url: "https://www.flickr.com/photos/{user_id}/{photo_id}".to_string(),
        },
        timeout_seconds: 2,
        ..AppConfig::default()
    }
}

async fn run_update(
    temp_dir: &TempDir,
    config: AppConfig,
) -> flickr_readme::Result<flickr_readme::UpdateReport> {
    let storage = LocalStorage::new(temp_dir.path());
    let pipeline = ReadmePipeline::with_rng(storage, config, StdRng::seed_from_u64(11))?;
    UpdateEngine::new(pipeline).run().await
}

fn read_readme(temp_dir: &TempDir) -> String {
    fs::read_to_string(temp_dir.path().join("README.md")).unwrap()
}

#[tokio::test]
async fn test_end_to_end_random_photo() {
    let temp_dir = setup_readme();
    let server = MockServer::start();
    let feed_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/services/feeds/photos_public.gne")
            .query_param("id", "12345678@N00");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "items": [{
                    "media": {"m": "a_m.jpg"},
                    "title": "T",
                    "link": "L",
                    "published": "2024-05-02T10:00:00Z",
                    "description": "Jane posted a photo: <b>Nice!</b>"
                }]
            }));
    });

    let report = run_update(&temp_dir, config_for(&server, Some("12345678@N00")))
        .await
        .unwrap();

    feed_mock.assert();
    assert!(report.written);
    assert_eq!(report.image_url, "a_b.jpg");

    let readme = read_readme(&temp_dir);
    assert!(readme.contains("[![T](a_b.jpg)](L)"));
    assert!(readme.contains("**[T](L)**"));
    assert!(readme.contains("> Nice!"));
    assert!(!readme.contains("posted a photo"));
    assert!(!readme.contains(ORIGINAL_README));
    assert!(!temp_dir.path().join("README.md.lock").exists());
}

#[tokio::test]
async fn test_end_to_end_empty_feed_leaves_readme() {
    let temp_dir = setup_readme();
    let server = MockServer::start();
    let feed_mock = server.mock(|when, then| {
        when.method(GET).path("/services/feeds/photos_public.gne");
        then.status(200).json_body(serde_json::json!({"items": []}));
    });

    let err = run_update(&temp_dir, config_for(&server, Some("me")))
        .await
        .unwrap_err();

    feed_mock.assert();
    assert_eq!(err.category(), ErrorCategory::EmptyResult);
    assert_eq!(err.exit_code(), 4);
    assert_eq!(read_readme(&temp_dir), ORIGINAL_README);
}

#[tokio::test]
async fn test_end_to_end_missing_user_makes_no_request() {
    let temp_dir = setup_readme();
    let server = MockServer::start();
    let feed_mock = server.mock(|when, then| {
        when.method(GET).path("/services/feeds/photos_public.gne");
        then.status(200).json_body(serde_json::json!({"items": []}));
    });

    let config = config_for(&server, None);
    assert!(matches!(
        config.validate(),
        Err(UpdateError::MissingConfig { .. })
    ));

    let err = run_update(&temp_dir, config).await.unwrap_err();

    feed_mock.assert_hits(0);
    assert_eq!(err.category(), ErrorCategory::Configuration);
    assert_eq!(read_readme(&temp_dir), ORIGINAL_README);
}

#[tokio::test]
async fn test_end_to_end_with_api_failure() {
    let temp_dir = setup_readme();
    let server = MockServer::start();
    let feed_mock = server.mock(|when, then| {
        when.method(GET).path("/services/feeds/photos_public.gne");
        then.status(500);
    });

    let err = run_update(&temp_dir, config_for(&server, Some("me")))
        .await
        .unwrap_err();

    feed_mock.assert();
    assert_eq!(err.category(), ErrorCategory::Transport);
    assert_eq!(read_readme(&temp_dir), ORIGINAL_README);
}

#[tokio::test]
async fn test_end_to_end_single_photo() {
    let temp_dir = setup_readme();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/services/feeds/photos_public.gne");
        then.status(200).json_body(serde_json::json!({"items": []}));
    });
    let oembed_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/services/oembed/")
            .query_param("format", "json")
            .query_param("url", "https://www.flickr.com/photos/me/5300");
        then.status(200).json_body(serde_json::json!({
            "url": "https://live.staticflickr.com/65535/5300_abc_b.jpg",
            "title": "Tide pools",
            "author_name": "me"
        }));
    });

    let config = AppConfig {
        image_id: Some("5300".to_string()),
        ..config_for(&server, Some("me"))
    };
    let report = run_update(&temp_dir, config).await.unwrap();

    oembed_mock.assert();
    assert!(report.written);
    let readme = read_readme(&temp_dir);
    assert!(readme.contains(
        "[![Tide pools](https://live.staticflickr.com/65535/5300_abc_b.jpg)](https://www.flickr.com/photos/me/5300)"
    ));
    assert!(!readme.contains("\n> "));
}

#[tokio::test]
async fn test_missing_readme_is_not_created() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/services/feeds/photos_public.gne");
        then.status(200).json_body(serde_json::json!({
            "items": [{"media": {"m": "a_m.jpg"}, "title": "T", "link": "L"}]
        }));
    });

    let err = run_update(&temp_dir, config_for(&server, Some("me")))
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::FileAccess);
    assert!(!temp_dir.path().join("README.md").exists());
}

#[tokio::test]
async fn test_held_lock_blocks_write() {
    let temp_dir = setup_readme();
    fs::write(temp_dir.path().join("README.md.lock"), "4242").unwrap();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/services/feeds/photos_public.gne");
        then.status(200).json_body(serde_json::json!({
            "items": [{"media": {"m": "a_m.jpg"}, "title": "T", "link": "L"}]
        }));
    });

    let err = run_update(&temp_dir, config_for(&server, Some("me")))
        .await
        .unwrap_err();

    assert_eq!(err.exit_code(), 5);
    assert_eq!(read_readme(&temp_dir), ORIGINAL_README);
    assert!(temp_dir.path().join("README.md.lock").exists());
}

#[tokio::test]
async fn test_dry_run_does_not_touch_readme() {
    let temp_dir = setup_readme();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/services/feeds/photos_public.gne");
        then.status(200).json_body(serde_json::json!({
            "items": [{"media": {"m": "a_m.jpg"}, "title": "T", "link": "L"}]
        }));
    });

    let config = AppConfig {
        dry_run: true,
        ..config_for(&server, Some("me"))
    };
    let report = run_update(&temp_dir, config).await.unwrap();

    assert!(!report.written);
    assert!(report.document.contains("[![T](a_b.jpg)](L)"));
    assert_eq!(read_readme(&temp_dir), ORIGINAL_README);
}

#[tokio::test]
async fn test_same_seed_same_readme() {
    let server = MockServer::start();
    let items: Vec<serde_json::Value> = (0..10)
        .map(|i| {
            serde_json::json!({
                "media": {"m": format!("{}_m.jpg", i)},
                "title": format!("Photo {}", i),
                "link": format!("https://www.flickr.com/photos/me/{}/", i)
            })
        })
        .collect();
    server.mock(|when, then| {
        when.method(GET).path("/services/feeds/photos_public.gne");
        then.status(200)
            .json_body(serde_json::json!({ "items": items }));
    });

    let first_dir = setup_readme();
    let second_dir = setup_readme();
    run_update(&first_dir, config_for(&server, Some("me")))
        .await
        .unwrap();
    run_update(&second_dir, config_for(&server, Some("me")))
        .await
        .unwrap();

    assert_eq!(read_readme(&first_dir), read_readme(&second_dir));
}
