//! User-mode and resource-failure scenarios with mock post sources

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use sentilyze_classifiers::{
    LabelClassifier, ResourceConfig, ResourceLoader, SentimentResources, SparseVector,
    StopwordSet, Vectorizer,
};
use sentilyze_core::{Error, Result, Sentiment};
use sentilyze_demo::{
    analyze_user, fetch_recent, load_or_report, run_interactive, FilePostSource, HttpPostSource,
    Post, PostSource, NO_POSTS_MESSAGE, POST_BATCH_SIZE,
};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Source returning a fixed list of posts
struct MockSource {
    posts: Vec<Post>,
}

#[async_trait]
impl PostSource for MockSource {
    async fn recent_posts(&self, _username: &str, _count: usize) -> Result<Vec<Post>> {
        Ok(self.posts.clone())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Source that always fails
struct FailingSource;

#[async_trait]
impl PostSource for FailingSource {
    async fn recent_posts(&self, _username: &str, _count: usize) -> Result<Vec<Post>> {
        Err(Error::fetch("rate limited"))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

struct WordCountVectorizer;

impl Vectorizer for WordCountVectorizer {
    fn transform(&self, document: &str) -> Result<SparseVector> {
        let pairs = document.split_whitespace().map(|word| {
            let col = if word.starts_with("good") { 0 } else { 1 };
            (col, 1.0)
        });
        SparseVector::from_pairs(2, pairs)
    }

    fn n_features(&self) -> usize {
        2
    }
}

/// Positive when the "good" column wins, counting calls
struct CountingClassifier {
    calls: AtomicU32,
}

impl LabelClassifier for CountingClassifier {
    fn predict(&self, features: &SparseVector) -> Result<i64> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(if features.get(0) > features.get(1) { 1 } else { 0 })
    }

    fn n_features(&self) -> Option<usize> {
        Some(2)
    }

    fn name(&self) -> &str {
        "counting"
    }
}

fn resources() -> (SentimentResources, Arc<CountingClassifier>) {
    let classifier = Arc::new(CountingClassifier {
        calls: AtomicU32::new(0),
    });
    let resources = SentimentResources::new(
        Arc::new(StopwordSet::english()),
        Arc::new(WordCountVectorizer),
        classifier.clone(),
    )
    .unwrap();
    (resources, classifier)
}

#[tokio::test]
async fn test_user_posts_classified() {
    let (resources, classifier) = resources();
    let source = MockSource {
        posts: vec![
            Post::new("good good morning"),
            Post::new("traffic was a nightmare"),
            Post::new("   "),
        ],
    };

    let report = analyze_user(&resources, &source, "someone").await.unwrap();

    assert!(report.warning.is_none());
    let sentiments: Vec<Sentiment> = report.cards.iter().map(|c| c.sentiment).collect();
    assert_eq!(
        sentiments,
        vec![Sentiment::Positive, Sentiment::Negative, Sentiment::NoTextProvided]
    );
    assert_eq!(classifier.calls.load(Ordering::Relaxed), 2);
}

#[tokio::test]
async fn test_batch_capped_at_five() {
    let (resources, _) = resources();
    let source = MockSource {
        posts: (0..12).map(|i| Post::new(format!("good post {}", i))).collect(),
    };

    let report = analyze_user(&resources, &source, "someone").await.unwrap();
    assert_eq!(report.cards.len(), POST_BATCH_SIZE);
    assert_eq!(report.cards[0].text, "good post 0");
}

#[tokio::test]
async fn test_fetch_failure_yields_empty_report() {
    let (resources, classifier) = resources();

    let report = analyze_user(&resources, &FailingSource, "someone").await.unwrap();

    assert!(report.cards.is_empty());
    let warning = report.warning.as_deref().unwrap();
    assert!(warning.contains("rate limited"), "unexpected warning: {}", warning);
    assert_eq!(report.render(false), format!("{}\n", NO_POSTS_MESSAGE));
    assert_eq!(classifier.calls.load(Ordering::Relaxed), 0);
}

#[tokio::test]
async fn test_fetch_orders_newest_first() {
    let older = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    let newer = Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap();
    let source = MockSource {
        posts: vec![
            Post::new("old").with_created_at(older),
            Post::new("new").with_created_at(newer),
        ],
    };

    let report = fetch_recent(&source, "someone", 5).await;
    let texts: Vec<&str> = report.posts.iter().map(|p| p.text.as_str()).collect();
    assert_eq!(texts, vec!["new", "old"]);
}

#[tokio::test]
async fn test_file_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("posts.json");
    std::fs::write(
        &path,
        r#"{"alice": [{"text": "good vibes"}, {"content": "so tired"}], "bob": []}"#,
    )
    .unwrap();
    let source = FilePostSource::new(&path);

    let report = fetch_recent(&source, "@alice", 5).await;
    assert_eq!(report.posts.len(), 2);
    assert!(report.warning.is_none());

    let report = fetch_recent(&source, "carol", 5).await;
    assert!(report.is_empty());
    assert!(report.warning.unwrap().contains("not found"));

    let report = fetch_recent(&FilePostSource::new(dir.path().join("nope.json")), "alice", 5).await;
    assert!(report.is_empty());
    assert!(report.warning.is_some());
}

#[tokio::test]
async fn test_file_source_keeps_latest_posts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("posts.json");
    let posts: Vec<Post> = (1..=7)
        .map(|day| {
            Post::new(format!("day {}", day))
                .with_created_at(Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap())
        })
        .collect();
    let users = serde_json::json!({ "alice": posts });
    std::fs::write(&path, users.to_string()).unwrap();

    let report = fetch_recent(&FilePostSource::new(&path), "alice", POST_BATCH_SIZE).await;

    let texts: Vec<&str> = report.posts.iter().map(|p| p.text.as_str()).collect();
    assert_eq!(texts, vec!["day 7", "day 6", "day 5", "day 4", "day 3"]);
}

/// Serve one canned HTTP response per connection, chosen by request path
async fn serve_canned(routes: Vec<(&'static str, u16, &'static str)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };
            let mut buf = vec![0u8; 4096];
            let n = stream.read(&mut buf).await.unwrap_or(0);
            let request = String::from_utf8_lossy(&buf[..n]);
            let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();

            let (status, body) = routes
                .iter()
                .find(|(prefix, _, _)| path.starts_with(prefix))
                .map(|(_, status, body)| (*status, *body))
                .unwrap_or((404, ""));
            let reason = match status {
                200 => "OK",
                404 => "Not Found",
                _ => "Internal Server Error",
            };
            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                reason,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    format!("http://{}/users/{{username}}/posts?limit={{count}}", addr)
}

#[tokio::test]
async fn test_http_source() {
    let template = serve_canned(vec![
        (
            "/users/alice/",
            200,
            r#"[{"text": "good morning", "created_at": "2024-03-01T08:00:00Z"},
                {"content": "good night", "created_at": "2024-03-01T22:00:00Z"}]"#,
        ),
        ("/users/broken/", 500, r#"{"error": "boom"}"#),
        ("/users/garbled/", 200, "not json"),
    ])
    .await;
    let source = HttpPostSource::new(template, Duration::from_secs(5)).unwrap();

    let report = fetch_recent(&source, "alice", POST_BATCH_SIZE).await;
    assert!(report.warning.is_none(), "unexpected warning: {:?}", report.warning);
    let texts: Vec<&str> = report.posts.iter().map(|p| p.text.as_str()).collect();
    assert_eq!(texts, vec!["good night", "good morning"]);

    let report = fetch_recent(&source, "broken", POST_BATCH_SIZE).await;
    assert!(report.is_empty());
    let warning = report.warning.unwrap();
    assert!(warning.starts_with("An error occurred while fetching posts"));
    assert!(warning.contains("500"), "unexpected warning: {}", warning);

    let report = fetch_recent(&source, "garbled", POST_BATCH_SIZE).await;
    assert!(report.is_empty());
    assert!(report.warning.unwrap().contains("invalid response body"));
}

#[test]
fn test_missing_artifacts_skip_prediction() {
    let dir = tempfile::tempdir().unwrap();
    let loader = ResourceLoader::new(ResourceConfig::from_dir(dir.path()));

    assert!(load_or_report(&loader).is_none());
    // The failure is cached; a second attempt reports again without loading
    assert!(load_or_report(&loader).is_none());
    assert!(loader.is_initialized());
}

#[test]
fn test_interactive_lines() {
    let (resources, _) = resources();
    let input = "good good day\n\nbad day\n";
    let mut output = Vec::new();

    let count = run_interactive(&resources, input.as_bytes(), &mut output).unwrap();

    assert_eq!(count, 2);
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "Sentiment: Positive\nSentiment: Negative\n"
    );
}
