use anyhow::Result;
use dog_discoverer::domain::ports::Storage;
use dog_discoverer::{DiscoverApp, DiscoverEngine, HistoryExporter, LocalStorage, TheDogApi};
use httpmock::prelude::*;
use tempfile::TempDir;

#[tokio::test]
async fn test_discovered_history_exports_to_disk() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v1/images/search");
        then.status(200).json_body(serde_json::json!([
            {
                "url": "https://cdn.example.com/akita.jpg",
                "breeds": [
                    {"name": "Akita", "temperament": "Docile, Alert", "origin": "Japan"}
                ]
            }
        ]));
    });

    let source = TheDogApi::new(server.url("/v1/images/search"));
    let mut app = DiscoverApp::new(DiscoverEngine::new(source));
    assert!(app.discover().await);
    assert!(app.discover().await);

    let temp_dir = TempDir::new()?;
    let storage = LocalStorage::new(temp_dir.path().to_string_lossy().to_string());
    let exporter = HistoryExporter::new(storage.clone());

    let written = exporter.export(&app.state().history).await?;
    assert_eq!(written, vec!["history.csv", "history.tsv"]);

    // 透過 Storage port 讀回驗證
    let csv = String::from_utf8(storage.read_file("history.csv").await?)?;
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "position,breed,origin,temperament,image_url,discovered_at"
    );
    assert!(lines[1].starts_with("1,Akita,Japan,"));
    assert!(lines[1].contains("\"Docile, Alert\""));
    assert!(lines[2].starts_with("2,Akita,Japan,"));

    let tsv = String::from_utf8(storage.read_file("history.tsv").await?)?;
    assert!(tsv.starts_with("position\tbreed\torigin\ttemperament\timage_url\tdiscovered_at"));

    Ok(())
}

#[tokio::test]
async fn test_export_creates_missing_output_directory() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let nested = temp_dir.path().join("exports").join("dogs");
    let storage = LocalStorage::new(nested.to_string_lossy().to_string());

    let exporter = HistoryExporter::new(storage);
    exporter
        .export(&dog_discoverer::core::History::new())
        .await?;

    assert!(nested.join("history.csv").exists());
    assert!(nested.join("history.tsv").exists());

    Ok(())
}
