mod common;

use std::process::{Command, Output};

use common::{start, FakeBackend, TOKEN};
use serde_json::{json, Value};

async fn run_quoter(base_url: String, workdir: std::path::PathBuf, args: Vec<String>) -> Output {
    tokio::task::spawn_blocking(move || {
        Command::new(env!("CARGO_BIN_EXE_quoter"))
            .args(&args)
            .current_dir(&workdir)
            .env("API_BASE_URL", base_url)
            .env("API_TOKEN", TOKEN)
            .env("RUST_LOG", "info")
            .env_remove("DEFAULT_COUNTRY")
            .env_remove("DEFAULT_CURRENCY")
            .output()
            .unwrap()
    })
    .await
    .unwrap()
}

#[tokio::test]
async fn test_quote_json_prints_only_the_summary() {
    let fake = FakeBackend::default();
    let ctx = start(fake.clone()).await;
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("workload.json");
    std::fs::write(
        &file,
        json!({
            "country_code": "NG",
            "workloads": [{"region": "lagos-1", "compute_instance_id": "c-small", "os_image_id": "ubuntu"}]
        })
        .to_string(),
    )
    .unwrap();

    let args = vec!["--no-color".to_string(), "quote".to_string(), file.display().to_string(), "--json".to_string()];
    let output = run_quoter(ctx.base_url.clone(), dir.path().to_path_buf(), args).await;
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let summary: Value = serde_json::from_slice(&output.stdout).expect("stdout is one JSON document");
    assert_eq!(summary["total"], 110.0);
    assert_eq!(summary["currency"], "NGN");
    assert_eq!(fake.received().len(), 1);
}
