//! Fixture files on disk: YAML/JSON documents and generated payloads

mod common;

use common::User;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sakusou::factory;
use sakusou::{Entity, UploadFile, io};
use serde_json::{Map, Value, json};
use std::path::Path;
use tempfile::TempDir;

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn test_yaml_fixture_maps_into_entities() {
    let records: Vec<Map<String, Value>> = io::read_yaml(fixture("users.yaml")).unwrap();
    let users = records
        .iter()
        .map(User::from_response)
        .collect::<sakusou::Result<Vec<_>>>()
        .unwrap();

    assert_eq!(users.len(), 3);
    assert_eq!(users[0].email_address.as_deref(), Some("saku@testing.com"));
    assert_eq!(users[1].email_address, None);
    assert_eq!(users[2].user_name, None);
}

#[test]
fn test_entity_properties_round_trip_through_json_file() {
    let dir = TempDir::new().unwrap();
    let user = User {
        user_id: 5,
        user_name: Some("saku".into()),
        email_address: None,
    };

    let written = io::write_json(&user.properties().unwrap(), dir.path().join(io::DEFAULT_JSON_OUTPUT))
        .unwrap();
    assert_eq!(
        std::fs::read_to_string(&written).unwrap(),
        r#"{"userId":5,"userName":"saku","emailAddress":null}"#
    );

    let reread: Map<String, Value> = io::read_json(&written).unwrap();
    assert_eq!(User::from_response(&reread).unwrap(), user);
}

#[test]
fn test_generated_records_survive_yaml() {
    let dir = TempDir::new().unwrap();
    let mut rng = StdRng::seed_from_u64(2024);

    let record = json!({
        "userName": factory::jp_alphabet(&mut rng, 8),
        "emailAddress": factory::email_address(&mut rng, 30, factory::DEFAULT_EMAIL_DOMAIN),
        "token": factory::hexadecimal(&mut rng, 16),
        "id": factory::uuid(&mut rng),
        "ip": factory::ip_address(&mut rng),
        "pin": factory::decimal(&mut rng, 6),
    });

    let path = io::write_yaml(&record, dir.path().join(io::DEFAULT_YAML_OUTPUT)).unwrap();
    let reread: Value = io::read_yaml(path).unwrap();
    assert_eq!(reread, record);
}

#[tokio::test]
async fn test_generated_files_load_as_upload_parts() {
    let dir = TempDir::new().unwrap();
    let mut rng = StdRng::seed_from_u64(9);

    let binary = factory::make_binary_file(128, dir.path().join(factory::DEFAULT_BINARY_OUTPUT)).unwrap();
    let image = factory::make_image_file(&mut rng, (16, 16), dir.path().join("png/avatar.png")).unwrap();

    let part = UploadFile::from_path("file", &binary, "application/octet-stream")
        .await
        .unwrap();
    assert_eq!(part.file_name, "output.bin");
    assert_eq!(part.content, vec![0u8; 128]);

    let part = UploadFile::from_path("avatar", &image, "image/png").await.unwrap();
    assert_eq!(part.file_name, "avatar.png");
    assert!(part.content.starts_with(b"\x89PNG"));
}

#[test]
fn test_video_fixture_leaves_only_output() {
    let dir = TempDir::new().unwrap();
    let mut rng = StdRng::seed_from_u64(3);

    let video = factory::make_video_file(&mut rng, (10, 10, 4), dir.path().join("clips/noise.gif")).unwrap();

    assert!(video.ends_with("clips/noise.gif"));
    let bytes = std::fs::read(&video).unwrap();
    assert!(bytes.starts_with(b"GIF89a"));

    let entries = std::fs::read_dir(dir.path().join("clips")).unwrap().count();
    assert_eq!(entries, 1);
}
