//! End-to-end exercise of the trust boundary: configuration drives the
//! three decision subsystems the way the API layer would.

use std::fs;
use std::io::{Cursor, Read};

use chrono::{TimeDelta, TimeZone, Utc};
use serde_json::json;
use tourmaline::{
    AccessLevel, Accessible, AclEntry, Identity, PolicyViolation, Record, RecordAcl, RecordId,
    SignatureError, TourmalineConfig, accessible_with_default,
};

fn tenant_config(dir: &std::path::Path) -> TourmalineConfig {
    fs::write(
        dir.join("tourmaline.toml"),
        r#"
[asset]
url_prefix = "https://assets.example.com"
post_prefix = "https://api.example.com"
secret = "tenant-secret"

[password]
min_length = 8
digit_required = true
excluded_fields = ["first_name", "last_name"]

[acl]
empty_acl = "deny-all"
"#,
    )
    .unwrap();

    let mut config = TourmalineConfig::load_from_dir(dir).unwrap();
    config.validate().unwrap();
    config.asset.storage_dir = dir.join("assets");
    config
}

#[test]
fn record_access_flow() {
    let dir = tempfile::tempdir().unwrap();
    let config = tenant_config(dir.path());

    let note = Record::new(RecordId::new("note", "42")).with_acl(
        vec![
            AclEntry::role("editor", AccessLevel::Write),
            AclEntry::direct("viewer-9", AccessLevel::Read),
        ]
        .into(),
    );

    let editor = Identity::new("user-1").with_role("editor");
    let viewer = Identity::new("viewer-9");
    let stranger = Identity::new("nobody");

    assert!(note.accessible(&editor, AccessLevel::Write));
    assert!(note.accessible(&viewer, AccessLevel::Read));
    assert!(!note.accessible(&viewer, AccessLevel::Write));
    assert!(!note.accessible(&stranger, AccessLevel::Read));

    // A record created with no grants falls back to the tenant default.
    let bare = Record::new(RecordId::new("note", "43"));
    assert!(!accessible_with_default(
        &bare.acl,
        &editor,
        AccessLevel::Read,
        config.acl.empty_acl
    ));
}

#[test]
fn asset_flow() {
    let dir = tempfile::tempdir().unwrap();
    let config = tenant_config(dir.path());

    let store = config.asset.file_store();
    store
        .put("avatars/1.png", &mut Cursor::new(b"png"), 3, "image/png")
        .unwrap();

    let signer = config.asset.signer();
    let issued = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    let url = signer.signed_url("avatars/1.png", issued);

    // The serving layer parses the query back out of the request.
    let query = url.split_once('?').unwrap().1;
    let mut expired_at = "";
    let mut signature = "";
    for pair in query.split('&') {
        let (key, value) = pair.split_once('=').unwrap();
        match key {
            "expiredAt" => expired_at = value,
            "signature" => signature = value,
            _ => {}
        }
    }

    assert_eq!(
        signer.verify("avatars/1.png", expired_at, signature, issued),
        Ok(())
    );
    assert_eq!(
        signer.verify(
            "avatars/1.png",
            expired_at,
            signature,
            issued + TimeDelta::hours(1)
        ),
        Err(SignatureError::Expired)
    );

    // Verified request streams the asset bytes.
    let mut contents = Vec::new();
    store
        .open("avatars/1.png")
        .unwrap()
        .read_to_end(&mut contents)
        .unwrap();
    assert_eq!(contents, b"png");

    // Upload descriptor for the authenticated flow.
    assert_eq!(
        signer.post_file_request("avatars/2.png").action,
        "https://api.example.com/files/avatars/2.png"
    );
}

#[test]
fn password_flow() {
    let dir = tempfile::tempdir().unwrap();
    let config = tenant_config(dir.path());

    let mut profile = tourmaline::Data::new();
    profile.insert("first_name".to_string(), json!("Ada"));
    profile.insert("last_name".to_string(), json!("Lovelace"));

    assert_eq!(
        config.password.validate("short", Some(&profile)),
        Err(PolicyViolation::TooShort {
            min_length: 8,
            pw_length: 5
        })
    );
    assert_eq!(
        config.password.validate("adalovelace1", Some(&profile)),
        Err(PolicyViolation::ContainsExcludedKeywords)
    );
    assert_eq!(
        config.password.validate("tr0ub4dor-and-3", Some(&profile)),
        Ok(())
    );
}
