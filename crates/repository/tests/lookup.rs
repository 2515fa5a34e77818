//! Resolution engine behavior against a deterministic mirror double

use depot_config::{MirrorSettings, RepositorySettings};
use depot_core::Error;
use depot_remote::testing::FakeRemoteClient;
use depot_repository::{LookupRequest, RepositoryRegistry, Resolver};
use depot_token::{AccessToken, PathPattern, Permission, Route, TokenStore};
use indexmap::IndexMap;
use std::collections::BTreeSet;
use std::sync::Arc;

const REMOTE_REPOSITORY: &str = "https://domain.com/releases";
const REMOTE_AUTH: &str = "panda@secret";
const REMOTE_CONTENT: &[u8] = b"content";

struct Fixture {
    _workdir: tempfile::TempDir,
    resolver: Arc<Resolver>,
    remote: Arc<FakeRemoteClient>,
    tokens: TokenStore,
}

fn fixture(repositories: &[(&str, Vec<MirrorSettings>)]) -> Fixture {
    let workdir = tempfile::tempdir().unwrap();
    let mut settings = IndexMap::new();
    for (name, mirrors) in repositories {
        settings.insert(
            name.to_string(),
            RepositorySettings {
                storage_root: None,
                mirrors: mirrors.clone(),
            },
        );
    }

    let registry = RepositoryRegistry::from_settings(workdir.path(), &settings);
    let remote = Arc::new(FakeRemoteClient::new(
        REMOTE_REPOSITORY,
        REMOTE_AUTH,
        REMOTE_CONTENT,
    ));
    let resolver = Arc::new(Resolver::new(registry, remote.clone()));

    Fixture {
        _workdir: workdir,
        resolver,
        remote,
        tokens: TokenStore::new(),
    }
}

fn proxied_releases() -> Vec<MirrorSettings> {
    vec![MirrorSettings {
        uri: REMOTE_REPOSITORY.to_string(),
        credentials: Some(REMOTE_AUTH.to_string()),
    }]
}

/// Token holding one route, the way the console attaches them
fn token_for(fixture: &Fixture, name: &str, route: &str, permissions: &str) -> AccessToken {
    let created = fixture
        .tokens
        .create_token(name, None, BTreeSet::new())
        .unwrap();
    let mut token = created.token;
    token.routes = BTreeSet::from([Route::new(
        PathPattern::parse(route).unwrap(),
        Permission::parse_set(permissions).unwrap(),
    )]);
    fixture.tokens.update_token(token.clone()).unwrap();
    token
}

#[tokio::test]
async fn unknown_repositories_are_terminal() {
    let fixture = fixture(&[("releases", Vec::new())]);
    let token = token_for(&fixture, "alice", "/", "m");
    let request = LookupRequest::new(Some(token), "maven-central", "a/b");
    assert!(matches!(
        fixture.resolver.lookup(&request).await,
        Err(Error::RepositoryNotFound { .. })
    ));
}

#[tokio::test]
async fn missing_artifact_without_mirrors_is_not_found() {
    let fixture = fixture(&[("releases", Vec::new())]);
    let token = token_for(&fixture, "alice", "/", "m");
    let request = LookupRequest::new(Some(token), "releases", "com/x/y/1.0/y-1.0.xml");
    assert!(matches!(
        fixture.resolver.lookup(&request).await,
        Err(Error::NotFound { .. })
    ));
}

#[tokio::test]
async fn anonymous_lookups_are_unauthorized() {
    let fixture = fixture(&[("releases", Vec::new())]);
    let request = LookupRequest::new(None, "releases", "a/b");
    assert!(matches!(
        fixture.resolver.lookup(&request).await,
        Err(Error::Unauthorized { .. })
    ));
}

#[tokio::test]
async fn foreign_routes_do_not_authorize() {
    let fixture = fixture(&[("releases", proxied_releases())]);
    let token = token_for(&fixture, "alice", "/snapshots/", "r");
    let request = LookupRequest::new(Some(token), "releases", "a/b");
    assert!(matches!(
        fixture.resolver.lookup(&request).await,
        Err(Error::Unauthorized { .. })
    ));
}

#[tokio::test]
async fn mirrored_artifacts_are_fetched_and_cached() {
    let fixture = fixture(&[("releases", proxied_releases())]);
    let token = token_for(&fixture, "alice", "/releases/a/b", "r");

    let request = LookupRequest::new(Some(token), "releases", "a/b");
    let document = fixture.resolver.lookup(&request).await.unwrap();
    assert_eq!(document.name, "b");
    let bytes = document.content.into_bytes().await.unwrap();
    assert_eq!(&bytes[..], REMOTE_CONTENT);

    // mirror goes down; the cached copy must keep serving identical bytes
    fixture.remote.set_reachable(false);
    let cached = fixture.resolver.lookup(&request).await.unwrap();
    assert_eq!(cached.name, "b");
    assert_eq!(cached.length, Some(REMOTE_CONTENT.len() as u64));
    let cached_bytes = cached.content.into_bytes().await.unwrap();
    assert_eq!(cached_bytes, bytes);
}

#[tokio::test]
async fn wrong_mirror_credentials_surface_as_not_found() {
    let fixture = fixture(&[(
        "releases",
        vec![MirrorSettings {
            uri: REMOTE_REPOSITORY.to_string(),
            credentials: Some("panda@wrong".to_string()),
        }],
    )]);
    let token = token_for(&fixture, "alice", "/", "m");
    let request = LookupRequest::new(Some(token), "releases", "a/b");
    assert!(matches!(
        fixture.resolver.lookup(&request).await,
        Err(Error::NotFound { .. })
    ));
}

#[tokio::test]
async fn unreachable_mirrors_are_skipped_not_fatal() {
    let fixture = fixture(&[("releases", proxied_releases())]);
    fixture.remote.set_reachable(false);

    let token = token_for(&fixture, "alice", "/", "m");
    let request = LookupRequest::new(Some(token), "releases", "a/b");
    assert!(matches!(
        fixture.resolver.lookup(&request).await,
        Err(Error::NotFound { .. })
    ));
}

#[tokio::test]
async fn dead_mirrors_before_a_live_one_do_not_abort_the_chain() {
    let fixture = fixture(&[(
        "releases",
        vec![
            MirrorSettings {
                uri: "https://dead.example.com/releases".to_string(),
                credentials: None,
            },
            MirrorSettings {
                uri: REMOTE_REPOSITORY.to_string(),
                credentials: Some(REMOTE_AUTH.to_string()),
            },
        ],
    )]);

    let token = token_for(&fixture, "alice", "/", "m");
    let request = LookupRequest::new(Some(token), "releases", "a/b");
    let document = fixture.resolver.lookup(&request).await.unwrap();
    let bytes = document.content.into_bytes().await.unwrap();
    assert_eq!(&bytes[..], REMOTE_CONTENT);
}

#[tokio::test]
async fn concurrent_lookups_of_one_key_leave_one_clean_cache_entry() {
    let fixture = fixture(&[("releases", proxied_releases())]);
    let token = token_for(&fixture, "alice", "/releases/", "r");

    let mut handles = Vec::new();
    for _ in 0..50 {
        let resolver = fixture.resolver.clone();
        let request = LookupRequest::new(Some(token.clone()), "releases", "a/b");
        handles.push(tokio::spawn(async move {
            let document = resolver.lookup(&request).await.unwrap();
            document.content.into_bytes().await.unwrap()
        }));
    }
    for handle in handles {
        assert_eq!(&handle.await.unwrap()[..], REMOTE_CONTENT);
    }

    // exactly one uncorrupted copy on disk afterwards
    let repository = fixture.resolver.registry().find("releases").unwrap();
    let cached = repository.store().read("a/b").await.unwrap().unwrap();
    assert_eq!(&cached[..], REMOTE_CONTENT);

    let dir = repository.store().root().join("a");
    let entries: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(entries, ["b"]);
}

#[tokio::test]
async fn repositories_are_listed_per_token_visibility() {
    let fixture = fixture(&[("releases", Vec::new()), ("snapshots", Vec::new())]);

    let manager = token_for(&fixture, "admin", "/", "m");
    assert_eq!(
        fixture.resolver.find_repositories(Some(&manager)),
        ["releases", "snapshots"]
    );

    let scoped = token_for(&fixture, "alice", "/releases/com/x", "r");
    assert_eq!(
        fixture.resolver.find_repositories(Some(&scoped)),
        ["releases"]
    );

    assert!(fixture.resolver.find_repositories(None).is_empty());
}
