use freight_core::{
    canonical_string, Chart, Freight, FreightError, FreightList, GitCommit, Image, ObjectMeta,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn commits() -> Vec<GitCommit> {
    vec![
        GitCommit::new("https://github.com/example/app", "1f2e3d4c"),
        GitCommit::new("https://github.com/example/config", "9a8b7c6d"),
    ]
}

fn images() -> Vec<Image> {
    vec![
        Image::new("ghcr.io/example/api", "v2.0.1"),
        Image::new("ghcr.io/example/web", "v2.0.0"),
        Image::new("docker.io/library/redis", "7.2"),
    ]
}

fn charts() -> Vec<Chart> {
    vec![
        Chart::new("oci://ghcr.io/example/charts", "api", "1.4.0"),
        Chart::new("https://charts.example.com", "web", "0.9.2"),
    ]
}

fn bundle() -> Freight {
    Freight::new(commits(), images(), charts())
}

fn reversed<T: Clone>(items: &[T]) -> Vec<T> {
    items.iter().rev().cloned().collect()
}

// ---------------------------------------------------------------------------
// Determinism and order independence
// ---------------------------------------------------------------------------

#[test]
fn identical_content_yields_identical_id() {
    let a = bundle();
    let b = bundle();
    assert_eq!(a.id, b.id);
    assert_eq!(a.derive_id(), a.derive_id());
}

#[test]
fn id_independent_of_artifact_order() {
    let base = bundle();

    let permuted = Freight::new(reversed(&commits()), reversed(&images()), reversed(&charts()));
    assert_eq!(base.id, permuted.id);

    let mut rotated_images = images();
    rotated_images.rotate_left(1);
    let rotated = Freight::new(commits(), rotated_images, charts());
    assert_eq!(base.id, rotated.id);
}

#[test]
fn commit_and_image_scenario_stable_under_reordering() {
    let commit = GitCommit::new("https://example.com/repo", "abc123");
    let image = Image::new("example.com/img", "v1");

    let a = Freight::new(vec![commit.clone()], vec![image.clone()], vec![]);
    assert_eq!(
        canonical_string(&a),
        "example.com/img:v1|https://example.com/repo:abc123"
    );

    let mut b = Freight {
        images: vec![image],
        ..Default::default()
    };
    b.commits.push(commit);
    b.update_id();
    assert_eq!(a.id, b.id);
    assert_eq!(a.id, "daf56cde7f1b01a378b14bce20f81a8f3366345f");
}

#[test]
fn mixed_categories_hash_to_known_id() {
    let a = Freight::new(
        vec![GitCommit::new("https://g/x", "Z")],
        vec![Image::new("nginx", "1.25")],
        vec![Chart::new("oci://r", "b", "2"), Chart::new("oci://r", "a", "1")],
    );
    assert_eq!(
        canonical_string(&a),
        "https://g/x:Z|nginx:1.25|oci://r/a:1|oci://r/b:2"
    );
    assert_eq!(a.id, "d3cc4053f8ba0d9c371682279d86af06646cf3f1");

    let b = Freight::new(
        vec![GitCommit::new("https://g/x", "Z")],
        vec![Image::new("nginx", "1.25")],
        vec![Chart::new("oci://r", "a", "1"), Chart::new("oci://r", "b", "2")],
    );
    assert_eq!(b.id, a.id);
}

#[test]
fn same_charts_in_opposite_order_are_equal() {
    let first = Chart::new("oci://registry.example.com", "frontend", "1.0.0");
    let second = Chart::new("oci://registry.example.com", "backend", "2.3.4");

    let a = Freight::new(vec![], vec![], vec![first.clone(), second.clone()]);
    let b = Freight::new(vec![], vec![], vec![second, first]);
    assert_eq!(a.id, b.id);
    assert!(a.same_content(&b).expect("both identified"));
}

#[test]
fn empty_bundle_has_fixed_id() {
    let a = Freight::new(vec![], vec![], vec![]);
    let b = Freight::new(vec![], vec![], vec![]).with_metadata(ObjectMeta::named("ns", "other"));
    assert_eq!(a.id, "da39a3ee5e6b4b0d3255bfef95601890afd80709");
    assert_eq!(a.id, b.id);
}

// ---------------------------------------------------------------------------
// Content sensitivity
// ---------------------------------------------------------------------------

#[test]
fn every_identity_field_changes_id() {
    let base = bundle().id;

    let mutations: [(&str, fn(&mut Freight)); 9] = [
        ("commit repo_url", |f| f.commits[0].repo_url.push('x')),
        ("commit id", |f| f.commits[0].id = "deadbeef".to_string()),
        ("image repo_url", |f| f.images[1].repo_url.push('x')),
        ("image tag", |f| f.images[1].tag = "v2.0.1".to_string()),
        ("chart registry_url", |f| f.charts[0].registry_url.push('x')),
        ("chart name", |f| f.charts[0].name = "worker".to_string()),
        ("chart version", |f| f.charts[0].version = "1.4.1".to_string()),
        ("extra image", |f| f.images.push(Image::new("nginx", "1.25"))),
        ("dropped chart", |f| { f.charts.pop(); }),
    ];

    for (label, mutate) in mutations {
        let mut freight = bundle();
        mutate(&mut freight);
        let id = freight.update_id();
        assert_ne!(id.as_str(), base, "changing {label} should change the id");
    }
}

#[test]
fn category_does_not_matter_only_token() {
    // A commit and an image with the same repo and version produce the same token.
    let as_commit = Freight::new(vec![GitCommit::new("repo", "v1")], vec![], vec![]);
    let as_image = Freight::new(vec![], vec![Image::new("repo", "v1")], vec![]);
    assert_eq!(as_commit.id, as_image.id);
}

// ---------------------------------------------------------------------------
// Excluded fields
// ---------------------------------------------------------------------------

#[test]
fn non_identity_fields_do_not_change_id() {
    let base = bundle();

    let mut freight = bundle().with_metadata(ObjectMeta::named("kargo-demo", "f1"));
    freight.commits[0].branch = "release-1.x".to_string();
    freight.commits[0].health_check_commit = "ffffffff".to_string();
    freight.commits[0].message = "bump dependencies".to_string();
    freight.commits[0].author = "Jane Doe <jane@example.com>".to_string();
    freight.qualify("test");
    freight.qualify("uat");
    freight
        .metadata
        .labels
        .insert("team".to_string(), "platform".to_string());

    assert_eq!(freight.derive_id().as_str(), base.id);
    assert!(freight.verify_id().is_ok());
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn mutation_makes_id_stale_until_rederived() {
    let mut freight = bundle();
    freight.images.push(Image::new("nginx", "1.25"));

    assert!(!freight.is_identified());
    assert!(matches!(
        freight.verify_id(),
        Err(FreightError::StaleId { .. })
    ));

    freight.update_id();
    assert!(freight.is_identified());
}

#[test]
fn deserialized_freight_keeps_stored_id_for_verification() {
    let original = bundle();
    let json = serde_json::to_string(&original).expect("serialize");
    let parsed: Freight = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(parsed.id, original.id);
    assert_eq!(parsed.verify_id().expect("current id").as_str(), original.id);
}

#[test]
fn list_items_compare_by_id() {
    let list = FreightList::new(vec![
        bundle(),
        Freight::new(reversed(&commits()), images(), charts()),
        Freight::new(vec![], images(), vec![]),
    ]);
    let json = serde_json::to_string(&list).expect("serialize");
    let parsed: FreightList = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(parsed.items[0].id, parsed.items[1].id);
    assert_ne!(parsed.items[0].id, parsed.items[2].id);
}

#[test]
fn identification_is_thread_safe_on_shared_freight() {
    let freight = std::sync::Arc::new(bundle());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let freight = std::sync::Arc::clone(&freight);
            std::thread::spawn(move || freight.derive_id())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("thread").as_str(), freight.id);
    }
}
