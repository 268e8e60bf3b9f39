// tests/resolver_test.rs
use git_release::version::{resolve_version, ReleaseContext, ReleaseType};

fn base(current: &str) -> ReleaseContext {
    ReleaseContext {
        current_version: current.to_string(),
        ..ReleaseContext::default()
    }
}

#[test]
fn test_plain_bumps_follow_semver_increment_rules() {
    let cases = [
        ("0.2.1", ReleaseType::Major, "1.0.0"),
        ("0.2.1", ReleaseType::Minor, "0.3.0"),
        ("0.2.1", ReleaseType::Patch, "0.2.2"),
        ("1.2.3", ReleaseType::Major, "2.0.0"),
        ("1.2.3", ReleaseType::Minor, "1.3.0"),
        ("1.2.3", ReleaseType::Patch, "1.2.4"),
        ("9.9.9", ReleaseType::Major, "10.0.0"),
    ];

    for (current, bump, expected) in cases {
        assert_eq!(
            resolve_version(&base(current), bump).unwrap(),
            expected,
            "{} + {}",
            current,
            bump
        );
    }
}

#[test]
fn test_first_release_returns_current_version_unchanged() {
    for bump in [ReleaseType::Major, ReleaseType::Minor, ReleaseType::Patch] {
        let mut ctx = base("2.7.1");
        ctx.first_release = true;
        assert_eq!(resolve_version(&ctx, bump).unwrap(), "2.7.1");
    }

    // first_release also beats an exact override
    let mut ctx = base("2.7.1");
    ctx.first_release = true;
    ctx.set_release_as("9.0.0").unwrap();
    assert_eq!(resolve_version(&ctx, ReleaseType::Patch).unwrap(), "2.7.1");
}

#[test]
fn test_exact_override_always_wins() {
    let mut ctx = base("1.2.3");
    ctx.set_release_as("v100.0.0").unwrap();
    assert_eq!(
        resolve_version(&ctx, ReleaseType::Patch).unwrap(),
        "100.0.0"
    );

    let mut ctx = base("0.0.1");
    ctx.set_release_as("100.0.0").unwrap();
    assert_eq!(
        resolve_version(&ctx, ReleaseType::Major).unwrap(),
        "100.0.0"
    );
}

#[test]
fn test_prerelease_continuation_worked_example() {
    // Starting at 1.0.0 with prerelease id "dev":
    // patch request starts the line
    let mut ctx = base("1.0.0");
    ctx.prerelease_id = Some("dev".to_string());
    ctx.requested = Some(ReleaseType::Patch);
    let v1 = resolve_version(&ctx, ReleaseType::Patch).unwrap();
    assert_eq!(v1, "1.0.1-dev.0");

    // no explicit request: the patch-boundary line continues
    let mut ctx = base(&v1);
    ctx.prerelease_id = Some("dev".to_string());
    let v2 = resolve_version(&ctx, ReleaseType::Patch).unwrap();
    assert_eq!(v2, "1.0.1-dev.1");

    // a minor request outranks the active patch line and starts a new one
    let mut ctx = base(&v2);
    ctx.prerelease_id = Some("dev".to_string());
    ctx.requested = Some(ReleaseType::Minor);
    let v3 = resolve_version(&ctx, ReleaseType::Patch).unwrap();
    assert_eq!(v3, "1.1.0-dev.0");

    // the same minor request now continues the minor line
    let mut ctx = base(&v3);
    ctx.prerelease_id = Some("dev".to_string());
    ctx.requested = Some(ReleaseType::Minor);
    let v4 = resolve_version(&ctx, ReleaseType::Patch).unwrap();
    assert_eq!(v4, "1.1.0-dev.1");

    // a bare prerelease continues too: the active minor outranks patch
    let mut ctx = base(&v4);
    ctx.prerelease_id = Some("dev".to_string());
    let v5 = resolve_version(&ctx, ReleaseType::Patch).unwrap();
    assert_eq!(v5, "1.1.0-dev.2");
}

#[test]
fn test_pre_major_rule() {
    // A breaking change below 1.0.0 is recommended as minor by the
    // commit-history collaborator; the resolver applies it as-is.
    assert_eq!(
        resolve_version(&base("0.5.0"), ReleaseType::Minor).unwrap(),
        "0.6.0"
    );

    // An explicit major override still crosses 1.0.0
    let mut ctx = base("0.5.0");
    ctx.set_release_as("major").unwrap();
    assert_eq!(resolve_version(&ctx, ReleaseType::Minor).unwrap(), "1.0.0");
}

#[test]
fn test_invalid_current_version_is_rejected() {
    assert!(resolve_version(&base("1.2"), ReleaseType::Patch).is_err());
    assert!(resolve_version(&base("abc"), ReleaseType::Patch).is_err());
    assert!(resolve_version(&base(""), ReleaseType::Patch).is_err());
}

#[test]
fn test_graduating_a_prerelease_without_id() {
    // Without a prerelease id the bump applies directly, stripping the
    // prerelease suffix at the component boundary.
    assert_eq!(
        resolve_version(&base("1.1.0-dev.2"), ReleaseType::Minor).unwrap(),
        "1.1.0"
    );
    assert_eq!(
        resolve_version(&base("1.0.1-dev.4"), ReleaseType::Patch).unwrap(),
        "1.0.1"
    );
}

#[test]
fn test_changed_prerelease_identifier_restarts_suffix() {
    let mut ctx = base("1.0.1-alpha.2");
    ctx.prerelease_id = Some("beta".to_string());
    assert_eq!(
        resolve_version(&ctx, ReleaseType::Patch).unwrap(),
        "1.0.1-beta.0"
    );
}
